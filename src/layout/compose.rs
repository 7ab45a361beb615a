use super::measure::{Fragment, Measured, Measurer};
use super::text::{aligned_x, baseline_offset};
use super::{LayoutOptions, PageContext, PageGeometry, Typography};
use crate::colour::colours;
use crate::document::Document;
use crate::image::Image;
use crate::model::{Align, Block, Photo, Report, Table};
use crate::outline::OutlineEntry;
use crate::page::{Page, Placement, PlacementKind, SpanLayout};
use crate::units::Pt;
use crate::ReportError;
use id_arena::Id;
use std::collections::BTreeMap;

/// Text repeated on every page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    pub title: String,
    pub subtitle: Option<String>,
    pub footer: Option<String>,
}

impl Decorations {
    pub fn for_report(report: &Report) -> Decorations {
        Decorations {
            title: report.title.clone(),
            subtitle: report.subtitle.clone(),
            footer: report.footer.clone(),
        }
    }
}

/// Decoded photos, keyed by (section, block, photo) index
pub type PhotoAssets = BTreeMap<(usize, usize, usize), Id<Image>>;

/// The output of a composition: finished pages and where each titled section starts
pub struct Composition {
    pub pages: Vec<Page>,
    pub bookmarks: Vec<OutlineEntry>,
}

/// Places blocks on pages top to bottom, breaking to a new page whenever the
/// next block doesn't fit in what is left of the current one.
///
/// A composer is built for one report and consumed by [`Composer::finish`].
pub struct Composer<'a> {
    measurer: Measurer<'a>,
    decorations: Decorations,
    photos: PhotoAssets,
    ctx: PageContext,
    current: Page,
    pages: Vec<Page>,
    bookmarks: Vec<OutlineEntry>,
}

impl<'a> Composer<'a> {
    /// Start composing onto the first page of a new layout. Fails if the
    /// typography refers to fonts the document doesn't have.
    pub fn new(
        document: &'a Document,
        typography: &'a Typography,
        options: &'a LayoutOptions,
        decorations: Decorations,
    ) -> Result<Composer<'a>, ReportError> {
        let measurer = Measurer::new(&document.fonts, &document.images, typography, options)?;
        let geometry = options.geometry;
        let mut composer = Composer {
            measurer,
            decorations,
            photos: PhotoAssets::default(),
            ctx: PageContext::new(geometry),
            current: Page::new(&geometry),
            pages: Vec::default(),
            bookmarks: Vec::default(),
        };
        composer.decorate();
        Ok(composer)
    }

    /// Use photos that were already decoded into the document
    pub fn with_photos(mut self, photos: PhotoAssets) -> Self {
        self.photos = photos;
        self
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    fn geometry(&self) -> PageGeometry {
        self.ctx.geometry
    }

    /// Move the cursor down without drawing anything
    pub fn advance(&mut self, by: Pt) {
        self.ctx.advance(by);
    }

    /// Start a new page if `required` doesn't fit below the cursor. Returns whether
    /// a page was started.
    ///
    /// A block taller than a whole page would never fit anywhere, so on a page
    /// that is still empty no break happens and the block is left to overflow.
    pub fn check_page_break(&mut self, required: Pt) -> bool {
        if self.ctx.fits(required) {
            return false;
        }
        if self.ctx.at_top() {
            log::warn!(
                "{} tall block doesn't fit on an empty page ({} available), it will overflow",
                required,
                self.ctx.remaining()
            );
            return false;
        }
        self.new_page();
        true
    }

    fn new_page(&mut self) {
        let geometry = self.geometry();
        let finished = std::mem::replace(&mut self.current, Page::new(&geometry));
        self.pages.push(finished);
        self.ctx.next_page();
        log::debug!("starting page {}", self.ctx.page_index + 1);
        self.decorate();
    }

    /// Draw the header and footer of the current page. Both live in the margins.
    fn decorate(&mut self) {
        let geometry = self.geometry();
        let typography = self.measurer.typography;
        let bold = self.measurer.bold;
        let regular = self.measurer.regular;

        // header: title left, subtitle right, above a rule at the top margin
        let size = typography.title_size;
        let line_height = bold.font.line_height(size);
        let rule_y = geometry.top() - Pt(6.0);
        let line_top = rule_y - Pt(2.0) - line_height;
        let mut header = Measured::blank(Pt::ZERO);
        header.fragments.push(Fragment::Text {
            text: self.decorations.title.clone(),
            font: bold.span(size),
            colour: colours::ACCENT,
            x: geometry.left(),
            baseline: line_top + baseline_offset(bold.font, size),
        });
        if let Some(subtitle) = self.decorations.subtitle.as_deref() {
            let small = typography.small_size;
            let width = regular.font.width_of_text(subtitle, small);
            header.fragments.push(Fragment::Text {
                text: subtitle.to_string(),
                font: regular.span(small),
                colour: colours::MUTED,
                x: aligned_x(Align::Right, geometry.left(), geometry.content_width(), width),
                baseline: line_top + baseline_offset(bold.font, size),
            });
        }
        header.fragments.push(Fragment::Line {
            from: (geometry.left(), rule_y),
            to: (geometry.right(), rule_y),
            width: Pt(0.75),
            colour: colours::ACCENT,
        });
        header.draw(&mut self.current, &geometry, Pt::ZERO);
        self.current.add_placement(Placement {
            kind: PlacementKind::Header,
            section: None,
            block: None,
            top: line_top.max(Pt::ZERO),
            bottom: geometry.top(),
        });

        // footer: a rule below the bottom margin, the note under it
        let (rule_y, line_top, line_height) = self.footer_line();
        let mut footer = Measured::blank(Pt::ZERO);
        footer.fragments.push(Fragment::Line {
            from: (geometry.left(), rule_y),
            to: (geometry.right(), rule_y),
            width: Pt(0.5),
            colour: colours::RULE,
        });
        if let Some(note) = self.decorations.footer.as_deref() {
            let small = typography.small_size;
            footer.fragments.push(Fragment::Text {
                text: note.to_string(),
                font: regular.span(small),
                colour: colours::MUTED,
                x: geometry.left(),
                baseline: line_top + baseline_offset(regular.font, small),
            });
        }
        footer.draw(&mut self.current, &geometry, Pt::ZERO);
        self.current.add_placement(Placement {
            kind: PlacementKind::Footer,
            section: None,
            block: None,
            top: geometry.break_limit(),
            bottom: line_top + line_height,
        });
    }

    /// Cursor positions of the footer rule and the footer text line, and the
    /// footer line height
    fn footer_line(&self) -> (Pt, Pt, Pt) {
        let geometry = self.geometry();
        let small = self.measurer.typography.small_size;
        let rule_y = geometry.break_limit() + Pt(6.0);
        let line_top = rule_y + Pt(2.0);
        (rule_y, line_top, self.measurer.regular.font.line_height(small))
    }

    /// Draw a measured band at the cursor, record it, and move the cursor past it.
    /// Section titles are recorded without a block index.
    fn place(&mut self, measured: &Measured, kind: PlacementKind, section: usize, block: Option<usize>) {
        let top = self.ctx.cursor;
        let geometry = self.geometry();
        measured.draw(&mut self.current, &geometry, top);
        self.current.add_placement(Placement {
            kind,
            section: Some(section),
            block,
            top,
            bottom: top + measured.height,
        });
        log::debug!(
            "placed {:?} of section {} block {:?} on page {} at {}",
            kind,
            section,
            block,
            self.ctx.page_index + 1,
            top
        );
        self.ctx.advance(measured.height);
    }

    /// Break if needed, draw, and leave the block spacing after it. Blocks with
    /// break points (wrapped text) are split between lines and continue on the
    /// next page instead of running off the bottom of this one.
    fn place_block(&mut self, mut measured: Measured, kind: PlacementKind, section: usize, block: usize) {
        self.check_page_break(measured.leading_height());
        while !self.ctx.fits(measured.height) {
            match measured.last_break_within(self.ctx.remaining()) {
                Some(at) => {
                    let (head, tail) = measured.split_at(at);
                    self.place(&head, kind, section, Some(block));
                    log::debug!(
                        "section {} block {} continues on page {}",
                        section,
                        block,
                        self.ctx.page_index + 2
                    );
                    self.new_page();
                    measured = tail;
                }
                None => {
                    if !self.check_page_break(measured.leading_height()) {
                        break;
                    }
                }
            }
        }
        self.place(&measured, kind, section, Some(block));
        self.ctx.advance(self.measurer.options.block_spacing);
    }

    /// Lay out every section of the report in order
    pub fn compose_report(&mut self, report: &Report) {
        for (section_index, section) in report.sections.iter().enumerate() {
            if let Some(title) = &section.title {
                // keep the title on the same page as the start of the first block
                let measured = self.measurer.heading(title);
                let spacing = self.measurer.options.block_spacing;
                let first = section
                    .blocks
                    .first()
                    .map(|block| spacing + self.leading_height(block, section_index, 0))
                    .unwrap_or(Pt::ZERO);
                self.check_page_break(measured.height + first);
                let geometry = self.geometry();
                self.bookmarks.push(OutlineEntry {
                    title: title.text.clone(),
                    page_index: self.ctx.page_index,
                    top: geometry.to_pdf_y(self.ctx.cursor),
                });
                self.place(&measured, PlacementKind::Heading, section_index, None);
                self.ctx.advance(self.measurer.options.block_spacing);
            }

            for (block_index, block) in section.blocks.iter().enumerate() {
                self.compose_block(block, section_index, block_index);
            }
        }
    }

    fn compose_block(&mut self, block: &Block, section: usize, index: usize) {
        match block {
            Block::Heading(heading) => {
                let measured = self.measurer.heading(heading);
                self.place_block(measured, PlacementKind::Heading, section, index);
            }
            Block::Paragraph(text) => {
                let measured = self.measurer.paragraph(text);
                self.place_block(measured, PlacementKind::Paragraph, section, index);
            }
            Block::KeyValue(key_value) => {
                let measured = self.measurer.key_value(key_value);
                self.place_block(measured, PlacementKind::KeyValue, section, index);
            }
            Block::Spacer(height) => {
                self.place_block(Measured::blank(*height), PlacementKind::Spacer, section, index);
            }
            Block::Rule => {
                let measured = self.measurer.rule();
                self.place_block(measured, PlacementKind::Rule, section, index);
            }
            Block::Table(table) => self.compose_table(table, section, index),
            Block::Photos(photos) => self.compose_photos(photos, section, index),
        }
    }

    /// Tables start on a new page unless their header and first row fit together.
    /// Rows that don't fit continue on the next page under a repeated header band.
    fn compose_table(&mut self, table: &Table, section: usize, index: usize) {
        let layout = self.measurer.table(table);
        if layout.header.is_none() && layout.rows.is_empty() {
            return;
        }

        self.check_page_break(layout.leading_height());
        if let Some(header) = &layout.header {
            self.place(header, PlacementKind::TableHeader, section, Some(index));
        }

        for (row_index, row) in layout.rows.iter().enumerate() {
            if !self.ctx.fits(row.height) && self.check_page_break(layout.header_height() + row.height) {
                log::debug!(
                    "table continues on page {} from row {}",
                    self.ctx.page_index + 1,
                    row_index
                );
                if let Some(header) = &layout.header {
                    self.place(header, PlacementKind::TableHeader, section, Some(index));
                }
            }
            if !self.ctx.fits(row.height) {
                log::warn!("table row {} is taller than a page, it will overflow", row_index);
            }
            self.place(row, PlacementKind::TableRow(row_index), section, Some(index));
        }
        self.ctx.advance(self.measurer.options.block_spacing);
    }

    /// Photos are laid out in rows; each row is placed like a block of its own
    fn compose_photos(&mut self, photos: &[Photo], section: usize, index: usize) {
        for (row_index, row) in self.photo_rows(photos, section, index).iter().enumerate() {
            self.check_page_break(row.height);
            self.place(row, PlacementKind::Photos(row_index), section, Some(index));
            self.ctx.advance(self.measurer.options.photo_gap);
        }
        self.ctx.advance(self.measurer.options.block_spacing);
    }

    fn photo_rows(&self, photos: &[Photo], section: usize, index: usize) -> Vec<Measured> {
        let loaded: Vec<(Id<Image>, Option<&str>)> = photos
            .iter()
            .enumerate()
            .filter_map(|(i, photo)| match self.photos.get(&(section, index, i)) {
                Some(id) => Some((*id, photo.caption.as_deref())),
                None => {
                    log::warn!(
                        "photo {} of section {} block {} was never loaded",
                        i,
                        section,
                        index
                    );
                    None
                }
            })
            .collect();
        loaded
            .chunks(self.measurer.options.photo_columns.max(1))
            .map(|row| self.measurer.photo_row(row))
            .collect()
    }

    /// How much of a block has to fit on a page for the block to start there.
    /// Wrapped text only needs its first line.
    fn leading_height(&self, block: &Block, section: usize, index: usize) -> Pt {
        match block {
            Block::Heading(heading) => self.measurer.heading(heading).height,
            Block::Paragraph(text) => self.measurer.paragraph(text).leading_height(),
            Block::KeyValue(key_value) => self.measurer.key_value(key_value).leading_height(),
            Block::Spacer(_) => Pt::ZERO,
            Block::Rule => self.measurer.rule().height,
            Block::Table(table) => self.measurer.table(table).leading_height(),
            Block::Photos(photos) => self
                .photo_rows(photos, section, index)
                .first()
                .map(|row| row.height)
                .unwrap_or(Pt::ZERO),
        }
    }

    /// Stamp "Page i of N" into every footer and hand back the pages
    pub fn finish(mut self) -> Composition {
        let geometry = self.geometry();
        let finished = std::mem::replace(&mut self.current, Page::new(&geometry));
        self.pages.push(finished);

        let count = self.pages.len();
        let regular = self.measurer.regular;
        let small = self.measurer.typography.small_size;
        let (_, line_top, line_height) = self.footer_line();
        for (i, page) in self.pages.iter_mut().enumerate() {
            let text = format!("Page {} of {}", i + 1, count);
            let width = regular.font.width_of_text(&text, small);
            page.add_span(SpanLayout {
                coords: (
                    aligned_x(Align::Right, geometry.left(), geometry.content_width(), width),
                    geometry.to_pdf_y(line_top + baseline_offset(regular.font, small)),
                ),
                text,
                font: regular.span(small),
                colour: colours::MUTED,
            });
            page.add_placement(Placement {
                kind: PlacementKind::PageNumber,
                section: None,
                block: None,
                top: line_top,
                bottom: line_top + line_height,
            });
        }

        Composition {
            pages: self.pages,
            bookmarks: self.bookmarks,
        }
    }
}
