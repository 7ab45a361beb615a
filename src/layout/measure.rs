use super::text::{aligned_x, baseline_offset, wrap_text};
use super::{LayoutOptions, PageGeometry, Typography};
use crate::colour::{colours, Colour};
use crate::font::Font;
use crate::image::Image;
use crate::model::{Align, Heading, KeyValue};
use crate::page::{FillLayout, ImageLayout, LineLayout, Page, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use crate::ReportError;
use id_arena::{Arena, Id};

/// A single drawing instruction of a measured block.
///
/// `x` coordinates are absolute page coordinates, `y` coordinates are distances
/// down from the top of the block. Drawing a block at a cursor position only
/// has to shift the `y`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text {
        text: String,
        font: SpanFont,
        colour: Colour,
        x: Pt,
        baseline: Pt,
    },
    Fill {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        colour: Colour,
    },
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        width: Pt,
        colour: Colour,
    },
    Image {
        image_id: Id<Image>,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
    },
}

impl Fragment {
    /// The position that decides which side of a split the fragment lands on
    fn anchor(&self) -> Pt {
        match self {
            Fragment::Text { baseline, .. } => *baseline,
            Fragment::Fill { y, .. } | Fragment::Image { y, .. } => *y,
            Fragment::Line { from, to, .. } => from.1.min(to.1),
        }
    }

    fn shift_up(&mut self, by: Pt) {
        match self {
            Fragment::Text { baseline, .. } => *baseline = *baseline - by,
            Fragment::Fill { y, .. } | Fragment::Image { y, .. } => *y = *y - by,
            Fragment::Line { from, to, .. } => {
                from.1 = from.1 - by;
                to.1 = to.1 - by;
            }
        }
    }
}

/// A block that has been measured but not yet placed: how tall it is and what
/// drawing it takes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measured {
    pub height: Pt,
    pub fragments: Vec<Fragment>,
    /// Offsets from the top where the block may be split across pages, in
    /// increasing order. Empty for blocks that must stay whole.
    pub breaks: Vec<Pt>,
}

impl Measured {
    pub fn new(height: Pt, fragments: Vec<Fragment>) -> Measured {
        Measured {
            height,
            fragments,
            breaks: Vec::default(),
        }
    }

    /// Something that takes up vertical space but draws nothing
    pub fn blank(height: Pt) -> Measured {
        Measured::new(height, Vec::default())
    }

    /// Height of the part that has to fit for the block to start on a page:
    /// everything above the first break
    pub fn leading_height(&self) -> Pt {
        self.breaks.first().copied().unwrap_or(self.height)
    }

    /// The lowest break that leaves a non-empty head no taller than `available`
    pub fn last_break_within(&self, available: Pt) -> Option<Pt> {
        self.breaks
            .iter()
            .rev()
            .copied()
            .find(|at| *at > Pt::ZERO && *at <= available)
    }

    /// Split the block at `at`. Fragments anchored above the split stay in the
    /// head, the rest move into the tail, which starts at its own top.
    pub fn split_at(self, at: Pt) -> (Measured, Measured) {
        let (head_fragments, mut tail_fragments): (Vec<Fragment>, Vec<Fragment>) =
            self.fragments.into_iter().partition(|f| f.anchor() < at);
        for fragment in tail_fragments.iter_mut() {
            fragment.shift_up(at);
        }
        let head = Measured {
            height: at,
            fragments: head_fragments,
            breaks: self.breaks.iter().copied().filter(|b| *b < at).collect(),
        };
        let tail = Measured {
            height: self.height - at,
            fragments: tail_fragments,
            breaks: self
                .breaks
                .iter()
                .copied()
                .filter(|b| *b > at)
                .map(|b| b - at)
                .collect(),
        };
        (head, tail)
    }

    /// Draw the fragments onto a page, with the top of the block at `top`
    /// (in cursor space)
    pub fn draw(&self, page: &mut Page, geometry: &PageGeometry, top: Pt) {
        for fragment in self.fragments.iter() {
            match fragment {
                Fragment::Text {
                    text,
                    font,
                    colour,
                    x,
                    baseline,
                } => page.add_span(SpanLayout {
                    text: text.clone(),
                    font: *font,
                    colour: *colour,
                    coords: (*x, geometry.to_pdf_y(top + *baseline)),
                }),
                Fragment::Fill {
                    x,
                    y,
                    width,
                    height,
                    colour,
                } => page.add_fill(FillLayout {
                    rect: pdf_rect(geometry, *x, top + *y, *width, *height),
                    colour: *colour,
                }),
                Fragment::Line {
                    from,
                    to,
                    width,
                    colour,
                } => page.add_line(LineLayout {
                    from: (from.0, geometry.to_pdf_y(top + from.1)),
                    to: (to.0, geometry.to_pdf_y(top + to.1)),
                    width: *width,
                    colour: *colour,
                }),
                Fragment::Image {
                    image_id,
                    x,
                    y,
                    width,
                    height,
                } => page.add_image(ImageLayout {
                    image_id: *image_id,
                    position: pdf_rect(geometry, *x, top + *y, *width, *height),
                }),
            }
        }
    }
}

/// A top-down box flipped into PDF space
fn pdf_rect(geometry: &PageGeometry, x: Pt, top: Pt, width: Pt, height: Pt) -> Rect {
    Rect::from_xywh(x, geometry.to_pdf_y(top + height), width, height)
}

/// A font resolved from the document together with its id
#[derive(Copy, Clone)]
pub(crate) struct Face<'a> {
    pub id: Id<Font>,
    pub font: &'a Font,
}

impl<'a> Face<'a> {
    fn resolve(fonts: &'a Arena<Font>, id: Id<Font>) -> Result<Face<'a>, ReportError> {
        let font = fonts.get(id).ok_or(ReportError::FontMissing(id.index()))?;
        Ok(Face { id, font })
    }

    pub fn span(&self, size: Pt) -> SpanFont {
        SpanFont { id: self.id, size }
    }
}

/// Measures blocks against the fonts and images of a document
pub(crate) struct Measurer<'a> {
    pub regular: Face<'a>,
    pub bold: Face<'a>,
    pub secondary: Face<'a>,
    pub images: &'a Arena<Image>,
    pub typography: &'a Typography,
    pub options: &'a LayoutOptions,
}

impl<'a> Measurer<'a> {
    pub fn new(
        fonts: &'a Arena<Font>,
        images: &'a Arena<Image>,
        typography: &'a Typography,
        options: &'a LayoutOptions,
    ) -> Result<Measurer<'a>, ReportError> {
        let bold = Face::resolve(fonts, typography.bold)?;
        Ok(Measurer {
            regular: Face::resolve(fonts, typography.regular)?,
            bold,
            secondary: match typography.secondary {
                Some(id) => Face::resolve(fonts, id)?,
                None => bold,
            },
            images,
            typography,
            options,
        })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.options.geometry
    }

    /// Wrapped lines of text as fragments, the first line box starting at `top`
    #[allow(clippy::too_many_arguments)]
    pub fn text_lines(
        &self,
        fragments: &mut Vec<Fragment>,
        text: &str,
        face: Face<'_>,
        size: Pt,
        colour: Colour,
        left: Pt,
        width: Pt,
        align: Align,
        top: Pt,
    ) -> usize {
        let line_height = face.font.line_height(size);
        let baseline = baseline_offset(face.font, size);
        let mut count = 0;
        for (i, line) in wrap_text(text, face.font, size, width).enumerate() {
            count += 1;
            if line.is_empty() {
                continue;
            }
            let line_width = face.font.width_of_text(&line, size);
            fragments.push(Fragment::Text {
                x: aligned_x(align, left, width, line_width),
                baseline: top + line_height * i as f32 + baseline,
                text: line,
                font: face.span(size),
                colour,
            });
        }
        count
    }

    /// A bold heading underlined in the accent colour. A secondary label is set
    /// flush right on the first line, and the primary text wraps to the left of it.
    pub fn heading(&self, heading: &Heading) -> Measured {
        let geometry = self.geometry();
        let size = self.typography.heading_size;
        let line_height = self.bold.font.line_height(size);
        let mut fragments = Vec::default();

        let mut primary_width = geometry.content_width();
        if let Some(secondary) = heading.secondary.as_deref().filter(|s| !s.is_empty()) {
            let secondary_width = self.secondary.font.width_of_text(secondary, size);
            fragments.push(Fragment::Text {
                text: secondary.to_string(),
                font: self.secondary.span(size),
                colour: colours::ACCENT,
                x: aligned_x(Align::Right, geometry.left(), geometry.content_width(), secondary_width),
                baseline: baseline_offset(self.secondary.font, size),
            });
            let gap = self.options.block_spacing;
            primary_width = (primary_width - secondary_width - gap).max(primary_width / 2.0);
        }

        let lines = self
            .text_lines(
                &mut fragments,
                &heading.text,
                self.bold,
                size,
                colours::ACCENT,
                geometry.left(),
                primary_width,
                Align::Left,
                Pt::ZERO,
            )
            .max(1);

        let rule_y = line_height * lines as f32 + Pt(2.0);
        fragments.push(Fragment::Line {
            from: (geometry.left(), rule_y),
            to: (geometry.right(), rule_y),
            width: Pt(1.0),
            colour: colours::ACCENT,
        });

        Measured::new(rule_y + Pt(2.0), fragments)
    }

    pub fn paragraph(&self, text: &str) -> Measured {
        let geometry = self.geometry();
        let size = self.typography.body_size;
        let mut fragments = Vec::default();
        let lines = self.text_lines(
            &mut fragments,
            text,
            self.regular,
            size,
            colours::TEXT,
            geometry.left(),
            geometry.content_width(),
            Align::Left,
            Pt::ZERO,
        );
        let line_height = self.regular.font.line_height(size);
        Measured {
            height: line_height * lines as f32,
            fragments,
            breaks: line_breaks(line_height, lines),
        }
    }

    /// A bold label in a fixed-width column with the value wrapping beside it
    pub fn key_value(&self, key_value: &KeyValue) -> Measured {
        let geometry = self.geometry();
        let size = self.typography.body_size;
        let gap = self.options.block_spacing;
        let label_width = geometry.content_width() * self.options.label_ratio;
        let value_left = geometry.left() + label_width + gap;
        let value_width = geometry.right() - value_left;
        let value = key_value
            .value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("N/A");
        let value_face = if key_value.emphasis {
            self.bold
        } else {
            self.regular
        };

        let mut fragments = Vec::default();
        let label_lines = self.text_lines(
            &mut fragments,
            &key_value.label,
            self.bold,
            size,
            colours::MUTED,
            geometry.left(),
            label_width,
            Align::Left,
            Pt::ZERO,
        );
        let value_lines = self.text_lines(
            &mut fragments,
            value,
            value_face,
            size,
            colours::TEXT,
            value_left,
            value_width,
            Align::Left,
            Pt::ZERO,
        );

        let line_height = self.regular.font.line_height(size).max(self.bold.font.line_height(size));
        let lines = label_lines.max(value_lines).max(1);
        Measured {
            height: line_height * lines as f32,
            fragments,
            breaks: line_breaks(line_height, lines),
        }
    }

    pub fn rule(&self) -> Measured {
        let geometry = self.geometry();
        let y = Pt(4.0);
        Measured::new(
            y * 2.0,
            vec![Fragment::Line {
                from: (geometry.left(), y),
                to: (geometry.right(), y),
                width: Pt(0.5),
                colour: colours::RULE,
            }],
        )
    }

    /// A row of photos side by side, each scaled to fit its cell and the maximum
    /// photo height, with its caption wrapped beneath it
    pub fn photo_row(&self, photos: &[(Id<Image>, Option<&str>)]) -> Measured {
        let geometry = self.geometry();
        let columns = self.options.photo_columns.max(1);
        let gap = self.options.photo_gap;
        let cell_width = (geometry.content_width() - gap * (columns - 1) as f32) / columns as f32;
        let caption_size = self.typography.small_size;
        let caption_line = self.regular.font.line_height(caption_size);

        let mut fragments = Vec::default();
        let mut height = Pt::ZERO;
        for (i, (image_id, caption)) in photos.iter().take(columns).enumerate() {
            let cell_left = geometry.left() + (cell_width + gap) * i as f32;
            let aspect = self
                .images
                .get(*image_id)
                .map(Image::aspect_ratio)
                .unwrap_or(1.0);

            let mut width = cell_width;
            let mut image_height = width / aspect;
            if image_height > self.options.photo_max_height {
                image_height = self.options.photo_max_height;
                width = image_height * aspect;
            }
            fragments.push(Fragment::Image {
                image_id: *image_id,
                x: aligned_x(Align::Center, cell_left, cell_width, width),
                y: Pt::ZERO,
                width,
                height: image_height,
            });

            let mut cell_height = image_height;
            if let Some(caption) = caption.filter(|c| !c.is_empty()) {
                let top = image_height + Pt(3.0);
                let lines = self.text_lines(
                    &mut fragments,
                    caption,
                    self.regular,
                    caption_size,
                    colours::MUTED,
                    cell_left,
                    cell_width,
                    Align::Center,
                    top,
                );
                cell_height = top + caption_line * lines as f32;
            }
            height = height.max(cell_height);
        }

        Measured::new(height, fragments)
    }
}

/// Split points between consecutive lines
fn line_breaks(line_height: Pt, lines: usize) -> Vec<Pt> {
    (1..lines).map(|i| line_height * i as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::layout::{Margins, PageGeometry};

    fn fixture() -> (Document, Typography, LayoutOptions) {
        let mut document = Document::default();
        let typography = Typography::standard(&mut document);
        let options = LayoutOptions::default().with_geometry(PageGeometry::new(
            (Pt(400.0), Pt(600.0)),
            Margins::all(Pt(50.0)),
        ));
        (document, typography, options)
    }

    fn texts(measured: &Measured) -> Vec<&str> {
        measured
            .fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn paragraph_height_matches_its_lines() {
        let (document, typography, options) = fixture();
        let measurer = Measurer::new(&document.fonts, &document.images, &typography, &options)
            .expect("fonts are registered");
        let measured = measurer.paragraph("one\ntwo\nthree");
        let line_height = Font::helvetica().line_height(typography.body_size);
        assert_eq!(measured.height, line_height * 3.0);
        assert_eq!(texts(&measured), vec!["one", "two", "three"]);
    }

    #[test]
    fn wrapped_text_splits_between_lines() {
        let (document, typography, options) = fixture();
        let measurer = Measurer::new(&document.fonts, &document.images, &typography, &options)
            .expect("fonts are registered");
        let line_height = Font::helvetica().line_height(typography.body_size);
        let measured = measurer.paragraph("one\ntwo\nthree");
        assert_eq!(measured.breaks, vec![line_height, line_height * 2.0]);
        assert_eq!(measured.leading_height(), line_height);
        assert_eq!(measured.last_break_within(line_height * 1.5), Some(line_height));
        assert_eq!(measured.last_break_within(line_height * 0.5), None);

        let first_baseline = match measured.fragments.first() {
            Some(Fragment::Text { baseline, .. }) => *baseline,
            _ => panic!("expected text"),
        };
        let (head, tail) = measured.split_at(line_height);
        assert_eq!(texts(&head), vec!["one"]);
        assert_eq!(head.height, line_height);
        assert!(head.breaks.is_empty());
        assert_eq!(texts(&tail), vec!["two", "three"]);
        assert_eq!(tail.height, line_height * 2.0);
        assert_eq!(tail.breaks, vec![line_height]);
        let Some(Fragment::Text { baseline, .. }) = tail.fragments.first() else {
            panic!("expected text");
        };
        assert!((baseline.0 - first_baseline.0).abs() < 1e-3);
    }

    #[test]
    fn headings_and_rules_stay_whole() {
        let (document, typography, options) = fixture();
        let measurer = Measurer::new(&document.fonts, &document.images, &typography, &options)
            .expect("fonts are registered");
        let heading = measurer.heading(&Heading::new("Kitchen"));
        assert!(heading.breaks.is_empty());
        assert_eq!(heading.leading_height(), heading.height);
        assert!(measurer.rule().breaks.is_empty());
    }

    #[test]
    fn missing_values_read_not_available() {
        let (document, typography, options) = fixture();
        let measurer = Measurer::new(&document.fonts, &document.images, &typography, &options)
            .expect("fonts are registered");
        let measured = measurer.key_value(&KeyValue::new("Inspector", Some("  ")));
        assert_eq!(texts(&measured), vec!["Inspector", "N/A"]);
        let measured = measurer.key_value(&KeyValue::new::<_, String>("Inspector", None));
        assert_eq!(texts(&measured), vec!["Inspector", "N/A"]);
    }

    #[test]
    fn secondary_heading_label_is_flush_right() {
        let (document, typography, options) = fixture();
        let measurer = Measurer::new(&document.fonts, &document.images, &typography, &options)
            .expect("fonts are registered");
        let measured = measurer.heading(&Heading::new("Summary").secondary("Resume"));
        let Some(Fragment::Text { text, x, .. }) = measured.fragments.first() else {
            panic!("expected the secondary label first");
        };
        assert_eq!(text, "Resume");
        let width = Font::helvetica_bold().width_of_text("Resume", typography.heading_size);
        assert!((x.0 + width.0 - 350.0).abs() < 1e-3);
        assert!(measured.height > Pt::ZERO);
    }

    #[test]
    fn drawing_flips_into_pdf_space() {
        let (document, typography, options) = fixture();
        let measurer = Measurer::new(&document.fonts, &document.images, &typography, &options)
            .expect("fonts are registered");
        let mut page = Page::new(&options.geometry);
        measurer.rule().draw(&mut page, &options.geometry, Pt(100.0));
        assert_eq!(
            page.contents,
            vec![crate::page::PageContents::Line(LineLayout {
                from: (Pt(50.0), Pt(496.0)),
                to: (Pt(350.0), Pt(496.0)),
                width: Pt(0.5),
                colour: colours::RULE,
            })]
        );
    }
}
