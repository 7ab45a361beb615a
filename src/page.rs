use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::layout::PageGeometry;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::ReportError;
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf};

/// Which font at which size a span of text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text positioned on the page, `coords` being the start of its baseline
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// An image scaled into `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// A filled rectangle, e.g. a table header band
#[derive(Clone, PartialEq, Debug)]
pub struct FillLayout {
    pub rect: Rect,
    pub colour: Colour,
}

/// A straight stroked line, e.g. a table border or a divider
#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub width: Pt,
    pub colour: Colour,
}

/// A single drawing instruction, in PDF page space
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Fill(FillLayout),
    Line(LineLayout),
}

/// What a [Placement] on a page holds
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PlacementKind {
    Header,
    Footer,
    PageNumber,
    Heading,
    Paragraph,
    KeyValue,
    Spacer,
    Rule,
    /// one row of a photo grid
    Photos(usize),
    /// the header band of a table, drawn once per page the table touches
    TableHeader,
    /// a body row of a table, by its index in the table
    TableRow(usize),
}

/// A record of where the layout engine put something, in top-down page space
/// (distance from the top edge of the page)
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Placement {
    pub kind: PlacementKind,
    /// index of the section within the report, for section content
    pub section: Option<usize>,
    /// index of the block within its section; `None` for section titles and
    /// page decorations
    pub block: Option<usize>,
    pub top: Pt,
    pub bottom: Pt,
}

/// A single laid out page: its size, its drawing instructions, and a log of the
/// blocks placed on it
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out contents, in drawing order
    pub contents: Vec<PageContents>,
    /// The placed blocks, in placement order
    pub placements: Vec<Placement>,
}

impl Page {
    /// Create a new empty page sized and bounded by the given geometry
    pub fn new(geometry: &PageGeometry) -> Page {
        let (width, height) = geometry.size;
        let margins = &geometry.margins;
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
            placements: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        // consecutive spans are batched into a single text object
        if let Some(PageContents::Text(spans)) = self.contents.last_mut() {
            spans.push(span);
        } else {
            self.contents.push(PageContents::Text(vec![span]));
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_fill(&mut self, fill: FillLayout) {
        self.contents.push(PageContents::Fill(fill));
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }

    pub fn add_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// All text drawn on the page, span by span, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans),
                _ => None,
            })
            .flatten()
            .map(|span| span.text.as_str())
    }

    /// The placements of a given kind on this page
    pub fn placements_of(&self, kind: PlacementKind) -> impl Iterator<Item = &Placement> + '_ {
        self.placements.iter().filter(move |p| p.kind == kind)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), ReportError> {
        let id = refs.get_or_gen(RefType::Page(page_index));
        let parent = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            let font_ref = refs
                .get(RefType::Font(font_id.index()))
                .ok_or(ReportError::FontMissing(font_id.index()))?;
            resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);
        writer
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);
        Ok(())
    }
}
