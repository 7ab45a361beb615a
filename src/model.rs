//! The structured report that the layout engine consumes.
//!
//! A [`Report`] is an ordered list of [`Section`]s, each an ordered list of
//! [`Block`]s. Reports are plain values: build one (usually through the
//! [`reports`](crate::reports) builders), hand it to
//! [`render_report`](crate::render_report) or
//! [`layout::compose`](crate::layout::compose), and drop it.

use crate::colour::Colour;
use crate::units::Pt;
use std::path::PathBuf;

/// What kind of document a report is. Decides the output filename prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReportKind {
    Inspection,
    Invoice,
}

impl ReportKind {
    pub fn filename_prefix(&self) -> &'static str {
        match self {
            ReportKind::Inspection => "Inspection_Report",
            ReportKind::Invoice => "Invoice",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    /// Drawn in the header of every page
    pub title: String,
    pub client_name: Option<String>,
    /// ISO-8601 date the report is about, used in the filename
    pub date: Option<String>,
    /// Drawn right-aligned in the header of every page
    pub subtitle: Option<String>,
    /// Drawn in the footer of every page, next to the page number
    pub footer: Option<String>,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn new<S: ToString>(kind: ReportKind, title: S) -> Report {
        Report {
            kind,
            title: title.to_string(),
            client_name: None,
            date: None,
            subtitle: None,
            footer: None,
            sections: Vec::default(),
        }
    }

    pub fn client_name<S: ToString>(mut self, client_name: S) -> Self {
        self.client_name = Some(client_name.to_string());
        self
    }

    pub fn date<S: ToString>(mut self, date: S) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn subtitle<S: ToString>(mut self, subtitle: S) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn footer<S: ToString>(mut self, footer: S) -> Self {
        self.footer = Some(footer.to_string());
        self
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

/// A run of blocks, optionally introduced by a title. Titled sections are
/// bookmarked in the document outline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub title: Option<Heading>,
    pub blocks: Vec<Block>,
}

impl Section {
    /// A section without a title
    pub fn new() -> Section {
        Section::default()
    }

    pub fn titled<H: Into<Heading>>(title: H) -> Section {
        Section {
            title: Some(title.into()),
            blocks: Vec::default(),
        }
    }

    pub fn block<B: Into<Block>>(mut self, block: B) -> Self {
        self.blocks.push(block.into());
        self
    }

    pub fn push<B: Into<Block>>(&mut self, block: B) {
        self.blocks.push(block.into());
    }
}

/// A unit of content, measured as a whole before it is placed
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(Heading),
    /// Wrapped body text
    Paragraph(String),
    KeyValue(KeyValue),
    Table(Table),
    /// Empty vertical space
    Spacer(Pt),
    /// A thin horizontal divider across the content width
    Rule,
    Photos(Vec<Photo>),
}

impl From<Heading> for Block {
    fn from(value: Heading) -> Self {
        Block::Heading(value)
    }
}

impl From<KeyValue> for Block {
    fn from(value: KeyValue) -> Self {
        Block::KeyValue(value)
    }
}

impl From<Table> for Block {
    fn from(value: Table) -> Self {
        Block::Table(value)
    }
}

/// A heading, with an optional label in a second language drawn at the
/// opposite edge of the line
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub text: String,
    pub secondary: Option<String>,
}

impl Heading {
    pub fn new<S: ToString>(text: S) -> Heading {
        Heading {
            text: text.to_string(),
            secondary: None,
        }
    }

    pub fn secondary<S: ToString>(mut self, secondary: S) -> Self {
        self.secondary = Some(secondary.to_string());
        self
    }
}

impl From<&str> for Heading {
    fn from(value: &str) -> Self {
        Heading::new(value)
    }
}

impl From<String> for Heading {
    fn from(value: String) -> Self {
        Heading::new(value)
    }
}

/// A label and its value. A missing value is drawn as "N/A".
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub label: String,
    pub value: Option<String>,
    /// Draw the value in bold, e.g. for a grand total
    pub emphasis: bool,
}

impl KeyValue {
    pub fn new<L: ToString, V: ToString>(label: L, value: Option<V>) -> KeyValue {
        KeyValue {
            label: label.to_string(),
            value: value.map(|v| v.to_string()),
            emphasis: false,
        }
    }

    pub fn emphasised(mut self) -> Self {
        self.emphasis = true;
        self
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// How wide a table column is
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ColumnWidth {
    Fixed(Pt),
    /// A fraction (0..=1) of the content width
    Relative(f32),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Column {
    pub width: ColumnWidth,
    pub align: Align,
}

impl Column {
    pub fn fixed<P: Into<Pt>>(width: P) -> Column {
        Column {
            width: ColumnWidth::Fixed(width.into()),
            align: Align::Left,
        }
    }

    pub fn relative(fraction: f32) -> Column {
        Column {
            width: ColumnWidth::Relative(fraction),
            align: Align::Left,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Per-cell overrides of the default table style
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub colour: Option<Colour>,
    pub background: Option<Colour>,
    pub bold: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn new<S: ToString>(text: S) -> Cell {
        Cell {
            text: text.to_string(),
            style: CellStyle::default(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.style.colour = Some(colour);
        self
    }

    pub fn background(mut self, colour: Colour) -> Self {
        self.style.background = Some(colour);
        self
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::new(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::new(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new<I, C>(cells: I) -> Row
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Row {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// A table. Every row is expected to have one cell per column; extra cells are
/// dropped and missing cells are left blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    /// Drawn as a band above the rows, and again on every page the table continues on
    pub header: Option<Row>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Table {
        Table {
            columns,
            header: None,
            rows: Vec::default(),
        }
    }

    pub fn header(mut self, header: Row) -> Self {
        self.header = Some(header);
        self
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }
}

/// Where a photo's encoded bytes come from
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub source: PhotoSource,
    pub caption: Option<String>,
}

impl Photo {
    pub fn from_bytes(bytes: Vec<u8>) -> Photo {
        Photo {
            source: PhotoSource::Bytes(bytes),
            caption: None,
        }
    }

    pub fn from_path<P: Into<PathBuf>>(path: P) -> Photo {
        Photo {
            source: PhotoSource::Path(path.into()),
            caption: None,
        }
    }

    pub fn caption<S: ToString>(mut self, caption: S) -> Self {
        self.caption = Some(caption.to_string());
        self
    }
}
