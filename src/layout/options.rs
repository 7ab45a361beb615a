use super::PageGeometry;
use crate::document::Document;
use crate::font::Font;
use crate::units::Pt;
use id_arena::Id;

/// Which fonts, at which sizes, a report is set in
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Typography {
    pub regular: Id<Font>,
    pub bold: Id<Font>,
    /// Font for the second-language labels of bilingual headings. Falls back to `bold`.
    pub secondary: Option<Id<Font>>,
    pub title_size: Pt,
    pub heading_size: Pt,
    pub body_size: Pt,
    pub small_size: Pt,
}

impl Typography {
    fn with_fonts(regular: Id<Font>, bold: Id<Font>) -> Typography {
        Typography {
            regular,
            bold,
            secondary: None,
            title_size: Pt(12.0),
            heading_size: Pt(13.0),
            body_size: Pt(10.0),
            small_size: Pt(8.0),
        }
    }

    /// Register Helvetica and Helvetica-Bold with the document and set the report in them
    pub fn standard(document: &mut Document) -> Typography {
        let regular = document.add_font(Font::helvetica());
        let bold = document.add_font(Font::helvetica_bold());
        Typography::with_fonts(regular, bold)
    }

    /// Register embedded fonts with the document and set the report in them. Without
    /// a bold face, the regular face is used for bold text too. The regular face also
    /// carries secondary labels, as it is usually picked for its script coverage.
    pub fn embedded(document: &mut Document, regular: Font, bold: Option<Font>) -> Typography {
        let regular = document.add_font(regular);
        let bold = match bold {
            Some(bold) => document.add_font(bold),
            None => regular,
        };
        Typography::with_fonts(regular, bold).with_secondary(regular)
    }

    pub fn with_secondary(mut self, secondary: Id<Font>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn with_body_size<P: Into<Pt>>(mut self, size: P) -> Self {
        self.body_size = size.into();
        self
    }

    pub fn with_heading_size<P: Into<Pt>>(mut self, size: P) -> Self {
        self.heading_size = size.into();
        self
    }
}

/// Page geometry and the spacing rules of the house style
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutOptions {
    pub geometry: PageGeometry,
    /// Vertical gap left after every block
    pub block_spacing: Pt,
    /// Padding inside table cells, on every side
    pub cell_padding: Pt,
    pub min_row_height: Pt,
    /// Share of the content width given to the label column of key-value pairs
    pub label_ratio: f32,
    pub photo_columns: usize,
    pub photo_max_height: Pt,
    /// Horizontal gap between photos in a row
    pub photo_gap: Pt,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            geometry: PageGeometry::default(),
            block_spacing: Pt(8.0),
            cell_padding: Pt(4.0),
            min_row_height: Pt(18.0),
            label_ratio: 0.35,
            photo_columns: 2,
            photo_max_height: Pt(180.0),
            photo_gap: Pt(10.0),
        }
    }
}

impl LayoutOptions {
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_block_spacing<P: Into<Pt>>(mut self, spacing: P) -> Self {
        self.block_spacing = spacing.into();
        self
    }

    pub fn with_cell_padding<P: Into<Pt>>(mut self, padding: P) -> Self {
        self.cell_padding = padding.into();
        self
    }

    pub fn with_min_row_height<P: Into<Pt>>(mut self, height: P) -> Self {
        self.min_row_height = height.into();
        self
    }

    pub fn with_label_ratio(mut self, ratio: f32) -> Self {
        self.label_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_photo_columns(mut self, columns: usize) -> Self {
        self.photo_columns = columns.max(1);
        self
    }

    pub fn with_photo_max_height<P: Into<Pt>>(mut self, height: P) -> Self {
        self.photo_max_height = height.into();
        self
    }
}
