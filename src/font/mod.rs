//! Fonts that text can be measured and drawn with.
//!
//! Two kinds of font are supported:
//!
//! - [`StandardFont`]: one of the PDF base-14 Helvetica faces. These need no
//!   assets at all; widths come from the Adobe font metrics and text is encoded
//!   as WinAnsi.
//! - [`EmbeddedFont`]: a TrueType / OpenType font parsed from bytes and embedded
//!   in the generated PDF in its entirety. Use one of these for scripts the
//!   standard fonts can't draw, such as the Arabic labels of bilingual reports.
//!
//! Fonts are registered with a [`Document`](crate::Document) and referred to
//! through their `Id<Font>` everywhere else.

mod embedded;
mod standard;

pub use embedded::*;
pub use standard::*;

use crate::refs::ObjectReferences;
use crate::units::Pt;
use crate::ReportError;
use id_arena::Id;
use pdf_writer::Pdf;

/// A font that can be used for laying out and rendering text
pub enum Font {
    Standard(StandardFont),
    Embedded(EmbeddedFont),
}

impl Font {
    /// The regular weight standard Helvetica face
    pub fn helvetica() -> Font {
        Font::Standard(StandardFont::Helvetica)
    }

    /// The bold weight standard Helvetica face
    pub fn helvetica_bold() -> Font {
        Font::Standard(StandardFont::HelveticaBold)
    }

    /// Parse a TrueType / OpenType font from raw bytes, for embedding
    pub fn load(bytes: Vec<u8>) -> Result<Font, ReportError> {
        EmbeddedFont::load(bytes).map(Font::Embedded)
    }

    /// The name the font is known by in the PDF
    pub fn name(&self) -> String {
        match self {
            Font::Standard(f) => f.name().to_string(),
            Font::Embedded(f) => f.name().to_string(),
        }
    }

    /// Horizontal advance of a single character. Characters the font can't draw
    /// are measured as the glyph they'll be replaced with.
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        match self {
            Font::Standard(f) => f.advance(ch, size),
            Font::Embedded(f) => f.advance(ch, size),
        }
    }

    /// Calculate the width of a given string of text at the given font size.
    /// Newlines are not treated specially.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }

    /// Distance from the baseline to the top of the font
    pub fn ascent(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(f) => f.ascent(size),
            Font::Embedded(f) => f.ascent(size),
        }
    }

    /// Distance from the baseline to the bottom of the font. Note: this is negative
    pub fn descent(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(f) => f.descent(size),
            Font::Embedded(f) => f.descent(size),
        }
    }

    /// How far apart two consecutive baselines are set at the given size
    pub fn line_height(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(f) => f.line_height(size),
            Font::Embedded(f) => f.line_height(size),
        }
    }

    /// Encode text as the byte string shown by a `Tj` operator with this font selected
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Font::Standard(f) => {
                if let Some(ch) = text.chars().find(|&ch| standard::to_winansi(ch).is_none()) {
                    log::warn!("{} has no glyph for {:?} in {:?}, drawing '?'", f.name(), ch, text);
                }
                text.chars().map(to_winansi_or_placeholder).collect()
            }
            Font::Embedded(f) => f.encode(text),
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        id: Id<Font>,
        writer: &mut Pdf,
    ) -> Result<(), ReportError> {
        match self {
            Font::Standard(f) => {
                f.write(refs, id.index(), writer);
                Ok(())
            }
            Font::Embedded(f) => f.write(refs, id.index(), writer),
        }
    }
}
