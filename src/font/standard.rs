use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use pdf_writer::{Name, Pdf};

/// Helvetica advance widths at 1000 units/em for the printable ASCII range 32..=126
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths at 1000 units/em for the printable ASCII range 32..=126
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// from the Helvetica AFM, shared by both weights
const ASCENDER: f32 = 718.0;
const DESCENDER: f32 = -207.0;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// One of the standard (non-embedded) PDF fonts. Every conforming PDF reader
/// ships these, so they cost nothing to use but only cover WinAnsi text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub fn name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn width_1000(&self, byte: u8) -> f32 {
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match byte {
            32..=126 => table[(byte - 32) as usize] as f32,
            0x95 => 350.0,  // bullet
            0xA0 => 278.0,  // no-break space
            0x96 => 556.0,  // en dash
            0x97 => 1000.0, // em dash
            _ => 556.0,
        }
    }

    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        size * (self.width_1000(to_winansi_or_placeholder(ch)) / 1000.0)
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        size * (ASCENDER / 1000.0)
    }

    pub fn descent(&self, size: Pt) -> Pt {
        size * (DESCENDER / 1000.0)
    }

    pub fn line_height(&self, size: Pt) -> Pt {
        size * LINE_HEIGHT_FACTOR
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Font(font_index));
        writer
            .type1_font(id)
            .base_font(Name(self.name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// Map a character to its WinAnsi (Windows-1252) code, if it has one
pub(crate) fn to_winansi(ch: char) -> Option<u8> {
    match ch as u32 {
        0x0020..=0x007E => Some(ch as u8),
        0x00A0..=0x00FF => Some(ch as u8),
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Like [to_winansi], substituting `?` for anything WinAnsi can't express
pub(crate) fn to_winansi_or_placeholder(ch: char) -> u8 {
    to_winansi(ch).unwrap_or(b'?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_scale_with_size() {
        let f = StandardFont::Helvetica;
        assert!((f.ascent(Pt(10.0)).0 - 7.18).abs() < 1e-4);
        assert!((f.line_height(Pt(10.0)).0 - 11.5).abs() < 1e-4);
        assert!(f.descent(Pt(10.0)) < Pt(0.0));
    }

    #[test]
    fn typographic_quotes_are_encodable() {
        assert_eq!(to_winansi('\u{201C}'), Some(0x93));
        assert_eq!(to_winansi('\n'), None);
    }
}
