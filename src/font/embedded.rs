use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::ReportError;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Str,
};
use std::collections::BTreeMap;

/// A parsed TrueType / OpenType font. The font is embedded in its entirety in the
/// generated PDF, so large fonts dramatically increase the size of the output.
///
/// Text drawn with an embedded font is encoded as 2-byte glyph ids (Identity-H) and
/// carries a ToUnicode map so that it stays searchable and copyable.
pub struct EmbeddedFont {
    face: OwnedFace,
    postscript_name: String,
    /// glyph id => the first unicode codepoint that maps to it
    unicode: BTreeMap<u16, char>,
}

impl EmbeddedFont {
    /// Load a font from raw bytes, returning an error if the font can't be parsed or
    /// has no character map
    pub fn load(bytes: Vec<u8>) -> Result<EmbeddedFont, ReportError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let unicode = unicode_map(face.as_face_ref())?;
        let postscript_name = postscript_name(face.as_face_ref());
        log::debug!(
            "loaded font {postscript_name} with {} mapped glyphs",
            unicode.len()
        );

        Ok(EmbeddedFont {
            face,
            postscript_name,
            unicode,
        })
    }

    pub fn name(&self) -> &str {
        &self.postscript_name
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// The glyph drawn for `ch`, falling back to the replacement character, then `?`,
    /// then the font's `.notdef` glyph
    fn glyph(&self, ch: char) -> GlyphId {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .unwrap_or(GlyphId(0))
    }

    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let advance = self.face().glyph_hor_advance(self.glyph(ch)).unwrap_or_default();
        self.scaling(size) * advance as f32
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    pub fn line_height(&self, size: Pt) -> Pt {
        let face = self.face();
        let extent = face.ascender() as f32 - face.descender() as f32 + face.line_gap() as f32;
        self.scaling(size) * extent
    }

    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| self.glyph(ch).0.to_be_bytes())
            .collect()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), ReportError> {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = refs.gen(RefType::CidFont(font_index));
        let descriptor_id = refs.gen(RefType::FontDescriptor(font_index));
        let data_id = refs.gen(RefType::FontData(font_index));
        let to_unicode_id = refs.gen(RefType::ToUnicode(font_index));

        let face = self.face();
        let base_font = Name(self.postscript_name.as_bytes());
        let per_mille = 1000.0 / face.units_per_em() as f32;

        writer
            .type0_font(font_id)
            .base_font(base_font)
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_font_id)
            .to_unicode(to_unicode_id);

        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(base_font);
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        let widths: Vec<f32> = (0..face.number_of_glyphs())
            .map(|gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * per_mille)
            .collect();
        cid_font.widths().consecutive(0, widths);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.finish();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        let bbox = face.global_bounding_box();
        let mut descriptor = writer.font_descriptor(descriptor_id);
        descriptor
            .name(base_font)
            .flags(flags)
            .bbox(pdf_writer::Rect::new(
                bbox.x_min as f32 * per_mille,
                bbox.y_min as f32 * per_mille,
                bbox.x_max as f32 * per_mille,
                bbox.y_max as f32 * per_mille,
            ))
            .italic_angle(0.0)
            .ascent(face.ascender() as f32 * per_mille)
            .descent(face.descender() as f32 * per_mille)
            .cap_height(
                face.capital_height()
                    .map(|h| h as f32 * per_mille)
                    .unwrap_or(700.0),
            )
            .stem_v(80.0)
            .font_file2(data_id);
        descriptor.finish();

        let data = self.face.as_slice();
        let compressed = compress_to_vec_zlib(data, CompressionLevel::DefaultLevel as u8);
        writer
            .stream(data_id, &compressed)
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), data.len() as i32);

        let cmap = self.to_unicode_cmap();
        let compressed = compress_to_vec_zlib(cmap.as_bytes(), CompressionLevel::DefaultLevel as u8);
        writer
            .stream(to_unicode_id, &compressed)
            .filter(Filter::FlateDecode);

        Ok(())
    }

    /// Build the ToUnicode CMap program mapping glyph ids back to text
    fn to_unicode_cmap(&self) -> String {
        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );

        // bfchar sections are limited to 100 entries each
        let entries: Vec<(&u16, &char)> = self.unicode.iter().collect();
        for chunk in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (gid, ch) in chunk {
                let mut units = [0u16; 2];
                let utf16: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|u| format!("{u:04X}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04X}> <{utf16}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
        cmap
    }
}

fn unicode_map(face: &Face<'_>) -> Result<BTreeMap<u16, char>, ReportError> {
    let cmap = face.tables().cmap.ok_or(ReportError::FontIncomplete("cmap"))?;
    let mut map = BTreeMap::new();
    for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
        subtable.codepoints(|codepoint| {
            let Some(ch) = char::from_u32(codepoint) else {
                return;
            };
            if let Some(gid) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) {
                map.entry(gid.0).or_insert(ch);
            }
        });
    }
    Ok(map)
}

/// The PostScript name of the face, restricted to characters that are legal in a PDF name
fn postscript_name(face: &Face<'_>) -> String {
    let name = face
        .names()
        .into_iter()
        .filter(|name| {
            name.name_id == owned_ttf_parser::name_id::POST_SCRIPT_NAME
                || name.name_id == owned_ttf_parser::name_id::FULL_NAME
        })
        .find_map(|name| name.to_string())
        .unwrap_or_default();
    let name: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if name.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        name
    }
}
