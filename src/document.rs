use crate::{
    font::Font,
    image::Image,
    info::Info,
    outline::Outline,
    page::Page,
    refs::{ObjectReferences, RefType},
    units::Pt,
    ReportError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
    pub outline: Outline,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add a font to the document structure. Note that fonts are stored "globally" within
    /// the document, such that any page can access it by referring to it by its id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, so a page can place one without embedding it again.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Add a bookmark in the document outline pointing at `top` (in PDF space) of
    /// the page with the given index
    pub fn add_bookmark<S: ToString>(&mut self, title: S, page_index: usize, top: Pt) {
        self.outline.add_bookmark(title.to_string(), page_index, top);
    }

    /// Render the whole document into PDF bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReportError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in self.fonts.iter() {
            font.write(&mut refs, id, &mut writer)?;
        }

        for (id, image) in self.images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, page) in self.pages.iter().enumerate() {
            page.write(&mut refs, page_index, &self.fonts, &self.images, &mut writer)?;
        }

        let outlines_id = if self.outline.is_empty() {
            None
        } else {
            self.outline.write(&mut refs, &mut writer);
            refs.get(RefType::Outlines)
        };

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines_id) = outlines_id {
            catalog.outlines(outlines_id);
        }
        catalog.finish();

        Ok(writer.finish())
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), ReportError> {
        let bytes = self.to_bytes()?;
        w.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;

    #[test]
    fn empty_document_is_still_a_pdf() {
        let document = Document::default();
        let bytes = document.to_bytes().expect("can write");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn bookmarks_make_an_outline() {
        let mut document = Document::default();
        document.add_font(Font::helvetica());
        let index = document.add_page(Page::new(&PageGeometry::default()));
        document.add_bookmark("Summary", index, Pt(700.0));
        let bytes = document.to_bytes().expect("can write");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Outlines"));
        assert!(text.contains("/BaseFont /Helvetica"));
    }
}
