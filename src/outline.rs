use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use pdf_writer::{Finish, Pdf, Ref, TextStr};

/// The document outline ("bookmarks" in most readers). Reports use a flat outline
/// with one entry per titled section.
#[derive(Default, Debug)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    /// 0-based index of the page the entry jumps to
    pub page_index: usize,
    /// Distance from the bottom of the page to scroll to, in PDF space
    pub top: Pt,
}

impl Outline {
    pub fn add_bookmark(&mut self, title: String, page_index: usize, top: Pt) {
        self.entries.push(OutlineEntry {
            title,
            page_index,
            top,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the outline tree. Page references must already have been generated.
    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let targets: Vec<(&OutlineEntry, Ref)> = self
            .entries
            .iter()
            .filter_map(|entry| match refs.get(RefType::Page(entry.page_index)) {
                Some(page_id) => Some((entry, page_id)),
                None => {
                    log::warn!(
                        "bookmark '{}' points at missing page {}",
                        entry.title,
                        entry.page_index
                    );
                    None
                }
            })
            .collect();

        let outlines_id = refs.gen(RefType::Outlines);
        let ids: Vec<Ref> = (0..targets.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();

        let mut outline = writer.outline(outlines_id);
        if let (Some(first), Some(last)) = (ids.first(), ids.last()) {
            outline.first(*first);
            outline.last(*last);
            outline.count(ids.len() as i32);
        }
        outline.finish();

        for (i, (entry, page_id)) in targets.into_iter().enumerate() {
            let mut item = writer.outline_item(ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(ids[i - 1]);
            }
            if i + 1 < ids.len() {
                item.next(ids[i + 1]);
            }
            item.dest().page(page_id).xyz(0.0, entry.top.0, None);
        }
    }
}
