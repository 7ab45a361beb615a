use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of indirect object the document writer emits, keyed by the index of
/// the thing it belongs to
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Outlines,
    OutlineEntry(usize),
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    FontDescriptor(usize),
    FontData(usize),
    ToUnicode(usize),
    Image(usize),
    ImageMask(usize),
}

/// Hands out sequential object ids and remembers which object each one was given to
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    /// Look up the id previously generated for an object
    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Generate a fresh id for an object, replacing any earlier one
    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }

    /// Get the id of an object, generating it if this is the first time it's asked for
    pub fn get_or_gen(&mut self, ref_type: RefType) -> Ref {
        match self.get(ref_type) {
            Some(id) => id,
            None => self.gen(ref_type),
        }
    }
}
