use super::PageGeometry;
use crate::units::Pt;

/// Where the layout currently is: which page, and how far down it.
///
/// The cursor is a distance from the top edge of the page. It only ever moves
/// down within a page and is reset to the top margin when a new page starts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageContext {
    pub geometry: PageGeometry,
    pub page_index: usize,
    pub cursor: Pt,
}

impl PageContext {
    /// A context at the top of the first page
    pub fn new(geometry: PageGeometry) -> PageContext {
        PageContext {
            geometry,
            page_index: 0,
            cursor: geometry.top(),
        }
    }

    /// Space left between the cursor and the bottom margin
    pub fn remaining(&self) -> Pt {
        self.geometry.break_limit() - self.cursor
    }

    /// Whether something `required` tall can be placed at the cursor
    pub fn fits(&self, required: Pt) -> bool {
        self.cursor + required <= self.geometry.break_limit()
    }

    /// Whether nothing has been placed on the current page yet
    pub fn at_top(&self) -> bool {
        self.cursor <= self.geometry.top()
    }

    /// Move the cursor down. Negative amounts are ignored.
    pub fn advance(&mut self, by: Pt) {
        if by > Pt::ZERO {
            self.cursor += by;
        }
    }

    /// Move to the top of the next page
    pub fn next_page(&mut self) {
        self.page_index += 1;
        self.cursor = self.geometry.top();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;

    fn context() -> PageContext {
        PageContext::new(PageGeometry::new((Pt(200.0), Pt(100.0)), Margins::all(Pt(10.0))))
    }

    #[test]
    fn starts_at_top_margin() {
        let ctx = context();
        assert_eq!(ctx.cursor, Pt(10.0));
        assert!(ctx.at_top());
        assert_eq!(ctx.remaining(), Pt(80.0));
    }

    #[test]
    fn fits_is_inclusive_of_the_limit() {
        let mut ctx = context();
        ctx.advance(Pt(40.0));
        assert!(ctx.fits(Pt(40.0)));
        assert!(!ctx.fits(Pt(40.5)));
    }

    #[test]
    fn cursor_never_moves_up() {
        let mut ctx = context();
        ctx.advance(Pt(5.0));
        ctx.advance(Pt(-3.0));
        assert_eq!(ctx.cursor, Pt(15.0));
        ctx.next_page();
        assert_eq!((ctx.page_index, ctx.cursor), (1, Pt(10.0)));
    }
}
