use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// Margins are the bands around the edge of the page that block content stays
/// out of. The page header is drawn inside the top margin and the footer inside
/// the bottom margin, so they never collide with laid out blocks.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<V: Into<Pt>, H: Into<Pt>>(vertical: V, horizontal: H) -> Margins {
        let vertical: Pt = vertical.into();
        let horizontal: Pt = horizontal.into();
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt::ZERO)
    }
}

/// The fixed shape every page of a report shares.
///
/// Layout happens in "cursor space": `y` grows downward from the top edge of the
/// page. [`PageGeometry::to_pdf_y`] flips a cursor-space offset into PDF space,
/// where `y` grows upward from the bottom edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Margins,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::new(A4, Margins::all(Mm(20.0)))
    }
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins) -> PageGeometry {
        PageGeometry { size, margins }
    }

    pub fn width(&self) -> Pt {
        self.size.0
    }

    pub fn height(&self) -> Pt {
        self.size.1
    }

    /// Horizontal space between the left and right margins
    pub fn content_width(&self) -> Pt {
        self.width() - self.margins.left - self.margins.right
    }

    /// Vertical space between the top and bottom margins
    pub fn content_height(&self) -> Pt {
        self.height() - self.margins.top - self.margins.bottom
    }

    /// x of the left edge of the content area
    pub fn left(&self) -> Pt {
        self.margins.left
    }

    /// x of the right edge of the content area
    pub fn right(&self) -> Pt {
        self.width() - self.margins.right
    }

    /// Cursor offset at which every page's content starts
    pub fn top(&self) -> Pt {
        self.margins.top
    }

    /// Cursor offset no block may extend past: `height - margins.bottom`
    pub fn break_limit(&self) -> Pt {
        self.height() - self.margins.bottom
    }

    /// Convert a distance from the top of the page into a PDF y coordinate
    pub fn to_pdf_y(&self, cursor: Pt) -> Pt {
        self.height() - cursor
    }
}
