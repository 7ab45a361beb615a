use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// PostScript points, 1/72 of an inch. All layout in this crate is done in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// Inches, mostly useful for specifying margins
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct In(pub f32);

/// Millimetres, for ISO page sizes and metric margins
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct Mm(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl From<In> for Pt {
    fn from(value: In) -> Pt {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Pt {
        Pt(value.0 * 72.0 / 25.4)
    }
}

impl From<Pt> for In {
    fn from(value: Pt) -> In {
        In(value.0 / 72.0)
    }
}

impl From<Pt> for Mm {
    fn from(value: Pt) -> Mm {
        Mm(value.0 * 25.4 / 72.0)
    }
}
