//! Length units used for page geometry and glyph measurement.
//!
//! Everything is measured in PostScript points ([Pt], 1/72 of an inch) in the end;
//! [In] and [Mm] exist so that page setups can be written in whatever unit is natural
//! and converted with `.into()`.

use derive_more::{Add, AddAssign, Display, From, Into, MulAssign, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length in PostScript points
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    MulAssign,
    Sum,
    From,
    Into,
    Display,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, From, Into, Display)]
#[display("{_0}in")]
pub struct In(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, From, Into, Display)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

impl Pt {
    /// `true` when the length is finite and strictly greater than zero
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
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

impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_and_millimetres_convert_to_points() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert!((Pt::from(Mm(25.4)).0 - 72.0).abs() < 1e-4);
        assert_eq!(In::from(Pt(36.0)), In(0.5));
    }

    #[test]
    fn positivity_rejects_zero_and_nan() {
        assert!(Pt(0.5).is_positive());
        assert!(!Pt(0.0).is_positive());
        assert!(!Pt(-1.0).is_positive());
        assert!(!Pt(f32::NAN).is_positive());
        assert!(!Pt(f32::INFINITY).is_positive());
    }

    #[test]
    fn arithmetic() {
        let mut y = Pt(100.0);
        y -= Pt(12.5);
        assert_eq!(y, Pt(87.5));
        assert_eq!(Pt(10.0) * 1.5, Pt(15.0));
        assert_eq!(Pt(10.0) / Pt(4.0), 2.5);
        assert_eq!([Pt(1.0), Pt(2.0)].into_iter().sum::<Pt>(), Pt(3.0));
        assert_eq!(Pt(3.0).to_string(), "3pt");
    }
}
