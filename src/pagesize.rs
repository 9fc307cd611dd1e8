//! Paper sizes commonly used for manuals and reports.
//!
//! All sizes are (width, height) in portrait orientation; use [PageOrientation] to
//! turn them sideways.

use crate::units::*;

/// Page dimensions as (width, height) in points
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// JIS B5, common for Japanese documents (slightly larger than ISO B5)
pub const B5_JIS: PageSize = (Pt(182.0 * 72.0 / 25.4), Pt(257.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations
pub trait PageOrientation {
    /// The size with width ≤ height
    fn portrait(self) -> Self;
    /// The size with width ≥ height
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> PageSize {
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
