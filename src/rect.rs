use crate::units::*;

/// A rectangle in page space, specified by its lower-left (`x1`, `y1`) and upper-right
/// (`x2`, `y2`) corners. PDF page space grows upwards, so `y2` is the top edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x1: Pt,
    pub y1: Pt,
    pub x2: Pt,
    pub y2: Pt,
}

impl Rect {
    /// A rectangle anchored at the origin
    pub fn from_size(width: Pt, height: Pt) -> Rect {
        Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: width,
            y2: height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
