use crate::rect::Rect;
use crate::units::Pt;

/// Space kept free around the text frame of a page. Nothing stops content from being
/// drawn in the margins; they only decide where flowed text goes and which area is
/// recorded as the page's `ArtBox`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Clockwise from the top, in the same order as CSS margins
    pub fn trbl<D: Into<Pt>>(top: D, right: D, bottom: D, left: D) -> Margins {
        Margins {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// `vertical` for top and bottom, `horizontal` for left and right
    pub fn symmetric<D: Into<Pt>>(vertical: D, horizontal: D) -> Margins {
        let (v, h): (Pt, Pt) = (vertical.into(), horizontal.into());
        Margins::trbl(v, h, v, h)
    }

    /// Add a binding gutter on the inside edge: the left on even page indices (recto
    /// pages when counting from 0), the right on odd ones
    pub fn with_gutter(&self, gutter: Pt, page_index: usize) -> Margins {
        let mut margins = *self;
        if page_index % 2 == 0 {
            margins.left += gutter;
        } else {
            margins.right += gutter;
        }
        margins
    }

    /// The area of `media` left over inside the margins
    pub fn content_box(&self, media: Rect) -> Rect {
        Rect {
            x1: media.x1 + self.left,
            y1: media.y1 + self.bottom,
            x2: media.x2 - self.right,
            y2: media.y2 - self.top,
        }
    }
}
