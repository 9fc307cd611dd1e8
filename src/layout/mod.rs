//! Placing wrapped lines on pages.
//!
//! [PageSetup] describes the pages (paper size, margins, gutter, type size, line
//! spacing and [BreakPolicy](crate::flow::BreakPolicy)). A [Frame] is the text area of
//! one page plus the vertical metrics of the font, and [paginate] walks wrapped lines
//! down a frame, starting a fresh page whenever the next line would run past the
//! bottom margin.
//!
//! # Example
//!
//! ```
//! use pdf_flow::layout::{paginate, Frame};
//! use pdf_flow::{Pt, Rect};
//!
//! let frame = Frame {
//!     bounds: Rect::from_size(Pt(300.0), Pt(100.0)),
//!     line_height: Pt(20.0),
//!     ascent: Pt(10.0),
//!     descent: Pt(-5.0),
//! };
//! let lines = (1..=7).map(|i| format!("line {i}"));
//! let result = paginate(lines, &frame, None).unwrap();
//! assert_eq!(result.pages.len(), 2);
//! assert_eq!(result.pages[1][0].text, "line 6");
//! ```

mod frame;
mod margins;
mod setup;

pub use frame::*;
pub use margins::*;
pub use setup::*;
