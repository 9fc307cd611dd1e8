//! Metric-driven line wrapping.
//!
//! Text is first split at forced breaks (`\n`) into paragraphs. Each paragraph is cut
//! into atomic tokens according to a [BreakPolicy], and tokens are then packed
//! greedily onto lines: a token joins the current line if the line, measured with the
//! caller's [GlyphMetrics](crate::GlyphMetrics), still fits within the maximum width,
//! otherwise it starts the next line. A token that is wider than a line on its own is
//! never split; it simply gets a line to itself.
//!
//! Blank paragraphs produce empty lines, so `"line1\n\nline2"` wraps to
//! `["line1", "", "line2"]`, and empty input wraps to a single empty line.
//!
//! # Example
//!
//! ```
//! use pdf_flow::{flow, FixedAdvance, Pt};
//!
//! let metrics = FixedAdvance::new(0.5);
//! let lines = flow::wrap("これはとても長いテキストです", &metrics, Pt(20.0), Pt(50.0)).unwrap();
//! assert_eq!(lines, vec!["これはとて", "も長いテキ", "ストです"]);
//! ```

mod token;
mod wrap;

pub use token::*;
pub use wrap::*;
