//! Metric-driven text wrapping and pagination for generating PDF documents from
//! (usually machine-translated) plain text.
//!
//! The heart of the crate is [flow]: a greedy line wrapper that measures candidate
//! lines with any [GlyphMetrics] implementation, keeps forced line breaks and blank
//! lines, and never splits an atomic token. [layout] places the wrapped lines on
//! pages, and [Document] embeds a [Font] and writes the pages out as a PDF.
//!
//! ```
//! use pdf_flow::{flow, Pt};
//!
//! let width = |s: &str, _size: Pt| Pt(s.chars().count() as f32 * 10.0);
//! let lines = flow::wrap("line1\n\nline2", &width, Pt(10.0), Pt(100.0)).unwrap();
//! assert_eq!(lines, vec!["line1", "", "line2"]);
//! ```

mod document;
pub use document::*;

mod error;
pub use error::*;

/// Splitting text into lines that fit a given width
pub mod flow;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Placing wrapped lines on pages
pub mod layout;

mod metrics;
pub use metrics::*;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

/// Re-export of pdf-writer, for callers that need to add their own PDF objects
pub use pdf_writer;
