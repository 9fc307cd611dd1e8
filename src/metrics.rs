//! Glyph metrics: how wide a run of text is when drawn at a given size.
//!
//! The wrapping engine never looks at fonts directly; it only asks a [GlyphMetrics]
//! implementation for widths. [Font](crate::Font) is the implementation used when
//! generating PDFs, while closures and [FixedAdvance] are handy for tests and for
//! callers that measure text some other way.

use crate::{FlowError, Pt};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Reasons a width measurement can be rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// The metrics provider itself reported a failure
    #[error("metrics provider failed: {0}")]
    Failed(String),

    /// The provider returned NaN or an infinite width
    #[error("width {0} is not finite")]
    NonFinite(f32),

    /// The provider returned a negative width
    #[error("width {0} is negative")]
    Negative(f32),
}

/// Measures the rendered width of a text segment at a given font size.
///
/// Implementations must be deterministic for a given input; the wrapping engine
/// may measure the same prefix several times. Implementations shared between
/// threads should also be [Sync] and must not mutate observable state.
pub trait GlyphMetrics {
    fn width(&self, segment: &str, size: Pt) -> Result<Pt, MetricsError>;
}

impl<F> GlyphMetrics for F
where
    F: Fn(&str, Pt) -> Pt,
{
    fn width(&self, segment: &str, size: Pt) -> Result<Pt, MetricsError> {
        Ok(self(segment, size))
    }
}

/// Adapts a fallible closure into a [GlyphMetrics] implementation
#[derive(Debug, Clone, Copy)]
pub struct TryMetrics<F>(pub F);

impl<F> GlyphMetrics for TryMetrics<F>
where
    F: Fn(&str, Pt) -> Result<Pt, MetricsError>,
{
    fn width(&self, segment: &str, size: Pt) -> Result<Pt, MetricsError> {
        (self.0)(segment, size)
    }
}

/// Every grapheme cluster advances by the same amount, expressed as a fraction of the
/// font size (an "em"). Whitespace included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub advance_em: f32,
}

impl FixedAdvance {
    pub fn new(advance_em: f32) -> FixedAdvance {
        FixedAdvance { advance_em }
    }
}

impl GlyphMetrics for FixedAdvance {
    fn width(&self, segment: &str, size: Pt) -> Result<Pt, MetricsError> {
        let count = segment.graphemes(true).count();
        Ok(size * (self.advance_em * count as f32))
    }
}

/// Measure `segment`, rejecting failures and nonsensical widths
pub(crate) fn measure<M>(metrics: &M, segment: &str, size: Pt) -> Result<Pt, FlowError>
where
    M: GlyphMetrics + ?Sized,
{
    let fail = |source| FlowError::Metrics {
        segment: segment.to_string(),
        source,
    };

    let width = metrics.width(segment, size).map_err(fail)?;
    if !width.0.is_finite() {
        return Err(fail(MetricsError::NonFinite(width.0)));
    }
    if width.0 < 0.0 {
        return Err(fail(MetricsError::Negative(width.0)));
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_measure_infallibly() {
        let m = |s: &str, _size: Pt| Pt(s.chars().count() as f32 * 10.0);
        assert_eq!(measure(&m, "abc", Pt(12.0)).unwrap(), Pt(30.0));
    }

    #[test]
    fn fixed_advance_counts_graphemes() {
        let m = FixedAdvance::new(0.5);
        // "e" + combining acute is one cluster
        assert_eq!(m.width("e\u{301}x", Pt(10.0)).unwrap(), Pt(10.0));
        assert_eq!(m.width("", Pt(10.0)).unwrap(), Pt(0.0));
    }

    #[test]
    fn bad_widths_are_rejected() {
        let nan = |_: &str, _: Pt| Pt(f32::NAN);
        let negative = |_: &str, _: Pt| Pt(-1.0);

        match measure(&nan, "x", Pt(10.0)) {
            Err(FlowError::Metrics { segment, source }) => {
                assert_eq!(segment, "x");
                assert!(matches!(source, MetricsError::NonFinite(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            measure(&negative, "x", Pt(10.0)),
            Err(FlowError::Metrics {
                source: MetricsError::Negative(_),
                ..
            })
        ));
    }

    #[test]
    fn provider_failures_propagate() {
        let m = TryMetrics(|s: &str, _: Pt| {
            if s.contains('?') {
                Err(MetricsError::Failed("no glyph".into()))
            } else {
                Ok(Pt(1.0))
            }
        });
        assert!(measure(&m, "ok", Pt(1.0)).is_ok());
        let err = measure(&m, "huh?", Pt(1.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to measure \"huh?\": metrics provider failed: no glyph"
        );
    }
}
