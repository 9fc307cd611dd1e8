use crate::metrics::MetricsError;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum FlowError {
    /// A size or width argument was zero, negative, or not a finite number
    #[error("invalid argument `{name}`: {value} (expected a positive, finite length)")]
    InvalidArgument { name: &'static str, value: f32 },

    /// The glyph metrics provider failed, or returned a width that is negative or not finite
    #[error("failed to measure {segment:?}: {source}")]
    Metrics {
        segment: String,
        #[source]
        source: MetricsError,
    },

    /// The layout frame is shorter than a single line of text, so pagination could never
    /// make progress
    #[error("frame height {height} cannot hold a single line of height {line_height}")]
    FrameTooSmall { height: f32, line_height: f32 },

    /// A font id was used with a document that does not own it
    #[error("font is not registered with the document")]
    FontMissing,

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),
}

impl FlowError {
    pub(crate) fn check_positive(name: &'static str, value: crate::Pt) -> Result<(), FlowError> {
        if value.is_positive() {
            Ok(())
        } else {
            Err(FlowError::InvalidArgument {
                name,
                value: value.0,
            })
        }
    }
}
