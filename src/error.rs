//! Error types for vertex finding.

use std::fmt;

/// Errors reported before any clustering pass runs.
///
/// The passes themselves have no recoverable failure: capacity overruns
/// inside the pipeline are bugs and panic.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexError {
    /// A configuration value is out of its valid range.
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// More tracks than the fixed workspace capacity (`MAX_TRACKS`).
    TooManyTracks(usize),

    /// The parallel input arrays have different lengths.
    LengthMismatch { z: usize, ez2: usize, pt2: usize },

    /// The origin mapping is not a permutation of the track indices.
    InvalidOrigin(String),

    /// A flat buffer could not be viewed as tracks.
    Layout(String),

    /// A configuration document could not be parsed.
    Parse(String),
}

impl fmt::Display for VertexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexError::InvalidConfig { field, message } => {
                write!(f, "invalid config: {}: {}", field, message)
            }
            VertexError::TooManyTracks(n) => {
                write!(
                    f,
                    "too many tracks: {} exceeds capacity {}",
                    n,
                    crate::MAX_TRACKS
                )
            }
            VertexError::LengthMismatch { z, ez2, pt2 } => {
                write!(
                    f,
                    "input length mismatch: z={}, ez2={}, pt2={}",
                    z, ez2, pt2
                )
            }
            VertexError::InvalidOrigin(msg) => write!(f, "invalid origin mapping: {}", msg),
            VertexError::Layout(msg) => write!(f, "invalid track buffer: {}", msg),
            VertexError::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for VertexError {}

impl From<serde_json::Error> for VertexError {
    fn from(err: serde_json::Error) -> Self {
        VertexError::Parse(err.to_string())
    }
}
