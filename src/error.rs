//! Error types for Poise Lens

use thiserror::Error;

/// Message carried by the empty-input sentinel.
pub const NO_FRAMES_MESSAGE: &str = "No frames to analyze";

/// Errors that can occur during analysis
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("No frames to analyze")]
    NoFrames,

    #[error("Failed to parse frame payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid threshold configuration: {0}")]
    ConfigError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

impl ComputeError {
    /// Whether this is the empty-session sentinel rather than a malformed input.
    ///
    /// Callers use this to decide between "facial analysis unavailable" and a hard failure.
    pub fn is_no_frames(&self) -> bool {
        matches!(self, ComputeError::NoFrames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frames_message_matches_sentinel() {
        assert_eq!(ComputeError::NoFrames.to_string(), NO_FRAMES_MESSAGE);
        assert!(ComputeError::NoFrames.is_no_frames());
        assert!(!ComputeError::ParseError("x".to_string()).is_no_frames());
    }
}
