//! Frame validation findings

use serde::Serialize;

/// Problems the validator can report for a single frame
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameIssue {
    #[error("Timestamp {current} does not follow previous timestamp {previous}")]
    NonAscendingTimestamp { previous: i64, current: i64 },

    #[error("Blendshape {name} has score {value} outside [0, 1]")]
    ScoreOutOfRange { name: String, value: f64 },

    #[error("Blendshape {name} has a non-finite score")]
    NonFiniteScore { name: String },
}

/// A validation finding tied to its frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameValidation {
    pub index: usize,
    pub timestamp: i64,
    pub issue: FrameIssue,
}
