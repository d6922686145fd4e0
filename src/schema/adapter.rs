//! Adapter for parsing and checking frame streams

use crate::error::ComputeError;
use crate::schema::validation::{FrameIssue, FrameValidation};
use crate::types::RawFrame;
use std::collections::BTreeSet;
use tracing::warn;

/// Adapter for frame payloads
pub struct FrameAdapter;

impl FrameAdapter {
    /// Parse a JSON string containing an array of frames
    pub fn parse_array(json: &str) -> Result<Vec<RawFrame>, ComputeError> {
        let frames: Vec<RawFrame> = serde_json::from_str(json)?;
        Ok(frames)
    }

    /// Parse NDJSON (newline-delimited JSON) with one frame per line
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawFrame>, ComputeError> {
        let mut frames = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawFrame>(trimmed) {
                Ok(frame) => frames.push(frame),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(frames)
    }

    /// Report frames that violate the input assumptions.
    ///
    /// Timestamps must strictly ascend and every score must be a finite value
    /// in [0, 1]. Findings are informational: the analyzer processes the frames
    /// as given either way.
    pub fn validate_frames(frames: &[RawFrame]) -> Vec<FrameValidation> {
        let mut findings = Vec::new();

        for (index, frame) in frames.iter().enumerate() {
            if let Some(previous) = index.checked_sub(1).map(|i| frames[i].timestamp) {
                if frame.timestamp <= previous {
                    findings.push(FrameValidation {
                        index,
                        timestamp: frame.timestamp,
                        issue: FrameIssue::NonAscendingTimestamp {
                            previous,
                            current: frame.timestamp,
                        },
                    });
                }
            }

            for (name, &value) in &frame.blendshapes {
                let issue = if !value.is_finite() {
                    FrameIssue::NonFiniteScore { name: name.clone() }
                } else if !(0.0..=1.0).contains(&value) {
                    FrameIssue::ScoreOutOfRange {
                        name: name.clone(),
                        value,
                    }
                } else {
                    continue;
                };
                findings.push(FrameValidation {
                    index,
                    timestamp: frame.timestamp,
                    issue,
                });
            }
        }

        if !findings.is_empty() {
            let affected: BTreeSet<usize> = findings.iter().map(|f| f.index).collect();
            warn!(
                findings = findings.len(),
                frames = affected.len(),
                "frame stream violates input assumptions"
            );
        }

        findings
    }
}
