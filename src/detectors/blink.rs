//! Blink pattern analysis

use crate::thresholds::Thresholds;
use crate::types::Frame;
use serde::{Deserialize, Serialize};

/// Shortest session duration used as the blink-rate denominator
const MIN_DURATION_SEC: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlinkAnalysis {
    /// Frames whose eyelid closure exceeds the blink threshold
    pub blink_count: usize,
    /// Session duration used for the rate, in seconds
    pub duration_sec: f64,
    pub blinks_per_minute: f64,
    pub is_excessive: bool,
}

/// Count blink frames and derive a per-minute rate
///
/// Formula: `blinks / duration_sec * 60`, with the duration floored at one
/// second so single-frame sessions never divide by zero.
pub fn analyze_blinks(frames: &[Frame], thresholds: &Thresholds) -> BlinkAnalysis {
    let blink_count = frames
        .iter()
        .filter(|f| f.metrics.eye_movement.blink_rate > thresholds.blink_closure)
        .count();

    let duration_sec = session_duration_sec(frames).max(MIN_DURATION_SEC);
    let blinks_per_minute = blink_count as f64 / duration_sec * 60.0;

    BlinkAnalysis {
        blink_count,
        duration_sec,
        blinks_per_minute,
        is_excessive: blinks_per_minute > thresholds.excessive_blinks_per_minute,
    }
}

/// Span between the first and last frame in seconds (0 for fewer than two frames)
pub fn session_duration_sec(frames: &[Frame]) -> f64 {
    match (frames.first(), frames.last()) {
        (Some(first), Some(last)) => last.timestamp.saturating_sub(first.timestamp) as f64 / 1000.0,
        _ => 0.0,
    }
}
