//! Gaze and head stability

use super::mean;
use crate::thresholds::Thresholds;
use crate::types::Frame;
use serde::{Deserialize, Serialize};

/// Score reported when there is not enough movement data to judge
const NEUTRAL_STABILITY: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GazeStability {
    /// Mean per-transition gaze movement in blendshape units
    pub average_movement: f64,
    /// 0-100, higher = steadier gaze
    pub score: f64,
    pub is_stable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadStability {
    /// Mean per-frame head stability, 0-100
    pub score: f64,
    pub is_stable: bool,
}

/// Gaze stability from frame-to-frame eye movement
///
/// Formula: `max(0, 100 - 200 * mean(|Δside| + |Δdown| + |Δup|))`
pub fn analyze_gaze_stability(frames: &[Frame], thresholds: &Thresholds) -> GazeStability {
    if frames.len() < 2 {
        return GazeStability {
            average_movement: 0.0,
            score: NEUTRAL_STABILITY,
            is_stable: true,
        };
    }

    let average_movement = mean(frames.windows(2).map(|pair| {
        let a = &pair[0].metrics.eye_movement;
        let b = &pair[1].metrics.eye_movement;
        (b.looking_side - a.looking_side).abs()
            + (b.looking_down - a.looking_down).abs()
            + (b.looking_up - a.looking_up).abs()
    }))
    .unwrap_or(0.0);

    let score = (100.0 - thresholds.gaze_movement_weight * average_movement).clamp(0.0, 100.0);

    GazeStability {
        average_movement,
        score,
        is_stable: score > thresholds.stable_gaze_score,
    }
}

/// Mean of the per-frame head stability metric
pub fn analyze_head_stability(frames: &[Frame], thresholds: &Thresholds) -> HeadStability {
    let score = mean(frames.iter().map(|f| f.metrics.head_pose.stability)).unwrap_or(NEUTRAL_STABILITY);

    HeadStability {
        score,
        is_stable: score > thresholds.stable_head_score,
    }
}
