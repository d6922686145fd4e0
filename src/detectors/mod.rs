//! Pattern detectors
//!
//! Each detector is a pure function over the complete, time-ordered frame slice.
//! None of them depends on another's output, so they can run in any order.
//!
//! Degenerate sessions (one or two frames) are handled by explicit length
//! checks: movement-based detectors fall back to neutral-favorable values.

pub mod blink;
pub mod events;
pub mod gaze;
pub mod smile;
pub mod tension;

pub use blink::{analyze_blinks, BlinkAnalysis};
pub use events::{detect_eye_rolls, detect_fidgeting, EyeRollAnalysis, EyeRollEvent, FidgetAnalysis};
pub use gaze::{analyze_gaze_stability, analyze_head_stability, GazeStability, HeadStability};
pub use smile::{analyze_expression_variation, analyze_smiles, ExpressionVariation, SmilePattern, VariationBand};
pub use tension::{
    analyze_tension, detect_micro_expressions, MicroExpression, MicroExpressionAnalysis,
    MicroExpressionKind, TensionAnalysis,
};

use crate::thresholds::Thresholds;
use crate::types::Frame;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output of every detector for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorOutputs {
    pub eye_rolls: EyeRollAnalysis,
    pub blinks: BlinkAnalysis,
    pub gaze: GazeStability,
    pub head: HeadStability,
    pub smiles: SmilePattern,
    pub tension: TensionAnalysis,
    pub micro_expressions: MicroExpressionAnalysis,
    pub fidget: FidgetAnalysis,
    pub variation: ExpressionVariation,
}

/// Runs the full detector suite
pub struct DetectorSuite;

impl DetectorSuite {
    pub fn run(frames: &[Frame], thresholds: &Thresholds) -> DetectorOutputs {
        let outputs = DetectorOutputs {
            eye_rolls: detect_eye_rolls(frames, thresholds),
            blinks: analyze_blinks(frames, thresholds),
            gaze: analyze_gaze_stability(frames, thresholds),
            head: analyze_head_stability(frames, thresholds),
            smiles: analyze_smiles(frames, thresholds),
            tension: analyze_tension(frames, thresholds),
            micro_expressions: detect_micro_expressions(frames, thresholds),
            fidget: detect_fidgeting(frames, thresholds),
            variation: analyze_expression_variation(frames, thresholds),
        };

        debug!(
            frames = frames.len(),
            eye_rolls = outputs.eye_rolls.count,
            blinks_per_minute = outputs.blinks.blinks_per_minute,
            gaze_score = outputs.gaze.score,
            smile_percentage = outputs.smiles.smile_percentage,
            micro_expressions = outputs.micro_expressions.count,
            fidget_rate = outputs.fidget.rate,
            "pattern detectors complete"
        );

        outputs
    }
}

/// Arithmetic mean; `None` for an empty input
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::metrics::MetricExtractor;
    use crate::thresholds::Thresholds;
    use crate::types::{Frame, RawFrame};

    /// Build a frame at `timestamp` from `(blendshape, score)` pairs
    pub fn frame(timestamp: i64, pairs: &[(&str, f64)]) -> Frame {
        let raw = RawFrame::from_pairs(timestamp, pairs.iter().copied());
        MetricExtractor::frame(&raw, &Thresholds::default())
    }

    /// `count` neutral frames spaced `step_ms` apart
    pub fn neutral_frames(count: usize, step_ms: i64) -> Vec<Frame> {
        (0..count).map(|i| frame(i as i64 * step_ms, &[])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean(vec![1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn test_suite_on_single_neutral_frame() {
        let frames = neutral_frames(1, 33);
        let outputs = DetectorSuite::run(&frames, &Thresholds::default());

        assert_eq!(outputs.eye_rolls.count, 0);
        assert_eq!(outputs.gaze.score, 100.0);
        assert!(outputs.gaze.is_stable);
        assert_eq!(outputs.head.score, 100.0);
        assert_eq!(outputs.smiles.smiling_frames, 0);
        assert_eq!(outputs.tension.average, 0.0);
        assert_eq!(outputs.micro_expressions.count, 0);
        assert_eq!(outputs.fidget.fidget_frames, 0);
        assert!(!outputs.blinks.is_excessive);
    }
}
