//! Discrete movement events: eye-rolls and fidgeting

use crate::metrics::names::{BROW_INNER_UP, JAW_LEFT, JAW_RIGHT, MOUTH_LEFT, MOUTH_RIGHT};
use crate::thresholds::Thresholds;
use crate::types::{blendshape, Frame};
use serde::{Deserialize, Serialize};

/// Blendshapes whose frame-to-frame movement counts towards fidgeting
const FIDGET_BLENDSHAPES: [&str; 5] = [JAW_LEFT, JAW_RIGHT, BROW_INNER_UP, MOUTH_LEFT, MOUTH_RIGHT];

/// A single upward gaze jump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeRollEvent {
    /// Index of the frame where the jump landed
    pub frame_index: usize,
    pub timestamp: i64,
    /// Size of the jump in upward gaze
    pub intensity: f64,
    /// Upward gaze at the landing frame
    pub look_up_value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeRollAnalysis {
    pub count: usize,
    pub events: Vec<EyeRollEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FidgetAnalysis {
    pub fidget_frames: usize,
    /// Fidget frames as a percentage of all frames
    pub rate: f64,
    pub is_excessive: bool,
}

/// Detect eye-rolls as sharp rises in upward gaze between consecutive frames
pub fn detect_eye_rolls(frames: &[Frame], thresholds: &Thresholds) -> EyeRollAnalysis {
    if frames.len() < 2 {
        return EyeRollAnalysis::default();
    }

    let events: Vec<EyeRollEvent> = frames
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let previous = pair[0].metrics.eye_movement.looking_up;
            let current = pair[1].metrics.eye_movement.looking_up;
            let delta = current - previous;
            (delta > thresholds.eye_roll_delta).then(|| EyeRollEvent {
                frame_index: i + 1,
                timestamp: pair[1].timestamp,
                intensity: delta,
                look_up_value: current,
            })
        })
        .collect();

    EyeRollAnalysis {
        count: events.len(),
        events,
    }
}

/// Detect restless jaw, brow and mouth-corner movement
pub fn detect_fidgeting(frames: &[Frame], thresholds: &Thresholds) -> FidgetAnalysis {
    if frames.len() < 2 {
        return FidgetAnalysis::default();
    }

    let fidget_frames = frames
        .windows(2)
        .filter(|pair| fidget_movement(&pair[0], &pair[1]) > thresholds.fidget_delta)
        .count();

    let rate = fidget_frames as f64 / frames.len() as f64 * 100.0;

    FidgetAnalysis {
        fidget_frames,
        rate,
        is_excessive: rate > thresholds.excessive_fidget_rate,
    }
}

fn fidget_movement(previous: &Frame, current: &Frame) -> f64 {
    FIDGET_BLENDSHAPES
        .iter()
        .map(|name| (blendshape(&current.blendshapes, name) - blendshape(&previous.blendshapes, name)).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::{frame, neutral_frames};
    use crate::metrics::names::{EYE_LOOK_UP_LEFT, EYE_LOOK_UP_RIGHT};

    fn looking_up(timestamp: i64, value: f64) -> Frame {
        frame(timestamp, &[(EYE_LOOK_UP_LEFT, value), (EYE_LOOK_UP_RIGHT, value)])
    }

    #[test]
    fn test_single_eye_roll() {
        let frames = vec![looking_up(0, 0.0), looking_up(100, 0.5)];
        let analysis = detect_eye_rolls(&frames, &Thresholds::default());

        assert_eq!(analysis.count, 1);
        let event = &analysis.events[0];
        assert_eq!(event.frame_index, 1);
        assert_eq!(event.timestamp, 100);
        assert!((event.intensity - 0.5).abs() < 1e-9);
        assert!((event.look_up_value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_eye_roll_needs_two_frames() {
        let frames = vec![looking_up(0, 0.9)];
        assert_eq!(detect_eye_rolls(&frames, &Thresholds::default()).count, 0);
    }

    #[test]
    fn test_gradual_rise_is_not_an_eye_roll() {
        let frames: Vec<Frame> = (0..6).map(|i| looking_up(i * 33, i as f64 * 0.1)).collect();
        assert_eq!(detect_eye_rolls(&frames, &Thresholds::default()).count, 0);
    }

    #[test]
    fn test_downward_gaze_drop_is_not_an_eye_roll() {
        let frames = vec![looking_up(0, 0.6), looking_up(33, 0.0)];
        assert_eq!(detect_eye_rolls(&frames, &Thresholds::default()).count, 0);
    }

    #[test]
    fn test_repeated_eye_rolls() {
        let frames = vec![
            looking_up(0, 0.0),
            looking_up(33, 0.4),
            looking_up(66, 0.0),
            looking_up(99, 0.4),
        ];
        let analysis = detect_eye_rolls(&frames, &Thresholds::default());
        assert_eq!(analysis.count, 2);
        assert_eq!(analysis.events[1].frame_index, 3);
    }

    #[test]
    fn test_fidget_rate() {
        // Jaw swings on every transition of a 4-frame session: 3 fidget frames / 4 = 75%
        let frames = vec![
            frame(0, &[(JAW_LEFT, 0.0)]),
            frame(33, &[(JAW_LEFT, 0.3)]),
            frame(66, &[(JAW_LEFT, 0.0)]),
            frame(99, &[(JAW_LEFT, 0.3)]),
        ];
        let analysis = detect_fidgeting(&frames, &Thresholds::default());
        assert_eq!(analysis.fidget_frames, 3);
        assert!((analysis.rate - 75.0).abs() < 1e-9);
        assert!(analysis.is_excessive);
    }

    #[test]
    fn test_fidget_sums_across_blendshapes() {
        // 0.1 + 0.15 = 0.25 > 0.2
        let frames = vec![
            frame(0, &[]),
            frame(33, &[(BROW_INNER_UP, 0.1), (MOUTH_RIGHT, 0.15)]),
        ];
        assert_eq!(detect_fidgeting(&frames, &Thresholds::default()).fidget_frames, 1);
    }

    #[test]
    fn test_still_face_does_not_fidget() {
        let frames = neutral_frames(10, 33);
        let analysis = detect_fidgeting(&frames, &Thresholds::default());
        assert_eq!(analysis.fidget_frames, 0);
        assert_eq!(analysis.rate, 0.0);
        assert!(!analysis.is_excessive);
    }

    #[test]
    fn test_fidget_needs_two_frames() {
        let frames = vec![frame(0, &[(JAW_LEFT, 1.0)])];
        assert_eq!(detect_fidgeting(&frames, &Thresholds::default()), FidgetAnalysis::default());
    }
}
