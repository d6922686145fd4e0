//! Facial tension and micro-expressions

use super::mean;
use crate::metrics::names::*;
use crate::thresholds::Thresholds;
use crate::types::{blendshape_pair, Frame};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TensionAnalysis {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub is_high: bool,
}

/// Brief involuntary expressions flagged on interior frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicroExpressionKind {
    /// Sudden brow lowering
    Concern,
    /// Pressed lips
    Suppression,
    /// Nose sneer
    Contempt,
    /// Mouth-corner frown
    Disapproval,
}

impl MicroExpressionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concern => "concern",
            Self::Suppression => "suppression",
            Self::Contempt => "contempt",
            Self::Disapproval => "disapproval",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroExpression {
    pub frame_index: usize,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: MicroExpressionKind,
    /// Blendshape level (or rise, for concern) that triggered the flag
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroExpressionAnalysis {
    pub count: usize,
    pub events: Vec<MicroExpression>,
    /// Event count per kind, keyed by kind name
    pub types: BTreeMap<String, usize>,
}

/// Mean, peak and floor of the per-frame overall tension
pub fn analyze_tension(frames: &[Frame], thresholds: &Thresholds) -> TensionAnalysis {
    let values = frames.iter().map(|f| f.metrics.facial_tension.overall);

    let Some(average) = mean(values.clone()) else {
        return TensionAnalysis::default();
    };
    let max = values.clone().fold(f64::MIN, f64::max);
    let min = values.fold(f64::MAX, f64::min);

    TensionAnalysis {
        average,
        max,
        min,
        is_high: average > thresholds.high_tension,
    }
}

/// Flag micro-expressions on every frame that has both neighbours
pub fn detect_micro_expressions(frames: &[Frame], thresholds: &Thresholds) -> MicroExpressionAnalysis {
    if frames.len() < 3 {
        return MicroExpressionAnalysis::default();
    }

    let mut events = Vec::new();

    for i in 1..frames.len() - 1 {
        let previous = &frames[i - 1].blendshapes;
        let current = &frames[i];
        let b = &current.blendshapes;

        let brow_rise = blendshape_pair(b, BROW_DOWN_LEFT, BROW_DOWN_RIGHT)
            - blendshape_pair(previous, BROW_DOWN_LEFT, BROW_DOWN_RIGHT);
        let mouth_press = blendshape_pair(b, MOUTH_PRESS_LEFT, MOUTH_PRESS_RIGHT);
        let nose_sneer = blendshape_pair(b, NOSE_SNEER_LEFT, NOSE_SNEER_RIGHT);
        let mouth_frown = blendshape_pair(b, MOUTH_FROWN_LEFT, MOUTH_FROWN_RIGHT);

        let checks = [
            (MicroExpressionKind::Concern, brow_rise, thresholds.concern_brow_delta),
            (MicroExpressionKind::Suppression, mouth_press, thresholds.suppression_mouth_press),
            (MicroExpressionKind::Contempt, nose_sneer, thresholds.contempt_nose_sneer),
            (MicroExpressionKind::Disapproval, mouth_frown, thresholds.disapproval_mouth_frown),
        ];

        events.extend(checks.into_iter().filter(|(_, value, limit)| value > limit).map(
            |(kind, intensity, _)| MicroExpression {
                frame_index: i,
                timestamp: current.timestamp,
                kind,
                intensity,
            },
        ));
    }

    let mut types = BTreeMap::new();
    for event in &events {
        *types.entry(event.kind.as_str().to_string()).or_insert(0) += 1;
    }

    MicroExpressionAnalysis {
        count: events.len(),
        events,
        types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::{frame, neutral_frames};

    #[test]
    fn test_tension_stats() {
        // overall = jaw / 3 when only jawForward is set
        let frames = vec![
            frame(0, &[(JAW_FORWARD, 0.3)]),
            frame(33, &[(JAW_FORWARD, 0.9)]),
            frame(66, &[(JAW_FORWARD, 0.0)]),
        ];
        let tension = analyze_tension(&frames, &Thresholds::default());
        assert!((tension.average - 40.0 / 3.0).abs() < 1e-9);
        assert!((tension.max - 30.0).abs() < 1e-9);
        assert_eq!(tension.min, 0.0);
        assert!(!tension.is_high);
    }

    #[test]
    fn test_high_tension() {
        let tight = [
            (BROW_DOWN_LEFT, 0.8),
            (BROW_DOWN_RIGHT, 0.8),
            (JAW_FORWARD, 0.6),
            (MOUTH_PRESS_LEFT, 0.7),
            (MOUTH_PRESS_RIGHT, 0.7),
        ];
        let frames = vec![frame(0, &tight), frame(33, &tight)];
        let tension = analyze_tension(&frames, &Thresholds::default());
        assert!((tension.average - 70.0).abs() < 1e-9);
        assert!(tension.is_high);
    }

    #[test]
    fn test_empty_tension() {
        assert_eq!(analyze_tension(&[], &Thresholds::default()), TensionAnalysis::default());
    }

    #[test]
    fn test_micro_expressions_need_three_frames() {
        let frames = vec![
            frame(0, &[(NOSE_SNEER_LEFT, 0.9), (NOSE_SNEER_RIGHT, 0.9)]),
            frame(33, &[(NOSE_SNEER_LEFT, 0.9), (NOSE_SNEER_RIGHT, 0.9)]),
        ];
        assert_eq!(detect_micro_expressions(&frames, &Thresholds::default()).count, 0);
    }

    #[test]
    fn test_concern_on_sudden_brow_drop() {
        let frames = vec![
            frame(0, &[]),
            frame(33, &[(BROW_DOWN_LEFT, 0.5), (BROW_DOWN_RIGHT, 0.5)]),
            frame(66, &[]),
        ];
        let analysis = detect_micro_expressions(&frames, &Thresholds::default());
        assert_eq!(analysis.count, 1);
        assert_eq!(analysis.events[0].kind, MicroExpressionKind::Concern);
        assert_eq!(analysis.events[0].frame_index, 1);
        assert_eq!(analysis.types.get("concern"), Some(&1));
    }

    #[test]
    fn test_multiple_kinds_on_one_frame() {
        let frames = vec![
            frame(0, &[]),
            frame(
                33,
                &[
                    (MOUTH_PRESS_LEFT, 0.5),
                    (MOUTH_PRESS_RIGHT, 0.5),
                    (MOUTH_FROWN_LEFT, 0.4),
                    (MOUTH_FROWN_RIGHT, 0.4),
                ],
            ),
            frame(66, &[]),
        ];
        let analysis = detect_micro_expressions(&frames, &Thresholds::default());
        assert_eq!(analysis.count, 2);
        assert_eq!(analysis.types.get("suppression"), Some(&1));
        assert_eq!(analysis.types.get("disapproval"), Some(&1));
        assert!(analysis.events.iter().all(|e| e.frame_index == 1));
    }

    #[test]
    fn test_edge_frames_are_ignored() {
        let sneer = [(NOSE_SNEER_LEFT, 0.5), (NOSE_SNEER_RIGHT, 0.5)];
        let frames = vec![frame(0, &sneer), frame(33, &[]), frame(66, &sneer)];
        assert_eq!(detect_micro_expressions(&frames, &Thresholds::default()).count, 0);
    }

    #[test]
    fn test_neutral_session_has_no_micro_expressions() {
        let analysis = detect_micro_expressions(&neutral_frames(30, 33), &Thresholds::default());
        assert_eq!(analysis.count, 0);
        assert!(analysis.types.is_empty());
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let event = MicroExpression {
            frame_index: 2,
            timestamp: 66,
            kind: MicroExpressionKind::Contempt,
            intensity: 0.3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "contempt");
        assert_eq!(json["frameIndex"], 2);
    }
}
