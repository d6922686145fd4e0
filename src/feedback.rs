//! Strength and weakness identification
//!
//! Thresholds each dimension score into zero or more strengths/weaknesses. The
//! gap between a dimension's weakness and strength cutoffs is a dead zone: a
//! score there is reported as neither.

use crate::detectors::DetectorOutputs;
use crate::scorer::DimensionScores;
use crate::thresholds::{DimensionCutoffs, Thresholds};
use serde::{Deserialize, Serialize};

/// The feedback areas a strength or weakness can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackMetric {
    #[serde(rename = "Eye Contact")]
    EyeContact,
    #[serde(rename = "Head Stability")]
    HeadStability,
    #[serde(rename = "Expressiveness")]
    Expressiveness,
    #[serde(rename = "Composure")]
    Composure,
    #[serde(rename = "Naturalness")]
    Naturalness,
    #[serde(rename = "Eye Rolling")]
    EyeRolling,
    #[serde(rename = "Blinking")]
    Blinking,
}

impl FeedbackMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EyeContact => "Eye Contact",
            Self::HeadStability => "Head Stability",
            Self::Expressiveness => "Expressiveness",
            Self::Composure => "Composure",
            Self::Naturalness => "Naturalness",
            Self::EyeRolling => "Eye Rolling",
            Self::Blinking => "Blinking",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::EyeContact => "👁️",
            Self::HeadStability => "🧍",
            Self::Expressiveness => "😊",
            Self::Composure => "😌",
            Self::Naturalness => "🌿",
            Self::EyeRolling => "🙄",
            Self::Blinking => "😣",
        }
    }
}

/// Weakness severity; `High` sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub metric: FeedbackMetric,
    pub score: f64,
    pub icon: String,
    pub message: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weakness {
    pub metric: FeedbackMetric,
    pub score: f64,
    pub severity: Severity,
    pub icon: String,
    pub issue: String,
    pub why: String,
}

/// Strengths, sorted best first
pub fn identify_strengths(scores: &DimensionScores, thresholds: &Thresholds) -> Vec<Strength> {
    let mut strengths: Vec<Strength> = dimensions(scores, thresholds)
        .into_iter()
        .filter(|(_, score, cutoffs)| *score >= cutoffs.strength)
        .map(|(metric, score, _)| {
            let (message, impact) = strength_text(metric);
            Strength {
                metric,
                score,
                icon: metric.icon().to_string(),
                message: message.to_string(),
                impact: impact.to_string(),
            }
        })
        .collect();

    strengths.sort_by(|a, b| b.score.total_cmp(&a.score));
    strengths
}

/// Weaknesses, sorted high severity first, then worst score first
pub fn identify_weaknesses(
    scores: &DimensionScores,
    detected: &DetectorOutputs,
    thresholds: &Thresholds,
) -> Vec<Weakness> {
    let mut weaknesses: Vec<Weakness> = dimensions(scores, thresholds)
        .into_iter()
        .filter_map(|(metric, score, cutoffs)| {
            let weakness_cutoff = cutoffs.weakness?;
            if score >= weakness_cutoff {
                return None;
            }
            let severity = match cutoffs.high_severity {
                Some(high) if score < high => Severity::High,
                _ => Severity::Medium,
            };
            Some(weakness(metric, score, severity))
        })
        .collect();

    if detected.eye_rolls.count > 0 {
        let severity = if detected.eye_rolls.count > thresholds.high_severity_eye_rolls {
            Severity::High
        } else {
            Severity::Medium
        };
        weaknesses.push(weakness(FeedbackMetric::EyeRolling, scores.naturalness, severity));
    }

    if detected.blinks.is_excessive {
        let severity = if detected.blinks.blinks_per_minute > thresholds.high_severity_blinks_per_minute {
            Severity::High
        } else {
            Severity::Medium
        };
        weaknesses.push(weakness(FeedbackMetric::Blinking, scores.naturalness, severity));
    }

    weaknesses.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.score.total_cmp(&b.score))
    });
    weaknesses
}

fn dimensions(
    scores: &DimensionScores,
    thresholds: &Thresholds,
) -> [(FeedbackMetric, f64, DimensionCutoffs); 5] {
    [
        (FeedbackMetric::EyeContact, scores.eye_contact, thresholds.eye_contact),
        (FeedbackMetric::HeadStability, scores.posture, thresholds.posture),
        (FeedbackMetric::Expressiveness, scores.expressiveness, thresholds.expressiveness),
        (FeedbackMetric::Composure, scores.composure, thresholds.composure),
        (FeedbackMetric::Naturalness, scores.naturalness, thresholds.naturalness),
    ]
}

fn weakness(metric: FeedbackMetric, score: f64, severity: Severity) -> Weakness {
    let (issue, why) = weakness_text(metric);
    Weakness {
        metric,
        score,
        severity,
        icon: metric.icon().to_string(),
        issue: issue.to_string(),
        why: why.to_string(),
    }
}

fn strength_text(metric: FeedbackMetric) -> (&'static str, &'static str) {
    match metric {
        FeedbackMetric::EyeContact => (
            "You held steady eye contact with the camera.",
            "Consistent eye contact signals honesty and engagement.",
        ),
        FeedbackMetric::HeadStability => (
            "Your head and jaw stayed calm and centered.",
            "A stable posture reads as composed and in control.",
        ),
        FeedbackMetric::Expressiveness => (
            "Your expressions were warm and engaging.",
            "Genuine expressions make listeners feel connected to you.",
        ),
        FeedbackMetric::Composure => (
            "Your face stayed relaxed throughout.",
            "A relaxed face makes you look at ease and approachable.",
        ),
        FeedbackMetric::Naturalness => (
            "Your mannerisms looked natural and unforced.",
            "Natural behavior keeps attention on your message.",
        ),
        FeedbackMetric::EyeRolling | FeedbackMetric::Blinking => (
            "No distracting habits detected.",
            "Listeners stay focused on what you are saying.",
        ),
    }
}

fn weakness_text(metric: FeedbackMetric) -> (&'static str, &'static str) {
    match metric {
        FeedbackMetric::EyeContact => (
            "Your gaze often drifted away from the camera.",
            "Looking away can read as nervousness or lack of conviction.",
        ),
        FeedbackMetric::HeadStability => (
            "Your head and jaw moved around frequently.",
            "Restless movement draws attention away from your words.",
        ),
        FeedbackMetric::Expressiveness => (
            "Your expressions were limited or looked forced.",
            "A flat face makes it harder for listeners to connect with you.",
        ),
        FeedbackMetric::Composure => (
            "Tension showed in your brow, jaw or lips.",
            "Visible tension signals stress even when your words are confident.",
        ),
        FeedbackMetric::Naturalness => (
            "Some mannerisms looked unnatural.",
            "Unnatural habits distract from your message.",
        ),
        FeedbackMetric::EyeRolling => (
            "Upward eye movements that look like eye-rolls were detected.",
            "Eye-rolls can be read as dismissive even when unintentional.",
        ),
        FeedbackMetric::Blinking => (
            "You blinked more often than usual.",
            "Rapid blinking is a common visible sign of anxiety.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::neutral_frames;
    use crate::detectors::DetectorSuite;

    fn scores(eye: f64, posture: f64, expr: f64, composure: f64, natural: f64) -> DimensionScores {
        DimensionScores {
            eye_contact: eye,
            posture,
            expressiveness: expr,
            composure,
            naturalness: natural,
        }
    }

    fn quiet_detectors() -> DetectorOutputs {
        DetectorSuite::run(&neutral_frames(3, 33), &Thresholds::default())
    }

    #[test]
    fn test_strengths_sorted_descending() {
        let strengths = identify_strengths(&scores(80.0, 95.0, 72.0, 60.0, 85.0), &Thresholds::default());
        let metrics: Vec<FeedbackMetric> = strengths.iter().map(|s| s.metric).collect();
        assert_eq!(
            metrics,
            vec![
                FeedbackMetric::HeadStability,
                FeedbackMetric::Naturalness,
                FeedbackMetric::EyeContact,
                FeedbackMetric::Expressiveness,
            ]
        );
    }

    #[test]
    fn test_dead_zone_is_neither() {
        // eye contact 60-74 is neither a strength nor a weakness
        let s = scores(65.0, 70.0, 60.0, 70.0, 79.0);
        assert!(identify_strengths(&s, &Thresholds::default()).is_empty());
        assert!(identify_weaknesses(&s, &quiet_detectors(), &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_weakness_severity_and_order() {
        let s = scores(30.0, 50.0, 50.0, 45.0, 100.0);
        let weaknesses = identify_weaknesses(&s, &quiet_detectors(), &Thresholds::default());
        let summary: Vec<(FeedbackMetric, Severity)> =
            weaknesses.iter().map(|w| (w.metric, w.severity)).collect();
        assert_eq!(
            summary,
            vec![
                (FeedbackMetric::EyeContact, Severity::High),
                (FeedbackMetric::Composure, Severity::Medium),
                (FeedbackMetric::HeadStability, Severity::Medium),
                (FeedbackMetric::Expressiveness, Severity::Medium),
            ]
        );
    }

    #[test]
    fn test_naturalness_is_never_a_dimension_weakness() {
        let s = scores(100.0, 100.0, 100.0, 100.0, 0.0);
        assert!(identify_weaknesses(&s, &quiet_detectors(), &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_eye_rolling_weakness() {
        let mut detected = quiet_detectors();
        detected.eye_rolls.count = 2;
        let s = scores(100.0, 100.0, 100.0, 100.0, 80.0);
        let weaknesses = identify_weaknesses(&s, &detected, &Thresholds::default());
        assert_eq!(weaknesses.len(), 1);
        assert_eq!(weaknesses[0].metric, FeedbackMetric::EyeRolling);
        assert_eq!(weaknesses[0].severity, Severity::Medium);
        assert_eq!(weaknesses[0].score, 80.0);

        detected.eye_rolls.count = 4;
        let weaknesses = identify_weaknesses(&s, &detected, &Thresholds::default());
        assert_eq!(weaknesses[0].severity, Severity::High);
    }

    #[test]
    fn test_blinking_weakness() {
        let mut detected = quiet_detectors();
        detected.blinks.is_excessive = true;
        detected.blinks.blinks_per_minute = 30.0;
        let s = scores(100.0, 100.0, 100.0, 100.0, 90.0);
        let weaknesses = identify_weaknesses(&s, &detected, &Thresholds::default());
        assert_eq!(weaknesses[0].metric, FeedbackMetric::Blinking);
        assert_eq!(weaknesses[0].severity, Severity::Medium);

        detected.blinks.blinks_per_minute = 40.0;
        let weaknesses = identify_weaknesses(&s, &detected, &Thresholds::default());
        assert_eq!(weaknesses[0].severity, Severity::High);
    }

    #[test]
    fn test_strength_and_weakness_never_share_a_metric() {
        let thresholds = Thresholds::default();
        let detected = quiet_detectors();
        for value in (0..=100).step_by(5) {
            let v = value as f64;
            let s = scores(v, v, v, v, v);
            let strengths = identify_strengths(&s, &thresholds);
            let weaknesses = identify_weaknesses(&s, &detected, &thresholds);
            for strength in &strengths {
                assert!(weaknesses.iter().all(|w| w.metric != strength.metric));
            }
        }
    }

    #[test]
    fn test_metric_serializes_as_display_name() {
        let json = serde_json::to_value(FeedbackMetric::HeadStability).unwrap();
        assert_eq!(json, "Head Stability");
        assert_eq!(serde_json::to_value(Severity::High).unwrap(), "high");
    }
}
