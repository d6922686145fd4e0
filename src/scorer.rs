//! Confidence scoring
//!
//! Combines detector outputs into five 0-100 dimension scores and a weighted
//! overall score.

use crate::detectors::{DetectorOutputs, SmilePattern};
use crate::thresholds::Thresholds;
use serde::{Deserialize, Serialize};

/// Per-dimension confidence scores (0-100, rounded to whole points)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub eye_contact: f64,
    pub posture: f64,
    pub expressiveness: f64,
    pub composure: f64,
    pub naturalness: f64,
}

/// Dimension scores plus the weighted overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceScore {
    pub overall: u32,
    pub dimensions: DimensionScores,
}

/// Scorer for detector outputs
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    pub fn score(detected: &DetectorOutputs, thresholds: &Thresholds) -> ConfidenceScore {
        let dimensions = DimensionScores {
            eye_contact: round_score(detected.gaze.score),
            posture: round_score(detected.head.score),
            expressiveness: round_score(compute_expressiveness(
                &detected.smiles,
                detected.variation.score,
                thresholds,
            )),
            composure: round_score(100.0 - detected.tension.average),
            naturalness: round_score(compute_naturalness(detected, thresholds)),
        };

        ConfidenceScore {
            overall: compute_overall(&dimensions, thresholds),
            dimensions,
        }
    }
}

fn round_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0).round()
}

/// Expressiveness from how often, how genuinely and how variedly the user smiled
///
/// A session without a single smile gets a flat baseline rather than zero:
/// a neutral face is only mildly penalized.
fn compute_expressiveness(smiles: &SmilePattern, variation_score: f64, thresholds: &Thresholds) -> f64 {
    if smiles.smiling_frames == 0 {
        return thresholds.no_smile_expressiveness;
    }

    let score = smile_frequency_score(smiles.smile_percentage)
        + smiles.authenticity_ratio * 30.0
        + variation_score * 0.1;
    score.clamp(0.0, 100.0)
}

/// Tent function of smile percentage
///
/// ```text
/// p < 20        => 2p                        (ramp to 40)
/// 20 <= p <= 70 => min(40 + p, 100)          (plateau)
/// p > 70        => max(100 - 2(p - 70), 40)  (constant smiling reads as forced)
/// ```
fn smile_frequency_score(percentage: f64) -> f64 {
    if percentage < 20.0 {
        percentage * 2.0
    } else if percentage <= 70.0 {
        (40.0 + percentage).min(100.0)
    } else {
        (100.0 - (percentage - 70.0) * 2.0).max(40.0)
    }
}

/// 100 minus penalties for excessive blinking, eye-rolls and fidgeting
fn compute_naturalness(detected: &DetectorOutputs, thresholds: &Thresholds) -> f64 {
    let blink_penalty = if detected.blinks.is_excessive {
        (2.0 * (detected.blinks.blinks_per_minute - thresholds.excessive_blinks_per_minute))
            .min(thresholds.blink_penalty_cap)
    } else {
        0.0
    };

    let eye_roll_penalty = (thresholds.eye_roll_penalty_per_event * detected.eye_rolls.count as f64)
        .min(thresholds.eye_roll_penalty_cap);

    let fidget_penalty = if detected.fidget.is_excessive {
        detected.fidget.rate.min(thresholds.fidget_penalty_cap)
    } else {
        0.0
    };

    (100.0 - blink_penalty - eye_roll_penalty - fidget_penalty).max(0.0)
}

/// Formula:
/// ```text
/// overall = 0.25 * eye_contact + 0.20 * posture + 0.20 * expressiveness
///         + 0.20 * composure + 0.15 * naturalness
/// ```
fn compute_overall(scores: &DimensionScores, thresholds: &Thresholds) -> u32 {
    let w = &thresholds.weights;
    let overall = w.eye_contact * scores.eye_contact
        + w.posture * scores.posture
        + w.expressiveness * scores.expressiveness
        + w.composure * scores.composure
        + w.naturalness * scores.naturalness;
    overall.clamp(0.0, 100.0).round() as u32
}
