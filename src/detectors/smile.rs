//! Smile pattern and expression variation

use super::mean;
use crate::thresholds::Thresholds;
use crate::types::Frame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmilePattern {
    pub smiling_frames: usize,
    /// Smiling frames with eye/cheek engagement
    pub genuine: usize,
    /// Smiling frames carried by the mouth alone
    pub forced: usize,
    /// Smiling frames as a percentage of all frames
    pub smile_percentage: f64,
    /// `genuine / (genuine + forced)`, 0 when the user never smiled
    pub authenticity_ratio: f64,
}

/// How lively the face was across the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationBand {
    /// Fewer than two frames
    Insufficient,
    TooFlat,
    Balanced,
    TooErratic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionVariation {
    /// Mean per-transition, per-blendshape absolute change
    pub average_variation: f64,
    pub band: VariationBand,
    /// 0 (too flat), 40 (too erratic) or 100
    pub score: f64,
}

pub fn analyze_smiles(frames: &[Frame], thresholds: &Thresholds) -> SmilePattern {
    let mut pattern = SmilePattern::default();

    for smile in frames.iter().map(|f| &f.metrics.smile_quality).filter(|s| s.is_smiling) {
        pattern.smiling_frames += 1;
        if smile.authenticity > thresholds.genuine_smile_authenticity {
            pattern.genuine += 1;
        } else {
            pattern.forced += 1;
        }
    }

    if !frames.is_empty() {
        pattern.smile_percentage = pattern.smiling_frames as f64 / frames.len() as f64 * 100.0;
    }
    if pattern.smiling_frames > 0 {
        pattern.authenticity_ratio = pattern.genuine as f64 / pattern.smiling_frames as f64;
    }

    pattern
}

/// Frame-to-frame change across every blendshape present in either frame
pub fn analyze_expression_variation(frames: &[Frame], thresholds: &Thresholds) -> ExpressionVariation {
    if frames.len() < 2 {
        return ExpressionVariation {
            average_variation: 0.0,
            band: VariationBand::Insufficient,
            score: 100.0,
        };
    }

    let average_variation =
        mean(frames.windows(2).map(|pair| transition_variation(&pair[0], &pair[1]))).unwrap_or(0.0);

    let (band, score) = if average_variation < thresholds.flat_variation {
        (VariationBand::TooFlat, 0.0)
    } else if average_variation > thresholds.erratic_variation {
        (VariationBand::TooErratic, 40.0)
    } else {
        (VariationBand::Balanced, 100.0)
    };

    ExpressionVariation {
        average_variation,
        band,
        score,
    }
}

fn transition_variation(previous: &Frame, current: &Frame) -> f64 {
    let keys: BTreeSet<&String> = previous
        .blendshapes
        .keys()
        .chain(current.blendshapes.keys())
        .collect();

    mean(keys.into_iter().map(|key| {
        let before = previous.blendshapes.get(key).copied().unwrap_or(0.0);
        let after = current.blendshapes.get(key).copied().unwrap_or(0.0);
        (after - before).abs()
    }))
    .unwrap_or(0.0)
}
