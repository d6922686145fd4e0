//! Report encoding
//!
//! This module assembles detector outputs, scores and coaching into the
//! camelCase `ConfidenceReport` consumed by the practice app.

use crate::classifier::{ConfidenceBand, ConfidenceLevel};
use crate::coaching::{generate_insights, generate_recommendations, Recommendation};
use crate::detectors::blink::session_duration_sec;
use crate::detectors::{DetectorOutputs, EyeRollEvent};
use crate::error::{ComputeError, NO_FRAMES_MESSAGE};
use crate::feedback::{identify_strengths, identify_weaknesses, Strength, Weakness};
use crate::scorer::{ConfidenceScore, DimensionScores};
use crate::thresholds::Thresholds;
use crate::types::Frame;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete analysis of one practice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceReport {
    pub summary: ReportSummary,
    pub scores: DimensionScores,
    pub detailed_metrics: DetailedMetrics,
    pub strengths: Vec<Strength>,
    pub weaknesses: Vec<Weakness>,
    pub recommendations: Vec<Recommendation>,
    pub key_insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub overall_score: u32,
    pub level: ConfidenceLevel,
    pub total_frames: usize,
    /// Seconds between the first and last frame
    pub duration: f64,
    /// When the analysis was run
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMetrics {
    pub eye_rolls: EyeRollMetrics,
    pub blinking: BlinkMetrics,
    pub gaze: GazeMetrics,
    pub smiles: SmileMetrics,
    pub tension: TensionMetrics,
    pub micro_expressions: MicroExpressionMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeRollMetrics {
    pub count: usize,
    pub details: Vec<EyeRollEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlinkMetrics {
    pub total: usize,
    pub per_minute: f64,
    pub is_excessive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GazeMetrics {
    pub stability_score: f64,
    pub is_stable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmileMetrics {
    pub percentage: f64,
    pub genuine: usize,
    pub forced: usize,
    pub authenticity_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TensionMetrics {
    pub average: f64,
    pub max: f64,
    pub is_high: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroExpressionMetrics {
    pub count: usize,
    pub types: BTreeMap<String, usize>,
}

impl From<&DetectorOutputs> for DetailedMetrics {
    fn from(detected: &DetectorOutputs) -> Self {
        DetailedMetrics {
            eye_rolls: EyeRollMetrics {
                count: detected.eye_rolls.count,
                details: detected.eye_rolls.events.clone(),
            },
            blinking: BlinkMetrics {
                total: detected.blinks.blink_count,
                per_minute: detected.blinks.blinks_per_minute,
                is_excessive: detected.blinks.is_excessive,
            },
            gaze: GazeMetrics {
                stability_score: detected.gaze.score,
                is_stable: detected.gaze.is_stable,
            },
            smiles: SmileMetrics {
                percentage: detected.smiles.smile_percentage,
                genuine: detected.smiles.genuine,
                forced: detected.smiles.forced,
                authenticity_ratio: detected.smiles.authenticity_ratio,
            },
            tension: TensionMetrics {
                average: detected.tension.average,
                max: detected.tension.max,
                is_high: detected.tension.is_high,
            },
            micro_expressions: MicroExpressionMetrics {
                count: detected.micro_expressions.count,
                types: detected.micro_expressions.types.clone(),
            },
        }
    }
}

/// Serialized result of an analysis at the JSON boundary
///
/// An empty session encodes as `{"error": "No frames to analyze"}` rather than
/// as a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Report(Box<ConfidenceReport>),
    Error { error: String },
}

impl AnalysisOutcome {
    pub fn no_frames() -> Self {
        AnalysisOutcome::Error {
            error: NO_FRAMES_MESSAGE.to_string(),
        }
    }

    pub fn report(&self) -> Option<&ConfidenceReport> {
        match self {
            AnalysisOutcome::Report(report) => Some(&**report),
            AnalysisOutcome::Error { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<String, ComputeError> {
        serde_json::to_string(self).map_err(|e| ComputeError::EncodingError(e.to_string()))
    }
}

impl From<ConfidenceReport> for AnalysisOutcome {
    fn from(report: ConfidenceReport) -> Self {
        AnalysisOutcome::Report(Box::new(report))
    }
}

/// Report encoder stamped with the analysis time
pub struct ReportEncoder {
    analyzed_at: DateTime<Utc>,
}

impl ReportEncoder {
    pub fn new(analyzed_at: DateTime<Utc>) -> Self {
        Self { analyzed_at }
    }

    /// Encode a scored session into a report
    pub fn encode(
        &self,
        frames: &[Frame],
        detected: &DetectorOutputs,
        score: &ConfidenceScore,
        thresholds: &Thresholds,
    ) -> ConfidenceReport {
        let weaknesses = identify_weaknesses(&score.dimensions, detected, thresholds);
        let recommendations = generate_recommendations(&weaknesses, detected, thresholds);

        ConfidenceReport {
            summary: ReportSummary {
                overall_score: score.overall,
                level: ConfidenceBand::from_score(score.overall).level(),
                total_frames: frames.len(),
                duration: session_duration_sec(frames),
                timestamp: self.analyzed_at,
            },
            scores: score.dimensions,
            detailed_metrics: DetailedMetrics::from(detected),
            strengths: identify_strengths(&score.dimensions, thresholds),
            weaknesses,
            recommendations,
            key_insights: generate_insights(detected, score),
        }
    }
}
