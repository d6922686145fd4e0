//! Pipeline orchestration
//!
//! This module provides the public API for Poise Lens.
//! It orchestrates the full pipeline from raw blendshape frames to a confidence report.

use crate::coaching::{generate_quick_wins, QuickWin};
use crate::detectors::{DetectorOutputs, DetectorSuite};
use crate::encoder::{AnalysisOutcome, ConfidenceReport, ReportEncoder};
use crate::error::ComputeError;
use crate::metrics::MetricExtractor;
use crate::schema::FrameAdapter;
use crate::scorer::{ConfidenceScore, ConfidenceScorer};
use crate::thresholds::Thresholds;
use crate::types::{Frame, RawFrame};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Analyze one recorded session with the default thresholds.
///
/// # Arguments
/// * `frames` - Time-ordered blendshape frames for the session
/// * `analyzed_at` - Analysis time stamped into `summary.timestamp`
///
/// # Returns
/// The full confidence report, or `ComputeError::NoFrames` for an empty session
///
/// # Example
/// ```ignore
/// let report = analyze_frames(&frames, Utc::now())?;
/// println!("{}", report.summary.overall_score);
/// ```
pub fn analyze_frames(
    frames: &[RawFrame],
    analyzed_at: DateTime<Utc>,
) -> Result<ConfidenceReport, ComputeError> {
    ConfidenceAnalyzer::new().analyze(frames, analyzed_at)
}

/// Intermediate results shared by the report and quick-win paths
struct ScoredSession {
    frames: Vec<Frame>,
    detected: DetectorOutputs,
    score: ConfidenceScore,
}

/// Analyzer holding a threshold table.
///
/// Stateless between calls: analyzing the same frames twice yields identical reports.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceAnalyzer {
    thresholds: Thresholds,
}

impl ConfidenceAnalyzer {
    /// Create an analyzer with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom threshold table
    pub fn with_thresholds(thresholds: Thresholds) -> Result<Self, ComputeError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Run the full pipeline.
    ///
    /// Pipeline stages:
    /// 1. MetricExtractor - Per-frame metrics from blendshapes
    /// 2. DetectorSuite - Session-level patterns and events
    /// 3. ConfidenceScorer - Dimension and overall scores
    /// 4. ReportEncoder - Feedback, coaching and the final report
    pub fn analyze(
        &self,
        frames: &[RawFrame],
        analyzed_at: DateTime<Utc>,
    ) -> Result<ConfidenceReport, ComputeError> {
        let session = self.score_session(frames)?;

        let report = ReportEncoder::new(analyzed_at).encode(
            &session.frames,
            &session.detected,
            &session.score,
            &self.thresholds,
        );
        debug!(
            strengths = report.strengths.len(),
            weaknesses = report.weaknesses.len(),
            recommendations = report.recommendations.len(),
            "report encoded"
        );

        Ok(report)
    }

    /// Run the pipeline, folding the empty-session error into its serializable form
    pub fn analyze_to_outcome(
        &self,
        frames: &[RawFrame],
        analyzed_at: DateTime<Utc>,
    ) -> Result<AnalysisOutcome, ComputeError> {
        match self.analyze(frames, analyzed_at) {
            Ok(report) => Ok(report.into()),
            Err(ComputeError::NoFrames) => Ok(AnalysisOutcome::no_frames()),
            Err(e) => Err(e),
        }
    }

    /// Analyze a JSON array of frames and return the outcome as JSON.
    ///
    /// An empty array yields `{"error":"No frames to analyze"}`; malformed JSON is an error.
    pub fn analyze_json(&self, json: &str, analyzed_at: DateTime<Utc>) -> Result<String, ComputeError> {
        let frames = FrameAdapter::parse_array(json)?;
        self.analyze_to_outcome(&frames, analyzed_at)?.to_json()
    }

    /// Short exercises for the session's most pressing issues
    pub fn quick_wins(&self, frames: &[RawFrame]) -> Result<Vec<QuickWin>, ComputeError> {
        let session = self.score_session(frames)?;
        Ok(generate_quick_wins(
            &session.score.dimensions,
            &session.detected,
            &self.thresholds,
        ))
    }

    fn score_session(&self, raw: &[RawFrame]) -> Result<ScoredSession, ComputeError> {
        if raw.is_empty() {
            warn!("no frames to analyze");
            return Err(ComputeError::NoFrames);
        }

        // Stage 1: Per-frame metrics
        let frames = MetricExtractor::frames(raw, &self.thresholds);
        debug!(frames = frames.len(), "frame metrics extracted");

        // Stage 2: Detectors
        let detected = DetectorSuite::run(&frames, &self.thresholds);

        // Stage 3: Scores
        let score = ConfidenceScorer::score(&detected, &self.thresholds);
        info!(
            overall = score.overall,
            eye_contact = score.dimensions.eye_contact,
            posture = score.dimensions.posture,
            expressiveness = score.dimensions.expressiveness,
            composure = score.dimensions.composure,
            naturalness = score.dimensions.naturalness,
            "confidence scored"
        );

        Ok(ScoredSession {
            frames,
            detected,
            score,
        })
    }
}
