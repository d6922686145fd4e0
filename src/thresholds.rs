//! Threshold table
//!
//! Every magic number the engine uses lives here so a deployment can audit or
//! tune them without touching the detectors. `Thresholds::default()` is the
//! calibrated production table; partial JSON documents fill the gaps from it.
//! A dimension's cutoff set is the exception: overriding one replaces the whole
//! set, so all three fields must be given (`null` disables a weakness cutoff).

use crate::error::ComputeError;
use serde::{Deserialize, Serialize};

/// Strength / weakness cutoffs for a single dimension
///
/// The optional cutoffs are still required keys, so a missing one is a parse
/// error rather than a silently disabled weakness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionCutoffs {
    /// Scores at or above this are reported as a strength
    pub strength: f64,
    /// Scores below this are reported as a weakness (`None` = never a weakness)
    #[serde(deserialize_with = "Option::deserialize")]
    pub weakness: Option<f64>,
    /// Weakness scores below this are high severity
    #[serde(deserialize_with = "Option::deserialize")]
    pub high_severity: Option<f64>,
}

impl DimensionCutoffs {
    const fn new(strength: f64, weakness: f64, high_severity: f64) -> Self {
        Self {
            strength,
            weakness: Some(weakness),
            high_severity: Some(high_severity),
        }
    }

    const fn strength_only(strength: f64) -> Self {
        Self {
            strength,
            weakness: None,
            high_severity: None,
        }
    }
}

/// Weights of the five dimensions in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub eye_contact: f64,
    pub posture: f64,
    pub expressiveness: f64,
    pub composure: f64,
    pub naturalness: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            eye_contact: 0.25,
            posture: 0.20,
            expressiveness: 0.20,
            composure: 0.20,
            naturalness: 0.15,
        }
    }
}

impl DimensionWeights {
    pub fn total(&self) -> f64 {
        self.eye_contact + self.posture + self.expressiveness + self.composure + self.naturalness
    }
}

/// The complete threshold table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    // ------------------------------------------------------------------
    // Frame metrics
    // ------------------------------------------------------------------
    /// Mean mouth-smile intensity above which a frame counts as smiling
    pub smile_intensity: f64,

    // ------------------------------------------------------------------
    // Detectors
    // ------------------------------------------------------------------
    /// Frame-to-frame rise in upward gaze that counts as an eye-roll
    pub eye_roll_delta: f64,
    /// Mean eyelid closure above which a frame counts as a blink
    pub blink_closure: f64,
    /// Blinks per minute above which blinking is excessive
    pub excessive_blinks_per_minute: f64,
    /// Gaze stability score above which gaze is stable
    pub stable_gaze_score: f64,
    /// Gaze movement multiplier in the stability score
    pub gaze_movement_weight: f64,
    /// Head stability score above which the head is stable
    pub stable_head_score: f64,
    /// Smile authenticity above which a smiling frame is genuine
    pub genuine_smile_authenticity: f64,
    /// Mean facial tension above which tension is high
    pub high_tension: f64,
    /// Brow-down rise that flags a concern micro-expression
    pub concern_brow_delta: f64,
    /// Mouth-press level that flags a suppression micro-expression
    pub suppression_mouth_press: f64,
    /// Nose-sneer level that flags a contempt micro-expression
    pub contempt_nose_sneer: f64,
    /// Mouth-frown level that flags a disapproval micro-expression
    pub disapproval_mouth_frown: f64,
    /// Summed jaw/brow/mouth-corner movement that counts as a fidget
    pub fidget_delta: f64,
    /// Fidget rate (percent of frames) above which fidgeting is excessive
    pub excessive_fidget_rate: f64,
    /// Mean expression variation below which the face is too flat
    pub flat_variation: f64,
    /// Mean expression variation above which the face is too erratic
    pub erratic_variation: f64,

    // ------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------
    pub weights: DimensionWeights,
    /// Expressiveness for a session in which the user never smiled
    pub no_smile_expressiveness: f64,
    pub blink_penalty_cap: f64,
    pub eye_roll_penalty_per_event: f64,
    pub eye_roll_penalty_cap: f64,
    pub fidget_penalty_cap: f64,

    // ------------------------------------------------------------------
    // Feedback
    // ------------------------------------------------------------------
    pub eye_contact: DimensionCutoffs,
    pub posture: DimensionCutoffs,
    pub expressiveness: DimensionCutoffs,
    pub composure: DimensionCutoffs,
    pub naturalness: DimensionCutoffs,
    /// Eye-roll count above which the eye-rolling weakness is high severity
    pub high_severity_eye_rolls: usize,
    /// Blink rate above which the blinking weakness is high severity
    pub high_severity_blinks_per_minute: f64,
    /// Authenticity ratio below which smile coaching is offered
    pub authenticity_ratio_floor: f64,
    /// Micro-expression count above which micro-expression coaching is offered
    pub micro_expression_alert_count: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            smile_intensity: 0.1,

            eye_roll_delta: 0.15,
            blink_closure: 0.5,
            excessive_blinks_per_minute: 25.0,
            stable_gaze_score: 70.0,
            gaze_movement_weight: 200.0,
            stable_head_score: 70.0,
            genuine_smile_authenticity: 50.0,
            high_tension: 50.0,
            concern_brow_delta: 0.3,
            suppression_mouth_press: 0.3,
            contempt_nose_sneer: 0.2,
            disapproval_mouth_frown: 0.25,
            fidget_delta: 0.2,
            excessive_fidget_rate: 30.0,
            flat_variation: 0.05,
            erratic_variation: 0.30,

            weights: DimensionWeights::default(),
            no_smile_expressiveness: 40.0,
            blink_penalty_cap: 30.0,
            eye_roll_penalty_per_event: 10.0,
            eye_roll_penalty_cap: 40.0,
            fidget_penalty_cap: 20.0,

            eye_contact: DimensionCutoffs::new(75.0, 60.0, 40.0),
            posture: DimensionCutoffs::new(75.0, 65.0, 45.0),
            expressiveness: DimensionCutoffs::new(70.0, 55.0, 35.0),
            composure: DimensionCutoffs::new(75.0, 60.0, 40.0),
            naturalness: DimensionCutoffs::strength_only(80.0),
            high_severity_eye_rolls: 3,
            high_severity_blinks_per_minute: 35.0,
            authenticity_ratio_floor: 0.5,
            micro_expression_alert_count: 10,
        }
    }
}

impl Thresholds {
    /// Load a threshold table from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        let thresholds: Thresholds = serde_json::from_str(json)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Serialize the table to pretty JSON
    pub fn to_json(&self) -> Result<String, ComputeError> {
        serde_json::to_string_pretty(self).map_err(ComputeError::JsonError)
    }

    /// Check the table for combinations the scorer cannot work with
    pub fn validate(&self) -> Result<(), ComputeError> {
        let total = self.weights.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ComputeError::ConfigError(format!(
                "dimension weights must sum to 1.0, got {total:.4}"
            )));
        }

        if self.flat_variation >= self.erratic_variation {
            return Err(ComputeError::ConfigError(format!(
                "flat_variation ({}) must be below erratic_variation ({})",
                self.flat_variation, self.erratic_variation
            )));
        }

        for (name, cutoffs) in self.cutoffs() {
            if let Some(weakness) = cutoffs.weakness {
                if weakness > cutoffs.strength {
                    return Err(ComputeError::ConfigError(format!(
                        "{name}: weakness cutoff ({weakness}) above strength cutoff ({})",
                        cutoffs.strength
                    )));
                }
                if let Some(high) = cutoffs.high_severity {
                    if high > weakness {
                        return Err(ComputeError::ConfigError(format!(
                            "{name}: high severity cutoff ({high}) above weakness cutoff ({weakness})"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn cutoffs(&self) -> [(&'static str, &DimensionCutoffs); 5] {
        [
            ("eye_contact", &self.eye_contact),
            ("posture", &self.posture),
            ("expressiveness", &self.expressiveness),
            ("composure", &self.composure),
            ("naturalness", &self.naturalness),
        ]
    }
}
