//! Frame types
//!
//! This module defines the raw blendshape frames delivered by the capture
//! pipeline and the per-frame metrics derived from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Facial action-unit intensities keyed by blendshape name (`eyeLookUpLeft`, `jawForward`, ...).
///
/// Scores are produced in [0,1] by the face tracker and are not revalidated here.
/// A sorted map keeps every traversal, and therefore every float sum, deterministic.
pub type BlendshapeMap = BTreeMap<String, f64>;

/// Read a blendshape score, treating absent action units as fully relaxed
pub fn blendshape(map: &BlendshapeMap, name: &str) -> f64 {
    map.get(name).copied().unwrap_or(0.0)
}

/// Mean of a left/right blendshape pair
pub fn blendshape_pair(map: &BlendshapeMap, left: &str, right: &str) -> f64 {
    (blendshape(map, left) + blendshape(map, right)) / 2.0
}

/// One frame as produced by the capture pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Capture time in milliseconds
    pub timestamp: i64,
    /// Blendshape scores for this frame
    #[serde(default)]
    pub blendshapes: BlendshapeMap,
}

impl RawFrame {
    pub fn new(timestamp: i64, blendshapes: BlendshapeMap) -> Self {
        Self {
            timestamp,
            blendshapes,
        }
    }

    /// Convenience constructor from `(name, score)` pairs
    pub fn from_pairs<'a>(timestamp: i64, pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            timestamp,
            blendshapes: pairs
                .into_iter()
                .map(|(name, score)| (name.to_string(), score))
                .collect(),
        }
    }
}

/// A frame together with its derived metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp: i64,
    pub blendshapes: BlendshapeMap,
    pub metrics: FrameMetrics,
}

/// Head pose metrics (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadPose {
    /// 100 = jaw perfectly centered and relaxed
    pub stability: f64,
    /// Forward jaw thrust scaled to 0-100
    pub jaw_tension: f64,
}

/// Facial tension metrics (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialTension {
    /// Mean of the brow, jaw and mouth sub-scores
    pub overall: f64,
    pub brow: f64,
    pub jaw: f64,
    pub mouth: f64,
}

/// Smile metrics for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmileQuality {
    pub is_smiling: bool,
    /// Mouth-corner smile intensity scaled to 0-100
    pub intensity: f64,
    /// Eye/cheek engagement relative to the mouth (0-100); 0 when not smiling
    pub authenticity: f64,
}

/// Eye movement metrics in raw blendshape units (0-1)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeMovement {
    pub looking_down: f64,
    pub looking_up: f64,
    pub looking_side: f64,
    /// Mean eyelid closure; above the blink threshold the frame is a blink
    pub blink_rate: f64,
}

/// Metrics derived from one blendshape snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMetrics {
    /// 100 = looking straight at the camera
    pub eye_contact: f64,
    pub head_pose: HeadPose,
    pub facial_tension: FacialTension,
    pub smile_quality: SmileQuality,
    pub eye_movement: EyeMovement,
}
