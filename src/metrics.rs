//! Frame metric extraction
//!
//! Turns one raw blendshape snapshot into the per-frame metrics the pattern
//! detectors consume. Extraction is stateless: each frame is handled in isolation.

use crate::thresholds::Thresholds;
use crate::types::{
    blendshape, blendshape_pair, BlendshapeMap, EyeMovement, FacialTension, Frame, FrameMetrics,
    HeadPose, RawFrame, SmileQuality,
};

/// ARKit-style blendshape names read by the engine
pub mod names {
    pub const EYE_LOOK_DOWN_LEFT: &str = "eyeLookDownLeft";
    pub const EYE_LOOK_DOWN_RIGHT: &str = "eyeLookDownRight";
    pub const EYE_LOOK_UP_LEFT: &str = "eyeLookUpLeft";
    pub const EYE_LOOK_UP_RIGHT: &str = "eyeLookUpRight";
    pub const EYE_LOOK_OUT_LEFT: &str = "eyeLookOutLeft";
    pub const EYE_LOOK_OUT_RIGHT: &str = "eyeLookOutRight";
    pub const EYE_BLINK_LEFT: &str = "eyeBlinkLeft";
    pub const EYE_BLINK_RIGHT: &str = "eyeBlinkRight";
    pub const EYE_SQUINT_LEFT: &str = "eyeSquintLeft";
    pub const EYE_SQUINT_RIGHT: &str = "eyeSquintRight";
    pub const CHEEK_SQUINT_LEFT: &str = "cheekSquintLeft";
    pub const CHEEK_SQUINT_RIGHT: &str = "cheekSquintRight";
    pub const JAW_LEFT: &str = "jawLeft";
    pub const JAW_RIGHT: &str = "jawRight";
    pub const JAW_FORWARD: &str = "jawForward";
    pub const BROW_DOWN_LEFT: &str = "browDownLeft";
    pub const BROW_DOWN_RIGHT: &str = "browDownRight";
    pub const BROW_INNER_UP: &str = "browInnerUp";
    pub const MOUTH_PRESS_LEFT: &str = "mouthPressLeft";
    pub const MOUTH_PRESS_RIGHT: &str = "mouthPressRight";
    pub const MOUTH_SMILE_LEFT: &str = "mouthSmileLeft";
    pub const MOUTH_SMILE_RIGHT: &str = "mouthSmileRight";
    pub const MOUTH_FROWN_LEFT: &str = "mouthFrownLeft";
    pub const MOUTH_FROWN_RIGHT: &str = "mouthFrownRight";
    pub const MOUTH_LEFT: &str = "mouthLeft";
    pub const MOUTH_RIGHT: &str = "mouthRight";
    pub const NOSE_SNEER_LEFT: &str = "noseSneerLeft";
    pub const NOSE_SNEER_RIGHT: &str = "noseSneerRight";
}

use names::*;

/// Extractor for per-frame metrics
pub struct MetricExtractor;

impl MetricExtractor {
    /// Derive the metrics for one blendshape snapshot
    pub fn extract(blendshapes: &BlendshapeMap, thresholds: &Thresholds) -> FrameMetrics {
        let eye_movement = compute_eye_movement(blendshapes);

        FrameMetrics {
            eye_contact: compute_eye_contact(&eye_movement),
            head_pose: compute_head_pose(blendshapes),
            facial_tension: compute_facial_tension(blendshapes),
            smile_quality: compute_smile_quality(blendshapes, thresholds.smile_intensity),
            eye_movement,
        }
    }

    /// Attach metrics to a raw frame
    pub fn frame(raw: &RawFrame, thresholds: &Thresholds) -> Frame {
        Frame {
            timestamp: raw.timestamp,
            blendshapes: raw.blendshapes.clone(),
            metrics: Self::extract(&raw.blendshapes, thresholds),
        }
    }

    /// Attach metrics to every frame, preserving order
    pub fn frames(raw: &[RawFrame], thresholds: &Thresholds) -> Vec<Frame> {
        raw.iter().map(|f| Self::frame(f, thresholds)).collect()
    }
}

fn compute_eye_movement(b: &BlendshapeMap) -> EyeMovement {
    EyeMovement {
        looking_down: blendshape_pair(b, EYE_LOOK_DOWN_LEFT, EYE_LOOK_DOWN_RIGHT),
        looking_up: blendshape_pair(b, EYE_LOOK_UP_LEFT, EYE_LOOK_UP_RIGHT),
        looking_side: blendshape_pair(b, EYE_LOOK_OUT_LEFT, EYE_LOOK_OUT_RIGHT),
        blink_rate: blendshape_pair(b, EYE_BLINK_LEFT, EYE_BLINK_RIGHT),
    }
}

/// Formula: `max(0, 100 - 100 * (down + up + side))`
fn compute_eye_contact(eyes: &EyeMovement) -> f64 {
    let away = eyes.looking_down + eyes.looking_up + eyes.looking_side;
    (100.0 - 100.0 * away).clamp(0.0, 100.0)
}

/// Lateral or forward jaw displacement reads as head movement
fn compute_head_pose(b: &BlendshapeMap) -> HeadPose {
    let jaw_forward = blendshape(b, JAW_FORWARD);
    let displacement = blendshape(b, JAW_LEFT) + blendshape(b, JAW_RIGHT) + jaw_forward;

    HeadPose {
        stability: (100.0 - 200.0 * displacement).clamp(0.0, 100.0),
        jaw_tension: 100.0 * jaw_forward,
    }
}

fn compute_facial_tension(b: &BlendshapeMap) -> FacialTension {
    let brow = 100.0 * blendshape_pair(b, BROW_DOWN_LEFT, BROW_DOWN_RIGHT);
    let jaw = 100.0 * blendshape(b, JAW_FORWARD);
    let mouth = 100.0 * blendshape_pair(b, MOUTH_PRESS_LEFT, MOUTH_PRESS_RIGHT);

    FacialTension {
        overall: (brow + jaw + mouth) / 3.0,
        brow,
        jaw,
        mouth,
    }
}

/// A smile carried only by the mouth corners, without eye or cheek
/// engagement, scores low authenticity ("forced smile").
fn compute_smile_quality(b: &BlendshapeMap, smile_threshold: f64) -> SmileQuality {
    let smile = blendshape_pair(b, MOUTH_SMILE_LEFT, MOUTH_SMILE_RIGHT);
    let is_smiling = smile > smile_threshold;

    let authenticity = if is_smiling {
        let eye_squint = blendshape_pair(b, EYE_SQUINT_LEFT, EYE_SQUINT_RIGHT);
        let cheek_squint = blendshape_pair(b, CHEEK_SQUINT_LEFT, CHEEK_SQUINT_RIGHT);
        (100.0 * (eye_squint + cheek_squint) / smile).min(100.0)
    } else {
        0.0
    };

    SmileQuality {
        is_smiling,
        intensity: 100.0 * smile,
        authenticity,
    }
}
