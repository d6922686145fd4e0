//! Recommendations, quick wins and key insights
//!
//! Maps weaknesses and raw detector outputs to prioritized, actionable coaching.

use crate::classifier::ConfidenceBand;
use crate::detectors::DetectorOutputs;
use crate::feedback::{FeedbackMetric, Severity, Weakness};
use crate::scorer::{ConfidenceScore, DimensionScores};
use crate::thresholds::Thresholds;
use serde::{Deserialize, Serialize};

/// Prefix for insights describing something that went well
pub const SUCCESS_MARKER: &str = "✓";
/// Prefix for insights describing something to work on
pub const WARNING_MARKER: &str = "⚠";

/// Recommendation priority; `High` sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::High => Priority::High,
            Severity::Medium => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub area: String,
    pub issue: String,
    pub recommendation: String,
    pub exercise: String,
    pub impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
}

/// A short exercise the user can try before the next session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickWin {
    pub title: String,
    pub action: String,
    pub difficulty: Difficulty,
    pub timeframe: String,
    pub impact: String,
}

struct Coaching {
    recommendation: &'static str,
    exercise: &'static str,
    impact: &'static str,
}

fn coaching_for(metric: FeedbackMetric) -> Option<Coaching> {
    let coaching = match metric {
        FeedbackMetric::EyeContact => Coaching {
            recommendation: "Use the triangle technique: rotate your focus between the two \
                             eyes and the mouth of an imagined listener behind the lens.",
            exercise: "Tape a small sticker next to your camera and practice a 60-second \
                       answer keeping your eyes within the triangle around it.",
            impact: "Improves perceived trustworthiness and engagement.",
        },
        FeedbackMetric::EyeRolling => Coaching {
            recommendation: "Keep your gaze forward when you pause to think; look slightly \
                             down or to the side instead of up.",
            exercise: "Record three answers and notice each moment you search for words; \
                       practice holding a soft forward gaze through those pauses.",
            impact: "Removes a gesture listeners often read as dismissive.",
        },
        FeedbackMetric::Blinking => Coaching {
            recommendation: "Slow your breathing before and during answers to calm the \
                             nervous system that drives rapid blinking.",
            exercise: "Box breathing: inhale 4 seconds, hold 4, exhale 4, hold 4. Repeat \
                       four rounds before each recording.",
            impact: "Reduces a visible anxiety cue and helps you feel calmer.",
        },
        FeedbackMetric::HeadStability => Coaching {
            recommendation: "Ground your posture: sit tall with both feet flat and keep your \
                             chin level and relaxed.",
            exercise: "Posture drill: balance a light book on your head for 2 minutes while \
                       answering a practice prompt aloud.",
            impact: "A steady head reads as calm and in control.",
        },
        FeedbackMetric::Expressiveness => Coaching {
            recommendation: "Let your face follow your message; smile at natural moments, \
                             engaging your eyes as well as your mouth.",
            exercise: "Mirror-smile practice: recall a happy memory and watch your cheeks \
                       and eyes lift, then reproduce that smile while speaking.",
            impact: "Warm, genuine expressions make you more relatable.",
        },
        FeedbackMetric::Composure => Coaching {
            recommendation: "Release facial tension before you speak, starting with the jaw \
                             and brow.",
            exercise: "Jaw-relaxation drill: open wide, hold 5 seconds, then let the jaw \
                       hang loose for 10 seconds. Repeat five times.",
            impact: "A relaxed face looks confident and approachable.",
        },
        FeedbackMetric::Naturalness => return None,
    };
    Some(coaching)
}

/// Build the prioritized recommendation list
pub fn generate_recommendations(
    weaknesses: &[Weakness],
    detected: &DetectorOutputs,
    thresholds: &Thresholds,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = weaknesses
        .iter()
        .filter_map(|weakness| {
            let coaching = coaching_for(weakness.metric)?;
            Some(Recommendation {
                priority: weakness.severity.into(),
                area: weakness.metric.as_str().to_string(),
                issue: weakness.issue.clone(),
                recommendation: coaching.recommendation.to_string(),
                exercise: coaching.exercise.to_string(),
                impact: coaching.impact.to_string(),
            })
        })
        .collect();

    if needs_smile_coaching(detected, thresholds) {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            area: "Smile Authenticity".to_string(),
            issue: "Most of your smiles involved only the mouth.".to_string(),
            recommendation: "Aim for genuine smiles that reach your eyes (Duchenne smiles).".to_string(),
            exercise: "Think of something you are grateful for just before smiling, and \
                       check in a mirror that your cheeks lift and your eyes crinkle."
                .to_string(),
            impact: "Genuine smiles build rapport; forced ones can read as nervous.".to_string(),
        });
    }

    if detected.micro_expressions.count > thresholds.micro_expression_alert_count {
        recommendations.push(Recommendation {
            priority: Priority::Low,
            area: "Micro-expressions".to_string(),
            issue: format!(
                "{} brief flashes of concern, tension or disapproval were detected.",
                detected.micro_expressions.count
            ),
            recommendation: "Notice the thoughts that trigger brief frowns or lip presses and \
                             reframe them before you answer."
                .to_string(),
            exercise: "Watch your recording muted and note each flash of tension; rehearse \
                       those moments with a relaxed face."
                .to_string(),
            impact: "Fewer involuntary signals keep your expression consistent with your words."
                .to_string(),
        });
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

/// Short, immediate exercises for the most common issues
pub fn generate_quick_wins(
    scores: &DimensionScores,
    detected: &DetectorOutputs,
    thresholds: &Thresholds,
) -> Vec<QuickWin> {
    let mut wins = Vec::new();

    if let Some(weakness_cutoff) = thresholds.eye_contact.weakness {
        if scores.eye_contact < weakness_cutoff {
            wins.push(QuickWin {
                title: "Camera focus".to_string(),
                action: "Put a sticky note with a smiley face right next to your camera lens.".to_string(),
                difficulty: Difficulty::Easy,
                timeframe: "Next session".to_string(),
                impact: "high".to_string(),
            });
        }
    }

    if detected.eye_rolls.count > 0 {
        wins.push(QuickWin {
            title: "Forward pauses".to_string(),
            action: "When you need to think, glance down at your notes instead of up.".to_string(),
            difficulty: Difficulty::Easy,
            timeframe: "Immediately".to_string(),
            impact: "medium".to_string(),
        });
    }

    if needs_smile_coaching(detected, thresholds) {
        wins.push(QuickWin {
            title: "Eyes-first smile".to_string(),
            action: "Before each answer, recall something that makes you laugh so the smile \
                     reaches your eyes."
                .to_string(),
            difficulty: Difficulty::Medium,
            timeframe: "1 week of practice".to_string(),
            impact: "medium".to_string(),
        });
    }

    wins
}

/// A session without smiles has an authenticity ratio of 0 and is coached too
fn needs_smile_coaching(detected: &DetectorOutputs, thresholds: &Thresholds) -> bool {
    detected.smiles.authenticity_ratio < thresholds.authenticity_ratio_floor
}

/// One short line per detector family plus a closing line naming the band
pub fn generate_insights(detected: &DetectorOutputs, score: &ConfidenceScore) -> Vec<String> {
    let mut insights = Vec::with_capacity(7);

    let gaze = &detected.gaze;
    insights.push(if gaze.is_stable {
        format!("{SUCCESS_MARKER} Steady gaze held throughout (stability {:.0}/100)", gaze.score)
    } else {
        format!("{WARNING_MARKER} Your gaze wandered often (stability {:.0}/100)", gaze.score)
    });

    insights.push(match detected.eye_rolls.count {
        0 => format!("{SUCCESS_MARKER} No eye-rolls detected"),
        1 => format!("{WARNING_MARKER} 1 eye-roll detected"),
        n => format!("{WARNING_MARKER} {n} eye-rolls detected"),
    });

    let blinks = &detected.blinks;
    insights.push(if blinks.is_excessive {
        format!(
            "{WARNING_MARKER} Blinking {:.0} times per minute, above the comfortable range",
            blinks.blinks_per_minute
        )
    } else {
        format!(
            "{SUCCESS_MARKER} Natural blink rate ({:.0} per minute)",
            blinks.blinks_per_minute
        )
    });

    let smiles = &detected.smiles;
    insights.push(if smiles.smiling_frames == 0 {
        format!("{WARNING_MARKER} No smiles detected; a warm smile helps you connect")
    } else if smiles.smile_percentage >= 20.0 {
        format!(
            "{SUCCESS_MARKER} Smiled during {:.0}% of the session",
            smiles.smile_percentage
        )
    } else {
        format!(
            "{WARNING_MARKER} Smiled during only {:.0}% of the session",
            smiles.smile_percentage
        )
    });

    let tension = &detected.tension;
    insights.push(if tension.is_high {
        format!("{WARNING_MARKER} High facial tension (average {:.0}/100)", tension.average)
    } else {
        format!("{SUCCESS_MARKER} Relaxed facial muscles (tension {:.0}/100)", tension.average)
    });

    let head = &detected.head;
    insights.push(if head.is_stable {
        format!("{SUCCESS_MARKER} Stable head position (stability {:.0}/100)", head.score)
    } else {
        format!("{WARNING_MARKER} Frequent head movement (stability {:.0}/100)", head.score)
    });

    let band = ConfidenceBand::from_score(score.overall);
    insights.push(format!(
        "{} Overall confidence: {} ({}/100)",
        band.emoji(),
        band.label(),
        score.overall
    ));

    insights
}
