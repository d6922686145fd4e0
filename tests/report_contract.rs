use chrono::{DateTime, TimeZone, Utc};
use poise_lens::coaching::Priority;
use poise_lens::feedback::Severity;
use poise_lens::{analyze_frames, ConfidenceAnalyzer, FrameAdapter, RawFrame, Thresholds};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const NERVOUS_SESSION: &str = include_str!("fixtures/nervous_session.json");
const NERVOUS_SESSION_NDJSON: &str = include_str!("fixtures/nervous_session.ndjson");

fn analyzed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 5).unwrap()
}

fn nervous_frames() -> Vec<RawFrame> {
    FrameAdapter::parse_array(NERVOUS_SESSION).unwrap()
}

/// Ten frames of a mouth-only smile held the whole session
fn forced_smile_frames() -> Vec<RawFrame> {
    let frames: Value = (0..10)
        .map(|i| json!({"timestamp": i * 200, "blendshapes": {"mouthSmileLeft": 0.5, "mouthSmileRight": 0.5}}))
        .collect();
    FrameAdapter::parse_array(&frames.to_string()).unwrap()
}

#[test]
fn nervous_session_scores() {
    let report = analyze_frames(&nervous_frames(), analyzed_at()).unwrap();

    assert_eq!(report.scores.eye_contact, 52.0);
    assert_eq!(report.scores.posture, 100.0);
    assert_eq!(report.scores.expressiveness, 40.0);
    assert_eq!(report.scores.composure, 100.0);
    assert_eq!(report.scores.naturalness, 50.0);
    assert_eq!(report.summary.overall_score, 69);
    assert_eq!(report.summary.level.level, "Good");
    assert_eq!(report.summary.total_frames, 11);
    assert_eq!(report.summary.duration, 1.0);
    assert_eq!(report.summary.timestamp, analyzed_at());
}

#[test]
fn nervous_session_detailed_metrics() {
    let report = analyze_frames(&nervous_frames(), analyzed_at()).unwrap();
    let metrics = &report.detailed_metrics;

    assert_eq!(metrics.eye_rolls.count, 2);
    let roll_frames: Vec<usize> = metrics.eye_rolls.details.iter().map(|e| e.frame_index).collect();
    assert_eq!(roll_frames, vec![3, 7]);
    assert_eq!(metrics.eye_rolls.details[0].look_up_value, 0.6);

    assert_eq!(metrics.blinking.total, 3);
    assert_eq!(metrics.blinking.per_minute, 180.0);
    assert!(metrics.blinking.is_excessive);

    assert!(!metrics.gaze.is_stable);
    assert_eq!(metrics.smiles.percentage, 0.0);
    assert_eq!(metrics.tension.average, 0.0);
    assert_eq!(metrics.micro_expressions.count, 0);
}

#[test]
fn nervous_session_feedback_order() {
    let report = analyze_frames(&nervous_frames(), analyzed_at()).unwrap();

    let weaknesses: Vec<(&str, Severity)> = report
        .weaknesses
        .iter()
        .map(|w| (w.metric.as_str(), w.severity))
        .collect();
    assert_eq!(
        weaknesses,
        vec![
            ("Blinking", Severity::High),
            ("Expressiveness", Severity::Medium),
            ("Eye Rolling", Severity::Medium),
            ("Eye Contact", Severity::Medium),
        ]
    );

    let strengths: Vec<&str> = report.strengths.iter().map(|s| s.metric.as_str()).collect();
    assert_eq!(strengths, vec!["Head Stability", "Composure"]);

    let recommendations: Vec<(&str, Priority)> = report
        .recommendations
        .iter()
        .map(|r| (r.area.as_str(), r.priority))
        .collect();
    assert_eq!(
        recommendations,
        vec![
            ("Blinking", Priority::High),
            ("Expressiveness", Priority::Medium),
            ("Eye Rolling", Priority::Medium),
            ("Eye Contact", Priority::Medium),
            ("Smile Authenticity", Priority::Medium),
        ]
    );

    assert_eq!(report.key_insights.len(), 7);
    assert!(report.key_insights[1].contains("2 eye-rolls"));
}

#[test]
fn strengths_and_weaknesses_never_overlap() {
    for frames in [nervous_frames(), forced_smile_frames()] {
        let report = analyze_frames(&frames, analyzed_at()).unwrap();
        for strength in &report.strengths {
            assert!(
                report.weaknesses.iter().all(|w| w.metric != strength.metric),
                "{} is both a strength and a weakness",
                strength.metric.as_str()
            );
        }
    }
}

#[test]
fn forced_smiles_get_authenticity_coaching() {
    let frames = forced_smile_frames();
    let analyzer = ConfidenceAnalyzer::new();
    let report = analyzer.analyze(&frames, analyzed_at()).unwrap();

    assert_eq!(report.detailed_metrics.smiles.forced, 10);
    assert_eq!(report.detailed_metrics.smiles.authenticity_ratio, 0.0);
    assert_eq!(report.scores.expressiveness, 40.0);

    let areas: Vec<&str> = report.recommendations.iter().map(|r| r.area.as_str()).collect();
    assert_eq!(areas, vec!["Expressiveness", "Smile Authenticity"]);

    let wins = analyzer.quick_wins(&frames).unwrap();
    assert_eq!(wins.len(), 1);
    assert_eq!(wins[0].title, "Eyes-first smile");
}

#[test]
fn json_and_ndjson_inputs_agree() {
    let from_ndjson = FrameAdapter::parse_ndjson(NERVOUS_SESSION_NDJSON).unwrap();
    assert_eq!(from_ndjson, nervous_frames());
    assert!(FrameAdapter::validate_frames(&from_ndjson).is_empty());
}

#[test]
fn serialized_report_matches_contract() {
    let json = ConfidenceAnalyzer::new()
        .analyze_json(NERVOUS_SESSION, analyzed_at())
        .unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["overallScore"], 69);
    assert_eq!(value["summary"]["level"]["level"], "Good");
    assert_eq!(value["summary"]["timestamp"], "2024-03-01T12:00:05Z");
    assert_eq!(
        value["scores"],
        json!({
            "eyeContact": 52.0,
            "posture": 100.0,
            "expressiveness": 40.0,
            "composure": 100.0,
            "naturalness": 50.0
        })
    );
    assert_eq!(
        value["detailedMetrics"]["eyeRolls"]["details"][1],
        json!({"frameIndex": 7, "timestamp": 1709294400700_i64, "intensity": 0.6, "lookUpValue": 0.6})
    );
    assert_eq!(value["weaknesses"][0]["metric"], "Blinking");
    assert_eq!(value["weaknesses"][0]["severity"], "high");
    assert_eq!(value["recommendations"][0]["priority"], "high");
}

#[test]
fn empty_session_yields_error_object() {
    let json = ConfidenceAnalyzer::new().analyze_json("[]", analyzed_at()).unwrap();
    assert_eq!(json, r#"{"error":"No frames to analyze"}"#);
}

#[test]
fn thresholds_file_overrides_defaults() {
    // Relax blinking enough that three blinks a second no longer count
    let thresholds = Thresholds::from_json(
        r#"{"excessive_blinks_per_minute": 200, "high_severity_blinks_per_minute": 240}"#,
    )
    .unwrap();
    let report = ConfidenceAnalyzer::with_thresholds(thresholds)
        .unwrap()
        .analyze(&nervous_frames(), analyzed_at())
        .unwrap();

    assert!(!report.detailed_metrics.blinking.is_excessive);
    assert_eq!(report.scores.naturalness, 80.0);
    assert!(report.weaknesses.iter().all(|w| w.metric.as_str() != "Blinking"));
}
