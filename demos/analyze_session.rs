//! Analyze a short synthetic session and print the report JSON

use chrono::Utc;
use poise_lens::metrics::names::*;
use poise_lens::{analyze_frames, RawFrame};

fn main() {
    let frames: Vec<RawFrame> = (0..30)
        .map(|i| {
            // A genuine smile every fifth frame, a glance up on frame 12
            let smile = if i % 5 == 0 { 0.6 } else { 0.0 };
            let squint = if i % 5 == 0 { 0.5 } else { 0.0 };
            let look_up = if i == 12 { 0.5 } else { 0.0 };
            RawFrame::from_pairs(
                i * 100,
                [
                    (MOUTH_SMILE_LEFT, smile),
                    (MOUTH_SMILE_RIGHT, smile),
                    (CHEEK_SQUINT_LEFT, squint),
                    (CHEEK_SQUINT_RIGHT, squint),
                    (EYE_LOOK_UP_LEFT, look_up),
                    (EYE_LOOK_UP_RIGHT, look_up),
                ],
            )
        })
        .collect();

    match analyze_frames(&frames, Utc::now()) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e:?}"),
        },
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
