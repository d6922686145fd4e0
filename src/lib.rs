//! Poise Lens - On-device facial expression confidence analysis
//!
//! Lens turns a recorded sequence of per-frame facial blendshape scores into a
//! confidence report through a deterministic pipeline: metric extraction →
//! pattern detection → scoring → feedback and coaching → report encoding.
//!
//! ## Modules
//!
//! - **Analysis Pipeline**: Score a practice session and explain the result
//! - **Schema**: Parse and sanity-check frame streams from the capture pipeline

pub mod classifier;
pub mod coaching;
pub mod detectors;
pub mod encoder;
pub mod error;
pub mod feedback;
pub mod metrics;
pub mod pipeline;
pub mod schema;
pub mod scorer;
pub mod thresholds;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use classifier::{percentile_rank, ConfidenceBand, ConfidenceLevel, PercentileRank};
pub use coaching::{QuickWin, Recommendation};
pub use encoder::{AnalysisOutcome, ConfidenceReport};
pub use error::ComputeError;
pub use feedback::{Strength, Weakness};
pub use pipeline::{analyze_frames, ConfidenceAnalyzer};
pub use scorer::{ConfidenceScore, DimensionScores};
pub use thresholds::Thresholds;
pub use types::{BlendshapeMap, RawFrame};

// Schema exports
pub use schema::{FrameAdapter, FrameIssue, FrameValidation};

/// Lens version reported by the CLI and FFI
pub const LENS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "poise-lens";
