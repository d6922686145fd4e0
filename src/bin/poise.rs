//! Poise CLI - Command-line interface for Poise Lens
//!
//! Commands:
//! - analyze: Score a recorded session and print the confidence report
//! - validate: Check a frame stream against the input assumptions
//! - thresholds: Print the default threshold table

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use poise_lens::coaching::QuickWin;
use poise_lens::encoder::AnalysisOutcome;
use poise_lens::schema::{FrameAdapter, FrameValidation};
use poise_lens::{ConfidenceAnalyzer, RawFrame, Thresholds, LENS_VERSION, PRODUCER_NAME};

/// Poise - Facial expression confidence analysis for practice sessions
#[derive(Parser)]
#[command(name = "poise")]
#[command(author = "Poise Labs")]
#[command(version = LENS_VERSION)]
#[command(about = "Score speaking-practice sessions from facial blendshape frames", long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a recorded session
    Analyze {
        /// Input file path (use - for stdin)
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,

        /// Load a threshold table from file
        #[arg(long)]
        thresholds: Option<PathBuf>,

        /// Analysis time stamped into the report (RFC 3339, defaults to now)
        #[arg(long)]
        analyzed_at: Option<String>,

        /// Include quick wins alongside the report
        #[arg(long)]
        quick_wins: bool,
    },

    /// Validate a frame stream
    Validate {
        /// Input file path (use - for stdin)
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default threshold table as JSON
    Thresholds,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    /// JSON array of frames
    Json,
    /// Newline-delimited JSON (one frame per line)
    Ndjson,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr fmt subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer().with_target(false).with_writer(io::stderr);

    // Only fails if a subscriber is already installed
    let _ = Registry::default().with(env_filter).with(stderr_layer).try_init();
}

fn run(cli: Cli) -> Result<(), PoiseCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            input_format,
            output,
            pretty,
            thresholds,
            analyzed_at,
            quick_wins,
        } => cmd_analyze(
            &input,
            input_format,
            output.as_deref(),
            pretty,
            thresholds.as_deref(),
            analyzed_at.as_deref(),
            quick_wins,
        ),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Thresholds => cmd_thresholds(),
    }
}

fn cmd_analyze(
    input: &Path,
    input_format: InputFormat,
    output: Option<&Path>,
    pretty: bool,
    thresholds: Option<&Path>,
    analyzed_at: Option<&str>,
    quick_wins: bool,
) -> Result<(), PoiseCliError> {
    let analyzer = match thresholds {
        Some(path) => {
            let table = Thresholds::from_json(&fs::read_to_string(path)?)?;
            ConfidenceAnalyzer::with_thresholds(table)?
        }
        None => ConfidenceAnalyzer::new(),
    };

    let analyzed_at = match analyzed_at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_err(|e| PoiseCliError::InvalidTimestamp(format!("{raw}: {e}")))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let frames = read_frames(input, input_format)?;
    // Findings are logged by the validator; analysis proceeds regardless
    FrameAdapter::validate_frames(&frames);

    let outcome = analyzer.analyze_to_outcome(&frames, analyzed_at)?;

    let output_data = if quick_wins {
        let wins = if frames.is_empty() {
            Vec::new()
        } else {
            analyzer.quick_wins(&frames)?
        };
        to_json(
            &AnalysisWithQuickWins {
                analysis: &outcome,
                quick_wins: wins,
            },
            pretty,
        )?
    } else {
        to_json(&outcome, pretty)?
    };

    match output {
        Some(path) if path.to_string_lossy() != "-" => fs::write(path, output_data + "\n")?,
        _ => println!("{}", output_data),
    }

    if outcome.report().is_none() {
        return Err(PoiseCliError::NoFrames);
    }

    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), PoiseCliError> {
    let frames = read_frames(input, input_format)?;
    let findings = FrameAdapter::validate_frames(&frames);

    let mut invalid: Vec<usize> = findings.iter().map(|f| f.index).collect();
    invalid.dedup();

    let report = ValidationReport {
        producer: PRODUCER_NAME.to_string(),
        version: LENS_VERSION.to_string(),
        total_frames: frames.len(),
        valid_frames: frames.len() - invalid.len(),
        invalid_frames: invalid.len(),
        findings,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Producer:       {} {}", report.producer, report.version);
        println!("Total frames:   {}", report.total_frames);
        println!("Valid frames:   {}", report.valid_frames);
        println!("Invalid frames: {}", report.invalid_frames);

        if !report.findings.is_empty() {
            println!("\nFindings:");
            for finding in &report.findings {
                println!(
                    "  - Frame {} (t={}ms): {}",
                    finding.index, finding.timestamp, finding.issue
                );
            }
        }
    }

    if report.invalid_frames > 0 {
        Err(PoiseCliError::ValidationFailed(report.invalid_frames))
    } else {
        Ok(())
    }
}

fn cmd_thresholds() -> Result<(), PoiseCliError> {
    println!("{}", Thresholds::default().to_json()?);
    Ok(())
}

// Helper functions

fn read_frames(input: &Path, input_format: InputFormat) -> Result<Vec<RawFrame>, PoiseCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(PoiseCliError::NoInput);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let frames = match input_format {
        InputFormat::Json => FrameAdapter::parse_array(&input_data)?,
        InputFormat::Ndjson => FrameAdapter::parse_ndjson(&input_data)?,
    };
    Ok(frames)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, PoiseCliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

// Error types

#[derive(Debug)]
enum PoiseCliError {
    Io(io::Error),
    Compute(poise_lens::ComputeError),
    Json(serde_json::Error),
    InvalidTimestamp(String),
    NoInput,
    NoFrames,
    ValidationFailed(usize),
}

impl From<io::Error> for PoiseCliError {
    fn from(e: io::Error) -> Self {
        PoiseCliError::Io(e)
    }
}

impl From<poise_lens::ComputeError> for PoiseCliError {
    fn from(e: poise_lens::ComputeError) -> Self {
        PoiseCliError::Compute(e)
    }
}

impl From<serde_json::Error> for PoiseCliError {
    fn from(e: serde_json::Error) -> Self {
        PoiseCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<PoiseCliError> for CliError {
    fn from(e: PoiseCliError) -> Self {
        match e {
            PoiseCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            PoiseCliError::Compute(poise_lens::ComputeError::ConfigError(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Run 'poise thresholds' to see a valid table".to_string()),
            },
            PoiseCliError::Compute(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Frames must look like {\"timestamp\": 0, \"blendshapes\": {...}}".to_string()),
            },
            PoiseCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            PoiseCliError::InvalidTimestamp(msg) => CliError {
                code: "INVALID_TIMESTAMP".to_string(),
                message: msg,
                hint: Some("Use RFC 3339, e.g. 2024-03-01T12:00:00Z".to_string()),
            },
            PoiseCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "stdin is a terminal; nothing to read".to_string(),
                hint: Some("Pipe frames in or pass a file path".to_string()),
            },
            PoiseCliError::NoFrames => CliError {
                code: "NO_FRAMES".to_string(),
                message: poise_lens::error::NO_FRAMES_MESSAGE.to_string(),
                hint: Some("Ensure the session recorded at least one frame".to_string()),
            },
            PoiseCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} frames failed validation", count),
                hint: Some("Check frame order and blendshape ranges".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisWithQuickWins<'a> {
    analysis: &'a AnalysisOutcome,
    quick_wins: Vec<QuickWin>,
}

#[derive(Serialize)]
struct ValidationReport {
    producer: String,
    version: String,
    total_frames: usize,
    valid_frames: usize,
    invalid_frames: usize,
    findings: Vec<FrameValidation>,
}
