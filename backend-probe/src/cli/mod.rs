//! CLI module for backend-probe
//!
//! Provides the command-line interface of the probe harness.

/// Probe run command
pub mod run;

use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::suites::Suite;
use clap::Parser;
use std::path::PathBuf;

/// Backend probe - Sends example requests to a remote AI backend and reports pass/fail
#[derive(Parser, Debug)]
#[command(name = "backend-probe")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    backend-probe                      Run all tests
    backend-probe --verbose            Run with verbose output
    backend-probe --endpoint chat      Test only chat endpoint
    backend-probe --endpoint health    Test only health checks

ENVIRONMENT VARIABLES:
    BACKEND_PROBE_URL           Backend URL (default: https://sean22123-backend.hf.space)
    BACKEND_PROBE_TIMEOUT_SECS  Per-request timeout in seconds (default: 30)
    BACKEND_PROBE_LOG_LEVEL     Log level (default: warn, debug with --verbose)
    BACKEND_PROBE_LOG_DIR       Also write logs to a daily-rolling file in this directory
"#)]
pub struct Cli {
    /// Specific endpoint group to test
    #[arg(long, value_enum, default_value_t = Suite::All)]
    pub endpoint: Suite,

    /// Enable verbose output (full responses, per-call timing)
    #[arg(short, long)]
    pub verbose: bool,

    /// Backend URL
    #[arg(long, env = "BACKEND_PROBE_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "BACKEND_PROBE_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Extra header sent with every request ("Name: value"), repeatable
    ///
    /// Validated when the run starts, so a bad header is a run error (exit 1).
    #[arg(long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Audio file uploaded by the speech-to-text group
    #[arg(long, value_name = "PATH")]
    pub audio_file: Option<PathBuf>,

    /// Extra image classified by the image group, repeatable
    #[arg(long = "image-file", value_name = "PATH")]
    pub image_files: Vec<PathBuf>,
}
