//! プローブ実行コマンド
//!
//! CLI引数から設定を組み立て、選択されたスイートを1回だけ順番に実行する。

use super::Cli;
use crate::config::{parse_header, RunnerConfig};
use crate::harness::Harness;
use crate::report::ConsoleReporter;
use crate::runner::ProbeRunner;
use crate::suites::{audio_upload, ImageInput, SuiteOptions};
use crate::types::Summary;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;
use tracing::info;

impl Cli {
    /// Runner settings derived from the arguments
    ///
    /// Fails on a `--header` that is not a valid `Name: value` pair.
    pub fn runner_config(&self) -> anyhow::Result<RunnerConfig> {
        let mut config =
            RunnerConfig::new(self.url.clone()).with_timeout(Duration::from_secs(self.timeout));
        for raw in &self.headers {
            let (name, value) = parse_header(raw)?;
            config = config.with_header(name, value);
        }
        Ok(config)
    }

    /// Read the files named by `--audio-file` and `--image-file`
    pub fn suite_options(&self) -> anyhow::Result<SuiteOptions> {
        let stt_audio = self
            .audio_file
            .as_deref()
            .map(|path| {
                audio_upload(path)
                    .with_context(|| format!("failed to read audio file {}", path.display()))
            })
            .transpose()?;

        let extra_images = self
            .image_files
            .iter()
            .map(|path| {
                ImageInput::from_path(path)
                    .with_context(|| format!("failed to read image file {}", path.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(SuiteOptions {
            stt_audio,
            extra_images,
        })
    }
}

/// Execute the selected suite, writing the report to `out`.
///
/// Failed probes are part of the returned summary, not an error. Errors come
/// only from setup (invalid headers, unreadable input files, HTTP client
/// construction).
pub async fn execute<W: Write>(cli: &Cli, out: W) -> anyhow::Result<Summary> {
    let config = cli.runner_config()?;
    let options = cli.suite_options()?;
    let runner = ProbeRunner::new(config).context("failed to build HTTP client")?;
    let reporter = ConsoleReporter::new(out, cli.verbose);

    let mut harness = Harness::new(runner, reporter);
    Ok(harness.run_suite(cli.endpoint, &options).await)
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The suite ran to the end; failed probes are in the summary
    Completed(Summary),
    /// Setup failed before any probe ran
    Failed(anyhow::Error),
    /// Ctrl+C
    Interrupted,
}

impl From<anyhow::Result<Summary>> for RunOutcome {
    fn from(result: anyhow::Result<Summary>) -> Self {
        match result {
            Ok(summary) => Self::Completed(summary),
            Err(e) => Self::Failed(e),
        }
    }
}

impl RunOutcome {
    /// 終了コード（完走のみ0、失敗プローブの有無は問わない）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed(_) => 0,
            Self::Failed(_) | Self::Interrupted => 1,
        }
    }

    /// Print the closing line for an aborted run and return the exit code
    pub fn finish<W: Write>(self, mut out: W) -> i32 {
        match &self {
            Self::Completed(summary) => {
                info!(
                    total = summary.counters.total(),
                    failed = summary.counters.failed(),
                    "Run completed"
                );
            }
            Self::Failed(e) => {
                let _ = writeln!(out, "{}", format!("✗ Unexpected error: {:#}", e).red());
            }
            Self::Interrupted => {
                let _ = writeln!(out, "\n\n{}", "Test interrupted by user".yellow());
            }
        }
        self.exit_code()
    }
}
