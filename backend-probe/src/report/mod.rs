//! コンソール出力
//!
//! プローブの進捗・結果・サマリーを色付きで出力する。
//! 出力先は任意の `io::Write`（通常は標準出力）。

use crate::common::error::{truncate_chars, ERROR_BODY_PREVIEW_CHARS};
use crate::common::ProbeError;
use crate::types::{Payload, ProbeDefinition, ProbeResult, Summary, Verdict};
use colored::Colorize;
use std::io::{self, Write};
use std::time::Duration;

/// Width of section headers
pub const HEADER_WIDTH: usize = 60;

/// Maximum characters of compact JSON shown when not verbose
pub const RESPONSE_PREVIEW_CHARS: usize = 200;

/// Severity of a free-form notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// 情報
    Info,
    /// 警告
    Warning,
}

/// Message printed alongside probes (e.g. skipped manual steps)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// 重要度
    pub level: NoticeLevel,
    /// 本文
    pub message: String,
}

impl Notice {
    /// Info notice
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Warning notice
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Colorized console reporter
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    verbose: bool,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter writing to stdout
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    /// Whether full dumps and debug lines are enabled
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Consume the reporter and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    // Console output is best effort; a closed stdout must not abort the run.
    fn line(&mut self, text: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{}", text);
    }

    /// Section header
    pub fn header(&mut self, text: &str) {
        let rule = "=".repeat(HEADER_WIDTH);
        let title = format!("{:^width$}", text, width = HEADER_WIDTH);
        self.line("");
        self.line(rule.bold().cyan());
        self.line(title.bold().cyan());
        self.line(rule.bold().cyan());
        self.line("");
    }

    /// `✓ text`
    pub fn success(&mut self, text: &str) {
        self.line(format!("✓ {}", text).green());
    }

    /// `✗ text`
    pub fn error(&mut self, text: &str) {
        self.line(format!("✗ {}", text).red());
    }

    /// `ℹ text`
    pub fn info(&mut self, text: &str) {
        self.line(format!("ℹ {}", text).blue());
    }

    /// `⚠ text`
    pub fn warning(&mut self, text: &str) {
        self.line(format!("⚠ {}", text).yellow());
    }

    /// `[DEBUG] text`, verbose only
    pub fn debug(&mut self, text: &str) {
        if self.verbose {
            self.line(format!("[DEBUG] {}", text).yellow());
        }
    }

    /// Print a notice at its level
    pub fn notice(&mut self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => self.info(&notice.message),
            NoticeLevel::Warning => self.warning(&notice.message),
        }
    }

    /// Name, URL and method of a probe about to run
    pub fn probe_started(&mut self, probe: &ProbeDefinition, url: &str) {
        self.line("");
        self.line(format!("Testing: {}", probe.name).bold());
        self.line(format!("URL: {}", url));
        self.line(format!("Method: {}", probe.method));
    }

    /// Outcome of a finished probe
    pub fn probe_finished(&mut self, result: &ProbeResult, timeout: Duration) {
        match result.outcome() {
            Ok(payload) => {
                if let Some(elapsed) = result.elapsed() {
                    self.debug("Response Status: 200");
                    self.debug(&format!("Response Time: {:.2}s", elapsed.as_secs_f64()));
                    self.success("Status: 200 OK");
                    self.info(&format!("Response Time: {:.2}s", elapsed.as_secs_f64()));
                }
                self.payload(payload);
            }
            Err(ProbeError::Http { status, body }) => {
                self.debug(&format!("Response Status: {}", status.as_u16()));
                if let Some(elapsed) = result.elapsed() {
                    self.debug(&format!("Response Time: {:.2}s", elapsed.as_secs_f64()));
                }
                self.error(&format!("Status: {}", status.as_u16()));
                self.error(&format!(
                    "Response: {}",
                    truncate_chars(body, ERROR_BODY_PREVIEW_CHARS)
                ));
            }
            Err(ProbeError::Timeout) => {
                self.error(&format!("Request timed out ({}s)", timeout.as_secs()));
            }
            Err(ProbeError::Connection) => {
                self.error("Connection error - Backend may be down");
            }
            Err(ProbeError::Unexpected(message)) => {
                self.error(&format!("Error: {}", message));
            }
        }
    }

    fn payload(&mut self, payload: &Payload) {
        match payload {
            Payload::Json(value) => {
                if self.verbose {
                    let pretty =
                        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                    self.line(format!("Response Data: {}", pretty));
                } else {
                    let compact = value.to_string();
                    let preview = truncate_chars(&compact, RESPONSE_PREVIEW_CHARS);
                    if preview.len() < compact.len() {
                        self.line(format!("Response: {}...", preview));
                    } else {
                        self.line(format!("Response: {}", compact));
                    }
                }
            }
            Payload::Raw {
                content_type,
                bytes,
            } => {
                self.info(&format!(
                    "Response Type: {}",
                    content_type.as_deref().unwrap_or("unknown")
                ));
                self.info(&format!("Response Size: {} bytes", bytes.len()));
                if payload.is_malformed_json() {
                    self.warning("Response declared JSON but could not be parsed");
                }
            }
        }
    }

    /// Final report
    pub fn summary(&mut self, summary: &Summary) {
        let counters = summary.counters;
        self.header("TEST SUMMARY");
        self.line(format!("Total Tests: {}", counters.total()));
        self.success(&format!("Passed: {}", counters.passed()));
        if counters.failed() > 0 {
            self.error(&format!("Failed: {}", counters.failed()));
        } else {
            self.success(&format!("Failed: {}", counters.failed()));
        }

        if let (Some(rate), Some(verdict)) = (summary.success_rate, summary.verdict) {
            self.line("");
            self.line(format!("Success Rate: {:.1}%", rate));
            self.line("");
            match verdict {
                Verdict::AllPassed => self.success(verdict.message()),
                Verdict::MostlyPassed => self.warning(verdict.message()),
                Verdict::ManyFailed => self.error(verdict.message()),
            }
        }
    }
}
