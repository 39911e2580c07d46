//! プローブ群の実行ドライバー
//!
//! プローブを1件ずつ順番に実行し、カウンターを更新して結果を出力する。
//! カウンターはハーネスのインスタンスが所有する。

use crate::report::ConsoleReporter;
use crate::runner::ProbeRunner;
use crate::suites::{GroupPlan, Suite, SuiteOptions};
use crate::types::{ProbeDefinition, ProbeResult, RunCounters, Summary};
use chrono::Local;
use std::io::{self, Write};
use tracing::{debug, info};

/// Sequential driver over a set of probes
pub struct Harness<W: Write = io::Stdout> {
    runner: ProbeRunner,
    reporter: ConsoleReporter<W>,
    counters: RunCounters,
}

impl<W: Write> Harness<W> {
    /// Create a harness with zeroed counters
    pub fn new(runner: ProbeRunner, reporter: ConsoleReporter<W>) -> Self {
        Self {
            runner,
            reporter,
            counters: RunCounters::new(),
        }
    }

    /// Current counters
    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    /// Consume the harness and return its reporter
    pub fn into_reporter(self) -> ConsoleReporter<W> {
        self.reporter
    }

    /// Execute one probe, record it and print its outcome
    pub async fn run(&mut self, probe: &ProbeDefinition) -> ProbeResult {
        let url = self.runner.url_for(probe);
        self.reporter.probe_started(probe, &url);

        let result = self.runner.execute(probe).await;
        self.counters.record(result.is_success());
        self.reporter.probe_finished(&result, self.runner.timeout());

        debug!(
            probe = %probe.name,
            success = result.is_success(),
            total = self.counters.total(),
            passed = self.counters.passed(),
            failed = self.counters.failed(),
            "Probe recorded"
        );
        result
    }

    /// Run every probe of one group under its header
    pub async fn run_plan(&mut self, plan: &GroupPlan) -> Vec<ProbeResult> {
        self.reporter.header(plan.title);
        for notice in &plan.notices {
            self.reporter.notice(notice);
        }

        let mut results = Vec::with_capacity(plan.probes.len());
        for probe in &plan.probes {
            results.push(self.run(probe).await);
        }
        results
    }

    /// Run the selected suite and print the summary
    pub async fn run_suite(&mut self, suite: Suite, options: &SuiteOptions) -> Summary {
        let base_url = self.runner.base_url().to_string();
        if suite == Suite::All {
            let now = Local::now().format("%Y-%m-%d %H:%M:%S");
            self.reporter.header(&format!("BACKEND API TESTING - {}", now));
            self.reporter.info(&format!("Base URL: {}", base_url));
        }

        info!(suite = ?suite, base_url = %base_url, "Starting probe run");
        for group in suite.groups() {
            let plan = group.plan(options, &base_url);
            self.run_plan(&plan).await;
        }

        let summary = self.summarize();
        info!(
            total = summary.counters.total(),
            passed = summary.counters.passed(),
            failed = summary.counters.failed(),
            "Probe run finished"
        );
        summary
    }

    /// Print and return the summary of the counters so far
    pub fn summarize(&mut self) -> Summary {
        let summary = self.counters.summarize();
        self.reporter.summary(&summary);
        summary
    }
}
