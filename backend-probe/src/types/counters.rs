//! 実行カウンターとサマリー

use std::fmt;

/// Pass/fail counters owned by one harness instance.
///
/// Fields are only changed through [`RunCounters::record`], which keeps
/// `total == passed + failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    total: u32,
    passed: u32,
    failed: u32,
}

impl RunCounters {
    /// Fresh counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one probe execution
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Number of executed probes
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of passed probes
    pub fn passed(&self) -> u32 {
        self.passed
    }

    /// Number of failed probes
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// 成功率と判定を計算（カウンターは変更しない）
    pub fn summarize(&self) -> Summary {
        let success_rate = if self.total == 0 {
            None
        } else {
            Some(f64::from(self.passed) / f64::from(self.total) * 100.0)
        };
        Summary {
            counters: *self,
            success_rate,
            verdict: success_rate.map(Verdict::from_rate),
        }
    }
}

/// Qualitative verdict derived from the success rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 100%
    AllPassed,
    /// 80% or more
    MostlyPassed,
    /// Below 80%
    ManyFailed,
}

impl Verdict {
    /// Threshold (percent) for [`Verdict::MostlyPassed`]
    pub const MOSTLY_PASSED_THRESHOLD: f64 = 80.0;

    /// Classify a success rate in percent
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 100.0 {
            Self::AllPassed
        } else if rate >= Self::MOSTLY_PASSED_THRESHOLD {
            Self::MostlyPassed
        } else {
            Self::ManyFailed
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::AllPassed => "All tests passed!",
            Self::MostlyPassed => "Most tests passed, but some failed.",
            Self::ManyFailed => "Many tests failed. Check backend status.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Snapshot of the counters plus derived statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Counter values at the time of summarizing
    pub counters: RunCounters,
    /// passed / total × 100, `None` when nothing ran
    pub success_rate: Option<f64>,
    /// `None` when nothing ran
    pub verdict: Option<Verdict>,
}
