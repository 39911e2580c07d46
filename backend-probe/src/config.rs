//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs.

use anyhow::Context;
use reqwest::header::{HeaderName, HeaderValue};
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "https://sean22123-backend.hf.space";

/// Default per-request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default log filter when neither the env var nor `--verbose` says otherwise
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use backend_probe::config::get_env_with_fallback;
///
/// let url = get_env_with_fallback("BACKEND_PROBE_URL", "BACKEND_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// ログレベルを取得
///
/// 環境変数 `BACKEND_PROBE_LOG_LEVEL`（旧: `LOG_LEVEL`）から取得する。
/// `--verbose` 指定時は未設定なら `debug`、それ以外は `warn` を返す。
pub fn get_log_level(verbose: bool) -> String {
    let default = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    get_env_with_fallback_or("BACKEND_PROBE_LOG_LEVEL", "LOG_LEVEL", default)
}

/// ログファイル出力先ディレクトリを取得（未設定なら標準エラーのみ）
pub fn get_log_dir() -> Option<String> {
    get_env_with_fallback("BACKEND_PROBE_LOG_DIR", "BACKEND_PROBE_LOG_DIR")
        .filter(|dir| !dir.trim().is_empty())
}

/// Probe runner settings resolved from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Backend base URL; probe paths are appended to it
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Headers sent with every probe
    pub default_headers: Vec<(String, String)>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: Vec::new(),
        }
    }
}

impl RunnerConfig {
    /// Create a config for `base_url` with default timeout and no extra headers
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// 全プローブ共通のタイムアウトを設定
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every probe
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}

/// Parse a `Name: value` header argument.
///
/// Name and value must both be valid HTTP header tokens.
pub fn parse_header(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("invalid header '{}': expected 'Name: value'", raw))?;
    let (name, value) = (name.trim(), value.trim());
    HeaderName::from_bytes(name.as_bytes())
        .with_context(|| format!("invalid header '{}': bad name", raw))?;
    HeaderValue::from_str(value).with_context(|| format!("invalid header '{}': bad value", raw))?;
    Ok((name.to_string(), value.to_string()))
}
