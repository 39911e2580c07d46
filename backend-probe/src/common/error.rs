//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! プローブ実行中のエラーはすべて`ProbeError`に変換され、失敗した
//! `ProbeResult`として記録される。実行全体を中断することはない。

use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of characters of an error body shown on the console
pub const ERROR_BODY_PREVIEW_CHARS: usize = 500;

/// Probe-level error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Backend answered with a non-200 status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: StatusCode,
        /// Full response body text
        body: String,
    },

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Backend unreachable (DNS failure, connection refused, reset)
    #[error("Connection error - Backend may be down")]
    Connection,

    /// Anything else raised while sending the request or reading the body
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ProbeError {
    /// Short classification label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http_error",
            Self::Timeout => "timeout",
            Self::Connection => "connection_error",
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// Text carried by the error.
    ///
    /// For HTTP errors this is the raw response body, for every other kind the
    /// `Display` message.
    pub fn detail(&self) -> String {
        match self {
            Self::Http { body, .. } => body.clone(),
            Self::Unexpected(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the backend responded at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Truncate `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
