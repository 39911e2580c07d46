//! プローブ実行結果
//!
//! 成功時のペイロードは JSON と生バイト列を型で区別する。
//! 音声合成のようにバイナリを返すエンドポイントも成功扱いだが、
//! JSON を名乗りながらパースできない応答は [`Payload::is_malformed_json`] で検出できる。

use crate::common::ProbeError;
use serde_json::Value;
use std::time::Duration;

/// Body of a successful (HTTP 200) response
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON
    Json(Value),
    /// Body that is not valid JSON (e.g. synthesized audio)
    Raw {
        /// `Content-Type` header, if present
        content_type: Option<String>,
        /// Raw response bytes
        bytes: Vec<u8>,
    },
}

impl Payload {
    /// Raw bytes, if the body was not JSON
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Json(_) => None,
            Self::Raw { bytes, .. } => Some(bytes),
        }
    }

    /// Content length of a raw body
    pub fn byte_len(&self) -> Option<usize> {
        self.as_bytes().map(<[u8]>::len)
    }

    /// True when the server declared a JSON content type but sent something unparsable
    pub fn is_malformed_json(&self) -> bool {
        match self {
            Self::Raw {
                content_type: Some(ct),
                ..
            } => is_json_content_type(ct),
            _ => false,
        }
    }
}

/// `application/json` や `application/problem+json` などを判定
pub fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Outcome of one probe execution. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    outcome: Result<Payload, ProbeError>,
    elapsed: Option<Duration>,
}

impl ProbeResult {
    /// Successful result
    pub fn success(payload: Payload, elapsed: Duration) -> Self {
        Self {
            outcome: Ok(payload),
            elapsed: Some(elapsed),
        }
    }

    /// Failed result; `elapsed` is `None` when no response arrived
    pub fn failure(error: ProbeError, elapsed: Option<Duration>) -> Self {
        Self {
            outcome: Err(error),
            elapsed,
        }
    }

    /// Whether the probe passed
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Payload of a successful probe
    pub fn payload(&self) -> Option<&Payload> {
        self.outcome.as_ref().ok()
    }

    /// Error of a failed probe
    pub fn error(&self) -> Option<&ProbeError> {
        self.outcome.as_ref().err()
    }

    /// Error text: the response body for HTTP errors, the message otherwise
    pub fn error_text(&self) -> Option<String> {
        self.error().map(ProbeError::detail)
    }

    /// Round-trip latency
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Borrow the underlying outcome
    pub fn outcome(&self) -> &Result<Payload, ProbeError> {
        &self.outcome
    }
}
