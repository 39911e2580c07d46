//! プローブランナー
//!
//! ベースURLに対してプローブを1件ずつ送信し、応答を分類する。
//!
//! - HTTP 200 + JSON → 成功（`Payload::Json`）
//! - HTTP 200 + 非JSON → 成功（`Payload::Raw`、音声などのバイナリ）
//! - それ以外のステータス → 失敗（`ProbeError::Http`）
//! - タイムアウト / 接続失敗 / その他 → 失敗（経過時間なし）
//!
//! 分類は [`classify`] として出力処理から切り離している。

use crate::common::ProbeError;
use crate::config::RunnerConfig;
use crate::types::{HttpMethod, Payload, ProbeDefinition, ProbeResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Sequential HTTP probe executor
#[derive(Debug, Clone)]
pub struct ProbeRunner {
    client: Client,
    base_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl ProbeRunner {
    /// Build a runner with its own HTTP client bounded by `config.timeout`
    pub fn new(config: RunnerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a runner around an existing client.
    ///
    /// The per-request timeout from `config` is still applied to every probe.
    pub fn with_client(client: Client, config: RunnerConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            default_headers: config.default_headers,
        }
    }

    /// ベースURL（末尾スラッシュなし）
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full target URL of `probe`
    pub fn url_for(&self, probe: &ProbeDefinition) -> String {
        probe.url(&self.base_url)
    }

    /// Execute one probe.
    ///
    /// Never fails: every error is folded into the returned [`ProbeResult`].
    pub async fn execute(&self, probe: &ProbeDefinition) -> ProbeResult {
        let url = self.url_for(probe);
        let request = match self.build_request(probe, &url) {
            Ok(request) => request,
            Err(e) => {
                warn!(probe = %probe.name, url = %url, error = %e, "Failed to build request");
                return ProbeResult::failure(ProbeError::Unexpected(e.to_string()), None);
            }
        };

        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return self.transport_failure(probe, &url, &e),
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return self.transport_failure(probe, &url, &e),
        };
        let elapsed = start.elapsed();

        debug!(
            probe = %probe.name,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            bytes = body.len(),
            "Probe response received"
        );

        classify(status, content_type, body.to_vec(), elapsed)
    }

    fn build_request(
        &self,
        probe: &ProbeDefinition,
        url: &str,
    ) -> Result<RequestBuilder, reqwest::Error> {
        let mut request = match probe.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => {
                let request = self.client.post(url);
                if let Some(upload) = &probe.upload {
                    match &upload.form_field {
                        Some(field) => {
                            let part = Part::bytes(upload.bytes.clone())
                                .file_name(upload.file_name.clone())
                                .mime_str(&upload.content_type)?;
                            request.multipart(Form::new().part(field.clone(), part))
                        }
                        None => request
                            .header(CONTENT_TYPE, upload.content_type.as_str())
                            .body(upload.bytes.clone()),
                    }
                } else if let Some(body) = &probe.body {
                    request.json(body)
                } else {
                    request
                }
            }
        };

        request = request.timeout(self.timeout);
        for (name, value) in self.default_headers.iter().chain(probe.headers.iter()) {
            request = request.header(name.as_str(), value.as_str());
        }
        Ok(request)
    }

    fn transport_failure(
        &self,
        probe: &ProbeDefinition,
        url: &str,
        error: &reqwest::Error,
    ) -> ProbeResult {
        let classified = classify_transport_error(error);
        warn!(
            probe = %probe.name,
            url = %url,
            kind = classified.kind(),
            error = %error,
            "Probe request failed"
        );
        ProbeResult::failure(classified, None)
    }
}

/// Classify a received response.
///
/// Only status 200 counts as success. A 200 body that does not parse as JSON
/// is kept as [`Payload::Raw`].
pub fn classify(
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
    elapsed: Duration,
) -> ProbeResult {
    if status != StatusCode::OK {
        let body = String::from_utf8_lossy(&body).into_owned();
        return ProbeResult::failure(ProbeError::Http { status, body }, Some(elapsed));
    }

    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(value) => Payload::Json(value),
        Err(_) => Payload::Raw {
            content_type,
            bytes: body,
        },
    };
    ProbeResult::success(payload, elapsed)
}

/// Map a transport-level `reqwest` error to the probe error taxonomy
pub fn classify_transport_error(error: &reqwest::Error) -> ProbeError {
    if error.is_timeout() {
        ProbeError::Timeout
    } else if error.is_connect() {
        ProbeError::Connection
    } else {
        ProbeError::Unexpected(error.to_string())
    }
}
