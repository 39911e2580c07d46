//! プローブ定義
//!
//! 1回分のHTTPリクエスト（名前・メソッド・パス・ボディ・添付ファイル・ヘッダー）

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// HTTP method supported by probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

impl HttpMethod {
    /// 大文字のメソッド名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File content sent with a POST probe
///
/// Sent as the raw request body unless `form_field` is set, in which case it
/// becomes the single part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Source file name (shown in the probe name, multipart `filename`)
    pub file_name: String,
    /// MIME type of the content
    pub content_type: String,
    /// Raw file content
    pub bytes: Vec<u8>,
    /// multipartのフィールド名（`None` ならそのままボディとして送る）
    pub form_field: Option<String>,
}

impl Upload {
    /// Send as a multipart form field instead of the raw body
    pub fn as_form_field(mut self, field: impl Into<String>) -> Self {
        self.form_field = Some(field.into());
        self
    }
}

/// A single named HTTP request against the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeDefinition {
    /// 表示名
    pub name: String,
    /// HTTPメソッド
    pub method: HttpMethod,
    /// ベースURLに連結するパス（例: `/tts/health`）
    pub path: String,
    /// JSONボディ（POSTのみ）
    pub body: Option<Value>,
    /// 送信するファイル（指定時はJSONボディより優先）
    pub upload: Option<Upload>,
    /// 追加ヘッダー
    pub headers: Vec<(String, String)>,
}

impl ProbeDefinition {
    /// GET probe without body
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
            upload: None,
            headers: Vec::new(),
        }
    }

    /// POST probe with a JSON body.
    ///
    /// Serialization of the request types in [`crate::types::payloads`] cannot
    /// fail; any other failure yields `null`.
    pub fn post_json<T: Serialize>(
        name: impl Into<String>,
        path: impl Into<String>,
        body: &T,
    ) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(serde_json::to_value(body).unwrap_or(Value::Null)),
            upload: None,
            headers: Vec::new(),
        }
    }

    /// POST probe sending a file (raw body or multipart, see [`Upload`])
    pub fn post_upload(name: impl Into<String>, path: impl Into<String>, upload: Upload) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Post,
            path: path.into(),
            body: None,
            upload: Some(upload),
            headers: Vec::new(),
        }
    }

    /// Add a request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// `base_url` と `path` を連結したURL
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }
}
