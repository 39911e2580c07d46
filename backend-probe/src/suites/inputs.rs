//! CLIで指定されたファイルをプローブ入力に変換する

use crate::types::Upload;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io;
use std::path::Path;

/// Content type used when the extension is unknown
pub const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/webm";

/// Image sent to `/classify-image` as base64
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// Label used in the probe name
    pub label: String,
    /// Base64 (standard alphabet, padded) image data
    pub base64: String,
}

impl ImageInput {
    /// Encode raw image bytes
    pub fn from_bytes(label: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            label: label.into(),
            base64: STANDARD.encode(bytes),
        }
    }

    /// Read and encode an image file; the label is the file name
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(file_label(path), &bytes))
    }
}

/// Guess an audio MIME type from the file extension
pub fn audio_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("flac") => "audio/flac",
        _ => DEFAULT_AUDIO_CONTENT_TYPE,
    }
}

/// Read an audio file into a raw-body upload
pub fn audio_upload(path: &Path) -> io::Result<Upload> {
    let bytes = std::fs::read(path)?;
    Ok(Upload {
        file_name: file_label(path),
        content_type: audio_content_type(path).to_string(),
        bytes,
        form_field: None,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
