//! バックエンドAPIのリクエストボディ型

use serde::Serialize;

/// Role of a chat history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// ユーザー発話
    User,
    /// アシスタント応答
    Assistant,
}

/// One entry of the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// 発話者
    pub role: ChatRole,
    /// 本文
    pub content: String,
}

impl ChatMessage {
    /// User turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    /// 今回のメッセージ
    pub message: String,
    /// 会話履歴
    pub history: Vec<ChatMessage>,
    /// モデル名（省略時はバックエンドのデフォルト）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ChatRequest {
    /// Request without history on the default model
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
            model: None,
        }
    }

    /// Set conversation history
    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    /// Select a model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// `POST /tts/speak`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakRequest {
    /// 読み上げテキスト
    pub text: String,
    /// 音声名（例: `en-US-AndrewNeural`）
    pub voice: String,
    /// 話速
    pub rate: f32,
    /// ピッチ
    pub pitch: f32,
}

/// `POST /classify-image`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifyImageRequest {
    /// base64エンコードされた画像
    pub image: String,
    /// モデル名（省略時はバックエンドのデフォルト）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
