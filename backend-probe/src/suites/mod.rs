//! 固定テストスイート
//!
//! `--endpoint` で選択するプローブ群と、各群のリクエスト内容。

mod inputs;

pub use inputs::{audio_content_type, audio_upload, ImageInput};

use crate::report::Notice;
use crate::types::payloads::{ChatMessage, ChatRequest, ClassifyImageRequest, SpeakRequest};
use crate::types::{ProbeDefinition, Upload};

/// 1x1 red PNG, base64
pub const RED_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";
/// 1x1 blue PNG, base64
pub const BLUE_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M/wHwAEBgIApD5fRAAAAABJRU5ErkJggg==";
/// 1x1 green PNG, base64
pub const GREEN_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M/4HwAEhgIBqCBeVQAAAABJRU5ErkJggg==";

/// Voice used by the speech synthesis probe
pub const DEFAULT_VOICE: &str = "en-US-AndrewNeural";

/// Path of the speech-to-text upload endpoint
pub const STT_UPLOAD_PATH: &str = "/stt/transcribe-blob";

/// Selection made with `--endpoint`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Suite {
    /// Every group in order
    All,
    /// Health checks
    Health,
    /// Text-to-speech
    Tts,
    /// Chat (default model)
    Chat,
    /// Chat with the Qwen model
    Qwen,
    /// Image classification (default model)
    Image,
    /// Image classification with Google ViT
    Vit,
    /// Speech-to-text
    Stt,
}

impl Suite {
    /// Groups to run, in execution order
    pub fn groups(&self) -> Vec<Group> {
        match self {
            Self::All => Group::ALL.to_vec(),
            Self::Health => vec![Group::Health],
            Self::Tts => vec![Group::Tts],
            Self::Chat => vec![Group::Chat],
            Self::Qwen => vec![Group::Qwen],
            Self::Image => vec![Group::Image],
            Self::Vit => vec![Group::Vit],
            Self::Stt => vec![Group::Stt],
        }
    }
}

/// A named list of probes printed under one header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// `GET /tts/health`, `GET /stt/health`
    Health,
    /// `GET /tts/voices`, `POST /tts/speak`
    Tts,
    /// `POST /chat`
    Chat,
    /// `POST /chat` with `model: "qwen"`
    Qwen,
    /// `POST /classify-image`
    Image,
    /// `POST /classify-image` with `model: "vit"`
    Vit,
    /// `POST /stt/transcribe-blob` (only with an audio file)
    Stt,
}

/// Extra inputs supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteOptions {
    /// Audio uploaded by the STT group
    pub stt_audio: Option<Upload>,
    /// Additional images classified by the image group
    pub extra_images: Vec<ImageInput>,
}

/// Header, notices and probes of one group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPlan {
    /// セクション見出し
    pub title: &'static str,
    /// プローブ前に表示する注記
    pub notices: Vec<Notice>,
    /// 実行するプローブ
    pub probes: Vec<ProbeDefinition>,
}

impl Group {
    /// Every group, in the order `all` runs them
    pub const ALL: [Group; 7] = [
        Group::Health,
        Group::Tts,
        Group::Chat,
        Group::Qwen,
        Group::Image,
        Group::Vit,
        Group::Stt,
    ];

    /// Section title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Health => "HEALTH CHECK TESTS",
            Self::Tts => "TEXT-TO-SPEECH TESTS",
            Self::Chat => "CHAT API TESTS",
            Self::Qwen => "QWEN MODEL TESTS",
            Self::Image => "IMAGE CLASSIFICATION TESTS",
            Self::Vit => "GOOGLE VIT MODEL TESTS",
            Self::Stt => "SPEECH-TO-TEXT TESTS",
        }
    }

    /// Build the plan for this group.
    ///
    /// `base_url` only appears in notices.
    pub fn plan(&self, options: &SuiteOptions, base_url: &str) -> GroupPlan {
        let (notices, probes) = match self {
            Self::Health => (Vec::new(), health_probes()),
            Self::Tts => (Vec::new(), tts_probes()),
            Self::Chat => (Vec::new(), chat_probes()),
            Self::Qwen => (Vec::new(), qwen_probes()),
            Self::Image => (Vec::new(), image_probes(&options.extra_images)),
            Self::Vit => (Vec::new(), vit_probes()),
            Self::Stt => stt_plan(options.stt_audio.as_ref(), base_url),
        };
        GroupPlan {
            title: self.title(),
            notices,
            probes,
        }
    }
}

fn health_probes() -> Vec<ProbeDefinition> {
    vec![
        ProbeDefinition::get("TTS Health Check", "/tts/health"),
        ProbeDefinition::get("STT Health Check", "/stt/health"),
    ]
}

fn tts_probes() -> Vec<ProbeDefinition> {
    let speak = SpeakRequest {
        text: "Hello, this is a test of the text to speech system.".to_string(),
        voice: DEFAULT_VOICE.to_string(),
        rate: 1.0,
        pitch: 1.0,
    };
    vec![
        ProbeDefinition::get("Get TTS Voices", "/tts/voices"),
        ProbeDefinition::post_json("TTS Speak", "/tts/speak", &speak),
    ]
}

fn chat_probes() -> Vec<ProbeDefinition> {
    let greeting = "Hello! Can you tell me what you are?";
    let mut probes = vec![
        ProbeDefinition::post_json(
            "Chat - Basic Query (Default Model)",
            "/chat",
            &ChatRequest::new(greeting),
        ),
        ProbeDefinition::post_json(
            "Chat - With History",
            "/chat",
            &ChatRequest::new("What did I just ask you?").with_history(vec![
                ChatMessage::user(greeting),
                ChatMessage::assistant("I am an AI assistant."),
            ]),
        ),
    ];

    for query in [
        "What is 2 + 2?",
        "Explain quantum computing in simple terms.",
        "Write a haiku about coding.",
    ] {
        let short: String = query.chars().take(30).collect();
        probes.push(ProbeDefinition::post_json(
            format!("Chat - Query: '{}...'", short),
            "/chat",
            &ChatRequest::new(query),
        ));
    }
    probes
}

fn qwen_probes() -> Vec<ProbeDefinition> {
    let qwen = |name: &str, request: ChatRequest| {
        ProbeDefinition::post_json(name, "/chat", &request.with_model("qwen"))
    };
    vec![
        qwen("Qwen - Basic Query", ChatRequest::new("Hello! Introduce yourself.")),
        qwen("Qwen - Math Problem", ChatRequest::new("Calculate 15 * 23 + 47")),
        qwen(
            "Qwen - Reasoning Task",
            ChatRequest::new("If a train travels at 60 mph for 2.5 hours, how far does it go?"),
        ),
        qwen(
            "Qwen - Creative Writing",
            ChatRequest::new("Write a short poem about artificial intelligence."),
        ),
        qwen(
            "Qwen - With History",
            ChatRequest::new("What was my previous question?").with_history(vec![
                ChatMessage::user("What is the capital of France?"),
                ChatMessage::assistant("The capital of France is Paris."),
            ]),
        ),
    ]
}

fn classify_probe(name: impl Into<String>, image: &str, model: Option<&str>) -> ProbeDefinition {
    let request = ClassifyImageRequest {
        image: image.to_string(),
        model: model.map(str::to_string),
    };
    ProbeDefinition::post_json(name, "/classify-image", &request)
}

fn image_probes(extra_images: &[ImageInput]) -> Vec<ProbeDefinition> {
    let mut probes = vec![classify_probe(
        "Image Classification - Sample Image (Default Model)",
        RED_PIXEL_PNG,
        None,
    )];
    probes.extend(extra_images.iter().map(|input| {
        classify_probe(
            format!("Image Classification - {}", input.label),
            &input.base64,
            None,
        )
    }));
    probes
}

fn vit_probes() -> Vec<ProbeDefinition> {
    vec![
        classify_probe("ViT - Red Pixel Classification", RED_PIXEL_PNG, Some("vit")),
        classify_probe("ViT - Blue Pixel Classification", BLUE_PIXEL_PNG, Some("vit")),
        classify_probe("ViT - Green Pixel Classification", GREEN_PIXEL_PNG, Some("vit")),
        classify_probe("ViT - Invalid Image Data", "invalid_base64_data", Some("vit")),
    ]
}

fn stt_plan(audio: Option<&Upload>, base_url: &str) -> (Vec<Notice>, Vec<ProbeDefinition>) {
    match audio {
        Some(upload) => (
            Vec::new(),
            vec![ProbeDefinition::post_upload(
                format!("STT Transcribe - {}", upload.file_name),
                STT_UPLOAD_PATH,
                upload.clone(),
            )],
        ),
        None => (
            vec![
                Notice::warning("STT test requires actual audio file - skipping for now"),
                Notice::info("To test STT, pass --audio-file <PATH> (e.g. audio/webm)"),
                Notice::info(format!(
                    "Endpoint: {}{}",
                    base_url.trim_end_matches('/'),
                    STT_UPLOAD_PATH
                )),
            ],
            Vec::new(),
        ),
    }
}
