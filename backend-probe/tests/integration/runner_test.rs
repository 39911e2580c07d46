//! Integration Test: ProbeRunner against stub backends
//!
//! 応答の分類（JSON成功・バイナリ成功・HTTPエラー・タイムアウト・接続失敗）を検証する。

use crate::support;
use backend_probe::common::ProbeError;
use backend_probe::config::RunnerConfig;
use backend_probe::types::payloads::{ChatMessage, ChatRequest};
use backend_probe::types::{Payload, ProbeDefinition, Upload};
use backend_probe::ProbeRunner;
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{
    body_bytes, body_json, body_string_contains, header, header_regex, method, path,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn json_200_is_success_with_parsed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tts/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let runner = support::runner(&server.uri());
    let result = runner
        .execute(&ProbeDefinition::get("Health", "/tts/health"))
        .await;

    assert!(result.is_success());
    assert_eq!(result.payload(), Some(&Payload::Json(json!({"status": "ok"}))));
    assert!(result.elapsed().is_some());
}

#[tokio::test]
async fn binary_200_is_success_with_raw_bytes() {
    let server = MockServer::start().await;
    let audio: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    Mock::given(method("POST"))
        .and(path("/tts/speak"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(audio.clone(), "audio/mpeg"))
        .mount(&server)
        .await;

    let runner = support::runner(&server.uri());
    let probe = ProbeDefinition::post_json("TTS Speak", "/tts/speak", &json!({"text": "hi"}));
    let result = runner.execute(&probe).await;

    assert!(result.is_success());
    let payload = result.payload().unwrap();
    assert_eq!(payload.as_bytes(), Some(audio.as_slice()));
    assert_eq!(payload.byte_len(), Some(4096));
    match payload {
        Payload::Raw { content_type, .. } => {
            assert_eq!(content_type.as_deref(), Some("audio/mpeg"))
        }
        other => panic!("expected raw payload, got {:?}", other),
    }
}

#[tokio::test]
async fn error_statuses_are_failures_with_body_text() {
    let server = MockServer::start().await;
    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let runner = support::runner(&server.uri());

    let result = runner
        .execute(&ProbeDefinition::get("Missing", "/missing"))
        .await;
    assert!(!result.is_success());
    assert_eq!(result.error_text().as_deref(), Some("not found"));
    assert_eq!(
        result.error().and_then(ProbeError::status),
        Some(StatusCode::NOT_FOUND)
    );

    let result = runner
        .execute(&ProbeDefinition::get("Broken", "/broken"))
        .await;
    assert!(!result.is_success());
    assert!(result.error_text().unwrap().contains("internal error"));
    assert!(result.elapsed().is_some());
}

#[tokio::test]
async fn slow_backend_yields_timeout() {
    let server = MockServer::start().await;
    Mock::given(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "late"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let runner = support::runner_with_timeout(&server.uri(), Duration::from_millis(200));
    let probe = ProbeDefinition::post_json("Chat", "/chat", &ChatRequest::new("hi"));
    let result = runner.execute(&probe).await;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some(&ProbeError::Timeout));
    assert_eq!(result.elapsed(), None);
}

#[tokio::test]
async fn unreachable_host_yields_connection_error() {
    let runner = support::runner(&support::unreachable_url());
    let result = runner
        .execute(&ProbeDefinition::get("Health", "/tts/health"))
        .await;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some(&ProbeError::Connection));
    assert_eq!(result.elapsed(), None);
}

#[tokio::test]
async fn invalid_base_url_yields_unexpected_error() {
    let runner = support::runner("not a url");
    let result = runner
        .execute(&ProbeDefinition::get("Health", "/tts/health"))
        .await;

    assert!(!result.is_success());
    assert!(matches!(result.error(), Some(ProbeError::Unexpected(_))));
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    let request = ChatRequest::new("What did I just ask you?").with_history(vec![
        ChatMessage::user("Hello!"),
        ChatMessage::assistant("I am an AI assistant."),
    ]);
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({
            "message": "What did I just ask you?",
            "history": [
                {"role": "user", "content": "Hello!"},
                {"role": "assistant", "content": "I am an AI assistant."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let runner = support::runner(&server.uri());
    let result = runner
        .execute(&ProbeDefinition::post_json("Chat", "/chat", &request))
        .await;
    assert!(result.is_success());
}

#[tokio::test]
async fn upload_is_sent_as_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stt/transcribe-blob"))
        .and(header("content-type", "audio/webm"))
        .and(body_bytes(b"webm-bytes".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "hello"})))
        .expect(1)
        .mount(&server)
        .await;

    let runner = support::runner(&server.uri());
    let probe = ProbeDefinition::post_upload(
        "STT",
        "/stt/transcribe-blob",
        Upload {
            file_name: "clip.webm".into(),
            content_type: "audio/webm".into(),
            bytes: b"webm-bytes".to_vec(),
            form_field: None,
        },
    );
    let result = runner.execute(&probe).await;
    assert_eq!(result.payload(), Some(&Payload::Json(json!({"text": "hello"}))));
}

#[tokio::test]
async fn form_field_upload_is_sent_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"clip.webm\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let runner = support::runner(&server.uri());
    let upload = Upload {
        file_name: "clip.webm".into(),
        content_type: "audio/webm".into(),
        bytes: b"webm-bytes".to_vec(),
        form_field: None,
    }
    .as_form_field("file");
    let result = runner
        .execute(&ProbeDefinition::post_upload("Upload", "/upload", upload))
        .await;
    assert!(result.is_success());
}

#[tokio::test]
async fn default_and_probe_headers_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tts/voices"))
        .and(header("authorization", "Bearer hf_token"))
        .and(header("x-probe", "voices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["en-US-AndrewNeural"])))
        .expect(1)
        .mount(&server)
        .await;

    let runner = ProbeRunner::new(
        RunnerConfig::new(server.uri()).with_header("Authorization", "Bearer hf_token"),
    )
    .unwrap();
    let probe = ProbeDefinition::get("Voices", "/tts/voices").with_header("X-Probe", "voices");
    let result = runner.execute(&probe).await;
    assert!(result.is_success());
}
