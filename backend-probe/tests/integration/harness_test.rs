//! Integration Test: Harness counters and console report

use crate::support;
use backend_probe::common::ProbeError;
use backend_probe::suites::{Suite, SuiteOptions};
use backend_probe::types::{Payload, ProbeDefinition, Verdict};
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn healthy_probe_updates_counters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tts/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let mut harness = support::harness(&server.uri());
    let result = harness
        .run(&ProbeDefinition::get("Health", "/tts/health"))
        .await;

    assert!(result.is_success());
    assert_eq!(result.payload(), Some(&Payload::Json(json!({"status": "ok"}))));
    let counters = harness.counters();
    assert_eq!(
        (counters.total(), counters.passed(), counters.failed()),
        (1, 1, 0)
    );

    let out = support::output(harness);
    assert!(out.contains("Testing: Health"));
    assert!(out.contains(&format!("URL: {}/tts/health", server.uri())));
    assert!(out.contains("Method: GET"));
    assert!(out.contains("✓ Status: 200 OK"));
    assert!(out.contains(r#"Response: {"status":"ok"}"#));
}

#[tokio::test]
async fn unavailable_probe_updates_counters() {
    let server = MockServer::start().await;
    Mock::given(path("/tts/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let mut harness = support::harness(&server.uri());
    let result = harness
        .run(&ProbeDefinition::get("Health", "/tts/health"))
        .await;

    assert!(!result.is_success());
    assert_eq!(result.error_text().as_deref(), Some("service unavailable"));
    let counters = harness.counters();
    assert_eq!(
        (counters.total(), counters.passed(), counters.failed()),
        (1, 0, 1)
    );

    let out = support::output(harness);
    assert!(out.contains("✗ Status: 503"));
    assert!(out.contains("✗ Response: service unavailable"));
}

#[tokio::test]
async fn total_equals_passed_plus_failed_after_every_probe() {
    let server = MockServer::start().await;
    Mock::given(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(path("/audio"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8, 2, 3], "audio/wav"))
        .mount(&server)
        .await;
    Mock::given(path("/fail"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let probes = [
        ProbeDefinition::get("ok", "/ok"),
        ProbeDefinition::get("fail", "/fail"),
        ProbeDefinition::get("audio", "/audio"),
        ProbeDefinition::get("not mounted", "/nowhere"),
        ProbeDefinition::get("ok again", "/ok"),
    ];

    let mut harness = support::harness(&server.uri());
    for probe in &probes {
        harness.run(probe).await;
        let c = harness.counters();
        assert_eq!(c.total(), c.passed() + c.failed());
    }

    let summary = harness.summarize();
    assert_eq!(summary.counters.total(), 5);
    assert_eq!(summary.counters.passed(), 3);
    assert_eq!(summary.counters.failed(), 2);
    assert_eq!(summary.success_rate, Some(60.0));
    assert_eq!(summary.verdict, Some(Verdict::ManyFailed));

    let out = support::output(harness);
    assert!(out.contains("Response Type: audio/wav"));
    assert!(out.contains("Response Size: 3 bytes"));
    assert!(out.contains("Success Rate: 60.0%"));
    assert!(out.contains("✗ Many tests failed. Check backend status."));
}

#[tokio::test]
async fn connection_failure_does_not_abort_the_run() {
    let mut harness = support::harness(&support::unreachable_url());
    let summary = harness.run_suite(Suite::Health, &SuiteOptions::default()).await;

    assert_eq!(summary.counters.total(), 2);
    assert_eq!(summary.counters.failed(), 2);

    let out = support::output(harness);
    assert_eq!(
        out.matches("✗ Connection error - Backend may be down").count(),
        2
    );
    assert!(out.contains("TEST SUMMARY"));
}

#[tokio::test]
async fn health_suite_reports_all_passed() {
    let server = MockServer::start().await;
    for p in ["/tts/health", "/stt/health"] {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut harness = support::harness(&server.uri());
    let summary = harness.run_suite(Suite::Health, &SuiteOptions::default()).await;
    assert_eq!(summary.verdict, Some(Verdict::AllPassed));

    let out = support::output(harness);
    assert!(out.contains("HEALTH CHECK TESTS"));
    assert!(out.contains("Testing: TTS Health Check"));
    assert!(out.contains("Testing: STT Health Check"));
    assert!(out.contains("✓ All tests passed!"));
    assert!(!out.contains("BACKEND API TESTING"));
}

#[tokio::test]
async fn stt_suite_without_audio_runs_no_probes() {
    let server = MockServer::start().await;

    let mut harness = support::harness(&server.uri());
    let summary = harness.run_suite(Suite::Stt, &SuiteOptions::default()).await;
    assert_eq!(summary.counters.total(), 0);
    assert_eq!(summary.success_rate, None);

    let out = support::output(harness);
    assert!(out.contains("⚠ STT test requires actual audio file - skipping for now"));
    assert!(out.contains(&format!("ℹ Endpoint: {}/stt/transcribe-blob", server.uri())));
    assert!(out.contains("Total Tests: 0"));
}

#[tokio::test]
async fn all_suite_runs_every_group_in_order() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let mut harness = support::harness(&server.uri());
    let summary = harness.run_suite(Suite::All, &SuiteOptions::default()).await;

    // health 2 + tts 2 + chat 5 + qwen 5 + image 1 + vit 4 + stt 0
    assert_eq!(summary.counters.total(), 19);
    assert_eq!(summary.counters.passed(), 19);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 19);
    assert_eq!(received[0].url.path(), "/tts/health");
    assert_eq!(received[18].url.path(), "/classify-image");

    let out = support::output(harness);
    assert!(out.contains("BACKEND API TESTING - "));
    assert!(out.contains(&format!("ℹ Base URL: {}", server.uri())));
    let order = [
        "HEALTH CHECK TESTS",
        "TEXT-TO-SPEECH TESTS",
        "CHAT API TESTS",
        "QWEN MODEL TESTS",
        "IMAGE CLASSIFICATION TESTS",
        "GOOGLE VIT MODEL TESTS",
        "SPEECH-TO-TEXT TESTS",
        "TEST SUMMARY",
    ];
    let positions: Vec<usize> = order.iter().map(|t| out.find(t).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn timeout_is_reported_with_configured_bound() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let runner = support::runner_with_timeout(&server.uri(), std::time::Duration::from_secs(1));
    let mut harness = backend_probe::Harness::new(runner, support::buffer_reporter(false));
    let result = harness
        .run(&ProbeDefinition::get("Voices", "/tts/voices"))
        .await;

    assert_eq!(result.error(), Some(&ProbeError::Timeout));
    assert_eq!(harness.counters().failed(), 1);
    let out = support::output(harness);
    assert!(out.contains("✗ Request timed out (1s)"));
}
