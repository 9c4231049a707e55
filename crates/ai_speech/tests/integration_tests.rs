//! Integration tests for Gemini speech synthesis using WireMock
//!
//! These tests run the synthesizer over a real `GeminiClient` against a
//! mocked `generateContent` endpoint.

use std::sync::Arc;

use ai_core::{GeminiClient, GeminiConfig, InferenceError};
use ai_speech::{GeminiSpeechSynthesizer, SpeechConfig, SpeechError, TextToSpeech};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use domain::FailureStage;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

const TTS_PATH: &str = "/v1beta/models/gemini-2.5-flash-preview-tts:generateContent";

fn synthesizer_for_mock(base_url: &str) -> GeminiSpeechSynthesizer {
    let mut config = GeminiConfig::with_api_key("test-key");
    config.base_url = base_url.to_string();
    let client = GeminiClient::new(config).expect("Failed to create client");
    GeminiSpeechSynthesizer::new(Arc::new(client), SpeechConfig::default())
        .expect("Failed to create synthesizer")
}

fn audio_response(pcm: &[u8]) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{
                    "inlineData": {
                        "mimeType": "audio/L16;codec=pcm;rate=24000",
                        "data": STANDARD.encode(pcm)
                    }
                }]
            },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn synthesize_sends_audio_request_and_decodes_pcm() {
    let mock_server = MockServer::start().await;
    let pcm: Vec<u8> = (0..480i16).flat_map(|s| (s * 64).to_le_bytes()).collect();

    Mock::given(method("POST"))
        .and(path(TTS_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{"text": "This agreement is mostly standard."}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {"voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Kore"}}}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_response(&pcm)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let buffer = synthesizer_for_mock(&mock_server.uri())
        .synthesize("This agreement is mostly standard.")
        .await
        .expect("synthesis should succeed");

    assert_eq!(buffer.sample_rate(), 24_000);
    assert_eq!(buffer.channel_count(), 1);
    assert_eq!(buffer.frame_count(), 480);
    assert_eq!(buffer.duration().as_millis(), 20);
    assert!(buffer.channel(0).unwrap().iter().all(|s| (-1.0..1.0).contains(s)));
}

#[tokio::test]
async fn text_only_response_is_no_audio_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "no audio"}]}}]
        })))
        .mount(&mock_server)
        .await;

    let err = synthesizer_for_mock(&mock_server.uri())
        .synthesize("summary")
        .await
        .unwrap_err();

    assert!(matches!(err, SpeechError::NoAudioData));
}

#[tokio::test]
async fn server_error_propagates_as_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TTS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": {"code": 503, "message": "Model overloaded", "status": "UNAVAILABLE"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = synthesizer_for_mock(&mock_server.uri())
        .synthesize("summary")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SpeechError::Backend(InferenceError::ServerError { status: 503, .. })
    ));
    assert_eq!(err.stage(), FailureStage::Network);
}

#[tokio::test]
async fn odd_length_payload_is_padded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TTS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(audio_response(&[0x00, 0x40, 0x00, 0xC0, 0x7F])),
        )
        .mount(&mock_server)
        .await;

    let buffer = synthesizer_for_mock(&mock_server.uri())
        .synthesize("summary")
        .await
        .unwrap();

    assert_eq!(buffer.frame_count(), 3);
    let samples = buffer.channel(0).unwrap();
    assert!((samples[2] - 127.0 / 32_768.0).abs() < f32::EPSILON);
}
