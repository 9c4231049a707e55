//! Integration tests for infrastructure adapters
//!
//! Tests cover:
//! - Reader-based URL extraction with wiremock
//! - Gemini analysis adapter error mapping end to end
//! - Opt-in retry against a flaky backend
//! - The full analyze-then-narrate flow through application services

use std::sync::Arc;

use ai_core::{GeminiClient, GeminiConfig};
use ai_speech::{AudioOutput, PlaybackCoordinator, SpeechConfig, SpeechError};
use application::{
    AnalysisService, ApplicationError, DocumentExtractionPort, NarrationService,
    ports::AnalysisPort,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use domain::{AnalysisMode, DocumentSource, FailureStage};
use infrastructure::{
    CoordinatorPlaybackAdapter, ExtractionConfig, GeminiAnalysisAdapter, JinaReaderAdapter,
    RetryConfig, RetryingAnalysisAdapter, SpeechAdapter,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUICK_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
const TTS_PATH: &str = "/v1beta/models/gemini-2.5-flash-preview-tts:generateContent";

fn gemini_config(base_url: &str) -> GeminiConfig {
    let mut config = GeminiConfig::with_api_key("test-key");
    config.base_url = base_url.to_string();
    config
}

fn analysis_body() -> serde_json::Value {
    let result = serde_json::json!({
        "summary": "A fairly standard subscription agreement.",
        "riskyClauses": [{
            "section": "Section 4: Pricing",
            "snippet": "We may change prices at any time.",
            "explanation": "Prices can rise without your consent."
        }],
        "goodPoints": ["Cancel anytime"],
        "concerns": [],
        "safetyRating": 7,
        "riskLevel": "Medium"
    });

    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": result.to_string()}]},
            "finishReason": "STOP"
        }]
    })
}

fn reader(base_url: &str) -> JinaReaderAdapter {
    JinaReaderAdapter::new(ExtractionConfig {
        reader_base_url: base_url.to_string(),
        ..ExtractionConfig::default()
    })
    .expect("Failed to create reader adapter")
}

// ============================================================================
// Reader extraction
// ============================================================================

mod reader_tests {
    use super::*;

    #[tokio::test]
    async fn fetches_target_through_reader() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/https://example.com/terms"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("Terms of Service\n\nYou agree to..."),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let text = reader(&mock_server.uri())
            .extract_text("https://example.com/terms")
            .await
            .unwrap();

        assert!(text.starts_with("Terms of Service"));
    }

    #[tokio::test]
    async fn sends_bearer_token_when_configured() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("authorization", "Bearer reader-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let adapter = JinaReaderAdapter::new(ExtractionConfig {
            reader_base_url: mock_server.uri(),
            api_key: Some("reader-key".to_string()),
            ..ExtractionConfig::default()
        })
        .unwrap();

        adapter.extract_text("https://example.com").await.unwrap();
    }

    #[tokio::test]
    async fn error_status_is_transport() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(451))
            .mount(&mock_server)
            .await;

        let err = reader(&mock_server.uri())
            .extract_text("https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Transport(ref m) if m.contains("451")));
        assert_eq!(err.stage(), FailureStage::Network);
    }

    #[tokio::test]
    async fn unreachable_reader_is_transport() {
        let err = reader("http://127.0.0.1:1")
            .extract_text("https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Transport(_)));
    }

    #[tokio::test]
    async fn short_page_is_rejected_by_service() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  Loading...  "))
            .mount(&mock_server)
            .await;

        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .expect(0)
            .mount(&gemini)
            .await;

        let service = AnalysisService::new(Arc::new(
            GeminiAnalysisAdapter::new(gemini_config(&gemini.uri())).unwrap(),
        ))
        .with_extraction(Arc::new(reader(&mock_server.uri())), 20);

        let err = service
            .analyze(
                &DocumentSource::Url("https://example.com".to_string()),
                AnalysisMode::Quick,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::ExtractionTooShort {
                length: 10,
                minimum: 20
            }
        ));
    }
}

// ============================================================================
// Analysis adapter
// ============================================================================

mod analysis_tests {
    use super::*;

    #[tokio::test]
    async fn url_source_is_extracted_and_analyzed() {
        let reader_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("These terms govern your subscription and billing."),
            )
            .mount(&reader_server)
            .await;

        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(QUICK_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .expect(1)
            .mount(&gemini)
            .await;

        let service = AnalysisService::new(Arc::new(
            GeminiAnalysisAdapter::new(gemini_config(&gemini.uri())).unwrap(),
        ))
        .with_extraction(Arc::new(reader(&reader_server.uri())), 20);

        let outcome = service
            .analyze(
                &DocumentSource::Url("https://example.com/terms".to_string()),
                AnalysisMode::Quick,
            )
            .await
            .unwrap();

        assert_eq!(outcome.model, "gemini-2.5-flash");
        assert_eq!(outcome.result.safety_rating, 7);
        assert_eq!(outcome.result.risky_clauses.len(), 1);
        assert!(outcome.result.concerns.is_empty());
    }

    #[tokio::test]
    async fn empty_text_maps_to_empty_response() {
        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": ""}]}}]
            })))
            .mount(&gemini)
            .await;

        let adapter = GeminiAnalysisAdapter::new(gemini_config(&gemini.uri())).unwrap();
        let err = adapter
            .analyze("Some terms", AnalysisMode::Quick)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::EmptyResponse));
        assert_eq!(err.stage(), FailureStage::Parse);
    }

    #[tokio::test]
    async fn malformed_result_maps_to_parse() {
        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "{\"summary\": \"x\"}"}]}}]
            })))
            .mount(&gemini)
            .await;

        let adapter = GeminiAnalysisAdapter::new(gemini_config(&gemini.uri())).unwrap();
        let err = adapter
            .analyze("Some terms", AnalysisMode::Quick)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Parse(_)));
    }

    #[tokio::test]
    async fn server_error_maps_to_transport() {
        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"code": 500, "message": "Internal error", "status": "INTERNAL"}
            })))
            .mount(&gemini)
            .await;

        let adapter = GeminiAnalysisAdapter::new(gemini_config(&gemini.uri())).unwrap();
        let err = adapter
            .analyze("Some terms", AnalysisMode::Deep)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Transport(_)));
        assert!(err.is_retryable());
    }
}

// ============================================================================
// Retry
// ============================================================================

mod retry_tests {
    use super::*;

    fn fast_retry(max_retries: u32) -> RetryConfig {
        RetryConfig {
            initial_delay_ms: 5,
            max_delay_ms: 20,
            ..RetryConfig::with_max_retries(max_retries)
        }
        .without_jitter()
    }

    #[tokio::test]
    async fn transient_failure_is_retried_when_enabled() {
        let gemini = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&gemini)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .with_priority(2)
            .mount(&gemini)
            .await;

        let inner = Arc::new(GeminiAnalysisAdapter::new(gemini_config(&gemini.uri())).unwrap());
        let adapter = RetryingAnalysisAdapter::new(inner, fast_retry(2));

        let result = adapter.analyze("Some terms", AnalysisMode::Quick).await.unwrap();
        assert_eq!(result.safety_rating, 7);

        let requests = gemini.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
    }

    #[tokio::test]
    async fn default_config_makes_one_call() {
        let gemini = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&gemini)
            .await;

        let inner = Arc::new(GeminiAnalysisAdapter::new(gemini_config(&gemini.uri())).unwrap());
        let adapter = RetryingAnalysisAdapter::new(inner, RetryConfig::default());

        let err = adapter
            .analyze("Some terms", AnalysisMode::Quick)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Transport(_)));
    }

    #[tokio::test]
    async fn rejected_request_is_sent_once() {
        let gemini = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {
                    "code": 403,
                    "message": "API key invalid",
                    "status": "PERMISSION_DENIED"
                }
            })))
            .expect(1)
            .mount(&gemini)
            .await;

        let inner = Arc::new(GeminiAnalysisAdapter::new(gemini_config(&gemini.uri())).unwrap());
        let adapter = RetryingAnalysisAdapter::new(inner, fast_retry(3));

        let err = adapter
            .analyze("Some terms", AnalysisMode::Quick)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Rejected(_)));
        assert!(err.to_string().contains("PERMISSION_DENIED: API key invalid"));
        assert_eq!(err.stage(), FailureStage::Network);
    }
}

// ============================================================================
// Narration
// ============================================================================

mod narration_tests {
    use super::*;
    use ai_speech::{OutputState, PlaybackOutcome};
    use domain::AudioSampleBuffer;
    use parking_lot::Mutex;
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct RecordingOutput {
        played: Mutex<Vec<usize>>,
    }

    #[async_trait::async_trait]
    impl AudioOutput for RecordingOutput {
        fn state(&self) -> OutputState {
            OutputState::Running
        }

        async fn resume(&self) -> Result<(), SpeechError> {
            Ok(())
        }

        async fn play(
            &self,
            buffer: AudioSampleBuffer,
            _stop: oneshot::Receiver<()>,
        ) -> Result<PlaybackOutcome, SpeechError> {
            self.played.lock().push(buffer.frame_count());
            Ok(PlaybackOutcome::Completed)
        }
    }

    #[tokio::test]
    async fn summary_is_synthesized_and_played() {
        let gemini = MockServer::start().await;
        let pcm: Vec<u8> = (0..2_400i16).flat_map(|s| s.to_le_bytes()).collect();

        Mock::given(method("POST"))
            .and(path(TTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{
                    "inlineData": {"mimeType": "audio/L16;rate=24000", "data": STANDARD.encode(&pcm)}
                }]}}]
            })))
            .expect(1)
            .mount(&gemini)
            .await;

        let backend = Arc::new(GeminiClient::new(gemini_config(&gemini.uri())).unwrap());
        let speech = SpeechAdapter::new(backend, SpeechConfig::default()).unwrap();

        let output = Arc::new(RecordingOutput::default());
        let device = Arc::clone(&output);
        let coordinator = Arc::new(PlaybackCoordinator::new(
            move || -> Result<Arc<dyn AudioOutput>, SpeechError> {
                Ok(Arc::clone(&device) as Arc<dyn AudioOutput>)
            },
        ));

        let narration = NarrationService::new(
            Arc::new(speech),
            Arc::new(CoordinatorPlaybackAdapter::new(coordinator)),
        );

        let outcome = narration
            .narrate_to_end("A fairly standard subscription agreement.")
            .await
            .unwrap();

        assert_eq!(outcome.frames, 2_400);
        assert_eq!(outcome.duration.as_millis(), 100);
        assert_eq!(*output.played.lock(), vec![2_400]);
    }
}
