use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;

use studyhall_server::{
    app_state::AppState,
    config::Config,
    constants::{prompts, test_prompt::TEST_PROMPT},
    errors::{AppError, AppResult},
    handlers,
    services::{
        content_pipeline_service::ContentPipelineService,
        groundedness_service::{GroundednessCheck, GroundednessVerdict},
        lesson_service::LessonService,
        model_service::CompletionModel,
        search_service::{SearchProvider, SearchResult},
        transcript_service::TranscriptSource,
    },
};

struct StubModel;

#[async_trait]
impl CompletionModel for StubModel {
    async fn complete(&self, system_prompt: &str, _user_prompt: &str) -> AppResult<String> {
        if system_prompt == prompts::RESEARCH_QUERY_PROMPT {
            Ok("binary numbers".to_string())
        } else if system_prompt == prompts::WRITER_PROMPT {
            Ok("An explainer about bits.".to_string())
        } else if system_prompt == prompts::QNA_PROMPT {
            Ok("Q: What is a bit? A: A 0 or 1.".to_string())
        } else if system_prompt == TEST_PROMPT {
            Ok("Test Question 1: What is a bit?\nTest Answer 1: A 0 or 1.\nTest Answer 1 Explanation: Bits are binary digits.".to_string())
        } else {
            Err(AppError::InternalError(
                "unexpected system prompt".to_string(),
            ))
        }
    }
}

struct BrokenModel;

#[async_trait]
impl CompletionModel for BrokenModel {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> AppResult<String> {
        Err(AppError::ModelError("model offline".to_string()))
    }
}

struct StubSearch;

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        Ok(vec![SearchResult {
            title: "Result".to_string(),
            url: "https://example.com/result".to_string(),
            content: format!("snippet for {}", query),
            score: 0.7,
        }])
    }
}

struct GroundedOracle;

#[async_trait]
impl GroundednessCheck for GroundedOracle {
    async fn check(&self, _answer: &str, _context: &str) -> AppResult<GroundednessVerdict> {
        Ok(GroundednessVerdict::Grounded)
    }
}

struct StubTranscripts;

#[async_trait]
impl TranscriptSource for StubTranscripts {
    async fn load_transcript(&self, _url: &str) -> AppResult<String> {
        Ok("Transcribed segment about bits.".to_string())
    }
}

struct NoCaptions;

#[async_trait]
impl TranscriptSource for NoCaptions {
    async fn load_transcript(&self, url: &str) -> AppResult<String> {
        Err(AppError::TranscriptError(format!(
            "no captions found for {}",
            url
        )))
    }
}

fn state_with(
    model: Arc<dyn CompletionModel>,
    transcripts: Arc<dyn TranscriptSource>,
) -> Arc<AppState> {
    let config = Config::from_env();
    let pipeline = ContentPipelineService::new(
        model,
        Arc::new(StubSearch),
        Arc::new(GroundedOracle),
        config.max_gate_retries,
    );
    let lesson_service = Arc::new(LessonService::new(pipeline, transcripts));

    Arc::new(AppState {
        lesson_service,
        config: Arc::new(config),
    })
}

fn stub_state() -> Arc<AppState> {
    state_with(Arc::new(StubModel), Arc::new(StubTranscripts))
}

#[actix_web::test]
async fn test_generate_lesson_from_segment_returns_created_envelope() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(stub_state()))
            .service(handlers::generate_lesson),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/lessons")
        .set_json(serde_json::json!({ "segment": "Bits are either 0 or 1." }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Lesson generated");
    assert!(!body["data"]["id"].as_str().unwrap_or_default().is_empty());
    assert_eq!(body["data"]["writer_output"], "An explainer about bits.");
    assert!(body["data"]["test_questions_answers"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Test Question 1:"));
}

#[actix_web::test]
async fn test_generate_lesson_from_video_url_uses_transcript() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(stub_state()))
            .service(handlers::generate_lesson),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/lessons")
        .set_json(serde_json::json!({
            "video_url": "https://www.youtube.com/watch?v=ewokFOSxabs"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_generate_lesson_without_source_is_a_bad_request() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(stub_state()))
            .service(handlers::generate_lesson),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/lessons")
        .set_json(serde_json::json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 400);
    assert_eq!(body["kind"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_generate_lesson_with_both_sources_is_a_bad_request() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(stub_state()))
            .service(handlers::generate_lesson),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/lessons")
        .set_json(serde_json::json!({
            "segment": "Bits are either 0 or 1.",
            "video_url": "https://youtu.be/ewokFOSxabs"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_missing_captions_map_to_unprocessable_entity() {
    let state = state_with(Arc::new(StubModel), Arc::new(NoCaptions));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(handlers::generate_lesson),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/lessons")
        .set_json(serde_json::json!({
            "video_url": "https://www.youtube.com/watch?v=ewokFOSxabs"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "TRANSCRIPT_ERROR");
}

#[actix_web::test]
async fn test_model_outage_maps_to_bad_gateway() {
    let state = state_with(Arc::new(BrokenModel), Arc::new(StubTranscripts));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(handlers::generate_lesson),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/lessons")
        .set_json(serde_json::json!({ "segment": "Bits are either 0 or 1." }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 502);
    assert_eq!(body["kind"], "MODEL_ERROR");
}

#[actix_web::test]
async fn test_health_endpoints_report_version() {
    let app = test::init_service(
        App::new()
            .service(handlers::health_check)
            .service(handlers::health_check_live),
    )
    .await;

    for uri in ["/health", "/health/live"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
