use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::GenerateLessonRequest,
        response::{ApiResponse, LessonDto},
    },
};

#[post("/api/lessons")]
async fn generate_lesson(
    state: web::Data<Arc<AppState>>,
    request: web::Json<GenerateLessonRequest>,
) -> Result<HttpResponse, AppError> {
    let lesson = state
        .lesson_service
        .generate_lesson(request.into_inner())
        .await?;

    log::info!("Generated lesson {}", lesson.id);
    Ok(HttpResponse::Created().json(ApiResponse {
        data: LessonDto::from(lesson),
        message: "Lesson generated".to_string(),
    }))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/live")]
async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
