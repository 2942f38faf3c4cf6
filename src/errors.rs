use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Search error: {0}")]
    SearchError(String),

    #[error("Groundedness error: {0}")]
    GroundednessError(String),

    #[error("Transcript error: {0}")]
    TranscriptError(String),

    #[error("Pipeline error: {0}")]
    PipelineError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ModelError(_) => "MODEL_ERROR",
            AppError::SearchError(_) => "SEARCH_ERROR",
            AppError::GroundednessError(_) => "GROUNDEDNESS_ERROR",
            AppError::TranscriptError(_) => "TRANSCRIPT_ERROR",
            AppError::PipelineError(_) => "PIPELINE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::TranscriptError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ModelError(_) => StatusCode::BAD_GATEWAY,
            AppError::SearchError(_) => StatusCode::BAD_GATEWAY,
            AppError::GroundednessError(_) => StatusCode::BAD_GATEWAY,
            AppError::PipelineError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::ModelError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
