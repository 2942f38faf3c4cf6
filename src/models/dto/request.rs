use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};

/// Input for one lesson-generation run. Exactly one of `segment` and
/// `video_url` must be provided; a video url goes through the transcript
/// loader first.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateLessonRequest {
    #[validate(length(
        min = 1,
        max = 50000,
        message = "Segment must be between 1 and 50000 characters"
    ))]
    pub segment: Option<String>,

    #[validate(url(message = "Invalid video url"))]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonSource {
    Segment(String),
    VideoUrl(String),
}

impl GenerateLessonRequest {
    pub fn source(&self) -> AppResult<LessonSource> {
        match (&self.segment, &self.video_url) {
            (Some(segment), None) => {
                if segment.trim().is_empty() {
                    Err(AppError::ValidationError(
                        "Segment must not be blank".to_string(),
                    ))
                } else {
                    Ok(LessonSource::Segment(segment.clone()))
                }
            }
            (None, Some(url)) => Ok(LessonSource::VideoUrl(url.clone())),
            (Some(_), Some(_)) => Err(AppError::ValidationError(
                "Provide either a segment or a video url, not both".to_string(),
            )),
            (None, None) => Err(AppError::ValidationError(
                "Provide a segment or a video url".to_string(),
            )),
        }
    }
}
