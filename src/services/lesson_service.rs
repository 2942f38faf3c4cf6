use std::sync::Arc;

use validator::Validate;

use crate::errors::AppResult;
use crate::models::domain::Lesson;
use crate::models::dto::request::{GenerateLessonRequest, LessonSource};
use crate::services::content_pipeline_service::ContentPipelineService;
use crate::services::transcript_service::TranscriptSource;

/// Facade the HTTP layer talks to: resolves the input source, runs the
/// pipeline, and shapes the result into the domain object.
pub struct LessonService {
    pipeline: ContentPipelineService,
    transcripts: Arc<dyn TranscriptSource>,
}

impl LessonService {
    pub fn new(pipeline: ContentPipelineService, transcripts: Arc<dyn TranscriptSource>) -> Self {
        Self {
            pipeline,
            transcripts,
        }
    }

    pub async fn generate_lesson(&self, request: GenerateLessonRequest) -> AppResult<Lesson> {
        request.validate()?;

        let segment = match request.source()? {
            LessonSource::Segment(segment) => segment,
            LessonSource::VideoUrl(url) => {
                log::info!("Resolving lesson segment from video url");
                self.transcripts.load_transcript(&url).await?
            }
        };

        let packet = self.pipeline.run(&segment).await?;

        Ok(Lesson::new_lesson(
            &segment,
            packet.writer_output,
            packet.questions_answers,
            packet.test_questions_answers,
        ))
    }
}
