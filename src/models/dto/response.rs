use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::Lesson;

#[derive(Debug, Clone, Serialize)]
pub struct LessonDto {
    pub id: String,
    pub writer_output: String,
    pub questions_answers: String,
    pub test_questions_answers: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Lesson> for LessonDto {
    fn from(lesson: Lesson) -> Self {
        LessonDto {
            id: lesson.id,
            writer_output: lesson.writer_output,
            questions_answers: lesson.questions_answers,
            test_questions_answers: lesson.test_questions_answers,
            created_at: lesson.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

pub type GenerateLessonResponse = ApiResponse<LessonDto>;
