use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lesson {
    pub id: String,
    pub source_segment: String,        // transcript segment the run started from
    pub writer_output: String,         // explainer page
    pub questions_answers: String,     // study Q&A with reasoning
    pub test_questions_answers: String, // numbered test with answer explanations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Lesson {
    pub fn new_lesson(
        source_segment: &str,
        writer_output: String,
        questions_answers: String,
        test_questions_answers: String,
    ) -> Self {
        Lesson {
            id: Uuid::new_v4().to_string(),
            source_segment: source_segment.to_string(),
            writer_output,
            questions_answers,
            test_questions_answers,
            created_at: Some(Utc::now()),
        }
    }
}
