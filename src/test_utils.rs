#[cfg(test)]
pub mod fixtures {
    use crate::services::content_pipeline_service::ContentState;
    use crate::services::search_service::SearchResult;

    /// A short transcript segment most pipeline tests run on.
    pub fn sample_segment() -> &'static str {
        "Bits are either 0 or 1."
    }

    /// Creates a search result with the given content
    pub fn search_result(content: &str) -> SearchResult {
        SearchResult {
            title: "Binary numbers".to_string(),
            url: "https://example.com/binary".to_string(),
            content: content.to_string(),
            score: 0.9,
        }
    }

    /// Creates a state as it looks after every stage has run
    pub fn completed_state() -> ContentState {
        ContentState {
            current_segment: sample_segment().to_string(),
            research_documents: Some(vec!["Binary digits explained.".to_string()]),
            writer_output: Some("An explainer about bits.".to_string()),
            questions_answers: Some("Q: What is a bit? A: A 0 or 1.".to_string()),
            test_questions_answers: Some(
                "Test Question 1: What is a bit?\nTest Answer 1: A 0 or 1.\nTest Answer 1 Explanation: Bits are binary digits.".to_string(),
            ),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::content_pipeline_service::LessonPacket;

    #[test]
    fn test_fixtures_completed_state_converts_to_packet() {
        let packet = LessonPacket::from_state(completed_state());
        assert!(packet.is_ok());
    }

    #[test]
    fn test_fixtures_search_result() {
        let result = search_result("snippet");
        assert_eq!(result.content, "snippet");
        assert!(!result.url.is_empty());
    }
}
