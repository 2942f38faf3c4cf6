pub mod content_pipeline_service;
pub mod groundedness_service;
pub mod lesson_service;
pub mod model_service;
pub mod pipeline_steps;
pub mod search_service;
pub mod transcript_service;
