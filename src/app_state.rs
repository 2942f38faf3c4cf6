use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        content_pipeline_service::ContentPipelineService,
        groundedness_service::UpstageGroundednessService, lesson_service::LessonService,
        model_service::OpenAiModelService, search_service::TavilySearchService,
        transcript_service::YoutubeTranscriptService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub lesson_service: Arc<LessonService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http_client = reqwest::Client::new();

        let model = Arc::new(OpenAiModelService::new(&config));
        let search = Arc::new(TavilySearchService::new(http_client.clone(), &config));
        let groundedness = Arc::new(UpstageGroundednessService::new(&config));
        let transcripts = Arc::new(YoutubeTranscriptService::new(http_client));

        let pipeline =
            ContentPipelineService::new(model, search, groundedness, config.max_gate_retries);
        let lesson_service = Arc::new(LessonService::new(pipeline, transcripts));

        Self {
            lesson_service,
            config: Arc::new(config),
        }
    }
}
