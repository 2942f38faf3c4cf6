use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const UPSTAGE_API_BASE: &str = "https://api.upstage.ai/v1/solar";
const UPSTAGE_MODEL: &str = "groundedness-check";

/// Verdict returned by the groundedness oracle for an answer/context pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundednessVerdict {
    Grounded,
    NotGrounded,
    NotSure,
}

impl GroundednessVerdict {
    /// Parses the oracle's raw reply, tolerating casing and punctuation noise.
    pub fn from_response(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "grounded" => Some(GroundednessVerdict::Grounded),
            "notgrounded" => Some(GroundednessVerdict::NotGrounded),
            "notsure" => Some(GroundednessVerdict::NotSure),
            _ => None,
        }
    }
}

/// Groundedness oracle consumed by the pipeline's quality gates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroundednessCheck: Send + Sync {
    async fn check(&self, answer: &str, context: &str) -> AppResult<GroundednessVerdict>;
}

/// Upstage implementation of [`GroundednessCheck`], reached through the
/// OpenAI-compatible solar endpoint.
pub struct UpstageGroundednessService {
    client: Client<OpenAIConfig>,
}

impl UpstageGroundednessService {
    pub fn new(config: &Config) -> Self {
        let upstage_config = OpenAIConfig::new()
            .with_api_key(config.upstage_api_key.expose_secret())
            .with_api_base(UPSTAGE_API_BASE);

        Self {
            client: Client::with_config(upstage_config),
        }
    }
}

#[async_trait]
impl GroundednessCheck for UpstageGroundednessService {
    async fn check(&self, answer: &str, context: &str) -> AppResult<GroundednessVerdict> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(UPSTAGE_MODEL)
            .messages([
                ChatCompletionRequestUserMessageArgs::default()
                    .content(context)
                    .build()
                    .map_err(|e| AppError::GroundednessError(e.to_string()))?
                    .into(),
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(answer)
                    .build()
                    .map_err(|e| AppError::GroundednessError(e.to_string()))?
                    .into(),
            ])
            .build()
            .map_err(|e| AppError::GroundednessError(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::GroundednessError(e.to_string()))?;

        let raw = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::GroundednessError("oracle response contained no content".to_string())
            })?;

        GroundednessVerdict::from_response(&raw).ok_or_else(|| {
            AppError::GroundednessError(format!("unrecognized oracle verdict: {:?}", raw))
        })
    }
}
