use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// A single document returned by the web-search collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

/// Web-search collaborator consumed by the research stage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>>;
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Tavily implementation of [`SearchProvider`].
pub struct TavilySearchService {
    client: reqwest::Client,
    api_key: SecretString,
    max_results: usize,
}

impl TavilySearchService {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.tavily_api_key.clone(),
            max_results: config.search_max_results,
        }
    }
}

#[async_trait]
impl SearchProvider for TavilySearchService {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let request = TavilyRequest {
            api_key: self.api_key.expose_secret(),
            query,
            max_results: self.max_results,
        };

        let response = self
            .client
            .post(TAVILY_SEARCH_URL)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::SearchError(format!("search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SearchError(format!(
                "search provider returned {}: {}",
                status, body
            )));
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| AppError::SearchError(format!("invalid search response: {}", e)))?;

        log::debug!(
            "search for {:?} returned {} results",
            query,
            parsed.results.len()
        );
        Ok(parsed.results)
    }
}
