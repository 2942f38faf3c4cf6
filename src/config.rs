use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_model: String,
    pub tavily_api_key: SecretString,
    pub search_max_results: usize,
    pub upstage_api_key: SecretString,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub max_gate_retries: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_else(|_| "openai_api_key".to_string()),
            ),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            tavily_api_key: SecretString::from(
                env::var("TAVILY_API_KEY").unwrap_or_else(|_| "tavily_api_key".to_string()),
            ),
            search_max_results: env::var("SEARCH_MAX_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            upstage_api_key: SecretString::from(
                env::var("UPSTAGE_API_KEY").unwrap_or_else(|_| "upstage_api_key".to_string()),
            ),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            // Quality-gate retries per gate before the run accepts the
            // best-effort output and moves on.
            max_gate_retries: env::var("PIPELINE_MAX_GATE_RETRIES")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(3),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret() == "openai_api_key" {
            panic!(
                "FATAL: OPENAI_API_KEY is using default value! Set OPENAI_API_KEY environment variable."
            );
        }

        if self.tavily_api_key.expose_secret() == "tavily_api_key" {
            panic!(
                "FATAL: TAVILY_API_KEY is using default value! Set TAVILY_API_KEY environment variable."
            );
        }

        if self.upstage_api_key.expose_secret() == "upstage_api_key" {
            panic!(
                "FATAL: UPSTAGE_API_KEY is using default value! Set UPSTAGE_API_KEY environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("test_openai_key".to_string()),
            openai_model: "gpt-4o".to_string(),
            tavily_api_key: SecretString::from("test_tavily_key".to_string()),
            search_max_results: 3,
            upstage_api_key: SecretString::from("test_upstage_key".to_string()),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            max_gate_retries: 3,
        }
    }
}
