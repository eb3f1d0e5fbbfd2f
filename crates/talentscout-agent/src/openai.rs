//! OpenAI Chat Completions backend.
//!
//! Ollama serves the same protocol under `/v1`, so one client covers both.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::{Agent, AgentConfig, AgentError, AgentOutput, Provider};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Agent that talks to an OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct OpenAiCompatAgent {
    client: Client,
    provider: Provider,
    base_url: String,
    api_key: Option<String>,
    default_model: String,
}

impl OpenAiCompatAgent {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            provider: Provider::OpenAi,
            base_url: OPENAI_BASE_URL.to_string(),
            api_key: Some(api_key.into()),
            default_model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }

    pub fn ollama(base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            provider: Provider::Ollama,
            base_url: base_url.unwrap_or_else(|| OLLAMA_BASE_URL.to_string()),
            api_key: None,
            default_model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }

    /// Point the client at a different server (proxies, self-hosted gateways)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn model<'a>(&'a self, config: &'a AgentConfig) -> &'a str {
        config.model.as_deref().unwrap_or(&self.default_model)
    }
}

#[async_trait]
impl Agent for OpenAiCompatAgent {
    fn name(&self) -> &str {
        match self.provider {
            Provider::Ollama => "Ollama",
            _ => "OpenAI",
        }
    }

    fn provider(&self) -> Provider {
        self.provider
    }

    async fn is_available(&self) -> bool {
        match self.provider {
            Provider::Ollama => {
                let url = format!("{}/models", self.base_url.trim_end_matches('/'));
                self.client
                    .get(url)
                    .send()
                    .await
                    .map(|r| r.status().is_success())
                    .unwrap_or(false)
            }
            _ => self.api_key.as_deref().is_some_and(|k| !k.is_empty()),
        }
    }

    async fn execute(&self, prompt: &str, config: &AgentConfig) -> Result<AgentOutput, AgentError> {
        let start = Instant::now();
        let model = self.model(config);

        debug!(
            agent = self.name(),
            model,
            prompt_len = prompt.len(),
            "Requesting chat completion"
        );

        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AgentError::ExecutionFailed("Response had no choices".into()))?;

        Ok(AgentOutput::completion(
            text.trim().to_string(),
            start.elapsed(),
        ))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let agent = OpenAiCompatAgent::ollama(Some("http://gpu-box:11434/v1/".into()));
        assert_eq!(agent.endpoint(), "http://gpu-box:11434/v1/chat/completions");
    }

    #[test]
    fn test_model_falls_back_to_backend_default() {
        let agent = OpenAiCompatAgent::openai("sk-test");
        let config = AgentConfig::default();
        assert_eq!(agent.model(&config), DEFAULT_OPENAI_MODEL);

        let config = AgentConfig::default().with_model("gpt-4o".into());
        assert_eq!(agent.model(&config), "gpt-4o");
    }

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.7,
            max_tokens: 500,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Question 1 (Rust):\nWhat is ownership?"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Question 1 (Rust):\nWhat is ownership?")
        );
    }

    #[tokio::test]
    async fn test_openai_availability_needs_key() {
        assert!(OpenAiCompatAgent::openai("sk-test").is_available().await);
        assert!(!OpenAiCompatAgent::openai("").is_available().await);
    }
}
