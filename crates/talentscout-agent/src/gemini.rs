use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::{Agent, AgentConfig, AgentError, AgentOutput, Provider};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Agent that talks to the Gemini `generateContent` API
#[derive(Clone)]
pub struct GeminiAgent {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiAgent {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The key travels in a header so it never shows up in a logged URL
    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl Agent for GeminiAgent {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn execute(&self, prompt: &str, config: &AgentConfig) -> Result<AgentOutput, AgentError> {
        let start = Instant::now();
        let model = config.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL);

        debug!(
            agent = self.name(),
            model,
            prompt_len = prompt.len(),
            "Requesting content"
        );

        let body = GenerateContentRequest::new(prompt, config);

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = extract_text(parsed)?;

        Ok(AgentOutput::completion(text, start.elapsed()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, config: &AgentConfig) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_tokens,
            },
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

/// Join the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, AgentError> {
    let text = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AgentError::ExecutionFailed(
            "Gemini returned no text in the response candidates".into(),
        ));
    }
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_request_shape() {
        let config = AgentConfig::new(PathBuf::from("/tmp"))
            .with_temperature(0.5)
            .with_max_tokens(300);
        let body = GenerateContentRequest::new("Ask about SQL", &config);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Ask about SQL");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 300);
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_response_joins_text_parts() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Question 1 (SQL):\n"},{"text":"What is a JOIN?"}]},"finishReason":"STOP"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            extract_text(parsed).unwrap(),
            "Question 1 (SQL):\nWhat is a JOIN?"
        );
    }

    #[test]
    fn test_blocked_response_is_an_error() {
        let raw = r#"{"candidates":[{"finishReason":"SAFETY"}],"promptFeedback":{}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            extract_text(parsed),
            Err(AgentError::ExecutionFailed(_))
        ));

        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(parsed).is_err());
    }

    #[test]
    fn test_endpoint() {
        let agent = GeminiAgent::new("key");
        assert_eq!(
            agent.endpoint(DEFAULT_GEMINI_MODEL),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );

        let agent = agent.with_base_url("http://proxy/v1beta/");
        assert_eq!(
            agent.endpoint("gemini-pro"),
            "http://proxy/v1beta/models/gemini-pro:generateContent"
        );
    }
}
