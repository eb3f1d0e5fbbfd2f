mod anthropic;
mod claude;
mod gemini;
mod openai;
mod output;
mod spawner;
mod traits;

pub use anthropic::{AnthropicAgent, DEFAULT_ANTHROPIC_MODEL};
pub use claude::ClaudeCodeAgent;
pub use gemini::{GeminiAgent, DEFAULT_GEMINI_MODEL};
pub use openai::{OpenAiCompatAgent, DEFAULT_OLLAMA_MODEL, DEFAULT_OPENAI_MODEL, OLLAMA_BASE_URL};
pub use output::AgentOutput;
pub use spawner::ProcessSpawner;
pub use traits::{Agent, AgentConfig, AgentError, Provider, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Connection details for a backend, resolved by the caller's configuration
#[derive(Debug, Clone, Default)]
pub struct Endpoint {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Create an agent by provider
pub fn create_agent(provider: Provider, endpoint: Endpoint) -> Result<Box<dyn Agent>, AgentError> {
    let require_key = |var: &str| {
        endpoint
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AgentError::ConfigError(format!("{} is not set", var)))
    };

    let agent: Box<dyn Agent> = match provider {
        Provider::ClaudeCode => Box::new(ClaudeCodeAgent::new()),
        Provider::OpenAi => {
            let agent = OpenAiCompatAgent::openai(require_key("OPENAI_API_KEY")?);
            match endpoint.base_url {
                Some(url) => Box::new(agent.with_base_url(url)),
                None => Box::new(agent),
            }
        }
        Provider::Ollama => Box::new(OpenAiCompatAgent::ollama(endpoint.base_url)),
        Provider::Anthropic => {
            let agent = AnthropicAgent::new(require_key("ANTHROPIC_API_KEY")?);
            match endpoint.base_url {
                Some(url) => Box::new(agent.with_base_url(url)),
                None => Box::new(agent),
            }
        }
        Provider::Gemini => {
            let agent = GeminiAgent::new(require_key("GOOGLE_API_KEY")?);
            match endpoint.base_url {
                Some(url) => Box::new(agent.with_base_url(url)),
                None => Box::new(agent),
            }
        }
    };
    Ok(agent)
}
