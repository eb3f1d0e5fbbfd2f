//! Configuration for talentscout.
//!
//! Values come from, highest priority first: command-line flags, a
//! `talentscout.toml` in the working directory, environment variables, and
//! built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use talentscout_agent::{
    Endpoint, Provider, DEFAULT_ANTHROPIC_MODEL, DEFAULT_GEMINI_MODEL, DEFAULT_MAX_TOKENS,
    DEFAULT_OLLAMA_MODEL, DEFAULT_OPENAI_MODEL, DEFAULT_TEMPERATURE,
};
use talentscout_logging::LogFormat;

/// The config file name
pub const CONFIG_FILE_NAME: &str = "talentscout.toml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Project-level configuration loaded from `talentscout.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Backend: claude, openai, anthropic, ollama or gemini
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Override the backend's API base URL
    pub base_url: Option<String>,
    /// Limit for the question generation call
    pub timeout_secs: Option<u64>,
    /// Retry a failed generation call once before using the fallback question
    pub retry_on_failure: Option<bool>,
    pub log_format: Option<String>,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Sampling parameters passed to the backend
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }
}

/// Values given on the command line
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub no_retry: bool,
    pub log_format: Option<LogFormat>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: Provider,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub retry_on_failure: bool,
    pub log_format: LogFormat,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn resolve(cli: CliOverrides, file: Option<ProjectConfig>) -> Result<Self> {
        Self::resolve_with(cli, file, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup.
    ///
    /// Empty environment values count as unset.
    pub fn resolve_with<F>(cli: CliOverrides, file: Option<ProjectConfig>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let file = file.unwrap_or_default();

        let provider = match cli.provider {
            Some(provider) => provider,
            None => match file.provider.or_else(|| env("LLM_PROVIDER")) {
                Some(name) => name
                    .parse::<Provider>()
                    .map_err(anyhow::Error::msg)
                    .context("Invalid provider")?,
                None => Provider::OpenAi,
            },
        };

        let model = cli
            .model
            .or(file.model)
            .or_else(|| model_var(provider).and_then(&env));

        let base_url = cli
            .base_url
            .or(file.base_url)
            .or_else(|| base_url_var(provider).and_then(&env));

        let api_key = api_key_var(provider).and_then(&env);

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retry_on_failure = !cli.no_retry && file.retry_on_failure.unwrap_or(true);

        let log_format = match cli.log_format {
            Some(format) => format,
            None => match file.log_format {
                Some(name) => name
                    .parse::<LogFormat>()
                    .map_err(anyhow::Error::msg)
                    .context("Invalid log_format")?,
                None => LogFormat::default(),
            },
        };

        Ok(Self {
            provider,
            model,
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
            retry_on_failure,
            log_format,
            temperature: file.generation.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: file.generation.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
        }
    }

    /// The model that will actually be requested
    pub fn effective_model(&self) -> &str {
        match self.model.as_deref() {
            Some(model) => model,
            None => match self.provider {
                Provider::OpenAi => DEFAULT_OPENAI_MODEL,
                Provider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
                Provider::Ollama => DEFAULT_OLLAMA_MODEL,
                Provider::Gemini => DEFAULT_GEMINI_MODEL,
                Provider::ClaudeCode => "(claude default)",
            },
        }
    }
}

fn model_var(provider: Provider) -> Option<&'static str> {
    match provider {
        Provider::OpenAi => Some("OPENAI_MODEL"),
        Provider::Anthropic => Some("ANTHROPIC_MODEL"),
        Provider::Ollama => Some("OLLAMA_MODEL"),
        Provider::Gemini => Some("GEMINI_MODEL"),
        Provider::ClaudeCode => None,
    }
}

fn base_url_var(provider: Provider) -> Option<&'static str> {
    match provider {
        Provider::Ollama => Some("OLLAMA_BASE_URL"),
        _ => None,
    }
}

fn api_key_var(provider: Provider) -> Option<&'static str> {
    match provider {
        Provider::OpenAi => Some("OPENAI_API_KEY"),
        Provider::Anthropic => Some("ANTHROPIC_API_KEY"),
        Provider::Gemini => Some("GOOGLE_API_KEY"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn write_config(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), content).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_full_file() {
        let dir = write_config(
            r#"
provider = "ollama"
model = "llama3.1"
base_url = "http://gpu-box:11434/v1"
timeout_secs = 120
retry_on_failure = false
log_format = "compact"

[generation]
temperature = 0.2
max_tokens = 800
"#,
        );
        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(config.provider.as_deref(), Some("ollama"));
        assert_eq!(config.timeout_secs, Some(120));
        assert_eq!(config.generation.max_tokens, Some(800));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = write_config("provider = \"openai\"\nmax_questions = 3\n");
        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve_with(CliOverrides::default(), None, env_of(&[])).unwrap();
        assert_eq!(settings.provider, Provider::OpenAi);
        assert_eq!(settings.effective_model(), DEFAULT_OPENAI_MODEL);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(settings.retry_on_failure);
        assert_eq!(settings.log_format, LogFormat::Pretty);
        assert_eq!(settings.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_env_selects_provider_and_credentials() {
        let env = env_of(&[
            ("LLM_PROVIDER", "anthropic"),
            ("ANTHROPIC_API_KEY", "sk-ant-test"),
            ("ANTHROPIC_MODEL", "claude-3-5-haiku-latest"),
            ("OPENAI_API_KEY", "sk-openai"),
        ]);
        let settings = Settings::resolve_with(CliOverrides::default(), None, env).unwrap();
        assert_eq!(settings.provider, Provider::Anthropic);
        assert_eq!(settings.api_key.as_deref(), Some("sk-ant-test"));
        assert_eq!(settings.effective_model(), "claude-3-5-haiku-latest");
    }

    #[test]
    fn test_file_beats_env_and_cli_beats_file() {
        let env = env_of(&[("LLM_PROVIDER", "anthropic"), ("OLLAMA_MODEL", "mistral")]);
        let file = ProjectConfig {
            provider: Some("ollama".into()),
            timeout_secs: Some(30),
            ..Default::default()
        };
        let settings = Settings::resolve_with(CliOverrides::default(), Some(file), &env).unwrap();
        assert_eq!(settings.provider, Provider::Ollama);
        assert_eq!(settings.model.as_deref(), Some("mistral"));
        assert_eq!(settings.timeout, Duration::from_secs(30));

        let file = ProjectConfig {
            provider: Some("ollama".into()),
            timeout_secs: Some(30),
            ..Default::default()
        };
        let cli = CliOverrides {
            model: Some("phi3".into()),
            timeout_secs: Some(5),
            no_retry: true,
            ..Default::default()
        };
        let settings = Settings::resolve_with(cli, Some(file), &env).unwrap();
        assert_eq!(settings.model.as_deref(), Some("phi3"));
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert!(!settings.retry_on_failure);
    }

    #[test]
    fn test_ollama_base_url_from_env() {
        let env = env_of(&[
            ("LLM_PROVIDER", "ollama"),
            ("OLLAMA_BASE_URL", "http://10.0.0.5:11434/v1"),
        ]);
        let settings = Settings::resolve_with(CliOverrides::default(), None, env).unwrap();
        assert_eq!(
            settings.endpoint().base_url.as_deref(),
            Some("http://10.0.0.5:11434/v1")
        );
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let env = env_of(&[("LLM_PROVIDER", "  "), ("OPENAI_API_KEY", "")]);
        let settings = Settings::resolve_with(CliOverrides::default(), None, env).unwrap();
        assert_eq!(settings.provider, Provider::OpenAi);
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_gemini_from_env() {
        let env = env_of(&[("LLM_PROVIDER", "gemini"), ("GOOGLE_API_KEY", "g-key")]);
        let settings = Settings::resolve_with(CliOverrides::default(), None, &env).unwrap();
        assert_eq!(settings.provider, Provider::Gemini);
        assert_eq!(settings.api_key.as_deref(), Some("g-key"));
        assert_eq!(settings.effective_model(), DEFAULT_GEMINI_MODEL);

        let env = env_of(&[
            ("LLM_PROVIDER", "gemini"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("OPENAI_MODEL", "gpt-4o"),
        ]);
        let settings = Settings::resolve_with(CliOverrides::default(), None, env).unwrap();
        assert_eq!(settings.effective_model(), "gemini-1.5-pro");
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_invalid_provider_is_an_error() {
        let env = env_of(&[("LLM_PROVIDER", "mistral")]);
        assert!(Settings::resolve_with(CliOverrides::default(), None, env).is_err());
    }
}
