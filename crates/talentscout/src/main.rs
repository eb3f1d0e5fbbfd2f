mod chat;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use talentscout_agent::{create_agent, AgentConfig, Provider};
use talentscout_core::{Controller, InterviewOutcome, InterviewSession};
use talentscout_logging::{init_tracing, LogFormat, Logger};

use crate::config::{CliOverrides, ProjectConfig, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "talentscout",
    about = "Candidate screening interviews driven by a language model",
    version,
    author
)]
struct Cli {
    /// Backend used to generate technical questions
    #[arg(short, long, value_enum)]
    provider: Option<ProviderChoice>,

    /// Model to request (defaults depend on the provider)
    #[arg(short, long)]
    model: Option<String>,

    /// Override the backend's API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds to wait for question generation
    #[arg(long)]
    timeout: Option<u64>,

    /// Use the fallback question right away when generation fails
    #[arg(long)]
    no_retry: bool,

    /// Working directory (default: current directory)
    #[arg(short = 'd', long)]
    working_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormatChoice>,

    /// Tracing filter when RUST_LOG is unset
    #[arg(long, default_value = "error")]
    log_level: String,

    /// Append interview events as JSON lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print interview events to stderr alongside the chat
    #[arg(short, long)]
    verbose: bool,

    /// Output final result as JSON
    #[arg(long)]
    json_output: bool,

    /// Dry run: show the resolved configuration without starting an interview
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderChoice {
    Claude,
    Openai,
    Anthropic,
    Ollama,
    Gemini,
}

impl From<ProviderChoice> for Provider {
    fn from(choice: ProviderChoice) -> Self {
        match choice {
            ProviderChoice::Claude => Provider::ClaudeCode,
            ProviderChoice::Openai => Provider::OpenAi,
            ProviderChoice::Anthropic => Provider::Anthropic,
            ProviderChoice::Ollama => Provider::Ollama,
            ProviderChoice::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = match cli.working_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let project = ProjectConfig::load(&working_dir)?;
    let overrides = CliOverrides {
        provider: cli.provider.map(Into::into),
        model: cli.model.clone(),
        base_url: cli.base_url.clone(),
        timeout_secs: cli.timeout,
        no_retry: cli.no_retry,
        log_format: cli.log_format.map(Into::into),
    };
    let settings = Settings::resolve(overrides, project)?;

    init_tracing(&cli.log_level, settings.log_format);

    if cli.dry_run {
        println!("=== Dry Run ===");
        println!("Working dir: {}", working_dir.display());
        println!("Provider: {}", settings.provider);
        println!("Model: {}", settings.effective_model());
        if let Some(ref url) = settings.base_url {
            println!("Base URL: {}", url);
        }
        println!("Timeout: {}s", settings.timeout.as_secs());
        println!(
            "Retry on failure: {}",
            if settings.retry_on_failure { "yes" } else { "no" }
        );
        println!(
            "Sampling: temperature {} / max {} tokens",
            settings.temperature, settings.max_tokens
        );
        return Ok(());
    }

    let agent = create_agent(settings.provider, settings.endpoint())
        .with_context(|| format!("Failed to configure the {} backend", settings.provider))?;

    if !agent.is_available().await {
        anyhow::bail!(
            "Backend '{}' is not available. Check that it is running or installed and that its credentials are valid.",
            agent.name()
        );
    }

    let logger = Logger::for_chat(settings.log_format, cli.log_file.as_deref(), cli.verbose)
        .with_context(|| match cli.log_file {
            Some(ref path) => format!("Failed to open log file {}", path.display()),
            None => "Failed to set up logging".to_string(),
        })?;

    let mut agent_config = AgentConfig::new(working_dir.clone())
        .with_timeout(settings.timeout)
        .with_temperature(settings.temperature)
        .with_max_tokens(settings.max_tokens);
    if let Some(ref model) = settings.model {
        agent_config = agent_config.with_model(model.clone());
    }

    let controller = Controller::new(agent.as_ref(), agent_config, Arc::new(logger))
        .with_retry(settings.retry_on_failure);
    let mut session = InterviewSession::new();

    chat::run(&controller, &mut session).await;

    let outcome = InterviewOutcome::from_session(&session);
    if cli.json_output {
        let json = serde_json::to_string_pretty(&outcome)?;
        println!("{}", json);
    } else {
        print_outcome(&outcome);
    }

    std::process::exit(outcome.exit_code());
}

fn print_outcome(outcome: &InterviewOutcome) {
    match outcome {
        InterviewOutcome::Completed {
            questions_answered,
            used_fallback,
            total_duration_secs,
        } => {
            eprintln!();
            eprintln!("=== COMPLETED ===");
            eprintln!("Questions answered: {}", questions_answered);
            if *used_fallback {
                eprintln!("Note: the generic fallback question was used");
            }
            eprintln!("Duration: {:.1}s", total_duration_secs);
        }
        InterviewOutcome::Exited {
            stage,
            total_duration_secs,
        } => {
            eprintln!();
            eprintln!("=== EXITED ===");
            eprintln!("Candidate left during {}", stage);
            eprintln!("Duration: {:.1}s", total_duration_secs);
        }
        InterviewOutcome::Abandoned {
            stage,
            total_duration_secs,
        } => {
            eprintln!();
            eprintln!("=== ABANDONED ===");
            eprintln!("Input closed during {}", stage);
            eprintln!("Duration: {:.1}s", total_duration_secs);
        }
    }
}
