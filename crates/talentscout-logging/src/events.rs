use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Structured log events for an interview session.
///
/// Events carry field names, counts and stage tags. Candidate answers are
/// never logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    InterviewStarted {
        session_id: String,
        provider: String,
    },
    StageEntered {
        stage: String,
    },
    FieldAccepted {
        field: String,
    },
    FieldRejected {
        field: String,
        reason: String,
    },
    GenerationStarted {
        technologies: usize,
    },
    GenerationCompleted {
        questions: usize,
        dropped: usize,
    },
    GenerationFailed {
        attempt: usize,
        error: String,
    },
    FallbackQuestionUsed {
        reason: String,
    },
    QuestionAsked {
        number: usize,
        total: usize,
        technology: Option<String>,
    },
    InterviewCompleted {
        questions_answered: usize,
        duration_secs: f64,
    },
    InterviewExited {
        stage: String,
        duration_secs: f64,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for interview events - console output plus optional JSONL file
pub struct Logger {
    format: LogFormat,
    console: bool,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            console: true,
            file_writer: None,
        }
    }

    /// Logger that drops every event
    pub fn silent() -> Self {
        Self {
            format: LogFormat::Compact,
            console: false,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            console: true,
            file_writer: Some(Mutex::new(file)),
        })
    }

    /// Logger for an interactive interview.
    ///
    /// The terminal belongs to the candidate, so events only reach stderr
    /// when `verbose` is set. A `log_path` always receives JSON lines.
    pub fn for_chat(
        format: LogFormat,
        log_path: Option<&Path>,
        verbose: bool,
    ) -> std::io::Result<Self> {
        let logger = match log_path {
            Some(path) => Self::with_file(format, path)?,
            None => Self::new(format),
        };
        Ok(logger.with_console(verbose))
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn writes_to_console(&self) -> bool {
        self.console
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        if !self.console {
            return;
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &LogEvent) {
        let _ = writeln!(std::io::stderr(), "{}", event.with_timestamp());
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::InterviewStarted {
                session_id,
                provider,
            } => {
                let _ = writeln!(
                    stderr,
                    "{} {} {}",
                    "▶".bright_blue(),
                    "talentscout".bold().bright_white(),
                    format!("session {} via {}", short_id(session_id), provider).dimmed()
                );
            }
            LogEvent::StageEntered { stage } => {
                let _ = writeln!(stderr, "  {} {}", "→".dimmed(), stage.dimmed());
            }
            LogEvent::FieldAccepted { field } => {
                let _ = writeln!(stderr, "  {} {}", "✓".bright_green(), field.dimmed());
            }
            LogEvent::FieldRejected { field, reason } => {
                let _ = writeln!(
                    stderr,
                    "  {} {} {}",
                    "✗".bright_yellow(),
                    field.dimmed(),
                    reason.dimmed()
                );
            }
            LogEvent::GenerationStarted { technologies } => {
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "⋯".bright_cyan(),
                    format!(
                        "Generating questions for {} {}",
                        technologies,
                        if *technologies == 1 {
                            "technology"
                        } else {
                            "technologies"
                        }
                    )
                    .dimmed()
                );
            }
            LogEvent::GenerationCompleted { questions, dropped } => {
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "✓".bright_green(),
                    format!("{} question(s) parsed, {} dropped", questions, dropped).dimmed()
                );
            }
            LogEvent::GenerationFailed { attempt, error } => {
                let _ = writeln!(
                    stderr,
                    "  {} Generation attempt {} failed: {}",
                    "✗".bright_red(),
                    attempt,
                    error.bright_red()
                );
            }
            LogEvent::FallbackQuestionUsed { reason } => {
                let _ = writeln!(
                    stderr,
                    "  {} Using fallback question ({})",
                    "⚠".bright_yellow(),
                    reason
                );
            }
            LogEvent::QuestionAsked {
                number,
                total,
                technology,
            } => {
                let label = technology.as_deref().unwrap_or("general");
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "?".bright_magenta(),
                    format!("question {}/{} [{}]", number, total, label).dimmed()
                );
            }
            LogEvent::InterviewCompleted {
                questions_answered,
                duration_secs,
            } => {
                let _ = writeln!(
                    stderr,
                    "{} Interview complete: {} answer(s) in {:.1}s",
                    "✓".bright_green(),
                    questions_answered,
                    duration_secs
                );
            }
            LogEvent::InterviewExited {
                stage,
                duration_secs,
            } => {
                let _ = writeln!(
                    stderr,
                    "{} Candidate left during {} after {:.1}s",
                    "■".bright_yellow(),
                    stage,
                    duration_secs
                );
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::InterviewStarted {
                session_id,
                provider,
            } => format!(
                "[{}] interview:start {} {}",
                timestamp,
                short_id(session_id),
                provider
            ),
            LogEvent::StageEntered { stage } => format!("[{}] stage:{}", timestamp, stage),
            LogEvent::FieldAccepted { field } => format!("[{}] field:ok:{}", timestamp, field),
            LogEvent::FieldRejected { field, reason } => {
                format!("[{}] field:reject:{} {}", timestamp, field, reason)
            }
            LogEvent::GenerationStarted { technologies } => {
                format!("[{}] gen:start:{}", timestamp, technologies)
            }
            LogEvent::GenerationCompleted { questions, dropped } => {
                format!("[{}] gen:done q={} dropped={}", timestamp, questions, dropped)
            }
            LogEvent::GenerationFailed { attempt, error } => {
                format!("[{}] gen:fail:{} {}", timestamp, attempt, error)
            }
            LogEvent::FallbackQuestionUsed { reason } => {
                format!("[{}] gen:fallback {}", timestamp, reason)
            }
            LogEvent::QuestionAsked { number, total, .. } => {
                format!("[{}] ask:{}/{}", timestamp, number, total)
            }
            LogEvent::InterviewCompleted {
                questions_answered,
                duration_secs,
            } => format!(
                "[{}] interview:done answers={} {:.1}s",
                timestamp, questions_answered, duration_secs
            ),
            LogEvent::InterviewExited {
                stage,
                duration_secs,
            } => format!(
                "[{}] interview:exit {} {:.1}s",
                timestamp, stage, duration_secs
            ),
        };
        let _ = writeln!(stderr, "{}", msg);
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
