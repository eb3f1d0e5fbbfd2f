use serde::{Deserialize, Serialize};

use crate::session::{InterviewSession, QuestionQueue};
use crate::stage::Stage;

/// How an interview ended.
///
/// Carries counts and timings only, never candidate answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InterviewOutcome {
    /// Every question was answered
    Completed {
        questions_answered: usize,
        used_fallback: bool,
        total_duration_secs: f64,
    },
    /// The candidate typed an exit keyword
    Exited {
        stage: String,
        total_duration_secs: f64,
    },
    /// Torn down before reaching a terminal stage (closed input, Ctrl+C)
    Abandoned {
        stage: String,
        total_duration_secs: f64,
    },
}

impl InterviewOutcome {
    pub fn from_session(session: &InterviewSession) -> Self {
        let total_duration_secs = session.elapsed().as_secs_f64();
        match session.stage() {
            Stage::Completed => {
                let queue = session.queue();
                Self::Completed {
                    questions_answered: queue.map_or(0, QuestionQueue::answered),
                    used_fallback: queue.is_some_and(QuestionQueue::used_fallback),
                    total_duration_secs,
                }
            }
            Stage::Exited => Self::Exited {
                stage: exited_from(session).to_string(),
                total_duration_secs,
            },
            stage => Self::Abandoned {
                stage: stage.to_string(),
                total_duration_secs,
            },
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed { .. } => 0,
            Self::Exited { .. } => 0,
            Self::Abandoned { .. } => 130,
        }
    }
}

/// The stage the candidate was in when they typed the exit keyword
fn exited_from(session: &InterviewSession) -> Stage {
    let history = session.stage_history();
    history
        .len()
        .checked_sub(2)
        .and_then(|i| history.get(i))
        .copied()
        .unwrap_or(Stage::Greeting)
}
