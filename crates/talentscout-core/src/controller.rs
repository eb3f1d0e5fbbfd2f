use std::sync::Arc;
use tracing::{debug, info, warn};

use talentscout_agent::{Agent, AgentConfig};
use talentscout_logging::{LogEvent, Logger};
use talentscout_questions::{GenerationRequest, QuestionGenerator, TechnicalQuestion};

use crate::messages;
use crate::profile::Field;
use crate::session::{InterviewSession, QuestionQueue, Speaker};
use crate::stage::Stage;
use crate::validate::validate;
use crate::is_exit_keyword;

/// Drives an [`InterviewSession`] one candidate input at a time
pub struct Controller<'a> {
    agent: &'a dyn Agent,
    config: AgentConfig,
    logger: Arc<Logger>,
    retry_on_failure: bool,
}

impl<'a> Controller<'a> {
    pub fn new(agent: &'a dyn Agent, config: AgentConfig, logger: Arc<Logger>) -> Self {
        Self {
            agent,
            config,
            logger,
            retry_on_failure: true,
        }
    }

    /// Whether a failed model call is retried once before falling back
    pub fn with_retry(mut self, retry_on_failure: bool) -> Self {
        self.retry_on_failure = retry_on_failure;
        self
    }

    /// Announce the session and return the greeting
    pub fn begin(&self, session: &InterviewSession) -> String {
        self.logger.log(&LogEvent::InterviewStarted {
            session_id: session.id().to_string(),
            provider: self.agent.provider().to_string(),
        });
        session.current_message()
    }

    /// Render without input. Never mutates the session.
    pub fn current_message(&self, session: &InterviewSession) -> String {
        session.current_message()
    }

    /// Apply one candidate input and return the reply to display.
    ///
    /// Terminal sessions absorb input: the closing message is returned and
    /// nothing is recorded.
    pub async fn handle_input(&self, session: &mut InterviewSession, raw: &str) -> String {
        if session.is_finished() {
            return session.current_message();
        }

        let input = raw.trim();
        session.record(Speaker::Candidate, input);

        let reply = if is_exit_keyword(input) {
            self.exit(session)
        } else {
            match session.stage() {
                Stage::Greeting => {
                    self.enter(session, Stage::Collecting(Field::first()));
                    session.current_message()
                }
                Stage::Collecting(field) => self.collect(session, field, input).await,
                // Generation completes inside the turn that enters it
                Stage::GeneratingQuestions => session.current_message(),
                Stage::Asking(index) => self.answer(session, index, input),
                Stage::Completed | Stage::Exited => session.current_message(),
            }
        };

        session.record(Speaker::System, &reply);
        reply
    }

    async fn collect(&self, session: &mut InterviewSession, field: Field, input: &str) -> String {
        let value = match validate(field, input) {
            Ok(value) => value,
            Err(error) => {
                debug!(field = field.name(), error = %error, "Rejected field input");
                self.logger.log(&LogEvent::FieldRejected {
                    field: field.name().to_string(),
                    reason: error.to_string(),
                });
                session.reject(error);
                return session.current_message();
            }
        };

        let ack = messages::acknowledgement(field, &value);
        if !session.accept(field, value) {
            warn!(field = field.name(), "Field already set, ignoring input");
            return session.current_message();
        }
        self.logger.log(&LogEvent::FieldAccepted {
            field: field.name().to_string(),
        });

        match field.next() {
            Some(next) => {
                self.enter(session, Stage::Collecting(next));
                format!("{}\n\n{}", ack, session.current_message())
            }
            None => {
                self.enter(session, Stage::GeneratingQuestions);
                self.prepare_questions(session).await;
                format!(
                    "{}\n\n{}\n\n{}",
                    ack,
                    messages::QUESTIONS_INTRO,
                    session.current_message()
                )
            }
        }
    }

    /// Generate and install the queue, then move to the first question
    async fn prepare_questions(&self, session: &mut InterviewSession) {
        if session.queue().is_none() {
            let queue = self.generate_queue(session).await;
            session.set_queue(queue);
        }
        self.enter(session, Stage::Asking(0));
        self.log_question(session, 0);
    }

    async fn generate_queue(&self, session: &InterviewSession) -> QuestionQueue {
        let profile = session.profile();
        let request = GenerationRequest {
            tech_stack: profile.tech_stack(),
            position: profile.desired_position().unwrap_or_default(),
        };
        self.logger.log(&LogEvent::GenerationStarted {
            technologies: request.tech_stack.len(),
        });

        let generator = QuestionGenerator::new(self.agent);
        let attempts = if self.retry_on_failure { 2 } else { 1 };
        let mut report = None;

        for attempt in 1..=attempts {
            match generator.generate(request, &self.config).await {
                Ok(parsed) => {
                    self.logger.log(&LogEvent::GenerationCompleted {
                        questions: parsed.questions.len(),
                        dropped: parsed.dropped(),
                    });
                    report = Some(parsed);
                    break;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Question generation failed");
                    self.logger.log(&LogEvent::GenerationFailed {
                        attempt,
                        error: e.to_string(),
                    });
                }
            }
        }

        let questions = match report {
            Some(parsed) if !parsed.questions.is_empty() => parsed.questions,
            Some(_) => self.fallback(request.position, "no usable questions in model output"),
            None => self.fallback(request.position, "model call failed"),
        };

        info!(questions = questions.len(), "Question queue ready");
        QuestionQueue::new(questions)
    }

    fn fallback(&self, position: &str, reason: &str) -> Vec<TechnicalQuestion> {
        self.logger.log(&LogEvent::FallbackQuestionUsed {
            reason: reason.to_string(),
        });
        vec![TechnicalQuestion::fallback(position)]
    }

    fn answer(&self, session: &mut InterviewSession, index: usize, input: &str) -> String {
        let (recorded, finished) = match session.queue_mut() {
            Some(queue) => (queue.record_answer(input), queue.is_finished()),
            None => (false, true),
        };
        if !recorded {
            warn!(index, "No open question to answer");
        }

        if finished {
            self.enter(session, Stage::Completed);
            self.logger.log(&LogEvent::InterviewCompleted {
                questions_answered: session.queue().map_or(0, QuestionQueue::answered),
                duration_secs: session.elapsed().as_secs_f64(),
            });
            return session.current_message();
        }

        let next = index + 1;
        self.enter(session, Stage::Asking(next));
        self.log_question(session, next);
        format!("{}\n\n{}", messages::ANSWER_THANKS, session.current_message())
    }

    fn exit(&self, session: &mut InterviewSession) -> String {
        let left_at = session.stage();
        info!(stage = %left_at, "Candidate ended the interview");
        self.enter(session, Stage::Exited);
        self.logger.log(&LogEvent::InterviewExited {
            stage: left_at.to_string(),
            duration_secs: session.elapsed().as_secs_f64(),
        });
        session.current_message()
    }

    fn enter(&self, session: &mut InterviewSession, stage: Stage) {
        session.enter(stage);
        self.logger.log(&LogEvent::StageEntered {
            stage: stage.to_string(),
        });
    }

    fn log_question(&self, session: &InterviewSession, index: usize) {
        if let Some(queue) = session.queue() {
            if let Some(question) = queue.questions().get(index) {
                self.logger.log(&LogEvent::QuestionAsked {
                    number: index + 1,
                    total: queue.len(),
                    technology: question.technology().map(str::to_string),
                });
            }
        }
    }
}
