use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use talentscout_questions::TechnicalQuestion;
use uuid::Uuid;

use crate::messages;
use crate::profile::{CandidateProfile, Field, FieldValue};
use crate::stage::Stage;
use crate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Candidate,
    System,
}

/// One line of the displayed conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub stage: Stage,
}

/// Generated questions plus a cursor to the next unanswered one.
///
/// The cursor only moves forward and never passes the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQueue {
    questions: Vec<TechnicalQuestion>,
    answers: Vec<String>,
}

impl QuestionQueue {
    pub(crate) fn new(questions: Vec<TechnicalQuestion>) -> Self {
        Self {
            questions,
            answers: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[TechnicalQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the next unanswered question
    pub fn cursor(&self) -> usize {
        self.answers.len()
    }

    pub fn current(&self) -> Option<&TechnicalQuestion> {
        self.questions.get(self.cursor())
    }

    pub fn is_finished(&self) -> bool {
        self.cursor() >= self.questions.len()
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn used_fallback(&self) -> bool {
        self.questions.iter().any(TechnicalQuestion::is_fallback)
    }

    /// Record an answer to the current question and advance
    pub(crate) fn record_answer(&mut self, answer: &str) -> bool {
        if self.is_finished() {
            return false;
        }
        self.answers.push(answer.to_string());
        true
    }
}

/// State of one candidate's interview.
///
/// Created at conversation start and mutated only by the
/// [`Controller`](crate::Controller). Sessions share nothing.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    id: Uuid,
    started_at: Instant,
    stage: Stage,
    profile: CandidateProfile,
    queue: Option<QuestionQueue>,
    last_rejection: Option<ValidationError>,
    transcript: Vec<TranscriptEntry>,
    stage_history: Vec<Stage>,
}

impl InterviewSession {
    pub fn new() -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            started_at: Instant::now(),
            stage: Stage::Greeting,
            profile: CandidateProfile::new(),
            queue: None,
            last_rejection: None,
            transcript: Vec::new(),
            stage_history: vec![Stage::Greeting],
        };
        let greeting = session.current_message();
        session.record(Speaker::System, &greeting);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    pub fn queue(&self) -> Option<&QuestionQueue> {
        self.queue.as_ref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Every stage entered so far, starting with `GREETING`
    pub fn stage_history(&self) -> &[Stage] {
        &self.stage_history
    }

    pub fn is_finished(&self) -> bool {
        self.stage.is_terminal()
    }

    /// What the candidate should be looking at right now.
    ///
    /// Pure: calling it any number of times yields the same text and never
    /// changes the session.
    pub fn current_message(&self) -> String {
        match self.stage {
            Stage::Greeting => messages::GREETING.to_string(),
            Stage::Collecting(field) => {
                let first_name = self.profile.first_name();
                match &self.last_rejection {
                    Some(error) => messages::rejection(error, field, first_name),
                    None => messages::field_prompt(field, first_name),
                }
            }
            Stage::GeneratingQuestions => messages::GENERATING.to_string(),
            Stage::Asking(index) => match self.queue.as_ref().and_then(|q| q.questions.get(index)) {
                Some(question) => messages::question(index + 1, self.queue_len(), question),
                None => messages::COMPLETION_MESSAGE.to_string(),
            },
            Stage::Completed => messages::COMPLETION_MESSAGE.to_string(),
            Stage::Exited => messages::EXIT_MESSAGE.to_string(),
        }
    }

    fn queue_len(&self) -> usize {
        self.queue.as_ref().map_or(0, QuestionQueue::len)
    }

    pub(crate) fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.last_rejection = None;
        self.stage_history.push(stage);
    }

    pub(crate) fn record(&mut self, speaker: Speaker, text: &str) {
        self.transcript.push(TranscriptEntry {
            speaker,
            text: text.to_string(),
            stage: self.stage,
        });
    }

    pub(crate) fn accept(&mut self, field: Field, value: FieldValue) -> bool {
        self.profile.accept(field, value)
    }

    pub(crate) fn reject(&mut self, error: ValidationError) {
        self.last_rejection = Some(error);
    }

    /// Install the question queue; only the first call has any effect
    pub(crate) fn set_queue(&mut self, queue: QuestionQueue) -> bool {
        if self.queue.is_some() {
            return false;
        }
        self.queue = Some(queue);
        true
    }

    pub(crate) fn queue_mut(&mut self) -> Option<&mut QuestionQueue> {
        self.queue.as_mut()
    }
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}
