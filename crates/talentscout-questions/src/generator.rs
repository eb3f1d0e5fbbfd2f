use talentscout_agent::{Agent, AgentConfig, AgentError};
use tracing::{debug, info};

use crate::parser::{parse_report, ParseReport};
use crate::QuestionPrompts;

/// Inputs required to generate the question set
#[derive(Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub tech_stack: &'a [String],
    pub position: &'a str,
}

/// Runs prompt building, the model call, and parsing as one step
pub struct QuestionGenerator<'a> {
    agent: &'a dyn Agent,
}

impl<'a> QuestionGenerator<'a> {
    pub fn new(agent: &'a dyn Agent) -> Self {
        Self { agent }
    }

    /// Generate questions for the declared stack.
    ///
    /// An empty report is a valid result; only a failed model call is an error.
    pub async fn generate(
        &self,
        request: GenerationRequest<'_>,
        config: &AgentConfig,
    ) -> Result<ParseReport, GenerationError> {
        let prompt = QuestionPrompts::build_question_prompt(request.tech_stack, request.position);

        debug!(
            prompt_len = prompt.len(),
            technologies = request.tech_stack.len(),
            agent = self.agent.name(),
            "Requesting technical questions"
        );

        let call = self.agent.execute(&prompt, config);
        let output = match config.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| GenerationError::Agent(AgentError::Timeout(limit)))??,
            None => call.await?,
        };

        info!(
            duration_secs = output.duration.as_secs_f64(),
            lines = output.text_lines(),
            "Generation completed"
        );

        let report = parse_report(&output.text, request.tech_stack);
        if report.dropped() > 0 {
            debug!(
                undeclared = report.undeclared,
                duplicates = report.duplicates,
                empty = report.empty,
                "Discarded unusable questions"
            );
        }
        Ok(report)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Model call failed: {0}")]
    Agent(#[from] AgentError),
}
