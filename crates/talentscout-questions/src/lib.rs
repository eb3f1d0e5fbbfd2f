pub mod generator;
mod parser;
mod prompts;
mod question;

pub use generator::{GenerationError, GenerationRequest, QuestionGenerator};
pub use parser::{parse_questions, parse_report, ParseReport};
pub use prompts::QuestionPrompts;
pub use question::TechnicalQuestion;
