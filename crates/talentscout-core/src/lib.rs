//! # talentscout-core
//!
//! The screening interview state machine.
//!
//! A [`Controller`] takes one candidate input per turn, validates it against
//! the field being collected, updates the [`InterviewSession`], and once the
//! tech stack is known generates one technical question per technology.
//!
//! Rendering only ever needs [`InterviewSession::current_message`], which is
//! pure and safe to call on every redraw.

mod controller;
mod error;
pub mod messages;
mod outcome;
mod profile;
mod session;
mod stage;
pub mod validate;

pub use controller::Controller;
pub use error::ValidationError;
pub use outcome::InterviewOutcome;
pub use profile::{CandidateProfile, Field, FieldValue};
pub use session::{InterviewSession, QuestionQueue, Speaker, TranscriptEntry};
pub use stage::Stage;
pub use validate::validate;

pub const EXIT_KEYWORDS: [&str; 4] = ["exit", "quit", "bye", "stop"];

/// True when the whole input is an exit keyword, ignoring case, surrounding
/// whitespace and trailing `.`/`!`
pub fn is_exit_keyword(input: &str) -> bool {
    let word = input
        .trim()
        .trim_end_matches(|c: char| c == '.' || c == '!')
        .trim_end()
        .to_lowercase();
    EXIT_KEYWORDS.contains(&word.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_keywords_any_case() {
        for input in ["exit", "QUIT", " Bye ", "sToP", "bye!", "Exit."] {
            assert!(is_exit_keyword(input), "{:?}", input);
        }
    }

    #[test]
    fn test_exit_keyword_must_be_whole_input() {
        assert!(!is_exit_keyword("I stopped using Java"));
        assert!(!is_exit_keyword("exit strategy"));
        assert!(!is_exit_keyword(""));
    }
}
