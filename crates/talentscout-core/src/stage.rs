use std::fmt;

use crate::profile::Field;

/// The single active state of an interview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Greeting,
    Collecting(Field),
    GeneratingQuestions,
    /// Index into the question queue
    Asking(usize),
    Completed,
    Exited,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Completed | Stage::Exited)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Greeting => write!(f, "GREETING"),
            Stage::Collecting(field) => write!(f, "COLLECTING({})", field.index()),
            Stage::GeneratingQuestions => write!(f, "GENERATING_QUESTIONS"),
            Stage::Asking(index) => write!(f, "ASKING({})", index),
            Stage::Completed => write!(f, "COMPLETED"),
            Stage::Exited => write!(f, "EXITED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_tags() {
        assert_eq!(Stage::Greeting.to_string(), "GREETING");
        assert_eq!(Stage::Collecting(Field::Phone).to_string(), "COLLECTING(2)");
        assert_eq!(
            Stage::GeneratingQuestions.to_string(),
            "GENERATING_QUESTIONS"
        );
        assert_eq!(Stage::Asking(1).to_string(), "ASKING(1)");
    }

    #[test]
    fn test_terminal_stages() {
        assert!(Stage::Completed.is_terminal());
        assert!(Stage::Exited.is_terminal());
        assert!(!Stage::Asking(0).is_terminal());
        assert!(!Stage::Greeting.is_terminal());
    }
}
