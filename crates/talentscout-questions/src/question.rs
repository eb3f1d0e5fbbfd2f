use serde::{Deserialize, Serialize};

/// A single screening question.
///
/// Parsed questions always name one of the declared technologies, using the
/// candidate's spelling. The generic fallback question has no technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalQuestion {
    technology: Option<String>,
    text: String,
}

impl TechnicalQuestion {
    pub(crate) fn new(technology: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            technology: Some(technology.into()),
            text: text.into(),
        }
    }

    /// Role-appropriate question used when generation yields nothing usable
    pub fn fallback(position: &str) -> Self {
        let position = position.trim();
        let role = if position.is_empty() {
            "the role you are applying for"
        } else {
            position
        };
        Self {
            technology: None,
            text: format!(
                "Walk me through how you solved a recent technical problem relevant to {}.",
                role
            ),
        }
    }

    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_fallback(&self) -> bool {
        self.technology.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_mentions_position() {
        let q = TechnicalQuestion::fallback("Backend Engineer");
        assert!(q.is_fallback());
        assert!(q.technology().is_none());
        assert!(q.text().contains("Backend Engineer"));
    }

    #[test]
    fn test_fallback_with_blank_position() {
        let q = TechnicalQuestion::fallback("  ");
        assert!(q.text().contains("the role you are applying for"));
    }
}
