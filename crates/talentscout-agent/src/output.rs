use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Completion captured from a backend call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Generated text
    pub text: String,
    /// Diagnostic output (process stderr); empty for HTTP backends
    pub stderr: String,
    /// Exit code for process backends, 0 for a successful HTTP call
    pub exit_code: i32,
    /// Wall-clock duration of the call
    #[serde(with = "duration_secs")]
    pub duration: Duration,
}

impl AgentOutput {
    pub fn new(text: String, stderr: String, exit_code: i32, duration: Duration) -> Self {
        Self {
            text,
            stderr,
            exit_code,
            duration,
        }
    }

    /// Successful HTTP completion
    pub fn completion(text: String, duration: Duration) -> Self {
        Self::new(text, String::new(), 0, duration)
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn text_lines(&self) -> usize {
        self.text.lines().count()
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs))
    }
}
