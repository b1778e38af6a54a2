//! Text generation channels

use serde::Serialize;

pub const UNCONFIGURED_MESSAGE: &str = "API_KEY is not configured.";
pub const ASSISTANT_FAILURE_MESSAGE: &str =
    "An error occurred while communicating with the AI. Please try again later.";
pub const REPORT_FAILURE_MESSAGE: &str = "An error occurred while generating the report.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextResult {
    pub state: TextState,
    pub response: String,
}

/// State machine for one text request
///
/// `Idle -> Loading -> Success | Error`. The response is cleared when
/// loading starts. Each request drives its own channel.
#[derive(Debug, Clone)]
pub struct TextChannel {
    state: TextState,
    response: String,
}

impl TextChannel {
    pub fn idle() -> Self {
        Self {
            state: TextState::Idle,
            response: String::new(),
        }
    }

    pub fn begin(&mut self) {
        self.state = TextState::Loading;
        self.response.clear();
    }

    pub fn succeed(&mut self, text: String) {
        self.state = TextState::Success;
        self.response = text;
    }

    pub fn fail(&mut self, message: &str) {
        self.state = TextState::Error;
        self.response = message.to_owned();
    }

    pub fn snapshot(&self) -> TextResult {
        TextResult {
            state: self.state,
            response: self.response.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_transitions() {
        let mut channel = TextChannel::idle();
        assert_eq!(channel.snapshot().state, TextState::Idle);

        channel.begin();
        assert_eq!(
            channel.snapshot(),
            TextResult {
                state: TextState::Loading,
                response: String::new()
            }
        );

        channel.succeed("answer".into());
        assert_eq!(channel.snapshot().response, "answer");

        channel.begin();
        channel.fail(ASSISTANT_FAILURE_MESSAGE);
        assert_eq!(channel.snapshot().state, TextState::Error);
    }

    #[test]
    fn test_state_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TextState::Error).unwrap(), "\"error\"");
        assert_eq!(serde_json::to_string(&TextState::Loading).unwrap(), "\"loading\"");
    }
}
