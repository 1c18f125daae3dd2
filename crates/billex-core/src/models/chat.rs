//! Chat transcript for an interactive session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who said a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(message: impl Into<String>) -> Self {
        Self::new(ChatRole::User, message)
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, message)
    }

    fn new(role: ChatRole, message: impl Into<String>) -> Self {
        Self {
            role,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Ordered, append-only sequence of turns. Lives as long as the session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatTranscript {
    turns: Vec<ChatTurn>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent assistant reply; this is what the speak action reads out.
    pub fn last_assistant(&self) -> Option<&ChatTurn> {
        self.turns.iter().rev().find(|t| t.role == ChatRole::Assistant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_assistant() {
        let mut transcript = ChatTranscript::new();
        assert!(transcript.last_assistant().is_none());

        transcript.push(ChatTurn::user("What is due?"));
        transcript.push(ChatTurn::assistant("Rs.450.00"));
        transcript.push(ChatTurn::user("When?"));
        transcript.push(ChatTurn::assistant("15/09/2024"));
        transcript.push(ChatTurn::user("Thanks"));

        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript.last_assistant().unwrap().message, "15/09/2024");
        assert_eq!(transcript.turns()[0].role, ChatRole::User);
    }
}
