//! Conversation transcript — the ordered record of bot and user messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bot => write!(f, "bot"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A single transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    /// Informational only; ordering is insertion order, never timestamp order.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only message sequence. Replaced wholesale on reset.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript seeded with one opening bot message.
    pub fn seeded(opening: &str) -> Self {
        Self {
            messages: vec![Message::bot(opening)],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Most recent message from the user, if any.
    pub fn last_user_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.sender == Sender::User)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_transcript_has_one_bot_message() {
        let transcript = Transcript::seeded("Welcome!");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].sender, Sender::Bot);
        assert_eq!(transcript.messages()[0].text, "Welcome!");
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut transcript = Transcript::seeded("hi");
        transcript.push(Message::user("1"));
        transcript.push(Message::bot("next?"));
        transcript.push(Message::user("2"));

        let texts: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, ["hi", "1", "next?", "2"]);
    }

    #[test]
    fn last_user_message_skips_bot_entries() {
        let mut transcript = Transcript::seeded("hi");
        assert!(transcript.last_user_message().is_none());

        transcript.push(Message::user("first"));
        transcript.push(Message::bot("prompt"));
        assert_eq!(transcript.last_user_message().unwrap().text, "first");

        transcript.push(Message::user("second"));
        assert_eq!(transcript.last_user_message().unwrap().text, "second");
    }

    #[test]
    fn sender_serde_tags() {
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
    }
}
