//! Conversation entities

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A role-scoped conversation: one persona plus the running history.
///
/// Each hypothesis (or pairwise comparison) gets its own conversation, so
/// nothing said about one hypothesis leaks into the reasoning about another.
/// Role executors create a fresh value per unit of work and drop it afterwards.
#[derive(Debug, Clone)]
pub struct Conversation {
    persona: String,
    history: Vec<Message>,
}

impl Conversation {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            history: Vec::new(),
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.history.push(Message::user(content));
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.history.push(Message::assistant(content));
    }

    /// Number of user/assistant turns recorded so far.
    pub fn turns(&self) -> usize {
        self.history.len()
    }

    /// Full message sequence, persona first.
    pub fn messages(&self) -> Vec<Message> {
        std::iter::once(Message::system(self.persona.clone()))
            .chain(self.history.iter().cloned())
            .collect()
    }

    /// Drop the history, keeping the persona.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_start_with_persona() {
        let mut conversation = Conversation::new("You are a reviewer.");
        conversation.add_user_message("Review this.");
        conversation.add_assistant_message("Looks strong.");

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], Message::system("You are a reviewer."));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
    }

    #[test]
    fn test_clear_keeps_persona() {
        let mut conversation = Conversation::new("persona");
        conversation.add_user_message("hello");
        conversation.clear();
        assert_eq!(conversation.turns(), 0);
        assert_eq!(conversation.messages(), vec![Message::system("persona")]);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
