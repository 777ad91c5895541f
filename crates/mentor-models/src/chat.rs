//! Chat session and message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// User message.
    User,
    /// Assistant reply.
    Assistant,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: ChatRole,

    /// Text content of the message.
    pub content: String,

    /// Timestamp when the message was created.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message with the current timestamp.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Language scope of a chat turn.
///
/// `General` turns are plain coding conversation; `Language` turns carry the
/// current code along with the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageScope {
    /// General coding conversation, no code attached.
    General,
    /// Conversation scoped to the current code in the given language.
    Language(String),
}

impl LanguageScope {
    /// Parse a scope tag; the literal `"general"` maps to [`LanguageScope::General`].
    pub fn parse(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("general") {
            Self::General
        } else {
            Self::Language(tag.to_string())
        }
    }

    /// Returns the language identifier for code-scoped turns.
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::General => None,
            Self::Language(lang) => Some(lang),
        }
    }
}

/// An ordered chat transcript plus its current language scope.
///
/// Role alternation is deliberately not enforced: a caller may append a user
/// turn without a reply, and consecutive same-role messages are valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSession {
    /// Messages in arrival order. Prior turns are never removed.
    pub messages: Vec<ChatMessage>,

    /// Current scope for new turns.
    pub scope: Option<LanguageScope>,
}

impl ChatSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given scope.
    pub fn with_scope(scope: LanguageScope) -> Self {
        Self {
            messages: Vec::new(),
            scope: Some(scope),
        }
    }

    /// Append a message to the transcript.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
