#![forbid(unsafe_code)]

//! Append-only chat transcript.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identifier of a message within one transcript. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// Raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    id: MessageId,
    role: Role,
    text: String,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Ordered log of exchanged messages.
///
/// There is no way to remove or edit a message; the only mutation is
/// [`push`](Self::push).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    #[serde(skip)]
    next_id: u64,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Blank text is refused and returns `None`.
    pub fn push(&mut self, role: Role, text: impl Into<String>, at: DateTime<Utc>) -> Option<MessageId> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            text,
            created_at: at,
        });
        Some(id)
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Pretty-printed JSON export.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn ids_increase_and_order_is_kept() {
        let mut t = Transcript::new();
        let a = t.push(Role::User, "hi", at(0)).unwrap();
        let b = t.push(Role::Assistant, "hello", at(1)).unwrap();
        assert!(a < b);
        assert_eq!(t.len(), 2);
        let texts: Vec<_> = t.iter().map(ChatMessage::text).collect();
        assert_eq!(texts, ["hi", "hello"]);
        assert_eq!(t.last().unwrap().role(), Role::Assistant);
        assert_eq!(t.messages()[0].created_at(), at(0));
    }

    #[test]
    fn blank_text_refused_without_consuming_id() {
        let mut t = Transcript::new();
        assert!(t.push(Role::User, "  \n", at(0)).is_none());
        assert!(t.is_empty());
        assert_eq!(t.push(Role::User, "x", at(0)).unwrap().get(), 0);
    }

    #[test]
    fn json_export_shape() {
        let mut t = Transcript::new();
        t.push(Role::User, "What are your core skills?", at(0));
        let value: serde_json::Value = serde_json::from_str(&t.to_json().unwrap()).unwrap();
        let first = &value["messages"][0];
        assert_eq!(first["id"], 0);
        assert_eq!(first["role"], "user");
        assert_eq!(first["text"], "What are your core skills?");
        assert!(first["created_at"].as_str().unwrap().starts_with("2023-11-14T"));
        assert!(value.get("next_id").is_none());
    }
}
