//! Chat transcript.
//!
//! Append-only, in arrival order. The protocol carries no message ids, so
//! there is no deduplication and no reordering. Whether a message is the
//! user's own is derived when rendering, not stored.

use chrono::{DateTime, Local, TimeZone, Utc};
use huddle_proto::{ChatMessage, User, UserId};

/// Header shown above the local user's own messages.
pub const OWN_MESSAGE_HEADER: &str = "You";

/// Whether a message was written by the local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Sent by the local user.
    Own,
    /// Sent by someone else.
    Other,
}

/// A received chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author id.
    pub sender_id: UserId,
    /// Author nickname at the time of sending.
    pub sender_name: String,
    /// Message text.
    pub text: String,
    /// When the frame was received locally.
    pub received_at: DateTime<Utc>,
}

impl Message {
    /// Build a transcript entry from a decoded chat frame.
    pub fn from_chat(chat: ChatMessage, received_at: DateTime<Utc>) -> Self {
        Self {
            sender_id: chat.user.id,
            sender_name: chat.user.name,
            text: chat.message,
            received_at,
        }
    }

    /// Direction relative to the current session user.
    pub fn direction(&self, current: Option<&User>) -> Direction {
        match current {
            Some(user) if user.id == self.sender_id => Direction::Own,
            _ => Direction::Other,
        }
    }

    /// Header line: `You` for own messages, the sender's nickname otherwise.
    pub fn header(&self, current: Option<&User>) -> &str {
        self.header_for(self.direction(current))
    }

    /// Header line for an already known direction.
    pub fn header_for(&self, direction: Direction) -> &str {
        match direction {
            Direction::Own => OWN_MESSAGE_HEADER,
            Direction::Other => self.sender_name.as_str(),
        }
    }

    /// Receipt time as `HH:MM` in local time.
    pub fn time_label(&self) -> String {
        self.time_label_in(&Local)
    }

    /// Receipt time as `HH:MM` in the given zone.
    pub fn time_label_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.received_at.with_timezone(tz).format("%H:%M").to_string()
    }
}

/// Ordered log of received messages.
#[derive(Debug, Clone, Default)]
pub struct MessageTranscript {
    messages: Vec<Message>,
}

impl MessageTranscript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self { messages: Vec::new() }
    }

    /// Append a message at the end.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True if nothing has been received yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Messages in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Messages in arrival order, as a slice.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
