//! Frame codec.
//!
//! Inbound frames are discriminated by shape: a top-level array is a roster
//! snapshot, an object carries a `type` field. Decoding goes through
//! [`serde_json::Value`] first so that syntax failures and shape failures are
//! reported separately.
//!
//! # Invariants
//!
//! - [`decode`] is total: every input maps to exactly one [`Inbound`] variant.
//! - `decode(encode(Command::Send { .. }))` is a [`Inbound::ChatMessage`]
//!   carrying the same text and user.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{User, errors::Result};

/// A chat message pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message text.
    pub message: String,
    /// Author of the message.
    pub user: User,
}

/// Why an inbound frame could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// Text is not valid JSON.
    Syntax,
    /// Valid JSON, but not a recognized frame shape.
    Shape,
    /// A client-to-server frame (`exit`) arrived from the server.
    UnexpectedDirection,
}

/// Inbound text that did not decode into a known frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed frame ({kind:?}): {detail}")]
pub struct MalformedFrame {
    /// Failure classification.
    pub kind: MalformedKind,
    /// Human-readable description of the failure.
    pub detail: String,
}

impl MalformedFrame {
    fn new(kind: MalformedKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: detail.into() }
    }
}

/// Result of decoding one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Full replacement of the online-user set, in server order.
    RosterSnapshot(Vec<User>),
    /// A chat message.
    ChatMessage(ChatMessage),
    /// Undecodable input. Carries the reason; never fatal.
    Malformed(MalformedFrame),
}

/// Outbound commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Publish a chat message.
    Send {
        /// Message text.
        text: String,
        /// Local user, echoed back by the server as the author.
        user: User,
    },
    /// Announce that the local user is leaving.
    Exit {
        /// Local user.
        user: User,
    },
}

/// Object frames, discriminated by `type`.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedFrame<M, U> {
    Send { message: M, user: U },
    Exit { user: U },
}

/// Encode a command into frame text.
pub fn encode(command: &Command) -> Result<String> {
    let frame: TaggedFrame<&str, &User> = match command {
        Command::Send { text, user } => TaggedFrame::Send { message: text.as_str(), user },
        Command::Exit { user } => TaggedFrame::Exit { user },
    };
    Ok(serde_json::to_string(&frame)?)
}

/// Decode raw frame text.
///
/// Never fails: anything that is not a roster snapshot or a chat message comes
/// back as [`Inbound::Malformed`].
pub fn decode(raw: &str) -> Inbound {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            return Inbound::Malformed(MalformedFrame::new(MalformedKind::Syntax, e.to_string()));
        },
    };

    match value {
        Value::Array(_) => match serde_json::from_value::<Vec<User>>(value) {
            Ok(users) => Inbound::RosterSnapshot(users),
            Err(e) => Inbound::Malformed(MalformedFrame::new(
                MalformedKind::Shape,
                format!("invalid roster snapshot: {e}"),
            )),
        },
        Value::Object(_) => match serde_json::from_value::<TaggedFrame<String, User>>(value) {
            Ok(TaggedFrame::Send { message, user }) => {
                Inbound::ChatMessage(ChatMessage { message, user })
            },
            Ok(TaggedFrame::Exit { .. }) => Inbound::Malformed(MalformedFrame::new(
                MalformedKind::UnexpectedDirection,
                "exit frames are client-to-server only",
            )),
            Err(e) => Inbound::Malformed(MalformedFrame::new(
                MalformedKind::Shape,
                format!("invalid object frame: {e}"),
            )),
        },
        other => Inbound::Malformed(MalformedFrame::new(
            MalformedKind::Shape,
            format!("unexpected top-level value: {other}"),
        )),
    }
}
