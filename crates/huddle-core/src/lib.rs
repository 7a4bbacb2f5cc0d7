//! Huddle core
//!
//! Pure state machines for a single-room chat session: the connection
//! lifecycle, the online roster and the message transcript. Nothing in this
//! crate performs I/O. Methods take inputs (raw frame text, transport
//! notifications, the current time) and return values or actions for the
//! caller to execute.
//!
//! # Components
//!
//! - [`ConnectionManager`]: transport lifecycle and send gating
//! - [`PresenceReconciler`]: roster view rebuilt from snapshot pushes
//! - [`MessageTranscript`]: append-only log of received messages
//! - [`Environment`]: clock abstraction for deterministic tests

#![forbid(unsafe_code)]

pub mod connection;
pub mod env;
pub mod error;
pub mod presence;
pub mod transcript;

pub use connection::{ConnectionAction, ConnectionManager, ConnectionState};
pub use env::{Environment, SystemEnv};
pub use error::{ConnectionError, RegistrationError};
pub use presence::{PresenceReconciler, RosterEntry, RosterView};
pub use transcript::{Direction, Message, MessageTranscript};
