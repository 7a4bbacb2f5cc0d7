//! Session state.
//!
//! A [`Session`] exists from a successful registration until the view
//! unloads. It pairs the registered user with the single connection, roster
//! and transcript that belong to that registration.

use huddle_core::{ConnectionManager, ConnectionState, MessageTranscript, PresenceReconciler};
use huddle_proto::User;

/// A registered user and everything bound to their connection.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) user: User,
    pub(crate) connection: ConnectionManager,
    pub(crate) roster: PresenceReconciler,
    pub(crate) transcript: MessageTranscript,
}

impl Session {
    pub(crate) fn new(user: User) -> Self {
        Self {
            user,
            connection: ConnectionManager::new(),
            roster: PresenceReconciler::new(),
            transcript: MessageTranscript::new(),
        }
    }

    /// The registered local user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Connection lifecycle state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Online roster.
    pub fn roster(&self) -> &PresenceReconciler {
        &self.roster
    }

    /// Received messages.
    pub fn transcript(&self) -> &MessageTranscript {
        &self.transcript
    }
}
