//! Application input events.
//!
//! This module defines [`AppEvent`], the inputs that drive the
//! [`crate::SessionController`].
//!
//! Events originate from two distinct sources:
//! - User intents from the view ([`Intent`]).
//! - Results reported by the driver: registration outcomes and transport
//!   notifications.

use huddle_core::RegistrationError;
use huddle_proto::User;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Submit the nickname form.
    Login {
        /// Nickname as typed.
        nickname: String,
    },

    /// Submit the message form.
    Send {
        /// Message as typed.
        text: String,
    },

    /// The view is going away.
    Unload,
}

/// Events processed by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// User intent.
    Intent(Intent),

    /// Registration call finished.
    Registered(Result<User, RegistrationError>),

    /// Transport finished opening.
    TransportOpened,

    /// Transport failed (dial, read or write).
    TransportFailed {
        /// Error description.
        reason: String,
    },

    /// Text frame received.
    FrameReceived {
        /// Raw frame text.
        raw: String,
    },

    /// Transport closed.
    TransportClosed,
}

impl From<Intent> for AppEvent {
    fn from(intent: Intent) -> Self {
        Self::Intent(intent)
    }
}
