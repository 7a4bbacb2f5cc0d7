//! Application side-effects.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::SessionController`] for the runtime to execute.

use huddle_core::ConnectionAction;

use crate::Render;

/// Actions produced by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Show something in the view.
    Render(Render),

    /// Register the nickname with the server.
    Register {
        /// Trimmed, non-empty nickname.
        nickname: String,
    },

    /// Open the duplex connection.
    Dial {
        /// Server address.
        address: String,
    },

    /// Write one text frame to the connection.
    SendText(String),

    /// Close the connection.
    CloseTransport,

    /// Stop the runtime.
    Quit,
}

impl From<ConnectionAction> for AppAction {
    fn from(action: ConnectionAction) -> Self {
        match action {
            ConnectionAction::Dial { address } => Self::Dial { address },
            ConnectionAction::SendText(text) => Self::SendText(text),
            ConnectionAction::Close => Self::CloseTransport,
        }
    }
}
