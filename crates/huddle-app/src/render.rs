//! View updates.
//!
//! [`Render`] values are the only thing the controller reports to the view.
//! The view has no return contract; it just displays them.

use huddle_core::{ConnectionState, Direction, Message, RosterView};
use huddle_proto::User;

/// Something for the view to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    /// Guidance next to the nickname field.
    LoginHint(String),

    /// Registration succeeded; switch from the login form to the chat.
    ChatOpened {
        /// The registered local user.
        user: User,
    },

    /// Replace the roster panel.
    Roster(RosterView),

    /// Append a message to the transcript panel.
    Message {
        /// The received message.
        message: Message,
        /// Own or other, relative to the local user.
        direction: Direction,
    },

    /// Connection state changed.
    Status(ConnectionState),
}
