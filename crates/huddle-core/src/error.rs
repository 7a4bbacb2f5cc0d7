//! Error types for the Huddle core.
//!
//! Strongly-typed errors for the two fallible boundaries of a session:
//! connection state transitions and nickname registration. Neither is ever
//! process-fatal; callers log and degrade.

use thiserror::Error;

use crate::connection::ConnectionState;

/// Hint shown when the nickname is empty.
pub const EMPTY_NICKNAME_HINT: &str = "Nickname cannot be empty";

/// Hint shown when registration fails without a server explanation.
pub const REGISTRATION_FALLBACK_HINT: &str = "Registration failed";

/// Errors that can occur during connection state machine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Send attempted while the connection is not open.
    #[error("connection not ready: cannot send in state {state:?}")]
    NotReady {
        /// Current state when the send was attempted
        state: ConnectionState,
    },

    /// Invalid state transition attempted
    #[error("invalid state transition: cannot {operation} from {state:?}")]
    InvalidState {
        /// Current state when error occurred
        state: ConnectionState,
        /// Operation that was attempted
        operation: &'static str,
    },
}

impl ConnectionError {
    /// Returns true if the operation could succeed later without any change
    /// on the caller's side.
    ///
    /// A send that hit a connecting transport may succeed once it opens.
    /// Invalid transitions never will.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotReady { state: ConnectionState::Connecting })
    }
}

/// Errors produced by nickname registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Nickname was empty after trimming. No request is made.
    #[error("nickname cannot be empty")]
    Validation,

    /// Server answered and refused the nickname.
    #[error("registration rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected {
        /// Server-provided explanation, if any.
        message: Option<String>,
    },

    /// No response was received (connect or I/O failure).
    #[error("registration transport error: {0}")]
    Transport(String),

    /// A response arrived but its body was not understood.
    #[error("invalid registration response: {0}")]
    InvalidResponse(String),
}

impl RegistrationError {
    /// Text to show the user next to the nickname field.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation => EMPTY_NICKNAME_HINT,
            Self::Rejected { message: Some(message) } if !message.is_empty() => message.as_str(),
            Self::Rejected { .. } | Self::Transport(_) | Self::InvalidResponse(_) => {
                REGISTRATION_FALLBACK_HINT
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_while_connecting_is_transient() {
        assert!(ConnectionError::NotReady { state: ConnectionState::Connecting }.is_transient());
    }

    #[test]
    fn terminal_states_are_not_transient() {
        assert!(!ConnectionError::NotReady { state: ConnectionState::Errored }.is_transient());
        assert!(!ConnectionError::NotReady { state: ConnectionState::Closed }.is_transient());
        assert!(
            !ConnectionError::InvalidState {
                state: ConnectionState::Open,
                operation: "connect",
            }
            .is_transient()
        );
    }

    #[test]
    fn server_message_wins_over_fallback() {
        let err = RegistrationError::Rejected { message: Some("Name taken".into()) };
        assert_eq!(err.user_message(), "Name taken");
    }

    #[test]
    fn fallback_hint_when_server_is_silent() {
        assert_eq!(
            RegistrationError::Rejected { message: None }.user_message(),
            "Registration failed"
        );
        assert_eq!(
            RegistrationError::Rejected { message: Some(String::new()) }.user_message(),
            "Registration failed"
        );
        assert_eq!(
            RegistrationError::Transport("connection refused".into()).user_message(),
            "Registration failed"
        );
    }

    #[test]
    fn validation_hint() {
        assert_eq!(RegistrationError::Validation.user_message(), "Nickname cannot be empty");
    }
}
