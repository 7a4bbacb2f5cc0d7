//! Connection lifecycle state machine.
//!
//! Owns the lifecycle of the single duplex connection of a session and
//! decides when outgoing sends are legal. Uses the action pattern: methods
//! return [`ConnectionAction`]s for the driver to execute against the real
//! transport, which keeps the state machine pure and the tests free of
//! sockets.
//!
//! # State Machine
//!
//! ```text
//! ┌──────────────┐ connect ┌────────────┐  opened  ┌──────┐
//! │ Disconnected │────────>│ Connecting │─────────>│ Open │
//! └──────────────┘         └────────────┘          └──────┘
//!                                │ error/peer close │    │ close()
//!                                ↓                  │    ↓
//!                          ┌─────────┐ error/peer   │ ┌─────────┐
//!                          │ Errored │<─────────────┘ │ Closing │<── close() from
//!                          └─────────┘                └─────────┘    Connecting/Errored
//!                                                          │ closed/error
//!                                                          ↓
//!                                                     ┌────────┐
//!                                                     │ Closed │
//!                                                     └────────┘
//! ```
//!
//! There is no automatic retry: once `Errored`, the connection stays degraded
//! until the session is torn down.

use huddle_proto::{Inbound, decode};

use crate::error::ConnectionError;

/// Actions returned by the connection state machine.
///
/// The driver executes these against the transport:
/// - `Dial`: Open the duplex connection to `address`
/// - `SendText`: Write one text frame
/// - `Close`: Close the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionAction {
    /// Open the transport to this address
    Dial {
        /// Server address (e.g. `ws://localhost:3000`)
        address: String,
    },

    /// Send this text frame to the peer
    SendText(String),

    /// Close the transport
    Close,
}

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport yet
    Disconnected,
    /// Dial issued, waiting for the transport to open
    Connecting,
    /// Transport open, sends allowed
    Open,
    /// Close requested, waiting for the transport to finish
    Closing,
    /// Transport failed or was dropped by the peer
    Errored,
    /// Transport closed
    Closed,
}

/// Connection state machine
///
/// One instance per session. Pure: it never touches the transport, it only
/// tells the driver what to do and is told what happened.
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    /// Current state
    state: ConnectionState,
    /// Address passed to [`ConnectionManager::connect`]
    address: Option<String>,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    /// Create a connection in [`ConnectionState::Disconnected`] state
    pub fn new() -> Self {
        Self { state: ConnectionState::Disconnected, address: None }
    }

    /// Current connection state
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// True while sends are allowed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Address the connection was dialed to. `None` before `connect`.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Start connecting.
    ///
    /// Transitions to Connecting and returns `Dial`.
    ///
    /// # Errors
    ///
    /// - `ConnectionError::InvalidState` if not in Disconnected state
    pub fn connect(
        &mut self,
        address: impl Into<String>,
    ) -> Result<Vec<ConnectionAction>, ConnectionError> {
        if self.state != ConnectionState::Disconnected {
            return Err(ConnectionError::InvalidState { state: self.state, operation: "connect" });
        }

        let address = address.into();
        tracing::debug!(%address, "connecting");

        self.state = ConnectionState::Connecting;
        self.address = Some(address.clone());

        Ok(vec![ConnectionAction::Dial { address }])
    }

    /// Transport reported a successful open.
    ///
    /// # Errors
    ///
    /// - `ConnectionError::InvalidState` if not in Connecting state
    pub fn handle_open(&mut self) -> Result<(), ConnectionError> {
        if self.state != ConnectionState::Connecting {
            return Err(ConnectionError::InvalidState { state: self.state, operation: "open" });
        }

        tracing::info!(address = self.address.as_deref().unwrap_or_default(), "connection open");
        self.state = ConnectionState::Open;
        Ok(())
    }

    /// Transport reported a failure.
    ///
    /// Moves to Errored. A failure while already closing finishes the close
    /// instead; a closed connection stays closed.
    pub fn handle_error(&mut self, reason: &str) {
        match self.state {
            ConnectionState::Closed => {
                tracing::debug!(reason, "transport error after close ignored");
            },
            ConnectionState::Closing => {
                tracing::debug!(reason, "transport error while closing");
                self.state = ConnectionState::Closed;
            },
            ConnectionState::Disconnected
            | ConnectionState::Connecting
            | ConnectionState::Open
            | ConnectionState::Errored => {
                tracing::error!(reason, state = ?self.state, "connection error");
                self.state = ConnectionState::Errored;
            },
        }
    }

    /// Transport reported that it is closed.
    ///
    /// Expected after a close request (or on an errored transport). A peer
    /// close of a live connection is treated as an error.
    pub fn handle_closed(&mut self) {
        match self.state {
            ConnectionState::Connecting | ConnectionState::Open => {
                self.handle_error("closed by peer");
            },
            ConnectionState::Disconnected
            | ConnectionState::Closing
            | ConnectionState::Errored
            | ConnectionState::Closed => {
                tracing::debug!(state = ?self.state, "connection closed");
                self.state = ConnectionState::Closed;
            },
        }
    }

    /// Send a text frame.
    ///
    /// # Errors
    ///
    /// - `ConnectionError::NotReady` if not in Open state. Nothing is
    ///   buffered; the caller decides whether to drop or retry.
    pub fn send(&mut self, text: String) -> Result<Vec<ConnectionAction>, ConnectionError> {
        if self.state != ConnectionState::Open {
            return Err(ConnectionError::NotReady { state: self.state });
        }

        Ok(vec![ConnectionAction::SendText(text)])
    }

    /// Close the connection.
    ///
    /// If open, the `farewell` frame is sent first on a best-effort basis. The
    /// state moves on regardless of whether that send succeeds. Calling this
    /// again once closing or closed does nothing.
    pub fn close(&mut self, farewell: Option<String>) -> Vec<ConnectionAction> {
        match self.state {
            ConnectionState::Open => {
                self.state = ConnectionState::Closing;
                let mut actions = Vec::with_capacity(2);
                if let Some(frame) = farewell {
                    actions.push(ConnectionAction::SendText(frame));
                }
                actions.push(ConnectionAction::Close);
                actions
            },
            ConnectionState::Connecting | ConnectionState::Errored => {
                self.state = ConnectionState::Closing;
                vec![ConnectionAction::Close]
            },
            ConnectionState::Disconnected => {
                self.state = ConnectionState::Closed;
                vec![]
            },
            ConnectionState::Closing | ConnectionState::Closed => vec![],
        }
    }

    /// Decode an inbound text frame.
    ///
    /// Malformed frames are logged and returned as-is so callers can match
    /// exhaustively. Connection state is never affected by frame content.
    pub fn receive(&self, raw: &str) -> Inbound {
        let inbound = decode(raw);
        if let Inbound::Malformed(ref malformed) = inbound {
            tracing::warn!(
                kind = ?malformed.kind,
                detail = %malformed.detail,
                raw,
                "dropping malformed frame"
            );
        }
        inbound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_connection() -> ConnectionManager {
        let mut conn = ConnectionManager::new();
        conn.connect("ws://localhost:3000").unwrap();
        conn.handle_open().unwrap();
        conn
    }

    #[test]
    fn connection_lifecycle() {
        let mut conn = ConnectionManager::new();
        assert_eq!(conn.state(), ConnectionState::Disconnected);
        assert_eq!(conn.address(), None);

        let actions = conn.connect("ws://localhost:3000").unwrap();
        assert_eq!(conn.state(), ConnectionState::Connecting);
        assert_eq!(actions, vec![ConnectionAction::Dial {
            address: "ws://localhost:3000".into()
        }]);

        conn.handle_open().unwrap();
        assert!(conn.is_open());

        let actions = conn.close(Some("bye".into()));
        assert_eq!(conn.state(), ConnectionState::Closing);
        assert_eq!(actions, vec![
            ConnectionAction::SendText("bye".into()),
            ConnectionAction::Close
        ]);

        conn.handle_closed();
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[test]
    fn connect_only_from_disconnected() {
        let mut conn = open_connection();

        let result = conn.connect("ws://elsewhere");
        assert!(matches!(result, Err(ConnectionError::InvalidState {
            state: ConnectionState::Open,
            operation: "connect"
        })));
        assert_eq!(conn.address(), Some("ws://localhost:3000"));
    }

    #[test]
    fn open_requires_connecting() {
        let mut conn = ConnectionManager::new();
        assert!(matches!(conn.handle_open(), Err(ConnectionError::InvalidState { .. })));
        assert_eq!(conn.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn send_while_connecting_is_not_ready() {
        let mut conn = ConnectionManager::new();
        conn.connect("ws://localhost:3000").unwrap();

        let result = conn.send("hello".into());
        assert_eq!(result, Err(ConnectionError::NotReady { state: ConnectionState::Connecting }));
    }

    #[test]
    fn send_when_open_emits_text() {
        let mut conn = open_connection();
        assert_eq!(conn.send("hello".into()).unwrap(), vec![ConnectionAction::SendText(
            "hello".into()
        )]);
    }

    #[test]
    fn dial_failure_is_errored_without_retry() {
        let mut conn = ConnectionManager::new();
        conn.connect("ws://localhost:3000").unwrap();

        conn.handle_error("connection refused");
        assert_eq!(conn.state(), ConnectionState::Errored);
        assert!(conn.send("hello".into()).is_err());
        assert!(conn.connect("ws://localhost:3000").is_err());
    }

    #[test]
    fn peer_close_of_open_connection_is_error() {
        let mut conn = open_connection();
        conn.handle_closed();
        assert_eq!(conn.state(), ConnectionState::Errored);
    }

    #[test]
    fn close_while_connecting_skips_farewell() {
        let mut conn = ConnectionManager::new();
        conn.connect("ws://localhost:3000").unwrap();

        let actions = conn.close(Some("bye".into()));
        assert_eq!(actions, vec![ConnectionAction::Close]);
        assert_eq!(conn.state(), ConnectionState::Closing);
    }

    #[test]
    fn close_errored_connection_reaches_closed() {
        let mut conn = open_connection();
        conn.handle_error("reset");

        assert_eq!(conn.close(Some("bye".into())), vec![ConnectionAction::Close]);
        conn.handle_closed();
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[test]
    fn close_is_idempotent() {
        let mut conn = open_connection();
        let _ = conn.close(None);

        assert!(conn.close(Some("bye".into())).is_empty());
        conn.handle_closed();
        assert!(conn.close(Some("bye".into())).is_empty());
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[test]
    fn close_without_transport_goes_straight_to_closed() {
        let mut conn = ConnectionManager::new();
        assert!(conn.close(Some("bye".into())).is_empty());
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[test]
    fn error_while_closing_finishes_close() {
        let mut conn = open_connection();
        let _ = conn.close(None);

        conn.handle_error("write failed");
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[test]
    fn malformed_frame_keeps_connection_open() {
        let conn = open_connection();

        assert!(matches!(conn.receive("{"), Inbound::Malformed(_)));
        assert_eq!(conn.state(), ConnectionState::Open);
    }

    #[test]
    fn receive_decodes_roster() {
        let conn = open_connection();
        assert!(matches!(
            conn.receive(r#"[{"id":1,"name":"alice"}]"#),
            Inbound::RosterSnapshot(users) if users.len() == 1
        ));
    }
}
