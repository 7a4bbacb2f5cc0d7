//! WebSocket transport for the client.
//!
//! Provides [`ConnectedTransport`] which handles WebSocket I/O for text
//! frames. This is a thin layer that just sends/receives text - protocol
//! logic remains in the Sans-IO [`huddle_core::ConnectionManager`].

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// How long [`ConnectedTransport::close`] waits for the close handshake.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Channel depth in both directions.
const CHANNEL_CAPACITY: usize = 32;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream error.
    #[error("stream error: {0}")]
    Stream(String),

    /// The connection task has already exited.
    #[error("connection closed")]
    Closed,
}

/// Something that happened on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A text frame arrived.
    Text(String),
    /// The server closed the connection or the stream ended.
    Closed,
    /// Read or write failed. The connection is gone.
    Error(String),
}

/// Handle to a connected WebSocket.
///
/// Text is sent/received via the channels, and an internal task handles the
/// socket I/O. Binary, ping and pong frames are not surfaced.
pub struct ConnectedTransport {
    /// Send text frames to the server.
    pub to_server: mpsc::Sender<String>,
    /// Receive events from the server.
    pub from_server: mpsc::Receiver<TransportEvent>,
    /// Connection task.
    task: JoinHandle<()>,
}

impl ConnectedTransport {
    /// Queue one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] if the connection task has exited.
    pub async fn send_text(&self, text: String) -> Result<(), TransportError> {
        self.to_server.send(text).await.map_err(|_| TransportError::Closed)
    }

    /// Close gracefully.
    ///
    /// Queued frames are flushed before the close handshake. Gives up and
    /// aborts after a short timeout.
    pub async fn close(self) {
        // Keep the receiver alive so the task can finish the handshake.
        let Self { to_server, from_server: _from_server, task } = self;
        drop(to_server);

        let abort_handle = task.abort_handle();
        if tokio::time::timeout(CLOSE_TIMEOUT, task).await.is_err() {
            tracing::debug!("close handshake timed out");
            abort_handle.abort();
        }
    }

    /// Stop the connection immediately.
    pub fn stop(&self) {
        self.task.abort();
    }
}

/// Connect to a chat server over WebSocket.
///
/// Returns a [`ConnectedTransport`] with channels for text transport.
///
/// # Errors
///
/// Returns [`TransportError::Connection`] if the address is invalid or the
/// handshake fails.
pub async fn connect(address: &str) -> Result<ConnectedTransport, TransportError> {
    let (socket, _response) =
        connect_async(address).await.map_err(|e| TransportError::Connection(e.to_string()))?;

    tracing::debug!(%address, "websocket open");

    let (to_server_tx, to_server_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let (from_server_tx, from_server_rx) = mpsc::channel::<TransportEvent>(CHANNEL_CAPACITY);

    let task = tokio::spawn(run_connection(socket, to_server_rx, from_server_tx));

    Ok(ConnectedTransport { to_server: to_server_tx, from_server: from_server_rx, task })
}

/// Run the connection, bridging between channels and the socket.
///
/// Exits when the socket ends or when every sender for `to_server` is
/// dropped, in which case it closes the socket first.
async fn run_connection(
    socket: Socket,
    mut to_server: mpsc::Receiver<String>,
    from_server: mpsc::Sender<TransportEvent>,
) {
    let (mut write, mut read) = socket.split();

    loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(text) = outgoing else {
                    if let Err(e) = write.close().await {
                        tracing::debug!("close failed: {e}");
                    }
                    return;
                };
                if let Err(e) = write.send(Message::text(text)).await {
                    tracing::warn!("write failed: {e}");
                    let _ = from_server.send(TransportEvent::Error(e.to_string())).await;
                    return;
                }
            }

            incoming = read.next() => {
                let event = match incoming {
                    Some(Ok(Message::Text(text))) => TransportEvent::Text(text.as_str().to_owned()),
                    Some(Ok(Message::Close(_))) | None => TransportEvent::Closed,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => TransportEvent::Error(e.to_string()),
                };

                let terminal = !matches!(event, TransportEvent::Text(_));
                if from_server.send(event).await.is_err() || terminal {
                    return;
                }
            }
        }
    }
}
