//! Terminal driver for the line client.
//!
//! Implements the [`Driver`] trait over a channel of typed lines and a
//! plain-text output sink. Network uses a WebSocket via `huddle-client`.

use std::{
    collections::VecDeque,
    io::{self, Write},
    sync::Arc,
};

use chrono::Local;
use huddle_app::{AppEvent, Driver, Intent, Render};
use huddle_client::{
    ConnectedTransport, HttpRegistrar, TransportError, TransportEvent, transport,
};
use huddle_core::RegistrationError;
use huddle_proto::User;
use thiserror::Error;
use tokio::sync::{Notify, mpsc};

use crate::{LineInput, view};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TermError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles line input, plain-text rendering and network communication
/// (HTTP registration, WebSocket transport). A notification on the
/// [`shutdown_handle`](Self::shutdown_handle) is treated as an unload so the
/// exit notice still goes out, even while no input arrives.
pub struct TermDriver<W> {
    lines: mpsc::Receiver<String>,
    shutdown: Arc<Notify>,
    output: W,
    registrar: HttpRegistrar,
    connection: Option<ConnectedTransport>,
    input: LineInput,
    /// Events queued before the first read, such as a nickname from the CLI.
    pending: VecDeque<AppEvent>,
}

impl<W> TermDriver<W>
where
    W: Write + Send,
{
    /// Create a new terminal driver reading lines from `lines`.
    ///
    /// See [`spawn_line_reader`](crate::input::spawn_line_reader) for a
    /// channel fed from a blocking reader.
    pub fn new(lines: mpsc::Receiver<String>, output: W, registrar: HttpRegistrar) -> Self {
        Self {
            lines,
            shutdown: Arc::new(Notify::new()),
            output,
            registrar,
            connection: None,
            input: LineInput::new(),
            pending: VecDeque::new(),
        }
    }

    /// Handle that makes the driver unload, for example on Ctrl-C.
    ///
    /// A notification sent before the driver waits is kept until it does.
    pub fn shutdown_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Log in as `nickname` before reading any input.
    #[must_use]
    pub fn with_nickname(mut self, nickname: String) -> Self {
        self.pending.push_back(Intent::Login { nickname }.into());
        self
    }

    /// Print the login prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn prompt(&mut self) -> Result<(), TermError> {
        if self.pending.is_empty() {
            writeln!(self.output, "Nickname:")?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn transport_event(&mut self, event: Option<TransportEvent>) -> AppEvent {
        match event {
            Some(TransportEvent::Text(raw)) => AppEvent::FrameReceived { raw },
            Some(TransportEvent::Error(reason)) => {
                self.connection = None;
                AppEvent::TransportFailed { reason }
            },
            Some(TransportEvent::Closed) | None => {
                self.connection = None;
                AppEvent::TransportClosed
            },
        }
    }
}

/// Next event from the connection, or never if there is none.
async fn recv_transport(connection: &mut Option<ConnectedTransport>) -> Option<TransportEvent> {
    match connection {
        Some(connection) => connection.from_server.recv().await,
        None => std::future::pending().await,
    }
}

impl<W> Driver for TermDriver<W>
where
    W: Write + Send,
{
    type Error = TermError;

    async fn next_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }

        tokio::select! {
            line = self.lines.recv() => {
                Ok(line.map(|line| self.input.intent(&line).into()))
            }

            event = recv_transport(&mut self.connection) => {
                Ok(Some(self.transport_event(event)))
            }

            () = self.shutdown.notified() => {
                tracing::debug!("shutdown requested");
                Ok(Some(Intent::Unload.into()))
            }
        }
    }

    async fn register(&mut self, nickname: &str) -> Result<User, RegistrationError> {
        self.registrar.register(nickname).await
    }

    async fn dial(&mut self, address: &str) -> Result<(), Self::Error> {
        let connection = transport::connect(address).await?;
        self.connection = Some(connection);
        Ok(())
    }

    async fn send_text(&mut self, text: String) -> Result<(), Self::Error> {
        match &self.connection {
            Some(connection) => Ok(connection.send_text(text).await?),
            None => Err(TransportError::Closed.into()),
        }
    }

    async fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close().await;
        }
    }

    fn render(&mut self, render: &Render) -> Result<(), Self::Error> {
        if let Render::ChatOpened { .. } = render {
            self.input.chat_opened();
        }

        for line in view::lines(render, &Local) {
            writeln!(self.output, "{line}")?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(ref connection) = self.connection {
            connection.stop();
        }
    }
}
