//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use huddle_core::RegistrationError;
use huddle_proto::User;

use crate::{AppEvent, Render};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal client and in tests.
///
/// # Implementations
///
/// - **Terminal**: stdin lines for intents, WebSocket transport, HTTP
///   registration
/// - **Tests**: scripted events and recorded side effects
///
/// # Event sources
///
/// [`next_event`](Driver::next_event) multiplexes user intents with transport
/// notifications ([`AppEvent::FrameReceived`], [`AppEvent::TransportClosed`],
/// [`AppEvent::TransportFailed`]). Results of calls the runtime makes itself
/// (registration, dial, send) are reported through return values instead.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input event.
    ///
    /// Returns `None` once no further input will arrive; the runtime treats
    /// that as an unload.
    fn next_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Register `nickname` with the server.
    fn register(
        &mut self,
        nickname: &str,
    ) -> impl Future<Output = Result<User, RegistrationError>> + Send;

    /// Open the duplex connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    fn dial(&mut self, address: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Write one text frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is gone or the write fails.
    fn send_text(&mut self, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Close the connection. Completes once the transport is released.
    fn close(&mut self) -> impl Future<Output = ()> + Send;

    /// Display a view update.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, render: &Render) -> Result<(), Self::Error>;

    /// Release all resources.
    fn stop(&mut self);
}
