//! Application layer for Huddle
//!
//! Pure session controller and generic runtime for the chat client, so the
//! whole register/connect/chat/exit flow can be driven in tests with the same
//! code that runs against real sockets.
//!
//! # Components
//!
//! - [`SessionController`]: session state machine (intents in, actions out)
//! - [`Session`]: the registered user plus their connection, roster and
//!   transcript
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]

mod action;
mod config;
mod controller;
mod driver;
mod event;
mod render;
mod runtime;
mod state;

pub use action::AppAction;
pub use config::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_SERVER_ADDR};
pub use controller::SessionController;
pub use driver::Driver;
pub use event::{AppEvent, Intent};
pub use render::Render;
pub use runtime::Runtime;
pub use state::Session;
