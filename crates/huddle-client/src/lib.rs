//! Network I/O for the Huddle chat client.
//!
//! Thin async layers around the pure state machines in `huddle-core`:
//!
//! - [`transport`]: one WebSocket connection bridged to channels of text
//!   frames
//! - [`HttpRegistrar`]: nickname registration over HTTP
//!
//! Neither layer interprets frames; decoding and lifecycle decisions stay
//! in the Sans-IO core.

#![forbid(unsafe_code)]

mod registration;
pub mod transport;

pub use registration::{HttpRegistrar, REGISTER_PATH};
pub use transport::{ConnectedTransport, TransportError, TransportEvent};
