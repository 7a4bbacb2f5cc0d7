//! Huddle wire protocol.
//!
//! Text frames exchanged over the persistent duplex connection are JSON
//! documents. The server pushes two kinds of frames: a roster snapshot (a bare
//! array of users) and chat messages (objects discriminated by
//! `"type": "send"`). The client pushes chat messages and a final
//! `"type": "exit"` presence notice.
//!
//! The codec is pure: [`decode`] classifies raw text into a tagged
//! [`Inbound`] value and never fails, [`encode`] turns a typed [`Command`]
//! into frame text.
//!
//! # Components
//!
//! - [`User`], [`UserId`]: identity issued by the registration endpoint
//! - [`Inbound`], [`ChatMessage`], [`MalformedFrame`]: decode results
//! - [`Command`]: outbound frames
//! - [`RegisterRequest`], [`RegisterResponse`]: registration call bodies

#![forbid(unsafe_code)]

pub mod errors;
mod frame;
mod registration;
mod user;

pub use errors::ProtocolError;
pub use frame::{ChatMessage, Command, Inbound, MalformedFrame, MalformedKind, decode, encode};
pub use registration::{RegisterRequest, RegisterResponse};
pub use user::{FloatId, User, UserId};
