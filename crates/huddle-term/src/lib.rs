//! Terminal frontend for Huddle chat.
//!
//! Reads one line per intent from an input stream and prints one line per
//! view update. The first line is the nickname; after that every line is a
//! message, and `/quit` leaves.

#![forbid(unsafe_code)]

pub mod input;
pub mod terminal;
pub mod view;

pub use input::{LineInput, QUIT_COMMAND, spawn_line_reader};
pub use terminal::{TermDriver, TermError};
