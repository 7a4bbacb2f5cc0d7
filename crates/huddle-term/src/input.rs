//! Line input: a reader thread and the mapping from lines to intents.

use std::{io, io::BufRead, thread};

use huddle_app::Intent;
use tokio::sync::mpsc;

/// Lines buffered between the reader thread and the driver.
const LINE_BUFFER: usize = 32;

/// Line that leaves the chat.
pub const QUIT_COMMAND: &str = "/quit";

/// Maps typed lines to intents.
///
/// Before the chat opens every line is a nickname attempt; afterwards every
/// line is a message.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineInput {
    chatting: bool,
}

impl LineInput {
    /// Create input in the login phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to the chat phase.
    pub fn chat_opened(&mut self) {
        self.chatting = true;
    }

    /// True once the chat has opened.
    pub fn is_chatting(&self) -> bool {
        self.chatting
    }

    /// Intent for one typed line.
    pub fn intent(&self, line: &str) -> Intent {
        if line.trim() == QUIT_COMMAND {
            Intent::Unload
        } else if self.chatting {
            Intent::Send { text: line.to_owned() }
        } else {
            Intent::Login { nickname: line.to_owned() }
        }
    }
}

/// Read lines from `reader` on a dedicated thread.
///
/// Blocking reads such as stdin cannot be cancelled, so they stay off the
/// runtime. The thread ends at end of input, on a read error, or once the
/// receiver is dropped. A closed receiver means end of input.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    thread::Builder::new().name("huddle-input".into()).spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed");
                    break;
                },
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        tracing::debug!("input reader finished");
    })?;
    Ok(rx)
}
