//! Environment abstraction for deterministic testing.
//!
//! Decouples session logic from the system clock. Production uses
//! [`SystemEnv`]; tests supply a fixed or stepping clock so that message
//! timestamps and roster update times are reproducible.

use chrono::{DateTime, Utc};

/// Abstract environment providing wall-clock time.
///
/// # Invariants
///
/// - `now()` never goes backwards within a single session.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Environment backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a system environment.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
