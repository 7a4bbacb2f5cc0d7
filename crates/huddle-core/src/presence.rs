//! Online roster reconciliation.
//!
//! The server pushes the full set of online users on every change. Each
//! snapshot replaces the previous roster outright; there is no diffing.
//!
//! # Invariants
//!
//! - The local user, when known, is always the first entry.
//! - The local user appears at most once, wherever the server placed it.
//! - Other users keep the order in which the server sent them.
//! - An empty snapshot is [`RosterView::NobodyOnline`], never an empty list.

use chrono::{DateTime, Utc};
use huddle_proto::User;

/// Label rendered for an empty snapshot.
pub const NOBODY_ONLINE_LABEL: &str = "No one else online";

/// One line of the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// The online user.
    pub user: User,
    /// Whether this entry is the local session user.
    pub is_local: bool,
}

impl RosterEntry {
    /// Display label: `You (<name>)` for the local user, the nickname
    /// otherwise.
    pub fn label(&self) -> String {
        if self.is_local { format!("You ({})", self.user.name) } else { self.user.name.clone() }
    }
}

/// Reconciled roster, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterView {
    /// The server reported nobody online.
    NobodyOnline {
        /// When the snapshot was applied.
        updated_at: DateTime<Utc>,
    },
    /// At least one entry to show.
    Online {
        /// Entries in display order, local user first.
        entries: Vec<RosterEntry>,
        /// When the snapshot was applied.
        updated_at: DateTime<Utc>,
    },
}

impl RosterView {
    /// Display labels in order.
    pub fn labels(&self) -> Vec<String> {
        match self {
            Self::NobodyOnline { .. } => vec![NOBODY_ONLINE_LABEL.to_owned()],
            Self::Online { entries, .. } => entries.iter().map(RosterEntry::label).collect(),
        }
    }

    /// Entries in display order. Empty for [`RosterView::NobodyOnline`].
    pub fn entries(&self) -> &[RosterEntry] {
        match self {
            Self::NobodyOnline { .. } => &[],
            Self::Online { entries, .. } => entries,
        }
    }

    /// When the snapshot behind this view was applied.
    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::NobodyOnline { updated_at } | Self::Online { updated_at, .. } => *updated_at,
        }
    }
}

/// Maintains the roster view from snapshot pushes.
#[derive(Debug, Clone, Default)]
pub struct PresenceReconciler {
    /// Latest view. `None` until the first snapshot.
    view: Option<RosterView>,
}

impl PresenceReconciler {
    /// Create a reconciler with no roster yet.
    pub fn new() -> Self {
        Self { view: None }
    }

    /// Latest view. `None` until the first snapshot has been applied.
    pub fn view(&self) -> Option<&RosterView> {
        self.view.as_ref()
    }

    /// Replace the roster with `snapshot`.
    ///
    /// The local user is placed first and any snapshot entry with the same id
    /// is dropped, so it is never listed twice.
    pub fn apply(
        &mut self,
        snapshot: Vec<User>,
        local: Option<&User>,
        now: DateTime<Utc>,
    ) -> &RosterView {
        let view = if snapshot.is_empty() {
            RosterView::NobodyOnline { updated_at: now }
        } else {
            let mut entries = Vec::with_capacity(snapshot.len() + 1);
            if let Some(local) = local {
                entries.push(RosterEntry { user: local.clone(), is_local: true });
            }
            entries.extend(
                snapshot
                    .into_iter()
                    .filter(|user| local.is_none_or(|local| local.id != user.id))
                    .map(|user| RosterEntry { user, is_local: false }),
            );
            RosterView::Online { entries, updated_at: now }
        };

        tracing::debug!(online = view.entries().len(), "roster replaced");
        self.view.insert(view)
    }
}
