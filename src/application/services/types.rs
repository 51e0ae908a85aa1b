use crate::error::AppError;
use crate::model::connection::{AccountRef, Connection};
use crate::model::ids::ConnectionId;
use chrono::{DateTime, Utc};
use pretty_simple_display::DisplaySimple;
use serde::Serialize;

/// Top-level fetch status of the connection store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// The last applied load succeeded
    Loaded,
    /// The last applied load failed
    Error(String),
}

impl LoadState {
    /// Whether a load is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Nickname edit in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditState {
    /// Account being edited
    pub account: AccountRef,
    /// Text typed so far
    pub input: String,
    /// Whether the nickname is being saved
    pub saving: bool,
    /// Distinguishes successive edits of the same account
    #[serde(skip)]
    pub(crate) serial: u64,
}

/// Progress of a connection deletion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "connection_id", rename_all = "snake_case")]
pub enum DeleteState {
    /// No deletion requested
    #[default]
    Idle,
    /// Waiting for the user to confirm deleting this connection
    PendingConfirmation(ConnectionId),
    /// Deletion confirmed and sent
    Deleting(ConnectionId),
}

/// Result of a load
#[derive(Debug)]
pub enum LoadOutcome {
    /// The response was applied
    Loaded {
        /// Number of connections now held
        connections: usize,
    },
    /// The load failed; the previous connections are kept
    Failed(AppError),
    /// A newer load was issued while this one was in flight; its result was discarded
    Superseded,
    /// The store was released
    Released,
}

impl LoadOutcome {
    /// Whether the response was applied
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Result of confirming a deletion
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The connection was deleted and a reload was run
    Deleted {
        /// Outcome of the reload that followed
        reload: LoadOutcome,
    },
    /// The remote delete failed; the connections are unchanged
    Failed(AppError),
    /// There was no pending deletion to confirm
    NothingPending,
    /// The store was released
    Released,
}

/// Result of a nickname update
#[derive(Debug)]
pub enum NicknameOutcome {
    /// The nickname was saved and applied locally
    Updated {
        /// Number of local account entries that were rewritten
        reconciled: usize,
    },
    /// The remote update failed; local state is unchanged
    Failed(AppError),
    /// The request was not sent (no edit open, or a save already running)
    Rejected(AppError),
    /// The store was released
    Released,
}

impl NicknameOutcome {
    /// Whether the nickname was saved
    #[must_use]
    pub fn is_updated(&self) -> bool {
        matches!(self, NicknameOutcome::Updated { .. })
    }
}

/// Point-in-time copy of the store, for rendering
#[derive(Debug, Clone, Default, PartialEq, DisplaySimple, Serialize)]
pub struct StoreSnapshot {
    /// Connections in server order
    pub connections: Vec<Connection>,
    /// Fetch status
    pub load_state: LoadState,
    /// Message of the last failure, if not dismissed
    pub error: Option<String>,
    /// Nickname edit in progress
    pub edit: Option<EditState>,
    /// Deletion progress
    pub delete: DeleteState,
    /// When the current connections were loaded
    pub loaded_at: Option<DateTime<Utc>>,
}

impl StoreSnapshot {
    /// Whether any connection is held
    #[must_use]
    pub fn has_connections(&self) -> bool {
        !self.connections.is_empty()
    }
}
