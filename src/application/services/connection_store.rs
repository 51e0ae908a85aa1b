//! Connection store
//!
//! Keeps a local, eventually consistent copy of the user's bank connections
//! and reconciles local edits against the backend.
//!
//! Rules the store enforces:
//!
//! * Loads are stamped with a generation number when issued. A load applies
//!   its result only if no other load was issued after it, so overlapping
//!   loads resolve to the most recently *issued* one, whatever order their
//!   responses arrive in.
//! * A failed load keeps the previous connections visible.
//! * Deleting goes through an explicit confirmation step and is followed by a
//!   full reload.
//! * A successful nickname update is applied locally to every account with the
//!   same Plaid `account_id`, without a reload. A failed one leaves the edit
//!   open with the typed text intact.
//! * Errors never escape: each operation returns an outcome and records its
//!   failure in a single error slot (last error wins).
//! * After [`ConnectionStore::release`] late responses are dropped and new
//!   operations are refused.

use crate::application::auth::SessionContext;
use crate::application::interfaces::account::{AccountService, PresenceObserver};
use crate::application::services::refresh::RefreshState;
use crate::application::services::types::{
    DeleteOutcome, DeleteState, EditState, LoadOutcome, LoadState, NicknameOutcome,
    StoreSnapshot,
};
use crate::error::AppError;
use crate::model::connection::{Account, AccountRef, Connection, reconcile_nickname};
use crate::model::ids::ConnectionId;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Default)]
struct StoreState {
    connections: Vec<Connection>,
    load_state: LoadState,
    error: Option<String>,
    edit: Option<EditState>,
    delete: DeleteState,
    loaded_at: Option<DateTime<Utc>>,
}

/// View-model holding the user's connections in sync with the backend
pub struct ConnectionStore {
    service: Arc<dyn AccountService>,
    observer: Option<Arc<dyn PresenceObserver>>,
    state: RwLock<StoreState>,
    generation: AtomicU64,
    edit_serial: AtomicU64,
    released: watch::Sender<bool>,
}

impl ConnectionStore {
    /// Creates an empty store backed by `service`
    pub fn new(service: Arc<dyn AccountService>) -> Self {
        let (released, _) = watch::channel(false);
        Self {
            service,
            observer: None,
            state: RwLock::new(StoreState::default()),
            generation: AtomicU64::new(0),
            edit_serial: AtomicU64::new(0),
            released,
        }
    }

    /// Registers the observer told whether connections are present after each load
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PresenceObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Returns a copy of the whole store state
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            connections: state.connections.clone(),
            load_state: state.load_state.clone(),
            error: state.error.clone(),
            edit: state.edit.clone(),
            delete: state.delete.clone(),
            loaded_at: state.loaded_at,
        }
    }

    /// Returns a copy of the connections
    pub async fn connections(&self) -> Vec<Connection> {
        self.state.read().await.connections.clone()
    }

    /// Returns the fetch status
    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load_state.clone()
    }

    /// Returns the message in the error slot
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Dismisses the error message
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Whether [`ConnectionStore::release`] has been called
    #[must_use]
    pub fn is_released(&self) -> bool {
        *self.released.borrow()
    }

    /// Releases the store
    ///
    /// In-flight operations complete on the network but their results are
    /// discarded, refresh listeners stop, and later calls return `Released`.
    pub fn release(&self) {
        if self.released.send_replace(true) {
            return;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        info!("Connection store released");
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.is_released() && self.generation.load(Ordering::SeqCst) == generation
    }

    /// Reloads the connections from the backend
    ///
    /// Resolves the user id first unless `ctx` already carries one. On success
    /// the local connections are replaced by the response as is; on failure
    /// they are kept and the error slot is set. Results of loads overtaken by
    /// a newer load are discarded.
    pub async fn load(&self, ctx: &SessionContext) -> LoadOutcome {
        if self.is_released() {
            return LoadOutcome::Released;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Loading connections (generation {})", generation);
        {
            let mut state = self.state.write().await;
            if self.is_current(generation) {
                state.load_state = LoadState::Loading;
                state.error = None;
            }
        }

        let result = self.fetch(ctx).await;

        let mut state = self.state.write().await;
        if self.is_released() {
            debug!("Dropping load result of released store");
            return LoadOutcome::Released;
        }
        if !self.is_current(generation) {
            debug!("Discarding result of superseded load (generation {})", generation);
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(connections) => {
                let count = connections.len();
                state.connections = connections;
                state.load_state = LoadState::Loaded;
                state.loaded_at = Some(Utc::now());
                drop(state);

                info!("Loaded {} connections", count);
                self.notify_presence(count > 0);
                LoadOutcome::Loaded { connections: count }
            }
            Err(err) => {
                let message = format!("Failed to fetch connections: {err}");
                warn!("{}", message);
                state.load_state = LoadState::Error(message.clone());
                state.error = Some(message);
                LoadOutcome::Failed(err)
            }
        }
    }

    async fn fetch(&self, ctx: &SessionContext) -> Result<Vec<Connection>, AppError> {
        let user_id = match &ctx.user_id {
            Some(user_id) => user_id.clone(),
            None => self
                .service
                .get_user_id(&ctx.token)
                .await
                .map_err(AppError::into_identity)?,
        };
        self.service.get_connections(&ctx.token, &user_id).await
    }

    fn notify_presence(&self, present: bool) {
        if let Some(observer) = &self.observer {
            observer.connections_present(present);
        }
    }

    /// Asks for confirmation before deleting `connection_id`
    ///
    /// Replaces any deletion still waiting for confirmation.
    pub async fn request_delete(&self, connection_id: ConnectionId) {
        if self.is_released() {
            return;
        }
        debug!("Delete of connection {} awaiting confirmation", connection_id);
        self.state.write().await.delete = DeleteState::PendingConfirmation(connection_id);
    }

    /// Drops the pending deletion; returns whether one was pending
    pub async fn cancel_delete(&self) -> bool {
        let mut state = self.state.write().await;
        if matches!(state.delete, DeleteState::PendingConfirmation(_)) {
            state.delete = DeleteState::Idle;
            return true;
        }
        false
    }

    /// Deletes the connection waiting for confirmation, then reloads
    ///
    /// Nothing is sent when no deletion is pending. On failure the error slot
    /// is set and the connections are left as they were.
    pub async fn confirm_delete(&self, ctx: &SessionContext) -> DeleteOutcome {
        if self.is_released() {
            return DeleteOutcome::Released;
        }

        let connection_id = {
            let mut state = self.state.write().await;
            match std::mem::take(&mut state.delete) {
                DeleteState::PendingConfirmation(connection_id) => {
                    state.delete = DeleteState::Deleting(connection_id.clone());
                    connection_id
                }
                other => {
                    state.delete = other;
                    return DeleteOutcome::NothingPending;
                }
            }
        };

        info!("Deleting connection {}", connection_id);
        let result = self
            .service
            .delete_connection(&ctx.token, &connection_id)
            .await;

        {
            let mut state = self.state.write().await;
            if self.is_released() {
                return DeleteOutcome::Released;
            }
            if state.delete == DeleteState::Deleting(connection_id.clone()) {
                state.delete = DeleteState::Idle;
            }
            if let Err(err) = result {
                let message = format!("Failed to delete connection: {err}");
                warn!("{}", message);
                state.error = Some(message);
                return DeleteOutcome::Failed(err);
            }
        }

        let reload = self.load(ctx).await;
        DeleteOutcome::Deleted { reload }
    }

    /// Sets the nickname of an account and applies it locally
    ///
    /// The remote call targets `account.id`; on success every local account
    /// whose `account_id` equals `account.account_id` takes the new nickname.
    /// An empty nickname is valid and clears the override.
    pub async fn update_nickname(
        &self,
        ctx: &SessionContext,
        account: &AccountRef,
        nickname: &str,
    ) -> NicknameOutcome {
        if self.is_released() {
            return NicknameOutcome::Released;
        }

        let result = self
            .service
            .update_account_nickname(&ctx.token, &account.id, nickname)
            .await;

        let mut state = self.state.write().await;
        if self.is_released() {
            debug!("Dropping nickname result of released store");
            return NicknameOutcome::Released;
        }

        match result {
            Ok(()) => {
                let reconciled =
                    reconcile_nickname(&mut state.connections, &account.account_id, nickname);
                debug!(
                    "Nickname of {} applied to {} local accounts",
                    account.account_id, reconciled
                );
                NicknameOutcome::Updated { reconciled }
            }
            Err(err) => {
                let message = format!("Failed to update nickname: {err}");
                warn!("{}", message);
                state.error = Some(message);
                NicknameOutcome::Failed(err)
            }
        }
    }

    /// Opens the nickname editor for `account`
    ///
    /// Any other edit, saved or not, is abandoned.
    pub async fn begin_edit(&self, account: &Account) {
        let serial = self.edit_serial.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write().await;
        if let Some(previous) = &state.edit {
            debug!("Abandoning nickname edit of {}", previous.account.account_id);
        }
        state.edit = Some(EditState {
            account: account.to_ref(),
            input: account.nickname.clone().unwrap_or_default(),
            saving: false,
            serial,
        });
    }

    /// Replaces the text of the open edit; returns whether an edit was open
    pub async fn set_edit_input(&self, input: impl Into<String>) -> bool {
        let mut state = self.state.write().await;
        match state.edit.as_mut() {
            Some(edit) => {
                edit.input = input.into();
                true
            }
            None => false,
        }
    }

    /// Closes the editor without saving
    ///
    /// Returns false, leaving the edit open, while a save is running.
    pub async fn cancel_edit(&self) -> bool {
        let mut state = self.state.write().await;
        match &state.edit {
            Some(edit) if edit.saving => false,
            Some(_) => {
                state.edit = None;
                true
            }
            None => false,
        }
    }

    /// Saves the text of the open edit as the account nickname
    ///
    /// Closes the editor on success. On failure the editor stays open with
    /// the typed text and `saving` reset.
    pub async fn save_edit(&self, ctx: &SessionContext) -> NicknameOutcome {
        if self.is_released() {
            return NicknameOutcome::Released;
        }

        let (account, input, serial) = {
            let mut state = self.state.write().await;
            let Some(edit) = state.edit.as_mut() else {
                return NicknameOutcome::Rejected(AppError::InvalidState(
                    "no nickname edit in progress".to_string(),
                ));
            };
            if edit.saving {
                return NicknameOutcome::Rejected(AppError::InvalidState(
                    "nickname save already in progress".to_string(),
                ));
            }
            edit.saving = true;
            (edit.account.clone(), edit.input.clone(), edit.serial)
        };

        let outcome = self.update_nickname(ctx, &account, &input).await;

        let mut state = self.state.write().await;
        let same_edit = state
            .edit
            .as_ref()
            .is_some_and(|edit| edit.serial == serial);
        if same_edit {
            if outcome.is_updated() {
                state.edit = None;
            } else if let Some(edit) = state.edit.as_mut() {
                edit.saving = false;
            }
        }
        outcome
    }

    /// Reloads whenever the refresh signal asks for it
    ///
    /// A reload runs when the counter changes or the connected flag turns on.
    /// Returns when the store is released or the signal's sender is dropped.
    pub async fn watch_refresh(
        self: Arc<Self>,
        ctx: SessionContext,
        mut refresh: watch::Receiver<RefreshState>,
    ) {
        let last = *refresh.borrow_and_update();
        self.follow_refresh(ctx, refresh, last).await;
    }

    /// Loads once and then follows the refresh signal on a background task
    ///
    /// Signal changes made while the first load runs trigger another load.
    pub fn attach(
        self: &Arc<Self>,
        ctx: SessionContext,
        mut refresh: watch::Receiver<RefreshState>,
    ) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let last = *refresh.borrow_and_update();
        tokio::spawn(async move {
            let outcome = store.load(&ctx).await;
            debug!("Initial load finished: {:?}", outcome);
            store.follow_refresh(ctx, refresh, last).await;
        })
    }

    async fn follow_refresh(
        self: Arc<Self>,
        ctx: SessionContext,
        mut refresh: watch::Receiver<RefreshState>,
        mut last: RefreshState,
    ) {
        let mut released = self.released.subscribe();

        loop {
            if self.is_released() {
                break;
            }
            tokio::select! {
                changed = refresh.changed() => {
                    if changed.is_err() {
                        debug!("Refresh signal closed");
                        break;
                    }
                }
                changed = released.changed() => {
                    if changed.is_err() || self.is_released() {
                        break;
                    }
                    continue;
                }
            }

            let current = *refresh.borrow_and_update();
            if current.requires_reload(&last) {
                debug!(
                    "Refresh requested (counter {}, connected {})",
                    current.counter, current.connected
                );
                let outcome = self.load(&ctx).await;
                debug!("Refresh load finished: {:?}", outcome);
            }
            last = current;
        }
        debug!("Refresh listener stopped");
    }
}
