//! Refresh signal shared between the link flow and the connection store

use serde::Serialize;
use tokio::sync::watch;

/// Value carried by the refresh signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshState {
    /// Incremented every time connections should be reloaded
    pub counter: u64,
    /// Whether the user has at least one linked bank
    pub connected: bool,
}

impl RefreshState {
    /// Whether moving from `previous` to `self` calls for a reload
    ///
    /// Any counter change does, and so does the connected flag turning on.
    #[must_use]
    pub fn requires_reload(&self, previous: &RefreshState) -> bool {
        self.counter != previous.counter || (self.connected && !previous.connected)
    }
}

/// Sender side of the refresh signal
#[derive(Debug)]
pub struct RefreshSignal {
    sender: watch::Sender<RefreshState>,
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new(false)
    }
}

impl RefreshSignal {
    /// Creates a signal with the counter at zero
    #[must_use]
    pub fn new(connected: bool) -> Self {
        let (sender, _) = watch::channel(RefreshState {
            counter: 0,
            connected,
        });
        Self { sender }
    }

    /// Subscribes to changes of the signal
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.sender.subscribe()
    }

    /// Current value of the signal
    #[must_use]
    pub fn current(&self) -> RefreshState {
        *self.sender.borrow()
    }

    /// Increments the counter, returning the new value
    pub fn bump(&self) -> u64 {
        let mut counter = 0;
        self.sender.send_modify(|state| {
            state.counter = state.counter.wrapping_add(1);
            counter = state.counter;
        });
        counter
    }

    /// Sets the connected flag; subscribers are only woken when it changes
    pub fn set_connected(&self, connected: bool) {
        self.sender.send_if_modified(|state| {
            if state.connected == connected {
                return false;
            }
            state.connected = connected;
            true
        });
    }
}
