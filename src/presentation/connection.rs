use crate::application::services::{DeleteState, LoadState, StoreSnapshot};
use crate::model::connection::Connection;
use crate::model::ids::ConnectionId;
use prettytable::format;
use prettytable::{Cell, Row, Table};
use std::collections::HashSet;

/// Shown in place of the connections when no bank is linked
pub const CONNECT_PROMPT: &str = "Connect a bank account to view your financial data.";
/// Shown when the user has no connections
pub const EMPTY_MESSAGE: &str = "No bank connections found.";
/// Shown while the first load is running
pub const LOADING_MESSAGE: &str = "Loading connections...";

/// Text rendering of the connection list
///
/// Tracks which connections are expanded to show their accounts; everything
/// else is read from a [`StoreSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionsView {
    expanded: HashSet<ConnectionId>,
}

impl ConnectionsView {
    /// Creates a view with every connection collapsed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands a collapsed connection or collapses an expanded one
    ///
    /// Returns whether the connection is expanded afterwards.
    pub fn toggle_expanded(&mut self, connection_id: &ConnectionId) -> bool {
        if self.expanded.remove(connection_id) {
            false
        } else {
            self.expanded.insert(connection_id.clone());
            true
        }
    }

    /// Whether the accounts of `connection_id` are shown
    #[must_use]
    pub fn is_expanded(&self, connection_id: &ConnectionId) -> bool {
        self.expanded.contains(connection_id)
    }

    /// Forgets expanded connections that are no longer in `connections`
    pub fn retain_present(&mut self, connections: &[Connection]) {
        self.expanded
            .retain(|id| connections.iter().any(|connection| &connection.id == id));
    }

    /// Builds the connection table
    ///
    /// One row per connection with its account count, followed by one row
    /// per account when the connection is expanded.
    #[must_use]
    pub fn table(&self, connections: &[Connection]) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(Row::new(vec![
            Cell::new("INSTITUTION"),
            Cell::new("ACCOUNTS"),
            Cell::new("ACCOUNT"),
            Cell::new("TYPE"),
            Cell::new("BALANCE"),
        ]));

        for connection in connections {
            let expanded = self.is_expanded(&connection.id);
            let marker = if expanded { "-" } else { "+" };
            table.add_row(Row::new(vec![
                Cell::new(&format!("{marker} {}", connection.institution_label())),
                Cell::new(&connection.account_count().to_string()),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
            ]));

            if !expanded {
                continue;
            }
            for account in &connection.accounts {
                table.add_row(Row::new(vec![
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(account.display_name()),
                    Cell::new(&account.type_label()),
                    Cell::new(&account.balance_label()).style_spec("r"),
                ]));
            }
        }
        table
    }

    /// Renders the snapshot as text
    ///
    /// `connected` is the connected flag of the refresh signal; while it is
    /// off only the connect prompt is shown.
    #[must_use]
    pub fn render(&self, snapshot: &StoreSnapshot, connected: bool) -> String {
        if !connected {
            return CONNECT_PROMPT.to_string();
        }

        let mut lines = Vec::new();
        if let Some(message) = &snapshot.error {
            lines.push(format!("Error: {message}"));
        }

        if let DeleteState::PendingConfirmation(id) | DeleteState::Deleting(id) = &snapshot.delete {
            let institution = snapshot
                .connections
                .iter()
                .find(|connection| &connection.id == id)
                .map_or("this connection", Connection::institution_label);
            if matches!(snapshot.delete, DeleteState::Deleting(_)) {
                lines.push(format!("Deleting {institution}..."));
            } else {
                lines.push(format!(
                    "Delete {institution}? Its accounts will no longer be synced."
                ));
            }
        }

        if let Some(edit) = &snapshot.edit {
            let status = if edit.saving { " (saving)" } else { "" };
            lines.push(format!(
                "Nickname for {}: {}{status}",
                edit.account.account_id, edit.input
            ));
        }

        if snapshot.has_connections() {
            lines.push(self.table(&snapshot.connections).to_string());
        } else {
            match snapshot.load_state {
                LoadState::Idle | LoadState::Loading => lines.push(LOADING_MESSAGE.to_string()),
                LoadState::Loaded => lines.push(EMPTY_MESSAGE.to_string()),
                LoadState::Error(_) => {}
            }
        }

        lines.join("\n")
    }
}
