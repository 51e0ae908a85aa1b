use crate::model::connection::Connection;
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};

/// Response of the connection listing
///
/// The backend returns the whole user record; only `plaid_users` matters here.
/// A missing or null list is read as empty.
#[derive(Debug, Clone, Default, PartialEq, DisplaySimple, Serialize, Deserialize)]
pub struct ConnectionsResponse {
    /// Connections of the user, in server order
    #[serde(default)]
    pub plaid_users: Option<Vec<Connection>>,
}

impl ConnectionsResponse {
    /// Consumes the response, returning the connections
    #[must_use]
    pub fn into_connections(self) -> Vec<Connection> {
        self.plaid_users.unwrap_or_default()
    }
}

/// Response of the Plaid Link token creation
#[derive(Debug, Clone, PartialEq, Eq, DisplaySimple, Serialize, Deserialize)]
pub struct LinkTokenResponse {
    /// Token used to open Plaid Link
    pub link_token: String,
}

/// Response of the public token exchange
#[derive(Debug, Clone, PartialEq, Eq, DisplaySimple, Serialize, Deserialize)]
pub struct ExchangePublicTokenResponse {
    /// Backend id of the stored access token (never the token itself)
    pub access_token_id: String,
    /// Plaid item created by the exchange
    pub item_id: String,
    /// Institution name, when Plaid reported one
    #[serde(default)]
    pub institution_name: Option<String>,
}
