use crate::application::auth::BearerToken;
use crate::error::AppError;
use crate::model::connection::Connection;
use crate::model::ids::{AccountRecordId, ConnectionId, UserId};
use async_trait::async_trait;

/// Interface for the remote account service
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Resolves the bearer credential into the backend user id
    async fn get_user_id(&self, token: &BearerToken) -> Result<UserId, AppError>;

    /// Gets the connections, with nested accounts, of a user
    async fn get_connections(
        &self,
        token: &BearerToken,
        user_id: &UserId,
    ) -> Result<Vec<Connection>, AppError>;

    /// Deletes a connection
    async fn delete_connection(
        &self,
        token: &BearerToken,
        connection_id: &ConnectionId,
    ) -> Result<(), AppError>;

    /// Sets the nickname of an account
    ///
    /// # Arguments
    /// * `account_id` - Backend record id of the account (not the Plaid account id)
    /// * `nickname` - New nickname; an empty string clears it
    async fn update_account_nickname(
        &self,
        token: &BearerToken,
        account_id: &AccountRecordId,
        nickname: &str,
    ) -> Result<(), AppError>;
}

/// Receives "connections present" notifications from the store
pub trait PresenceObserver: Send + Sync {
    /// Called after every successful load with whether any connection exists
    fn connections_present(&self, present: bool);
}

impl<F> PresenceObserver for F
where
    F: Fn(bool) + Send + Sync,
{
    fn connections_present(&self, present: bool) {
        self(present)
    }
}
