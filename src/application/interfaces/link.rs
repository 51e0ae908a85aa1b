use crate::application::auth::BearerToken;
use crate::error::AppError;
use crate::model::responses::ExchangePublicTokenResponse;
use async_trait::async_trait;

/// Interface for the Plaid Link endpoints of the backend
#[async_trait]
pub trait LinkService: Send + Sync {
    /// Creates a Plaid Link token for the authenticated user
    async fn create_link_token(&self, token: &BearerToken) -> Result<String, AppError>;

    /// Exchanges the public token returned by Plaid Link
    async fn exchange_public_token(
        &self,
        token: &BearerToken,
        public_token: &str,
    ) -> Result<ExchangePublicTokenResponse, AppError>;

    /// Pulls the initial data of a freshly linked item
    async fn sync_item(&self, token: &BearerToken, item_id: &str) -> Result<(), AppError>;
}
