use crate::application::auth::BearerToken;
use crate::application::config::Config;
use crate::application::interfaces::account::AccountService;
use crate::application::interfaces::link::LinkService;
use crate::constants::{
    CREATE_LINK_TOKEN_PATH, EXCHANGE_PUBLIC_TOKEN_PATH, SYNC_ITEM_PATH, USER_ID_PATH,
};
use crate::error::AppError;
use crate::model::connection::Connection;
use crate::model::http::HttpClient;
use crate::model::ids::{AccountRecordId, ConnectionId, UserId};
use crate::model::requests::{
    ExchangePublicTokenRequest, LinkTokenRequest, SyncItemRequest, UpdateNicknameRequest,
};
use crate::model::responses::{
    ConnectionsResponse, ExchangePublicTokenResponse, LinkTokenResponse,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

/// Client for the finance backend REST API
///
/// Implements both [`AccountService`] and [`LinkService`] over one shared
/// [`HttpClient`], so it can be handed to the connection store and to the
/// link flow at the same time.
#[derive(Clone)]
pub struct Client {
    http_client: Arc<HttpClient>,
}

impl Client {
    /// Creates a client from configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        Ok(Self {
            http_client: Arc::new(HttpClient::new(config)?),
        })
    }

    /// Creates a client over an existing HTTP client
    #[must_use]
    pub fn from_http_client(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Returns the underlying HTTP client
    #[must_use]
    pub fn http_client(&self) -> Arc<HttpClient> {
        self.http_client.clone()
    }
}

#[async_trait]
impl AccountService for Client {
    async fn get_user_id(&self, token: &BearerToken) -> Result<UserId, AppError> {
        debug!("Resolving user id");
        let user_id: UserId = self
            .http_client
            .get(USER_ID_PATH, token)
            .await
            .map_err(AppError::into_identity)?;
        debug!("Resolved user id: {}", user_id);
        Ok(user_id)
    }

    async fn get_connections(
        &self,
        token: &BearerToken,
        user_id: &UserId,
    ) -> Result<Vec<Connection>, AppError> {
        let path = format!("accounts/{user_id}/connections");
        info!("Getting connections for user {}", user_id);

        let response: ConnectionsResponse = self.http_client.get(&path, token).await?;
        let connections = response.into_connections();

        debug!("Connections obtained: {} connections", connections.len());
        Ok(connections)
    }

    async fn delete_connection(
        &self,
        token: &BearerToken,
        connection_id: &ConnectionId,
    ) -> Result<(), AppError> {
        let path = format!("plaid/connections/{connection_id}");
        info!("Deleting connection {}", connection_id);

        self.http_client
            .send(Method::DELETE, &path, token, None::<()>)
            .await
    }

    async fn update_account_nickname(
        &self,
        token: &BearerToken,
        account_id: &AccountRecordId,
        nickname: &str,
    ) -> Result<(), AppError> {
        let path = format!("accounts/{account_id}");
        info!("Updating nickname of account {}", account_id);

        self.http_client
            .send(
                Method::PATCH,
                &path,
                token,
                Some(UpdateNicknameRequest { nickname }),
            )
            .await
    }
}

#[async_trait]
impl LinkService for Client {
    async fn create_link_token(&self, token: &BearerToken) -> Result<String, AppError> {
        info!("Creating link token");
        let response: LinkTokenResponse = self
            .http_client
            .post(CREATE_LINK_TOKEN_PATH, token, LinkTokenRequest::default())
            .await?;
        Ok(response.link_token)
    }

    async fn exchange_public_token(
        &self,
        token: &BearerToken,
        public_token: &str,
    ) -> Result<ExchangePublicTokenResponse, AppError> {
        info!("Exchanging public token");
        let response: ExchangePublicTokenResponse = self
            .http_client
            .post(
                EXCHANGE_PUBLIC_TOKEN_PATH,
                token,
                ExchangePublicTokenRequest::new(public_token),
            )
            .await?;
        debug!("Public token exchanged for item {}", response.item_id);
        Ok(response)
    }

    async fn sync_item(&self, token: &BearerToken, item_id: &str) -> Result<(), AppError> {
        info!("Syncing item {}", item_id);
        self.http_client
            .send(
                Method::POST,
                SYNC_ITEM_PATH,
                token,
                Some(SyncItemRequest { item_id }),
            )
            .await
    }
}
