//! Bank linking through Plaid Link
//!
//! Opening Plaid Link itself is the caller's job. This flow obtains the link
//! token before, and after Plaid hands back a public token it exchanges it,
//! syncs the new item, and raises the refresh signal so the connection store
//! reloads.

use crate::application::auth::SessionContext;
use crate::application::interfaces::link::LinkService;
use crate::application::services::refresh::RefreshSignal;
use crate::error::AppError;
use crate::model::responses::ExchangePublicTokenResponse;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Drives the backend side of Plaid Link
pub struct LinkFlow {
    service: Arc<dyn LinkService>,
    signal: Arc<RefreshSignal>,
}

impl LinkFlow {
    /// Creates a flow that reports completed links on `signal`
    pub fn new(service: Arc<dyn LinkService>, signal: Arc<RefreshSignal>) -> Self {
        Self { service, signal }
    }

    /// Returns the refresh signal raised by this flow
    #[must_use]
    pub fn signal(&self) -> Arc<RefreshSignal> {
        self.signal.clone()
    }

    /// Creates the token used to open Plaid Link
    pub async fn create_link_token(&self, ctx: &SessionContext) -> Result<String, AppError> {
        let link_token = self.service.create_link_token(&ctx.token).await?;
        if link_token.trim().is_empty() {
            return Err(AppError::Deserialization(
                "backend returned an empty link token".to_string(),
            ));
        }
        Ok(link_token)
    }

    /// Finishes a successful Plaid Link session
    ///
    /// Exchanges `public_token`, syncs the resulting item, then bumps the
    /// refresh counter and marks the user as connected.
    ///
    /// Once the exchange succeeds the connection exists on the backend, so
    /// a failed sync is only logged: the signal is still raised and the
    /// exchange result returned. A failed exchange is returned as an error
    /// and leaves the signal untouched.
    pub async fn complete(
        &self,
        ctx: &SessionContext,
        public_token: &str,
    ) -> Result<ExchangePublicTokenResponse, AppError> {
        if public_token.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "public token must not be empty".to_string(),
            ));
        }

        let exchange = self
            .service
            .exchange_public_token(&ctx.token, public_token)
            .await
            .inspect_err(|e| error!("Public token exchange failed: {}", e))?;

        if let Err(e) = self.service.sync_item(&ctx.token, &exchange.item_id).await {
            warn!(
                "Sync of item {} failed, reloading anyway: {}",
                exchange.item_id, e
            );
        }

        let counter = self.signal.bump();
        self.signal.set_connected(true);
        info!(
            "Linked {} (item {}), refresh #{}",
            exchange.institution_name.as_deref().unwrap_or("institution"),
            exchange.item_id,
            counter
        );
        Ok(exchange)
    }
}
