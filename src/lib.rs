//! # finance-client
//!
//! Client library for a personal-finance backend that aggregates bank data
//! through Plaid.
//!
//! The centrepiece is [`ConnectionStore`](application::services::ConnectionStore),
//! a local, eventually consistent copy of the user's bank connections. It
//! loads them from the backend, deletes connections after an explicit
//! confirmation, and saves account nicknames, reconciling each change
//! against its local state without a full reload.
//!
//! ## Layout
//!
//! * [`application`] - configuration, the REST [`Client`](application::client::Client),
//!   service traits, the connection store, the refresh signal and the Plaid
//!   Link flow
//! * [`model`] - wire models, identifier newtypes and the HTTP transport
//! * [`presentation`] - text rendering of the connection list
//! * [`utils`] - environment, logging and request id helpers
//!
//! ## Example
//!
//! ```rust,no_run
//! use finance_client::prelude::*;
//!
//! # async fn run() -> Result<(), AppError> {
//! setup_logger();
//! let client = Arc::new(Client::new(Config::new())?);
//! let signal = Arc::new(RefreshSignal::new(true));
//! let store = Arc::new(ConnectionStore::new(client.clone()));
//! let ctx = SessionContext::new("token")?;
//!
//! let listener = store.attach(ctx.clone(), signal.subscribe());
//! let flow = LinkFlow::new(client, signal.clone());
//! let link_token = flow.create_link_token(&ctx).await?;
//! # let _ = (link_token, listener);
//! # Ok(())
//! # }
//! ```

/// Configuration, client, service interfaces and services
pub mod application;

/// Constants shared across the crate
pub mod constants;

/// Error type
pub mod error;

/// Wire models and HTTP transport
pub mod model;

/// Commonly used types and traits
pub mod prelude;

/// Text rendering
pub mod presentation;

/// Utility helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
