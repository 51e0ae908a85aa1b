//! # Prelude
//!
//! Re-exports the types and traits most callers need.
//!
//! ```rust
//! use finance_client::prelude::*;
//!
//! let config = Config::with_base_url("http://localhost:8000");
//! assert_eq!(config.url_for("user/id"), "http://localhost:8000/user/id");
//! ```

// ============================================================================
// CONFIGURATION AND SETUP
// ============================================================================

pub use crate::application::config::{Config, RateLimiterConfig, RestApiConfig};
pub use crate::utils::logger::setup_logger;
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

pub use crate::error::AppError;

// ============================================================================
// AUTHENTICATION
// ============================================================================

pub use crate::application::auth::{BearerToken, SessionContext};

// ============================================================================
// CLIENT AND SERVICES
// ============================================================================

pub use crate::application::client::Client;
pub use crate::application::interfaces::account::{AccountService, PresenceObserver};
pub use crate::application::interfaces::link::LinkService;
pub use crate::application::rate_limiter::RateLimiter;
pub use crate::model::http::HttpClient;

pub use crate::application::services::{
    ConnectionStore, DeleteOutcome, DeleteState, EditState, LinkFlow, LoadOutcome, LoadState,
    NicknameOutcome, RefreshSignal, RefreshState, StoreSnapshot,
};

// ============================================================================
// MODELS
// ============================================================================

pub use crate::model::connection::{Account, AccountRef, Connection, reconcile_nickname};
pub use crate::model::ids::{AccountKey, AccountRecordId, ConnectionId, UserId};
pub use crate::model::responses::{ConnectionsResponse, ExchangePublicTokenResponse};

// ============================================================================
// PRESENTATION
// ============================================================================

pub use crate::presentation::ConnectionsView;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};
