//! Credential context passed into every remote operation
//!
//! Token issuance and refresh happen outside this crate (Auth0 or Azure AD).
//! The client only carries the bearer credential it is given, together with
//! the backend user id once it has been resolved.

use crate::constants::TOKEN_ENV_VAR;
use crate::error::AppError;
use crate::model::ids::UserId;
use crate::utils::config::env_value;
use std::fmt;

/// Opaque bearer credential
///
/// `Debug` and `Display` never print the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a bearer credential, rejecting empty values
    pub fn new(token: impl Into<String>) -> Result<Self, AppError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidInput(
                "bearer token must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the raw credential
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header for this credential
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Credential and identity for one caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Bearer credential sent with every call
    pub token: BearerToken,
    /// Backend user id, when already known
    pub user_id: Option<UserId>,
}

impl SessionContext {
    /// Creates a context from a raw bearer credential
    ///
    /// The user id is left unresolved; the store resolves it on each load.
    pub fn new(token: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            token: BearerToken::new(token)?,
            user_id: None,
        })
    }

    /// Creates a context from the token in `FINANCE_API_TOKEN`
    ///
    /// A `FINANCE_USER_ID` value, when present, pins the user id so loads
    /// skip the identity lookup.
    pub fn from_env() -> Result<Self, AppError> {
        let token = env_value(TOKEN_ENV_VAR)
            .ok_or_else(|| AppError::InvalidInput(format!("{TOKEN_ENV_VAR} is not set")))?;
        let ctx = Self::new(token)?;
        Ok(match env_value("FINANCE_USER_ID") {
            Some(user_id) => ctx.with_user_id(UserId::from(user_id)),
            None => ctx,
        })
    }

    /// Returns a copy of this context pinned to `user_id`
    #[must_use]
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}
