use crate::constants::CURRENT_USER_PLACEHOLDER;
use serde::Serialize;

/// Body of the account nickname update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateNicknameRequest<'a> {
    /// New nickname; an empty string clears the override
    pub nickname: &'a str,
}

/// Body of the Plaid Link token request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTokenRequest<'a> {
    /// Placeholder user id; the backend resolves the user from the bearer token
    pub user_id: &'a str,
}

impl Default for LinkTokenRequest<'_> {
    fn default() -> Self {
        Self {
            user_id: CURRENT_USER_PLACEHOLDER,
        }
    }
}

/// Body of the public token exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangePublicTokenRequest<'a> {
    /// Public token handed out by Plaid Link on success
    pub public_token: &'a str,
    /// Placeholder user id; the backend resolves the user from the bearer token
    pub user_id: &'a str,
}

impl<'a> ExchangePublicTokenRequest<'a> {
    /// Creates an exchange request for `public_token`
    #[must_use]
    pub fn new(public_token: &'a str) -> Self {
        Self {
            public_token,
            user_id: CURRENT_USER_PLACEHOLDER,
        }
    }
}

/// Body of the item sync request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncItemRequest<'a> {
    /// Plaid item to sync
    pub item_id: &'a str,
}
