/// Default base URL of the finance backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Default timeout in seconds for REST API requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default maximum number of requests allowed per rate limit period
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 60;
/// Default rate limit period in seconds
pub const DEFAULT_RATE_LIMIT_PERIOD_SECONDS: u64 = 60;
/// Default number of requests that can be made at once
pub const DEFAULT_RATE_LIMIT_BURST_SIZE: u32 = 10;
/// Environment variable holding the bearer token read by `SessionContext::from_env`
pub const TOKEN_ENV_VAR: &str = "FINANCE_API_TOKEN";
/// User agent string used in HTTP requests to identify this client to the backend
pub const USER_AGENT: &str = "finance-client/0.1.0";
/// Header carrying a per-request correlation identifier
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Label shown for a connection whose institution name is unknown
pub const UNKNOWN_INSTITUTION: &str = "Unknown Institution";
/// Label shown for an account the backend sent without a name
pub const UNNAMED_ACCOUNT: &str = "Unnamed account";
/// Currency assumed when the backend omits one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Value sent as `user_id` in Plaid requests; the backend resolves the real
/// user from the bearer token
pub const CURRENT_USER_PLACEHOLDER: &str = "current_user";

/// Path resolving the bearer credential into the backend user identifier
pub const USER_ID_PATH: &str = "user/id";
/// Path creating a Plaid Link token
pub const CREATE_LINK_TOKEN_PATH: &str = "plaid/create_link_token";
/// Path exchanging a Plaid public token
pub const EXCHANGE_PUBLIC_TOKEN_PATH: &str = "plaid/exchange_public_token";
/// Path triggering the first sync of a freshly linked item
pub const SYNC_ITEM_PATH: &str = "plaid/sync_item";
