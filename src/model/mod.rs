/// Connection and account models, and local reconciliation
pub mod connection;
/// HTTP transport with rate limiting
pub mod http;
/// Identifier newtypes
pub mod ids;
/// Request models for API calls
pub mod requests;
/// Response models from API calls
pub mod responses;
