/// Bearer token and session context
pub mod auth;
/// REST client implementing the service interfaces
pub mod client;
/// Application configuration module
pub mod config;
/// Module containing service interfaces and traits
pub mod interfaces;
/// Rate limiter module for API request throttling
pub mod rate_limiter;
/// Connection store, refresh signal and link flow
pub mod services;
