/// Account service interface
pub mod account;
/// Plaid Link service interface
pub mod link;
