/// Module containing the connection store
pub mod connection_store;
/// Module containing the Plaid Link flow
pub mod link_flow;
/// Module containing the refresh signal
pub mod refresh;
/// Module containing common types used by services
mod types;

pub use connection_store::*;
pub use link_flow::*;
pub use refresh::*;
pub use types::*;
