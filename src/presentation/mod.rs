/// Text rendering of connections and store status
pub mod connection;

pub use connection::*;
