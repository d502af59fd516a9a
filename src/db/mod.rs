pub mod connection;
pub mod error;
pub mod query;

pub use connection::*;
pub use error::*;
pub use query::*;
