pub mod config;
pub mod credential_store;
pub mod logging;

pub use config::*;
pub use logging::init_logging;
