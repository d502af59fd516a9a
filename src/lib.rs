pub mod app;
pub mod cli;
pub mod db;
pub mod error;
pub mod sales;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::App;
pub use error::ScriptError;
