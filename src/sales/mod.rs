mod generator;
mod model;
mod output;

pub use generator::*;
pub use model::*;
pub use output::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod sales_tests;
