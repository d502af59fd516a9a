use std::path::PathBuf;

use thiserror::Error;

use crate::db::DbError;
use crate::utils::ConfigError;

/// Failures that end a script or ETL run. Statement errors that are only
/// warned about never become a `ScriptError`.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("connection failed: {0}")]
    Connection(#[source] DbError),
    /// Unsuppressed database error while running with fail-fast enabled.
    #[error("statement {ordinal} failed: {source}")]
    Statement {
        ordinal: usize,
        #[source]
        source: DbError,
    },
    /// Driver failure without a server error code.
    #[error("statement {ordinal} aborted the run: {source}")]
    Fatal {
        ordinal: usize,
        #[source]
        source: DbError,
    },
    #[error("procedure {name} failed: {source}")]
    Procedure {
        name: String,
        #[source]
        source: DbError,
    },
    #[error("console output failed: {0}")]
    Output(#[from] std::io::Error),
}
