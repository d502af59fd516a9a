use thiserror::Error;

/// ORA-00942: table or view does not exist
pub const ORA_TABLE_NOT_FOUND: i32 = 942;
/// ORA-02289: sequence does not exist
pub const ORA_SEQUENCE_NOT_FOUND: i32 = 2289;

/// Error codes a reset script is allowed to hit when run against a fresh or
/// partially dropped schema.
pub const SUPPRESSED_ERROR_CODES: [i32; 2] = [ORA_TABLE_NOT_FOUND, ORA_SEQUENCE_NOT_FOUND];

#[derive(Debug, Clone, Error)]
pub enum DbError {
    /// The server rejected the call and returned an `ORA-` code.
    #[error("ORA-{code:05}: {message}")]
    Database { code: i32, message: String },
    /// Anything raised by the driver without a server error code.
    #[error("{0}")]
    Driver(String),
    #[error("invalid procedure name `{0}`")]
    InvalidName(String),
}

impl DbError {
    pub fn database(code: i32, message: impl Into<String>) -> Self {
        DbError::Database {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            DbError::Database { code, .. } => Some(*code),
            DbError::Driver(_) | DbError::InvalidName(_) => None,
        }
    }

    pub fn is_suppressed(&self, suppressed: &[i32]) -> bool {
        self.code().is_some_and(|code| suppressed.contains(&code))
    }
}

impl From<oracle::Error> for DbError {
    fn from(err: oracle::Error) -> Self {
        match err.db_error() {
            Some(db_err) => DbError::Database {
                code: db_err.code(),
                message: strip_ora_prefix(db_err.message()).to_string(),
            },
            None => DbError::Driver(err.to_string()),
        }
    }
}

/// The driver message usually repeats the code ("ORA-00942: table ...");
/// the code is rendered by `Display` already.
fn strip_ora_prefix(message: &str) -> &str {
    let trimmed = message.trim();
    match trimmed.strip_prefix("ORA-") {
        Some(rest) => match rest.split_once(':') {
            Some((digits, tail)) if digits.chars().all(|c| c.is_ascii_digit()) => tail.trim(),
            _ => trimmed,
        },
        None => trimmed,
    }
}
