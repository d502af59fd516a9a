use oracle::Connection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::db::error::DbError;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionInfo {
    /// Label used as the keyring account for the stored password.
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub host: String,
    pub port: u16,
    pub service_name: String,
    /// Full connect descriptor (`host:port/service`, TNS alias, ...).
    /// Takes precedence over host/port/service_name when set.
    pub connect_descriptor: Option<String>,
}

impl ConnectionInfo {
    pub fn new(
        name: &str,
        username: &str,
        password: &str,
        host: &str,
        port: u16,
        service_name: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port,
            service_name: service_name.to_string(),
            connect_descriptor: None,
        }
    }

    pub fn connection_string(&self) -> String {
        match self.connect_descriptor.as_deref().map(str::trim) {
            Some(descriptor) if !descriptor.is_empty() => descriptor.to_string(),
            _ => format!("//{}:{}/{}", self.host, self.port, self.service_name),
        }
    }

    /// Connection summary without the password, for console and log output.
    pub fn display_string(&self) -> String {
        format!("{}@{}", self.username, self.connection_string())
    }

    /// Securely clear the password from memory by overwriting with zeros
    /// then releasing the allocation.
    pub fn clear_password(&mut self) {
        // SAFETY: we write zeros over the valid UTF-8 bytes (zeros are valid UTF-8)
        let bytes = unsafe { self.password.as_bytes_mut() };
        for b in bytes.iter_mut() {
            // write_volatile keeps the zeroing from being optimized away
            unsafe { std::ptr::write_volatile(b, 0) };
        }
        self.password.clear();
        self.password.shrink_to_fit();
    }
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            name: "retail_dw".to_string(),
            username: String::new(),
            password: String::new(),
            host: "localhost".to_string(),
            port: 1521,
            service_name: "XEPDB1".to_string(),
            connect_descriptor: None,
        }
    }
}

/// An open database session the script runner and ETL trigger drive.
pub trait ScriptConnection {
    fn execute(&mut self, sql: &str) -> Result<(), DbError>;

    /// Call a stored procedure that takes no arguments.
    fn call_procedure(&mut self, name: &str) -> Result<(), DbError>;

    fn commit(&mut self) -> Result<(), DbError>;

    fn close(&mut self) -> Result<(), DbError>;
}

pub trait Connector {
    type Connection: ScriptConnection;

    fn connect(&self, info: &ConnectionInfo) -> Result<Self::Connection, DbError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OracleConnector;

impl Connector for OracleConnector {
    type Connection = OracleSession;

    fn connect(&self, info: &ConnectionInfo) -> Result<OracleSession, DbError> {
        let conn_str = info.connection_string();
        debug!(target_db = %info.display_string(), "connecting");
        let connection = match Connection::connect(&info.username, &info.password, &conn_str) {
            Ok(connection) => connection,
            Err(err) => {
                debug!(target_db = %info.display_string(), error = %err, "connection failed");
                return Err(err.into());
            }
        };
        info!(target_db = %info.display_string(), "connected");
        Ok(OracleSession { connection })
    }
}

pub struct OracleSession {
    connection: Connection,
}

impl ScriptConnection for OracleSession {
    fn execute(&mut self, sql: &str) -> Result<(), DbError> {
        self.connection.execute(sql, &[])?;
        Ok(())
    }

    fn call_procedure(&mut self, name: &str) -> Result<(), DbError> {
        let block = procedure_call_block(name)?;
        self.connection.execute(&block, &[])?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DbError> {
        self.connection.commit()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), DbError> {
        self.connection.close()?;
        Ok(())
    }
}

/// Wraps a no-argument procedure call in an anonymous block:
/// `pkg.proc` -> `BEGIN pkg.proc; END;`
///
/// Only unquoted, dot-separated identifiers are accepted. Quoted names such
/// as `"Pkg"."Load"` are rejected with `DbError::InvalidName`.
pub fn procedure_call_block(name: &str) -> Result<String, DbError> {
    let name = name.trim();
    let valid = !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '#'))
        });
    if !valid {
        return Err(DbError::InvalidName(name.to_string()));
    }
    Ok(format!("BEGIN {}; END;", name))
}

/// Owns the run's single connection and releases it exactly once, either
/// through `release` or on drop.
pub struct ConnectionGuard<C: ScriptConnection> {
    connection: Option<C>,
}

impl<C: ScriptConnection> ConnectionGuard<C> {
    pub fn acquire<K>(connector: &K, info: &ConnectionInfo) -> Result<Self, DbError>
    where
        K: Connector<Connection = C>,
    {
        let connection = connector.connect(info)?;
        Ok(Self {
            connection: Some(connection),
        })
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    pub fn connection_mut(&mut self) -> Result<&mut C, DbError> {
        self.connection
            .as_mut()
            .ok_or_else(|| DbError::Driver("connection already released".to_string()))
    }

    /// Close the connection. Calling it again, or on drop afterwards, is a no-op.
    pub fn release(&mut self) -> Result<(), DbError> {
        match self.connection.take() {
            Some(mut connection) => {
                debug!("closing connection");
                connection.close()
            }
            None => Ok(()),
        }
    }
}

impl<C: ScriptConnection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(error = %err, "failed to close connection");
        }
    }
}
