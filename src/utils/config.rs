use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::db::ConnectionInfo;
use crate::utils::credential_store;

const USER_VAR: &str = "RETAIL_DW_USER";
const PASSWORD_VAR: &str = "RETAIL_DW_PASSWORD";
const DSN_VAR: &str = "RETAIL_DW_DSN";
const HOST_VAR: &str = "RETAIL_DW_HOST";
const PORT_VAR: &str = "RETAIL_DW_PORT";
const SERVICE_VAR: &str = "RETAIL_DW_SERVICE";
const ETL_PROCEDURE_VAR: &str = "RETAIL_DW_ETL_PROCEDURE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value `{value}` for {var}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("missing database {field}; set {var} or add it to the config file")]
    MissingCredential {
        field: &'static str,
        var: &'static str,
    },
    #[error("{0}")]
    Keyring(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub database: ConnectionInfo,
    pub etl_procedure: String,
    pub data_output: PathBuf,
    pub data_rows: usize,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: ConnectionInfo::default(),
            etl_procedure: "pkg_etl_retail.load_daily_sales".to_string(),
            data_output: PathBuf::from("data").join("sales_data.csv"),
            data_rows: 1000,
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("retail_dw");
            path.push("config.json");
            path
        })
    }

    /// Defaults, then the config file, then `RETAIL_DW_*` environment variables.
    ///
    /// An explicitly requested file must exist; the per-user default file is
    /// optional.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::new(),
            },
        };
        config.apply_env(|var| env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        if let Some(user) = lookup(USER_VAR) {
            self.database.username = user;
        }
        if let Some(password) = lookup(PASSWORD_VAR) {
            self.database.password = password;
        }
        if let Some(dsn) = lookup(DSN_VAR) {
            self.database.connect_descriptor = Some(dsn);
        }
        if let Some(host) = lookup(HOST_VAR) {
            self.database.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.database.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: PORT_VAR,
                value: port.clone(),
            })?;
        }
        if let Some(service) = lookup(SERVICE_VAR) {
            self.database.service_name = service;
        }
        if let Some(procedure) = lookup(ETL_PROCEDURE_VAR) {
            self.etl_procedure = procedure;
        }
        Ok(())
    }

    /// Connection info with a username and password, falling back to the OS
    /// keyring for the password.
    pub fn connection_info(&self) -> Result<ConnectionInfo, ConfigError> {
        self.connection_info_with(credential_store::get_password)
    }

    pub fn connection_info_with<F>(&self, keyring_lookup: F) -> Result<ConnectionInfo, ConfigError>
    where
        F: FnOnce(&str) -> Result<Option<String>, String>,
    {
        let mut info = self.database.clone();
        if info.username.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                field: "username",
                var: USER_VAR,
            });
        }
        if info.password.is_empty() {
            match keyring_lookup(&info.name).map_err(ConfigError::Keyring)? {
                Some(password) => info.password = password,
                None => {
                    return Err(ConfigError::MissingCredential {
                        field: "password",
                        var: PASSWORD_VAR,
                    })
                }
            }
        }
        Ok(info)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
