use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::db::{
    ConnectionGuard, Connector, ScriptConnection, ScriptOptions, ScriptReport, ScriptRunner,
};
use crate::error::ScriptError;
use crate::sales::{write_sales_file, GenerateError, GeneratorOptions, SalesGenerator};
use crate::utils::{AppConfig, ConfigError};

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(AppConfig::load(config_path)?))
    }

    /// Read the script, then run it over one connection.
    pub fn run_script<K, W>(
        &self,
        connector: &K,
        script_path: &Path,
        options: ScriptOptions,
        console: &mut W,
    ) -> Result<ScriptReport, ScriptError>
    where
        K: Connector,
        W: Write,
    {
        writeln!(console, "--- Running SQL Script: {} ---", script_path.display())?;

        let script = fs::read_to_string(script_path).map_err(|source| ScriptError::Io {
            path: script_path.to_path_buf(),
            source,
        })?;
        let mut info = self.config.connection_info()?;

        let mut runner = ScriptRunner::new(options, &mut *console);
        let result = runner.run_script(connector, &info, &script);
        info.clear_password();
        let report = result?;

        writeln!(console, "SQL script executed successfully. {}", report.summary())?;
        Ok(report)
    }

    /// Call the ETL procedure (the configured one unless overridden) and commit.
    pub fn trigger_etl<K, W>(
        &self,
        connector: &K,
        procedure: Option<&str>,
        console: &mut W,
    ) -> Result<(), ScriptError>
    where
        K: Connector,
        W: Write,
    {
        let name = procedure.unwrap_or(&self.config.etl_procedure);
        let mut info = self.config.connection_info()?;

        writeln!(console, "--- Connecting to Oracle Database ---")?;
        let acquired = ConnectionGuard::acquire(connector, &info);
        info.clear_password();
        let mut guard = acquired.map_err(ScriptError::Connection)?;

        writeln!(console, "--- Executing Stored Procedure: {} ---", name)?;
        let connection = guard.connection_mut().map_err(ScriptError::Connection)?;
        let procedure_error = |source| ScriptError::Procedure {
            name: name.to_string(),
            source,
        };
        connection.call_procedure(name).map_err(procedure_error)?;
        connection.commit().map_err(procedure_error)?;
        info!(procedure = name, "ETL procedure completed");

        if let Err(err) = guard.release() {
            warn!(error = %err, "failed to close connection");
        }

        writeln!(console, "Success! ETL job completed.")?;
        Ok(())
    }

    pub fn generate_data<W: Write>(
        &self,
        output: Option<&Path>,
        rows: Option<usize>,
        seed: Option<u64>,
        console: &mut W,
    ) -> Result<u64, GenerateError> {
        let output = output.unwrap_or(&self.config.data_output);
        let options = GeneratorOptions {
            rows: rows.unwrap_or(self.config.data_rows),
            ..GeneratorOptions::default()
        };
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        writeln!(console, "--- Starting Data Generation ---")?;
        writeln!(console, "Target Path: {}", output.display())?;

        let generator = SalesGenerator::new(rng, options, Local::now().date_naive());
        let written = write_sales_file(output, generator)?;
        info!(rows = written, path = %output.display(), "sales data written");

        writeln!(console, "Success! Generated {} rows.", written)?;
        Ok(written)
    }
}

/// Map a command outcome to the process exit status, printing fatal errors.
pub fn finish<T, E, W>(result: Result<T, E>, console: &mut W) -> u8
where
    E: Display,
    W: Write,
{
    match result {
        Ok(_) => 0,
        Err(err) => {
            let _ = writeln!(console, "Fatal Error: {}", err);
            1
        }
    }
}
