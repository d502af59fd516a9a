use std::io::Write;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{RunState, ScriptOptions, ScriptReport, ScriptSplitter, Statement};
use crate::db::{ConnectionGuard, ConnectionInfo, Connector, ScriptConnection};
use crate::error::ScriptError;

/// Runs a split script over a single connection, in script order.
///
/// Suppressed error codes are swallowed, other database errors become one
/// `Warning:` line on the console (or abort the run with `fail_fast`), and
/// errors without a server code are fatal.
pub struct ScriptRunner<W: Write> {
    options: ScriptOptions,
    console: W,
    state: RunState,
}

impl<W: Write> ScriptRunner<W> {
    pub fn new(options: ScriptOptions, console: W) -> Self {
        Self {
            options,
            console,
            state: RunState::Init,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn into_console(self) -> W {
        self.console
    }

    pub fn run_script<K: Connector>(
        &mut self,
        connector: &K,
        info: &ConnectionInfo,
        script: &str,
    ) -> Result<ScriptReport, ScriptError> {
        let statements = ScriptSplitter::split_script(script);
        self.run_statements(connector, info, &statements)
    }

    pub fn run_statements<K: Connector>(
        &mut self,
        connector: &K,
        info: &ConnectionInfo,
        statements: &[Statement],
    ) -> Result<ScriptReport, ScriptError> {
        self.state = RunState::Init;

        let mut guard = match ConnectionGuard::acquire(connector, info) {
            Ok(guard) => guard,
            Err(err) => {
                self.state = RunState::Fatal;
                return Err(ScriptError::Connection(err));
            }
        };
        self.state = RunState::Connected;

        let result = match guard.connection_mut() {
            Ok(connection) => self.execute_statements(connection, statements),
            Err(err) => Err(ScriptError::Connection(err)),
        };
        if result.is_err() {
            self.state = RunState::Fatal;
        }

        if let Err(err) = guard.release() {
            warn!(error = %err, "failed to close connection");
        }
        self.state = RunState::Closed;

        result
    }

    pub fn execute_statements<C: ScriptConnection>(
        &mut self,
        connection: &mut C,
        statements: &[Statement],
    ) -> Result<ScriptReport, ScriptError> {
        self.state = RunState::Executing;
        let mut report = ScriptReport {
            total: statements.len(),
            ..ScriptReport::default()
        };

        for statement in statements {
            let ordinal = statement.ordinal;
            let start = Instant::now();
            debug!(ordinal, kind = %statement.kind, "executing statement");

            let err = match connection.execute(&statement.normalized) {
                Ok(()) => {
                    report.executed += 1;
                    debug!(ordinal, elapsed_ms = start.elapsed().as_millis() as u64, "statement done");
                    continue;
                }
                Err(err) => err,
            };

            if err.is_suppressed(&self.options.suppressed_codes) {
                report.suppressed += 1;
                debug!(ordinal, code = err.code(), "object not found, skipped");
            } else if err.code().is_some() {
                if self.options.fail_fast {
                    return Err(ScriptError::Statement {
                        ordinal,
                        source: err,
                    });
                }
                report.warnings += 1;
                debug!(ordinal, code = err.code(), "statement failed, continuing");
                writeln!(self.console, "Warning: statement {}: {}", ordinal, err)?;
            } else {
                return Err(ScriptError::Fatal {
                    ordinal,
                    source: err,
                });
            }
        }

        info!(
            total = report.total,
            executed = report.executed,
            suppressed = report.suppressed,
            warnings = report.warnings,
            "script finished"
        );
        Ok(report)
    }
}
