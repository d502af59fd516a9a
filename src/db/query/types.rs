use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Anonymous block starting with BEGIN or DECLARE; executed with its trailing `;`.
    PlsqlBlock,
    /// Single SQL statement; the driver rejects a trailing `;`.
    PlainSql,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementKind::PlsqlBlock => f.write_str("PL/SQL block"),
            StatementKind::PlainSql => f.write_str("SQL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based position in the script.
    pub ordinal: usize,
    pub raw: String,
    pub kind: StatementKind,
    pub normalized: String,
}

impl Statement {
    pub fn trimmed(&self) -> &str {
        self.raw.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Connected,
    Executing,
    Fatal,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub total: usize,
    pub executed: usize,
    pub suppressed: usize,
    pub warnings: usize,
}

impl ScriptReport {
    pub fn summary(&self) -> String {
        format!(
            "{} statement(s): {} executed, {} skipped (object not found), {} warning(s)",
            self.total, self.executed, self.suppressed, self.warnings
        )
    }
}

#[derive(Debug, Clone)]
pub struct ScriptOptions {
    pub suppressed_codes: Vec<i32>,
    /// Abort on the first unsuppressed database error instead of warning.
    pub fail_fast: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            suppressed_codes: crate::db::SUPPRESSED_ERROR_CODES.to_vec(),
            fail_fast: false,
        }
    }
}
