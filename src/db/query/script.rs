use tracing::trace;

use super::{Statement, StatementKind};

/// Splits SQL*Plus style scripts where every statement or PL/SQL block is
/// terminated by a line holding only `/`.
///
/// The split is purely line based: a `/` line inside a string literal or a
/// block comment still terminates the statement.
pub struct ScriptSplitter;

impl ScriptSplitter {
    pub fn is_delimiter_line(line: &str) -> bool {
        line.trim() == "/"
    }

    fn is_comment_or_blank(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with("--")
    }

    /// Chunks of the buffer between delimiter lines, untrimmed.
    pub fn split_chunks(script: &str) -> Vec<&str> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut offset = 0;

        for line in script.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();
            if Self::is_delimiter_line(line) {
                chunks.push(&script[start..line_start]);
                start = offset;
            }
        }

        if start < script.len() {
            chunks.push(&script[start..]);
        }

        chunks
    }

    /// First token of the first line that is neither blank nor a `--` comment,
    /// uppercased.
    pub fn first_token(sql: &str) -> Option<String> {
        sql.lines()
            .find(|line| !Self::is_comment_or_blank(line))
            .and_then(|line| line.split_whitespace().next())
            .map(|token| token.to_uppercase())
    }

    pub fn classify(sql: &str) -> StatementKind {
        match Self::first_token(sql).as_deref() {
            Some("BEGIN") | Some("DECLARE") => StatementKind::PlsqlBlock,
            _ => StatementKind::PlainSql,
        }
    }

    fn strip_trailing_comment_lines(sql: &str) -> &str {
        let mut remaining = sql.trim_end();
        loop {
            let (head, last_line) = match remaining.rfind('\n') {
                Some(pos) => (&remaining[..pos], &remaining[pos + 1..]),
                None => return remaining,
            };
            if !Self::is_comment_or_blank(last_line) {
                return remaining;
            }
            remaining = head.trim_end();
        }
    }

    /// Bring the trailing terminator in line with what the driver expects:
    /// PL/SQL blocks end with exactly one `;`, plain SQL ends without one.
    pub fn normalize(sql: &str, kind: StatementKind) -> String {
        let body = Self::strip_trailing_comment_lines(sql.trim());
        match kind {
            StatementKind::PlsqlBlock => {
                if body.ends_with(';') {
                    body.to_string()
                } else {
                    format!("{};", body)
                }
            }
            StatementKind::PlainSql => match body.strip_suffix(';') {
                Some(stripped) => stripped.trim_end().to_string(),
                None => body.to_string(),
            },
        }
    }

    pub fn split_script(script: &str) -> Vec<Statement> {
        let mut statements = Vec::new();

        for chunk in Self::split_chunks(script) {
            let trimmed = chunk.trim();
            if trimmed.is_empty() || Self::first_token(trimmed).is_none() {
                continue;
            }

            let kind = Self::classify(trimmed);
            let normalized = Self::normalize(trimmed, kind);
            let ordinal = statements.len() + 1;
            trace!(ordinal, %kind, "split statement");

            statements.push(Statement {
                ordinal,
                raw: chunk.to_string(),
                kind,
                normalized,
            });
        }

        statements
    }

    /// Normalized statement texts in execution order.
    pub fn normalized_statements(script: &str) -> Vec<String> {
        Self::split_script(script)
            .into_iter()
            .map(|statement| statement.normalized)
            .collect()
    }
}
