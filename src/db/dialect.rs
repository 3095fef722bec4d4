//! SQL dialect differences: identifier quoting and bind placeholders
//!
//! Column names come straight out of spreadsheet header cells, so they are
//! never interpolated raw: `quote_ident` rejects anything that cannot be
//! represented safely and escapes the quote character by doubling it. Cell
//! values are always bound parameters and never pass through here.

use anyhow::{Context, Result, bail};
use sqlx::AnyPool;

/// Identifier length cap; MySQL's limit, the strictest of the supported
/// backends.
const MAX_IDENT_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Postgres,
    MySql,
    Sqlite,
}

impl SqlDialect {
    /// Sniff the dialect from a live pool.
    pub async fn detect(pool: &AnyPool) -> Result<Self> {
        let conn = pool
            .acquire()
            .await
            .context("Failed to detect database backend")?;
        Self::from_backend_name(conn.backend_name())
    }

    pub fn from_backend_name(name: &str) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.contains("postgres") {
            Ok(SqlDialect::Postgres)
        } else if lower.contains("mysql") || lower.contains("maria") {
            Ok(SqlDialect::MySql)
        } else if lower.contains("sqlite") {
            Ok(SqlDialect::Sqlite)
        } else {
            bail!("Unsupported database backend: {name}")
        }
    }

    fn quote_char(self) -> char {
        match self {
            SqlDialect::MySql => '`',
            SqlDialect::Postgres | SqlDialect::Sqlite => '"',
        }
    }

    /// Quote a table or column name for this dialect.
    ///
    /// Rejects empty, over-long, and control-character names; embedded quote
    /// characters are escaped by doubling.
    pub fn quote_ident(self, name: &str) -> Result<String> {
        if name.is_empty() {
            bail!("Identifier must not be empty");
        }
        if name.chars().count() > MAX_IDENT_LEN {
            bail!("Identifier exceeds {MAX_IDENT_LEN} characters: '{name}'");
        }
        if name.chars().any(|c| c.is_control()) {
            bail!("Identifier contains control characters: {name:?}");
        }

        let quote = self.quote_char();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        Ok(quoted)
    }

    /// Placeholder for the `n`-th bound parameter (1-based).
    pub fn placeholder(self, n: usize) -> String {
        match self {
            SqlDialect::Postgres => format!("${n}"),
            SqlDialect::MySql | SqlDialect::Sqlite => "?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name_mapping() {
        assert_eq!(
            SqlDialect::from_backend_name("PostgreSQL").unwrap(),
            SqlDialect::Postgres
        );
        assert_eq!(SqlDialect::from_backend_name("MySQL").unwrap(), SqlDialect::MySql);
        assert_eq!(SqlDialect::from_backend_name("SQLite").unwrap(), SqlDialect::Sqlite);
        assert!(SqlDialect::from_backend_name("MSSQL").is_err());
    }

    #[test]
    fn test_quote_ident_plain() {
        assert_eq!(SqlDialect::Sqlite.quote_ident("Name").unwrap(), "\"Name\"");
        assert_eq!(SqlDialect::MySql.quote_ident("Name").unwrap(), "`Name`");
    }

    #[test]
    fn test_quote_ident_escapes_embedded_quotes() {
        assert_eq!(
            SqlDialect::Postgres.quote_ident("a\"b").unwrap(),
            "\"a\"\"b\""
        );
        assert_eq!(SqlDialect::MySql.quote_ident("a`b").unwrap(), "`a``b`");
    }

    #[test]
    fn test_quote_ident_neutralizes_injection_attempt() {
        let hostile = "x\" (y TEXT); DROP TABLE users; --";
        let quoted = SqlDialect::Sqlite.quote_ident(hostile).unwrap();
        // The embedded quote is doubled, so the payload stays inside the
        // identifier instead of terminating it.
        assert_eq!(quoted, "\"x\"\" (y TEXT); DROP TABLE users; --\"");
    }

    #[test]
    fn test_quote_ident_rejects_bad_names() {
        assert!(SqlDialect::Sqlite.quote_ident("").is_err());
        assert!(SqlDialect::Sqlite.quote_ident("a\nb").is_err());
        assert!(SqlDialect::Sqlite.quote_ident(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(SqlDialect::Postgres.placeholder(3), "$3");
        assert_eq!(SqlDialect::Sqlite.placeholder(3), "?");
        assert_eq!(SqlDialect::MySql.placeholder(1), "?");
    }
}
