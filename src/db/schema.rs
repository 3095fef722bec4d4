//! Destination table creation
//!
//! The table is created only when absent; a pre-existing table is left
//! untouched even if its columns differ from the buffer's (the bulk load
//! will surface the mismatch).

use anyhow::{Context, Result};
use sqlx::AnyPool;

use super::SqlDialect;

/// Maps a column name to its SQL type. Shipped with a single all-text
/// implementation; the seam exists so a future strategy can infer types
/// without touching the pipeline.
pub trait TypeStrategy {
    fn column_type(&self, dialect: SqlDialect, column: &str) -> &'static str;
}

/// Types every column as unbounded text.
pub struct AllText;

impl TypeStrategy for AllText {
    fn column_type(&self, dialect: SqlDialect, _column: &str) -> &'static str {
        match dialect {
            // MySQL's TEXT caps at 64 KiB; LONGTEXT is the unbounded one
            SqlDialect::MySql => "LONGTEXT",
            SqlDialect::Postgres | SqlDialect::Sqlite => "TEXT",
        }
    }
}

/// Issue one `CREATE TABLE IF NOT EXISTS` with a column per buffer column,
/// in buffer order.
pub async fn ensure_table(
    pool: &AnyPool,
    dialect: SqlDialect,
    table: &str,
    columns: &[String],
    strategy: &dyn TypeStrategy,
) -> Result<()> {
    let mut defs = Vec::with_capacity(columns.len());
    for column in columns {
        defs.push(format!(
            "{} {}",
            dialect.quote_ident(column)?,
            strategy.column_type(dialect, column)
        ));
    }
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        dialect.quote_ident(table)?,
        defs.join(", ")
    );

    log::debug!("Ensuring destination table: {sql}");
    sqlx::query(&sql)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to create table '{table}'"))?;
    Ok(())
}
