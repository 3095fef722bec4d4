//! Bulk row loading
//!
//! Rows are streamed as multi-row parameterized INSERT statements, chunked
//! to stay under the smallest bind limit of the supported backends, and the
//! whole load runs inside one transaction so a failure leaves no partial
//! rows behind. Columns are mapped by name: the INSERT names the buffer's
//! columns, so a missing destination column fails the statement.

use anyhow::{Context, Result};
use sqlx::AnyPool;

use super::SqlDialect;
use crate::sheet::SheetData;

/// SQLite's historical parameter ceiling, the strictest of the supported
/// backends.
const BIND_LIMIT: usize = 999;

/// Append every buffer row to `table`. Returns the number of rows written.
pub async fn bulk_insert(
    pool: &AnyPool,
    dialect: SqlDialect,
    table: &str,
    data: &SheetData,
) -> Result<u64> {
    if data.rows.is_empty() {
        log::info!("Spreadsheet has no data rows; nothing to load");
        return Ok(0);
    }

    let table_q = dialect.quote_ident(table)?;
    let column_list = data
        .columns
        .iter()
        .map(|c| dialect.quote_ident(c))
        .collect::<Result<Vec<_>>>()?
        .join(", ");

    let rows_per_batch = (BIND_LIMIT / data.columns.len()).max(1);

    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin load transaction")?;
    let mut loaded = 0u64;

    for chunk in data.rows.chunks(rows_per_batch) {
        let sql = insert_sql(dialect, &table_q, &column_list, data.columns.len(), chunk.len());
        let mut query = sqlx::query(&sql);
        for row in chunk {
            for value in row {
                query = query.bind(value.as_str());
            }
        }
        let result = query
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Bulk insert into '{table}' failed"))?;
        loaded += result.rows_affected();
        log::debug!("Loaded batch of {} rows into '{}'", chunk.len(), table);
    }

    tx.commit().await.context("Failed to commit load transaction")?;
    Ok(loaded)
}

/// `INSERT INTO t (c1, c2) VALUES (p, p), (p, p), ...` with dialect-specific
/// placeholders.
fn insert_sql(
    dialect: SqlDialect,
    table_q: &str,
    column_list: &str,
    column_count: usize,
    row_count: usize,
) -> String {
    let mut sql = format!("INSERT INTO {table_q} ({column_list}) VALUES ");
    let mut param = 1;
    for row in 0..row_count {
        if row > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for col in 0..column_count {
            if col > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&dialect.placeholder(param));
            param += 1;
        }
        sql.push(')');
    }
    sql
}
