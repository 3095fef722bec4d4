//! The import pipeline: read, ensure table, bulk load

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::db::{self, SqlDialect, loader, schema};
use crate::sheet;

/// Outcome of a completed run.
#[derive(Debug)]
pub struct ImportStats {
    pub columns: usize,
    pub rows_read: usize,
    pub rows_loaded: u64,
}

/// Run the whole pipeline against the given settings.
pub async fn run(settings: &Settings) -> Result<ImportStats> {
    log::info!("Reading spreadsheet: {}", settings.file_path.display());
    let data = sheet::read_workbook(&settings.file_path)?;
    log::info!(
        "Read {} rows across {} columns from the first sheet",
        data.row_count(),
        data.column_count()
    );

    let pool = db::connect(&settings.default_connection)
        .await
        .with_context(|| format!("Cannot reach database for table '{}'", settings.table_name))?;
    let dialect = SqlDialect::detect(&pool).await?;

    schema::ensure_table(
        &pool,
        dialect,
        &settings.table_name,
        &data.columns,
        &schema::AllText,
    )
    .await?;
    log::info!("Destination table '{}' is ready", settings.table_name);

    let rows_loaded = loader::bulk_insert(&pool, dialect, &settings.table_name, &data).await?;

    pool.close().await;

    Ok(ImportStats {
        columns: data.column_count(),
        rows_read: data.row_count(),
        rows_loaded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use rust_xlsxwriter::Workbook;
    use sqlx::Row;
    use tempfile::TempDir;

    fn write_people_workbook(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Name").unwrap();
        sheet.write_string(0, 1, "Age").unwrap();
        sheet.write_string(1, 0, "Ann").unwrap();
        sheet.write_string(1, 1, "30").unwrap();
        sheet.write_string(2, 0, "Bo").unwrap();
        sheet.write_string(2, 1, "41").unwrap();
        workbook.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_end_to_end_import() {
        let dir = TempDir::new().unwrap();
        let xlsx = dir.path().join("people.xlsx");
        write_people_workbook(&xlsx);

        let settings = Settings {
            file_path: xlsx,
            default_connection: format!(
                "sqlite://{}?mode=rwc",
                dir.path().join("import.db").display()
            ),
            table_name: "people".to_string(),
        };

        let stats = run(&settings).await.unwrap();
        assert_eq!(stats.columns, 2);
        assert_eq!(stats.rows_read, 2);
        assert_eq!(stats.rows_loaded, 2);

        let pool = db::connect(&settings.default_connection).await.unwrap();
        let rows = sqlx::query("SELECT \"Name\", \"Age\" FROM \"people\" ORDER BY \"Name\"")
            .fetch_all(&pool)
            .await
            .unwrap();
        let values: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.get::<String, _>(0), r.get::<String, _>(1)))
            .collect();
        assert_eq!(values, vec![
            ("Ann".to_string(), "30".to_string()),
            ("Bo".to_string(), "41".to_string())
        ]);
    }

    #[tokio::test]
    async fn test_missing_spreadsheet_fails_before_touching_database() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("untouched.db");

        let settings = Settings {
            file_path: dir.path().join("missing.xlsx"),
            default_connection: format!("sqlite://{}?mode=rwc", db_path.display()),
            table_name: "people".to_string(),
        };

        assert!(run(&settings).await.is_err());
        assert!(!db_path.exists());
    }
}
