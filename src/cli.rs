//! Command-line interface definition

use std::path::PathBuf;

use clap::Parser;

/// Load spreadsheet data into a SQL table.
///
/// Reads the first sheet of a workbook, creates the destination table if it
/// does not exist (all columns as text), and bulk-inserts every data row.
#[derive(Parser, Debug)]
#[command(name = "sheetload", version, about)]
pub struct Cli {
    /// Path to the TOML settings file (default: ./sheetload.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Spreadsheet to import (overrides `file_path` from the settings file)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Database connection string (overrides `default_connection`)
    #[arg(long)]
    pub connection: Option<String>,

    /// Destination table name (overrides `table_name`)
    #[arg(long)]
    pub table: Option<String>,
}
