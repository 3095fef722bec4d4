//! sheetload: one-shot spreadsheet to SQL table importer.

mod cli;
mod config;
mod db;
mod import;
mod sheet;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Cli::parse();

    let settings = match config::Settings::from_args(&args) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match import::run(&settings).await {
        Ok(stats) => {
            log::info!(
                "Data import completed successfully! {} rows loaded into '{}' ({} columns)",
                stats.rows_loaded,
                settings.table_name,
                stats.columns
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Import failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
