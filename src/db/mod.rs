//! Database access: connection pooling, dialect handling, DDL and bulk load

pub mod dialect;
pub mod loader;
pub mod schema;

use std::sync::Once;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

pub use dialect::SqlDialect;

/// Large imports can wait a long time on a busy server.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(900);

static DRIVERS: Once = Once::new();

/// Register the compiled-in sqlx drivers with the `Any` backend. Safe to call
/// more than once.
pub fn install_drivers() {
    DRIVERS.call_once(sqlx::any::install_default_drivers);
}

/// Open a pool for the given connection string (PostgreSQL, MySQL, or SQLite
/// URL).
pub async fn connect(url: &str) -> Result<AnyPool> {
    install_drivers();
    AnyPoolOptions::new()
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(url)
        .await
        .context("Failed to connect to database")
}
