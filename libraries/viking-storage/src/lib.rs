//! Viking Storage
//!
//! `SQLite` persistence for the Viking service-ticket backend.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table owns its own module and queries
//! - **Explicit Composition**: Stores return plain records; relations
//!   (user to role) are resolved by the caller through the `user_roles` slice
//! - **Executor-generic**: Store functions accept any `SQLite` executor so a
//!   caller can run several of them inside one transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use viking_storage::{create_pool, run_migrations, users};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://viking.db").await?;
//! run_migrations(&pool).await?;
//!
//! let all = users::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod devices;
pub mod diagnostic_points;
pub mod roles;
pub mod user_roles;
pub mod users;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Current Unix time in seconds, used for `created_at`/`updated_at` columns
pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://viking.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
