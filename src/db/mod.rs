pub mod context;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

pub use context::CmsDatabaseContext;

/// Owner of the course database for the lifetime of the process.
///
/// The pool keeps exactly one connection open forever. An in-memory SQLite
/// database only lives as long as its connection, and the single connection
/// also serialises concurrent writers.
#[derive(Clone)]
pub struct CourseStore {
    pool: SqlitePool,
}

impl CourseStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("course store ready at {}", database_url);

        Ok(Self { pool })
    }

    /// Opens a unit of work. Nothing it writes is visible elsewhere until
    /// [`CmsDatabaseContext::commit`] returns.
    pub async fn context(&self) -> Result<CmsDatabaseContext, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(CmsDatabaseContext::new(tx))
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("select 1").execute(&self.pool).await?;
        Ok(())
    }
}
