use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

use error::Result;
use repository::WorkoutRepository;

/// Handle to the PostgreSQL pool.
///
/// Created once at startup and closed explicitly on shutdown; nothing in the
/// crate holds a global connection.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn workouts(&self) -> WorkoutRepository {
        WorkoutRepository::new(self.pool.clone())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
