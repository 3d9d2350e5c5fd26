use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{WorkoutStore, ensure_valid};
use crate::error::{Result, StorageError};
use crate::models::{Workout, WorkoutInput, WorkoutTotals};

/// PostgreSQL-backed workout store.
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: PgPool,
}

impl WorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutStore for WorkoutRepository {
    async fn insert(&self, input: &WorkoutInput) -> Result<Workout> {
        ensure_valid(input)?;

        let workout = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (exercise_name, duration, calories_burned, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, exercise_name, duration, calories_burned, date,
                      created_at, updated_at
            "#,
        )
        .bind(&input.exercise_name)
        .bind(input.duration)
        .bind(input.calories_burned)
        .bind(input.date)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(workout)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Workout> {
        let workout = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, exercise_name, duration, calories_burned, date,
                   created_at, updated_at
            FROM workouts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(workout)
    }

    async fn find_all(&self) -> Result<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, exercise_name, duration, calories_burned, date,
                   created_at, updated_at
            FROM workouts
            ORDER BY date DESC, created_at DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    async fn replace(&self, id: Uuid, input: &WorkoutInput) -> Result<Workout> {
        ensure_valid(input)?;

        let workout = sqlx::query_as::<_, Workout>(
            r#"
            UPDATE workouts
            SET exercise_name = $2,
                duration = $3,
                calories_burned = $4,
                date = $5,
                updated_at = GREATEST(now(), updated_at)
            WHERE id = $1
            RETURNING id, exercise_name, duration, calories_burned, date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.exercise_name)
        .bind(input.duration)
        .bind(input.calories_burned)
        .bind(input.date)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::from_write)?
        .ok_or(StorageError::NotFound)?;

        Ok(workout)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn totals(&self) -> Result<WorkoutTotals> {
        let totals = sqlx::query_as::<_, WorkoutTotals>(
            r#"
            SELECT COUNT(*) AS count,
                   COALESCE(SUM(duration), 0)::BIGINT AS total_duration,
                   COALESCE(SUM(calories_burned), 0)::BIGINT AS total_calories
            FROM workouts
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use chrono::{Days, Utc};

    async fn repository() -> WorkoutRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let db = Database::new(&url).await.unwrap();
        db.run_migrations().await.unwrap();
        db.workouts()
    }

    fn input(name: &str, days_ago: u64) -> WorkoutInput {
        WorkoutInput {
            exercise_name: name.to_string(),
            duration: 30,
            calories_burned: 250,
            date: Utc::now().date_naive() - Days::new(days_ago),
        }
    }

    #[tokio::test]
    #[ignore] // Only run against a live PostgreSQL (DATABASE_URL)
    async fn test_crud_round_trip() {
        let repo = repository().await;

        let created = repo.insert(&input("Rowing", 1)).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, created);

        let mut changed = input("Rowing", 2);
        changed.duration = 45;
        let updated = repo.replace(created.id, &changed).await.unwrap();
        assert_eq!(updated.duration, 45);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        repo.delete(created.id).await.unwrap();
        assert!(matches!(
            repo.find_by_id(created.id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    #[ignore] // Only run against a live PostgreSQL (DATABASE_URL)
    async fn test_invalid_input_never_reaches_the_database() {
        let repo = repository().await;

        let mut bad = input("Swimming", 0);
        bad.calories_burned = 0;

        assert!(matches!(
            repo.insert(&bad).await,
            Err(StorageError::Validation(_))
        ));
    }
}
