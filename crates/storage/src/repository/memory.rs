use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{WorkoutStore, ensure_valid};
use crate::error::{Result, StorageError};
use crate::models::{Workout, WorkoutInput, WorkoutTotals};

/// In-process workout store. Records live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryWorkoutStore {
    workouts: RwLock<HashMap<Uuid, Workout>>,
}

impl MemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkoutStore for MemoryWorkoutStore {
    async fn insert(&self, input: &WorkoutInput) -> Result<Workout> {
        ensure_valid(input)?;

        let mut workouts = self.workouts.write().await;

        let mut id = Uuid::new_v4();
        while workouts.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let now = Utc::now();
        let workout = Workout {
            id,
            exercise_name: input.exercise_name.clone(),
            duration: input.duration,
            calories_burned: input.calories_burned,
            date: input.date,
            created_at: now,
            updated_at: now,
        };
        workouts.insert(id, workout.clone());

        Ok(workout)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Workout> {
        self.workouts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Workout>> {
        let mut workouts: Vec<Workout> = self.workouts.read().await.values().cloned().collect();
        workouts.sort_by(Workout::listing_order);

        Ok(workouts)
    }

    async fn replace(&self, id: Uuid, input: &WorkoutInput) -> Result<Workout> {
        ensure_valid(input)?;

        let mut workouts = self.workouts.write().await;
        let workout = workouts.get_mut(&id).ok_or(StorageError::NotFound)?;

        workout.exercise_name = input.exercise_name.clone();
        workout.duration = input.duration;
        workout.calories_burned = input.calories_burned;
        workout.date = input.date;
        workout.updated_at = workout.updated_at.max(Utc::now());

        Ok(workout.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.workouts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn totals(&self) -> Result<WorkoutTotals> {
        let workouts = self.workouts.read().await;

        Ok(workouts
            .values()
            .fold(WorkoutTotals::default(), |mut totals, workout| {
                totals.count += 1;
                totals.total_duration += i64::from(workout.duration);
                totals.total_calories += i64::from(workout.calories_burned);
                totals
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn days_ago(days: u64) -> NaiveDate {
        Utc::now().date_naive() - Days::new(days)
    }

    fn input(name: &str, duration: i32, calories: i32, date: NaiveDate) -> WorkoutInput {
        WorkoutInput {
            exercise_name: name.to_string(),
            duration,
            calories_burned: calories,
            date,
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryWorkoutStore::new();
        let created = store
            .insert(&input("Running", 30, 300, days_ago(1)))
            .await
            .unwrap();

        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_replace_keeps_identity() {
        let store = MemoryWorkoutStore::new();
        let created = store
            .insert(&input("Running", 30, 300, days_ago(3)))
            .await
            .unwrap();

        let updated = store
            .replace(created.id, &input("Cycling", 45, 400, days_ago(2)))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.exercise_name, "Cycling");
        assert_eq!(updated.duration, 45);
        assert_eq!(store.find_by_id(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_records() {
        let store = MemoryWorkoutStore::new();
        let id = Uuid::new_v4();

        assert!(matches!(store.find_by_id(id).await, Err(StorageError::NotFound)));
        assert!(matches!(store.delete(id).await, Err(StorageError::NotFound)));
        assert!(matches!(
            store
                .replace(id, &input("Running", 30, 300, days_ago(1)))
                .await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let store = MemoryWorkoutStore::new();
        let created = store
            .insert(&input("Yoga", 60, 180, days_ago(0)))
            .await
            .unwrap();

        store.delete(created.id).await.unwrap();
        assert!(matches!(
            store.find_by_id(created.id).await,
            Err(StorageError::NotFound)
        ));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_orders_by_date_descending() {
        let store = MemoryWorkoutStore::new();
        for days in [5, 0, 9, 2, 2, 7] {
            store
                .insert(&input("Walking", 20, 100, days_ago(days)))
                .await
                .unwrap();
        }

        let workouts = store.find_all().await.unwrap();
        assert_eq!(workouts.len(), 6);
        assert!(workouts.windows(2).all(|w| w[0].date >= w[1].date));
        assert!(
            workouts
                .windows(2)
                .all(|w| Workout::listing_order(&w[0], &w[1]).is_le())
        );
    }

    #[tokio::test]
    async fn test_totals() {
        let store = MemoryWorkoutStore::new();
        assert_eq!(store.totals().await.unwrap(), WorkoutTotals::default());

        store
            .insert(&input("Running", 30, 200, days_ago(1)))
            .await
            .unwrap();
        store
            .insert(&input("Rowing", 45, 300, days_ago(2)))
            .await
            .unwrap();

        assert_eq!(
            store.totals().await.unwrap(),
            WorkoutTotals {
                count: 2,
                total_duration: 75,
                total_calories: 500,
            }
        );
    }

    #[tokio::test]
    async fn test_store_rejects_invalid_writes() {
        let store = MemoryWorkoutStore::new();

        let future = input("Running", 30, 300, Utc::now().date_naive() + Days::new(1));
        assert!(matches!(
            store.insert(&future).await,
            Err(StorageError::Validation(errors)) if errors.contains("date")
        ));

        let created = store
            .insert(&input("Running", 30, 300, days_ago(1)))
            .await
            .unwrap();
        let too_long = input("Running", 1441, 300, days_ago(1));
        assert!(matches!(
            store.replace(created.id, &too_long).await,
            Err(StorageError::Validation(errors)) if errors.contains("duration")
        ));
        assert_eq!(store.find_by_id(created.id).await.unwrap(), created);
    }
}
