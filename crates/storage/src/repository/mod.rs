use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Workout, WorkoutInput, WorkoutTotals};
use crate::validation;

pub mod memory;
pub mod workout;

pub use memory::MemoryWorkoutStore;
pub use workout::WorkoutRepository;

/// Persistence for workout records.
///
/// Implementations validate every write themselves and fail with
/// [`StorageError::Validation`] rather than trusting callers.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Inserts a new record; the store assigns `id`, `created_at` and `updated_at`.
    async fn insert(&self, input: &WorkoutInput) -> Result<Workout>;

    async fn find_by_id(&self, id: Uuid) -> Result<Workout>;

    /// All records, newest `date` first (see [`Workout::listing_order`]).
    async fn find_all(&self) -> Result<Vec<Workout>>;

    /// Replaces the four business fields and refreshes `updated_at`.
    async fn replace(&self, id: Uuid, input: &WorkoutInput) -> Result<Workout>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn totals(&self) -> Result<WorkoutTotals>;
}

pub(crate) fn ensure_valid(input: &WorkoutInput) -> Result<()> {
    validation::check_input(input, Utc::now().date_naive()).map_err(|errors| {
        tracing::warn!("Rejected workout write: {}", errors);
        StorageError::Validation(errors)
    })
}
