use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub exercise_name: String,
    /// Minutes.
    pub duration: i32,
    pub calories_burned: i32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Listing order: newest `date` first, then most recently created, then `id`.
    pub fn listing_order(a: &Workout, b: &Workout) -> Ordering {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// The four business fields of a workout after coercion.
///
/// Built from untyped input by [`crate::validation::validate_payload`]; stores
/// re-check it with [`crate::validation::check_input`] before every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    pub exercise_name: String,
    pub duration: i32,
    pub calories_burned: i32,
    pub date: NaiveDate,
}
