use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Raw aggregate over the whole workouts collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct WorkoutTotals {
    pub count: i64,
    pub total_duration: i64,
    pub total_calories: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: i64,
    pub total_duration: i64,
    pub total_calories: i64,
    pub avg_duration: i64,
    pub avg_calories: i64,
}
