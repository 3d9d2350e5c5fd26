use chrono::Utc;
use storage::{
    dto::workout::WorkoutPayload,
    error::StorageError,
    models::{Workout, WorkoutStats},
    repository::WorkoutStore,
    services::statistics,
    validation,
};
use uuid::Uuid;

use crate::error::{ApiResult, WebError};

/// List all workouts, newest date first
pub async fn list_workouts(store: &dyn WorkoutStore) -> ApiResult<Vec<Workout>> {
    let workouts = store.find_all().await?;
    tracing::debug!("Listed {} workouts", workouts.len());
    Ok(workouts)
}

/// Get a workout by id
pub async fn get_workout(store: &dyn WorkoutStore, id: &str) -> ApiResult<Workout> {
    let workout_id = parse_id(id)?;
    store.find_by_id(workout_id).await.map_err(not_found_as(id))
}

/// Validate and store a new workout
pub async fn create_workout(
    store: &dyn WorkoutStore,
    payload: &WorkoutPayload,
) -> ApiResult<Workout> {
    let input = validate(payload)?;

    let workout = store.insert(&input).await?;
    tracing::info!(id = %workout.id, exercise = %workout.exercise_name, "Workout created");

    Ok(workout)
}

/// Replace all business fields of an existing workout
pub async fn update_workout(
    store: &dyn WorkoutStore,
    id: &str,
    payload: &WorkoutPayload,
) -> ApiResult<Workout> {
    let workout_id = parse_id(id)?;
    store
        .find_by_id(workout_id)
        .await
        .map_err(not_found_as(id))?;

    let input = validate(payload)?;

    let workout = store
        .replace(workout_id, &input)
        .await
        .map_err(not_found_as(id))?;
    tracing::info!(id = %workout.id, "Workout updated");

    Ok(workout)
}

/// Delete a workout permanently
pub async fn delete_workout(store: &dyn WorkoutStore, id: &str) -> ApiResult<()> {
    let workout_id = parse_id(id)?;
    store.delete(workout_id).await.map_err(not_found_as(id))?;
    tracing::info!(id = %workout_id, "Workout deleted");

    Ok(())
}

/// Aggregate statistics over every stored workout
pub async fn workout_stats(store: &dyn WorkoutStore) -> ApiResult<WorkoutStats> {
    let totals = store.totals().await?;
    Ok(statistics::summarize(totals))
}

fn validate(payload: &WorkoutPayload) -> ApiResult<storage::models::WorkoutInput> {
    validation::validate_payload(payload, Utc::now().date_naive()).map_err(|errors| {
        tracing::warn!("Rejected workout payload: {}", errors);
        WebError::Validation(errors)
    })
}

/// Malformed ids are reported exactly like unknown ones.
fn parse_id(id: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| WebError::workout_not_found(id))
}

fn not_found_as(id: &str) -> impl FnOnce(StorageError) -> WebError + '_ {
    move |error| match error {
        StorageError::NotFound => WebError::workout_not_found(id),
        other => WebError::Storage(other),
    }
}
