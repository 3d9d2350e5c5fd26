use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::{DataResponse, Empty, ErrorResponse, ListResponse},
        workout::WorkoutPayload,
    },
    models::{Workout, WorkoutStats},
};

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/workouts",
    responses(
        (status = 200, description = "All workouts, newest date first", body = ListResponse<Workout>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn list_workouts(State(state): State<AppState>) -> Result<Response, WebError> {
    let workouts = services::list_workouts(state.store()).await?;

    Ok(Json(ListResponse::new(workouts)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workouts/stats",
    responses(
        (status = 200, description = "Aggregate statistics over all workouts", body = DataResponse<WorkoutStats>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn get_workout_stats(State(state): State<AppState>) -> Result<Response, WebError> {
    let stats = services::workout_stats(state.store()).await?;

    Ok(Json(DataResponse::new(stats)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout id")
    ),
    responses(
        (status = 200, description = "Workout found", body = DataResponse<Workout>),
        (status = 404, description = "Workout not found", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let workout = services::get_workout(state.store(), &id).await?;

    Ok(Json(DataResponse::new(workout)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/workouts",
    request_body = WorkoutPayload,
    responses(
        (status = 201, description = "Workout created successfully", body = DataResponse<Workout>),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn create_workout(
    State(state): State<AppState>,
    payload: Result<Json<WorkoutPayload>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(payload) = payload?;

    let workout = services::create_workout(state.store(), &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            workout,
            "Workout created successfully",
        )),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout id")
    ),
    request_body = WorkoutPayload,
    responses(
        (status = 200, description = "Workout updated successfully", body = DataResponse<Workout>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Workout not found", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<WorkoutPayload>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(payload) = payload?;

    let updated = services::update_workout(state.store(), &id, &payload).await?;

    Ok(Json(DataResponse::with_message(
        updated,
        "Workout updated successfully",
    ))
    .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout id")
    ),
    responses(
        (status = 200, description = "Workout deleted successfully", body = DataResponse<Empty>),
        (status = 404, description = "Workout not found", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_workout(state.store(), &id).await?;

    Ok(Json(DataResponse::with_message(
        Empty {},
        "Workout deleted successfully",
    ))
    .into_response())
}
