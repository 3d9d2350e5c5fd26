use axum::{Router, routing::get};

use super::handlers::{
    create_workout, delete_workout, get_workout, get_workout_stats, list_workouts,
    update_workout,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route("/stats", get(get_workout_stats))
        .route(
            "/:id",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}
