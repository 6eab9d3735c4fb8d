//! Workout log endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::{AppError, AppResult};
use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route("/{id}", get(get_workout).delete(delete_workout))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Workout {
    pub id: i32,
    pub title: String,
    pub load: i32,
    pub reps: i32,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutInput {
    pub title: String,
    pub load: i32,
    pub reps: i32,
}

async fn list_workouts(State(state): State<AppState>) -> AppResult<Json<Vec<Workout>>> {
    let workouts = sqlx::query_as::<_, Workout>(
        "SELECT id, title, load, reps FROM workouts ORDER BY id DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(workouts))
}

async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Workout>> {
    let workout =
        sqlx::query_as::<_, Workout>("SELECT id, title, load, reps FROM workouts WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Workout {id} not found")))?;

    Ok(Json(workout))
}

async fn create_workout(
    State(state): State<AppState>,
    Json(input): Json<WorkoutInput>,
) -> AppResult<Json<Workout>> {
    let workout = sqlx::query_as::<_, Workout>(
        "INSERT INTO workouts (title, load, reps) VALUES ($1, $2, $3) \
         RETURNING id, title, load, reps",
    )
    .bind(&input.title)
    .bind(input.load)
    .bind(input.reps)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(workout))
}

async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Workout {id} not found")));
    }

    Ok(Json(serde_json::json!({ "deleted": id })))
}
