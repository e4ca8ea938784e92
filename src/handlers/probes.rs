use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{JoblyError, router::JoblyState};

/// GET /healthz -> confirms the store answers a trivial query.
pub async fn healthz(State(state): State<JoblyState>) -> Result<Json<Value>, JoblyError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn not_found() -> JoblyError {
    JoblyError::NotFound("Not Found".to_string())
}
