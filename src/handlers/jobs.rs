use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::db::jobs;
use crate::db::models::{JobFilter, JobUpdate, NewJob};
use crate::middleware::{FilterQuery, JsonBody, PathParam, RequireAdmin};
use crate::{JoblyError, router::JoblyState};

pub async fn create(
    State(state): State<JoblyState>,
    _admin: RequireAdmin,
    JsonBody(new): JsonBody<NewJob>,
) -> Result<(StatusCode, Json<Value>), JoblyError> {
    new.validate()?;
    let job = jobs::create(&state.pool, &new).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

pub async fn list(
    State(state): State<JoblyState>,
    FilterQuery(filter): FilterQuery<JobFilter>,
) -> Result<Json<Value>, JoblyError> {
    let jobs = jobs::find_filtered(&state.pool, &filter).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

pub async fn get(
    State(state): State<JoblyState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, JoblyError> {
    let job = jobs::get(&state.pool, id).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn update(
    State(state): State<JoblyState>,
    _admin: RequireAdmin,
    PathParam(id): PathParam<i64>,
    JsonBody(data): JsonBody<JobUpdate>,
) -> Result<Json<Value>, JoblyError> {
    data.validate()?;
    let job = jobs::update(&state.pool, id, &data).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn remove(
    State(state): State<JoblyState>,
    _admin: RequireAdmin,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, JoblyError> {
    jobs::remove(&state.pool, id).await?;
    Ok(Json(json!({ "deleted": id })))
}
