use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::db::companies;
use crate::db::models::{CompanyFilter, CompanyUpdate, NewCompany};
use crate::middleware::{FilterQuery, JsonBody, PathParam, RequireAdmin};
use crate::{JoblyError, router::JoblyState};

/// POST /companies -> `{ company }`. Admin only.
pub async fn create(
    State(state): State<JoblyState>,
    _admin: RequireAdmin,
    JsonBody(new): JsonBody<NewCompany>,
) -> Result<(StatusCode, Json<Value>), JoblyError> {
    new.validate()?;
    let company = companies::create(&state.pool, &new).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// GET /companies?name=&minEmployees=&maxEmployees= -> `{ companies }`.
pub async fn list(
    State(state): State<JoblyState>,
    FilterQuery(filter): FilterQuery<CompanyFilter>,
) -> Result<Json<Value>, JoblyError> {
    filter.validate()?;
    let companies = companies::find_filtered(&state.pool, &filter).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// GET /companies/{handle} -> `{ company }` including its jobs.
pub async fn get(
    State(state): State<JoblyState>,
    PathParam(handle): PathParam<String>,
) -> Result<Json<Value>, JoblyError> {
    let company = companies::get(&state.pool, &handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// PATCH /companies/{handle} -> `{ company }`. Admin only.
pub async fn update(
    State(state): State<JoblyState>,
    _admin: RequireAdmin,
    PathParam(handle): PathParam<String>,
    JsonBody(data): JsonBody<CompanyUpdate>,
) -> Result<Json<Value>, JoblyError> {
    data.validate()?;
    let company = companies::update(&state.pool, &handle, &data).await?;
    Ok(Json(json!({ "company": company })))
}

/// DELETE /companies/{handle} -> `{ deleted: handle }`. Admin only.
pub async fn remove(
    State(state): State<JoblyState>,
    _admin: RequireAdmin,
    PathParam(handle): PathParam<String>,
) -> Result<Json<Value>, JoblyError> {
    companies::remove(&state.pool, &handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}
