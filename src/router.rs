use axum::{Router, routing::get};
use std::sync::Arc;

use crate::db::SqlitePool;
use crate::handlers::{companies, jobs, probes};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct JoblyState {
    pub pool: SqlitePool,
    pub admin_key: Arc<str>,
}

impl JoblyState {
    pub fn new(pool: SqlitePool, admin_key: Arc<str>) -> Self {
        Self { pool, admin_key }
    }
}

pub fn jobly_router(state: JoblyState) -> Router {
    Router::new()
        .route("/healthz", get(probes::healthz))
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/{handle}",
            get(companies::get)
                .patch(companies::update)
                .delete(companies::remove),
        )
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route(
            "/jobs/{id}",
            get(jobs::get).patch(jobs::update).delete(jobs::remove),
        )
        .fallback(probes::not_found)
        .with_state(state)
}
