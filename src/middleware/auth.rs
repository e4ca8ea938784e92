use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};
use subtle::ConstantTimeEq;

use crate::error::JoblyError;
use crate::router::JoblyState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Ensure the inbound request carries the admin key.
/// Accepts either:
/// - Header: `x-admin-key: ...`
/// - Header: `Authorization: Bearer ...`
///   An empty configured key rejects everything.
pub fn ensure_admin(headers: &HeaderMap, expected: &str) -> Result<(), JoblyError> {
    if expected.is_empty() {
        return Err(JoblyError::Unauthorized);
    }
    let matches = |candidate: &str| bool::from(candidate.as_bytes().ct_eq(expected.as_bytes()));

    if let Some(hv) = headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok())
        && matches(hv)
    {
        return Ok(());
    }

    if let Some(auth) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let auth = auth.trim();
        if let Some(token) = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            && matches(token)
        {
            return Ok(());
        }
    }

    Err(JoblyError::Unauthorized)
}

/// Extractor guarding mutating routes.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<JoblyState> for RequireAdmin {
    type Rejection = JoblyError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &JoblyState,
    ) -> Result<Self, Self::Rejection> {
        ensure_admin(&parts.headers, &state.admin_key)?;
        Ok(Self)
    }
}
