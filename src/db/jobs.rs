//! Job manager: every read and write against the `jobs` table.

use crate::db::models::{Job, JobFilter, JobUpdate, NewJob};
use crate::db::sql::{self, SqlValue};
use crate::db::sqlite::SqlitePool;
use crate::error::JoblyError;
use tracing::{debug, info};

pub(crate) const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

fn not_found(id: i64) -> JoblyError {
    JoblyError::NotFound(format!("No job: {id}"))
}

fn no_company(handle: &str) -> JoblyError {
    JoblyError::BadRequest(format!("No company: {handle}"))
}

/// The company vanished between the existence check and the insert.
fn no_company_or(err: sqlx::Error, handle: &str) -> JoblyError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => no_company(handle),
        _ => err.into(),
    }
}

/// Insert a job under an existing company. The company is checked up front so
/// a bad handle reads as a bad request, not a foreign-key failure.
pub async fn create(pool: &SqlitePool, new: &NewJob) -> Result<Job, JoblyError> {
    let company: Option<(String,)> =
        sqlx::query_as("SELECT handle FROM companies WHERE handle = $1")
            .bind(new.company_handle.as_str())
            .fetch_optional(pool)
            .await?;
    if company.is_none() {
        return Err(no_company(&new.company_handle));
    }

    let insert = format!(
        "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) \
         RETURNING {JOB_COLUMNS}"
    );
    let job = sqlx::query_as::<_, Job>(&insert)
        .bind(new.title.as_str())
        .bind(new.salary)
        .bind(new.equity.as_ref().map(|e| e.as_str()))
        .bind(new.company_handle.as_str())
        .fetch_one(pool)
        .await
        .map_err(|e| no_company_or(e, &new.company_handle))?;

    info!(id = job.id, company_handle = %job.company_handle, "job created");
    Ok(job)
}

pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Job>, JoblyError> {
    find_filtered(pool, &JobFilter::default()).await
}

/// Jobs matching every present filter key, ordered by id.
pub async fn find_filtered(pool: &SqlitePool, filter: &JobFilter) -> Result<Vec<Job>, JoblyError> {
    let (conditions, values) = filter_clauses(filter);
    let query = format!(
        "SELECT {JOB_COLUMNS} FROM jobs{} ORDER BY id",
        sql::where_sql(&conditions)
    );
    debug!(%query, "listing jobs");

    let jobs = sql::bind_values(sqlx::query_as::<_, Job>(&query), values)
        .fetch_all(pool)
        .await?;
    Ok(jobs)
}

fn filter_clauses(filter: &JobFilter) -> (Vec<String>, Vec<SqlValue>) {
    let mut conditions = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(title) = &filter.title {
        values.push(sql::contains_pattern(title).into());
        conditions.push(format!("title REGEXP ${}", values.len()));
    }
    if let Some(min_salary) = filter.min_salary {
        values.push(min_salary.into());
        conditions.push(format!("salary >= ${}", values.len()));
    }
    // hasEquity=false places no constraint
    if filter.has_equity == Some(true) {
        conditions.push("CAST(equity AS REAL) > 0".to_string());
    }

    (conditions, values)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Job, JoblyError> {
    let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
    let job = sqlx::query_as::<_, Job>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(job)
}

/// Apply the fields present in `data`. `id` and `company_handle` are never
/// part of a [`JobUpdate`].
pub async fn update(pool: &SqlitePool, id: i64, data: &JobUpdate) -> Result<Job, JoblyError> {
    let fields = data.fields();
    let update = sql::sql_for_partial_update(&fields, &[])?;
    let query = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
        update.set_cols,
        update.next_placeholder()
    );

    let job = sql::bind_values(sqlx::query_as::<_, Job>(&query), update.values)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(id, "job updated");
    Ok(job)
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<(), JoblyError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    info!(id, "job removed");
    Ok(())
}
