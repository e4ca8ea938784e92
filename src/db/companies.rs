//! Company manager: every read and write against the `companies` table.

use crate::db::jobs::JOB_COLUMNS;
use crate::db::models::{Company, CompanyDetail, CompanyFilter, CompanyUpdate, Job, NewCompany};
use crate::db::sql::{self, SqlValue};
use crate::db::sqlite::SqlitePool;
use crate::error::JoblyError;
use tracing::{debug, info};

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// External field name -> storage column, where they differ.
const COLUMN_ALIASES: &[(&str, &str)] =
    &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

fn not_found(handle: &str) -> JoblyError {
    JoblyError::NotFound(format!("No company: {handle}"))
}

/// A UNIQUE violation that slipped past the pre-check (racing create, or a
/// name clash) still surfaces as a duplicate rather than a store failure.
/// The message names whichever key actually clashed.
fn duplicate_or(err: sqlx::Error, handle: &str, name: Option<&str>) -> JoblyError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match name {
                Some(name) if db_err.message().contains("companies.name") => {
                    JoblyError::Duplicate(format!("Duplicate company name: {name}"))
                }
                _ => JoblyError::Duplicate(format!("Duplicate company: {handle}")),
            }
        }
        _ => err.into(),
    }
}

pub async fn create(pool: &SqlitePool, new: &NewCompany) -> Result<Company, JoblyError> {
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT handle FROM companies WHERE handle = $1")
            .bind(new.handle.as_str())
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(JoblyError::Duplicate(format!(
            "Duplicate company: {}",
            new.handle
        )));
    }

    let insert = format!(
        "INSERT INTO companies ({COMPANY_COLUMNS}) VALUES ($1, $2, $3, $4, $5) \
         RETURNING {COMPANY_COLUMNS}"
    );
    let company = sqlx::query_as::<_, Company>(&insert)
        .bind(new.handle.as_str())
        .bind(new.name.as_str())
        .bind(new.description.as_str())
        .bind(new.num_employees)
        .bind(new.logo_url.as_deref())
        .fetch_one(pool)
        .await
        .map_err(|e| duplicate_or(e, &new.handle, Some(&new.name)))?;

    info!(handle = %company.handle, "company created");
    Ok(company)
}

pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Company>, JoblyError> {
    find_filtered(pool, &CompanyFilter::default()).await
}

/// Companies matching every present filter key, ordered by name.
///
/// `min_employees <= max_employees` is the caller's to check.
pub async fn find_filtered(
    pool: &SqlitePool,
    filter: &CompanyFilter,
) -> Result<Vec<Company>, JoblyError> {
    let (conditions, values) = filter_clauses(filter);
    let query = format!(
        "SELECT {COMPANY_COLUMNS} FROM companies{} ORDER BY name",
        sql::where_sql(&conditions)
    );
    debug!(%query, "listing companies");

    let companies = sql::bind_values(sqlx::query_as::<_, Company>(&query), values)
        .fetch_all(pool)
        .await?;
    Ok(companies)
}

fn filter_clauses(filter: &CompanyFilter) -> (Vec<String>, Vec<SqlValue>) {
    let mut conditions = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(name) = &filter.name {
        values.push(sql::contains_pattern(name).into());
        conditions.push(format!("name REGEXP ${}", values.len()));
    }
    if let Some(min) = filter.min_employees {
        values.push(min.into());
        conditions.push(format!("num_employees >= ${}", values.len()));
    }
    if let Some(max) = filter.max_employees {
        values.push(max.into());
        conditions.push(format!("num_employees <= ${}", values.len()));
    }

    (conditions, values)
}

/// A company with its jobs (ordered by id, possibly empty).
pub async fn get(pool: &SqlitePool, handle: &str) -> Result<CompanyDetail, JoblyError> {
    let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
    let company = sqlx::query_as::<_, Company>(&query)
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(handle))?;

    let jobs_query =
        format!("SELECT {JOB_COLUMNS} FROM jobs WHERE company_handle = $1 ORDER BY id");
    let jobs = sqlx::query_as::<_, Job>(&jobs_query)
        .bind(handle)
        .fetch_all(pool)
        .await?;

    Ok(CompanyDetail { company, jobs })
}

/// Apply the fields present in `data`; absent fields keep their value.
pub async fn update(
    pool: &SqlitePool,
    handle: &str,
    data: &CompanyUpdate,
) -> Result<Company, JoblyError> {
    let fields = data.fields();
    let update = sql::sql_for_partial_update(&fields, COLUMN_ALIASES)?;
    let query = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_COLUMNS}",
        update.set_cols,
        update.next_placeholder()
    );

    let company = sql::bind_values(sqlx::query_as::<_, Company>(&query), update.values)
        .bind(handle)
        .fetch_optional(pool)
        .await
        .map_err(|e| duplicate_or(e, handle, data.name.as_deref()))?
        .ok_or_else(|| not_found(handle))?;

    info!(handle, "company updated");
    Ok(company)
}

/// Delete a company; its jobs go with it.
pub async fn remove(pool: &SqlitePool, handle: &str) -> Result<(), JoblyError> {
    let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(handle));
    }

    info!(handle, "company removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_yields_no_clauses() {
        let (conditions, values) = filter_clauses(&CompanyFilter::default());
        assert!(conditions.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn every_key_binds_its_own_placeholder() {
        let filter = CompanyFilter {
            name: Some("net".into()),
            min_employees: Some(2),
            max_employees: Some(300),
        };
        let (conditions, values) = filter_clauses(&filter);
        assert_eq!(
            conditions,
            vec![
                "name REGEXP $1".to_string(),
                "num_employees >= $2".to_string(),
                "num_employees <= $3".to_string(),
            ]
        );
        assert_eq!(
            values,
            vec![
                SqlValue::Text("(?i)net".into()),
                SqlValue::Integer(2),
                SqlValue::Integer(300),
            ]
        );
    }

    #[test]
    fn bounds_alone_number_from_one() {
        let filter = CompanyFilter {
            max_employees: Some(5),
            ..Default::default()
        };
        let (conditions, values) = filter_clauses(&filter);
        assert_eq!(conditions, vec!["num_employees <= $1".to_string()]);
        assert_eq!(values, vec![SqlValue::Integer(5)]);
    }
}
