#![allow(dead_code)]

use jobly::db::SqlitePool;
use jobly::db::models::{Company, Job, NewCompany, NewJob};
use jobly::db::{companies, jobs};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// A fresh in-memory database. One pinned connection, since every
/// `:memory:` connection is its own database.
pub async fn test_pool() -> SqlitePool {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true)
        .with_regexp();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await
        .expect("failed to open in-memory sqlite");
    jobly::db::init_schema(&pool)
        .await
        .expect("failed to init schema");
    pool
}

pub fn new_company(handle: &str, name: &str, num_employees: Option<i64>) -> NewCompany {
    NewCompany {
        handle: handle.to_string(),
        name: name.to_string(),
        description: format!("Desc {name}"),
        num_employees,
        logo_url: Some(format!("http://{handle}.img")),
    }
}

pub fn new_job(title: &str, salary: Option<i64>, equity: Option<&str>, handle: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        salary,
        equity: equity.map(|e| e.parse().expect("valid equity")),
        company_handle: handle.to_string(),
    }
}

pub struct Seeded {
    pub companies: Vec<Company>,
    pub jobs: Vec<Job>,
}

/// Three companies (c1..c3, 1..3 employees) and four jobs, all under c1:
/// salaries 100/200/300/none, equity 0.1/0.2/0/none.
pub async fn seed(pool: &SqlitePool) -> Seeded {
    let mut seeded_companies = Vec::new();
    for (handle, name, size) in [("c1", "C1", 1), ("c2", "C2", 2), ("c3", "C3", 3)] {
        let company = companies::create(pool, &new_company(handle, name, Some(size)))
            .await
            .expect("seed company");
        seeded_companies.push(company);
    }

    let mut seeded_jobs = Vec::new();
    for job in [
        new_job("Job1", Some(100), Some("0.1"), "c1"),
        new_job("Job2", Some(200), Some("0.2"), "c1"),
        new_job("Job3", Some(300), Some("0"), "c1"),
        new_job("Job4", None, None, "c1"),
    ] {
        seeded_jobs.push(jobs::create(pool, &job).await.expect("seed job"));
    }

    Seeded {
        companies: seeded_companies,
        jobs: seeded_jobs,
    }
}
