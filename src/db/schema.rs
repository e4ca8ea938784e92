//! SQL DDL for initializing the companies/jobs store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `companies.handle` TEXT PRIMARY KEY, immutable after insert
/// - `jobs.id` INTEGER PRIMARY KEY AUTOINCREMENT, never reused
/// - `jobs.equity` TEXT holding a fixed-point decimal in [0, 1]
/// - `jobs.company_handle` cascading on company delete
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    handle TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    num_employees INTEGER NULL CHECK (num_employees >= 0),
    logo_url TEXT NULL
);

CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    salary INTEGER NULL CHECK (salary >= 0),
    equity TEXT NULL CHECK (CAST(equity AS REAL) <= 1.0),
    company_handle TEXT NOT NULL REFERENCES companies(handle) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_jobs_company_handle ON jobs(company_handle);
"#;
