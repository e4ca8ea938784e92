//! Database module: schema, models and the per-table managers.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool construction and schema bootstrap
//! - `models.rs`: records, input/patch types and filters
//! - `sql.rs`: placeholder-safe statement fragments
//! - `companies.rs` / `jobs.rs`: managers, free functions over a `&SqlitePool`

pub mod companies;
pub mod jobs;
pub mod models;
pub mod schema;
pub mod sql;
pub mod sqlite;

pub use models::{Company, CompanyDetail, Equity, Job};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, connect, init_schema};
