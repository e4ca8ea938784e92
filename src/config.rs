use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Process-wide configuration, loaded once from defaults and `JOBLY_*` env vars.
pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("invalid jobly configuration"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// sqlx connection string, e.g. `sqlite:jobly.db` or `sqlite::memory:`.
    pub database_url: String,
    pub database_max_connections: u32,
    pub listen_addr: String,
    pub loglevel: String,
    /// Pre-shared key required on mutating routes. Empty denies every mutation.
    pub admin_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:jobly.db".to_string(),
            database_max_connections: 5,
            listen_addr: "0.0.0.0:3001".to_string(),
            loglevel: "info".to_string(),
            admin_key: String::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("JOBLY_"))
    }
}
