use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Where the store lives.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// `DATABASE_URL`, scheme picks the adapter.
    Url(String),
    /// Discrete `DB_*` settings.
    Postgres(PostgresConfig),
    /// Nothing configured: whatever local store the binary was built with.
    Local,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: String,
    pub database: DatabaseConfig,
    pub max_connections: u32,
    pub password_hash_cost: Option<u32>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let server_port = lookup("SERVER_PORT").unwrap_or_else(|| DEFAULT_PORT.into());
        let max_connections =
            parse_opt(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let password_hash_cost = parse_opt(&lookup, "PASSWORD_HASH_COST")?;

        let database = if let Some(url) = lookup("DATABASE_URL") {
            DatabaseConfig::Url(url)
        } else if let Some(host) = lookup("DB_HOST") {
            let required = |key: &str| {
                lookup(key).with_context(|| format!("{key} must be set when DB_HOST is"))
            };
            DatabaseConfig::Postgres(PostgresConfig {
                host,
                port: parse_opt(&lookup, "DB_PORT")?.unwrap_or(DEFAULT_DB_PORT),
                user: required("DB_USER")?,
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                database: required("DB_DATABASE")?,
            })
        } else {
            DatabaseConfig::Local
        };

        Ok(Self {
            server_port,
            database,
            max_connections,
            password_hash_cost,
        })
    }
}

fn parse_opt<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| raw.parse::<T>().with_context(|| format!("invalid {key}: {raw}")))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_store_on_port_5000() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.server_port, "5000");
        assert_eq!(cfg.database, DatabaseConfig::Local);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.password_hash_cost, None);
    }

    #[test]
    fn discrete_postgres_settings() {
        let cfg = config(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
            ("DB_USER", "bar"),
            ("DB_PASSWORD", "p@ss"),
            ("DB_DATABASE", "cocktails"),
            ("PASSWORD_HASH_COST", "3"),
        ])
        .unwrap();
        assert_eq!(
            cfg.database,
            DatabaseConfig::Postgres(PostgresConfig {
                host: "db".into(),
                port: 6543,
                user: "bar".into(),
                password: "p@ss".into(),
                database: "cocktails".into(),
            })
        );
        assert_eq!(cfg.password_hash_cost, Some(3));
    }

    #[test]
    fn url_wins_over_discrete_settings() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://u:p@h/db"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(cfg.database, DatabaseConfig::Url("postgres://u:p@h/db".into()));
    }

    #[test]
    fn rejects_bad_numbers_and_missing_required() {
        assert!(config(&[("DB_HOST", "db"), ("DB_USER", "u"), ("DB_DATABASE", "d"), ("DB_PORT", "x")]).is_err());
        assert!(config(&[("DB_HOST", "db"), ("DB_DATABASE", "d")]).is_err());
        assert!(config(&[("PASSWORD_HASH_COST", "-1")]).is_err());
    }
}
