use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} must be a number, got '{value}'")]
    NotANumber { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub db_user: String,
    pub db_password: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    /// Full connection string; takes precedence over the `DB_*` keys.
    pub database_url: Option<String>,
    pub midtrans_server_key: String,
    pub midtrans_client_key: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_secs: u64,
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL");
        // The DB_* keys are only mandatory without a full URL.
        let db_key = |key: &'static str| match &database_url {
            Some(_) => Ok(lookup(key).unwrap_or_default()),
            None => required(key),
        };

        Ok(Self {
            db_user: db_key("DB_USER")?,
            db_password: db_key("DB_PASSWORD")?,
            db_host: db_key("DB_HOST")?,
            db_port: parse_number("DB_PORT", &or_default("DB_PORT", "5432"))?,
            db_name: db_key("DB_NAME")?,
            database_url: database_url.clone(),
            midtrans_server_key: or_default("MIDTRANS_SERVER_KEY", ""),
            midtrans_client_key: or_default("MIDTRANS_CLIENT_KEY", ""),
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration_hours: parse_number(
                "JWT_EXPIRATION_HOURS",
                &or_default("JWT_EXPIRATION_HOURS", "24"),
            )?,
            server_host: or_default("SERVER_HOST", "0.0.0.0"),
            server_port: parse_number("SERVER_PORT", &or_default("SERVER_PORT", "3000"))?,
            request_timeout_secs: parse_number(
                "REQUEST_TIMEOUT_SECS",
                &or_default("REQUEST_TIMEOUT_SECS", "30"),
            )?,
            admin_email: or_default("ADMIN_EMAIL", "admin@travel.local"),
            admin_password: or_default("ADMIN_PASSWORD", "admin123"),
        })
    }

    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
            ),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_database_url_from_parts() {
        let config = Config::from_lookup(lookup(&[
            ("DB_USER", "travel"),
            ("DB_PASSWORD", "secret"),
            ("DB_HOST", "db"),
            ("DB_PORT", "5433"),
            ("DB_NAME", "booking"),
            ("JWT_SECRET", "jwt"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url(),
            "postgres://travel:secret@db:5433/booking"
        );
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_database_url_override() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x@y/z"),
            ("JWT_SECRET", "jwt"),
        ]))
        .unwrap();
        assert_eq!(config.database_url(), "postgres://x@y/z");
    }

    #[test]
    fn test_missing_keys() {
        let err = Config::from_lookup(lookup(&[("JWT_SECRET", "jwt")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DB_USER"));
    }

    #[test]
    fn test_bad_port() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x@y/z"),
            ("JWT_SECRET", "jwt"),
            ("SERVER_PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { key: "SERVER_PORT", .. }));
    }
}
