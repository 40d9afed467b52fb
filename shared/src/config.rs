use std::{
    net::{IpAddr, Ipv4Addr},
    str::FromStr,
    time::Duration,
};

use anyhow::{bail, Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub storage: StorageBackend,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // 環境変数の読み出し元を差し替えられるようにしておく（テスト用）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: get("DATABASE_HOST", "localhost"),
            port: parse_var("DATABASE_PORT", &get("DATABASE_PORT", "5432"))?,
            username: get("DATABASE_USERNAME", "app"),
            password: get("DATABASE_PASSWORD", "passwd"),
            database: get("DATABASE_NAME", "app"),
            connect_attempts: parse_var(
                "DATABASE_CONNECT_ATTEMPTS",
                &get("DATABASE_CONNECT_ATTEMPTS", "5"),
            )?,
            connect_backoff: Duration::from_secs(parse_var(
                "DATABASE_CONNECT_BACKOFF_SECS",
                &get("DATABASE_CONNECT_BACKOFF_SECS", "5"),
            )?),
        };
        if database.connect_attempts == 0 {
            bail!("DATABASE_CONNECT_ATTEMPTS must be at least 1");
        }

        let server = ServerConfig {
            host: parse_var("HOST", &get("HOST", &Ipv4Addr::UNSPECIFIED.to_string()))?,
            port: parse_var("PORT", &get("PORT", "8080"))?,
        };

        let storage = parse_var("STORAGE_BACKEND", &get("STORAGE_BACKEND", "postgres"))?;

        Ok(Self {
            database,
            server,
            storage,
        })
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {key}: {value:?}"))
}

pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub connect_attempts: u32,
    pub connect_backoff: Duration,
}

pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown storage backend: {0}")]
pub struct UnknownStorageBackend(String);

impl FromStr for StorageBackend {
    type Err = UnknownStorageBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(UnknownStorageBackend(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() -> Result<()> {
        let cfg = config_from(&[])?;
        assert_eq!(cfg.database.url, None);
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, 5432);
        assert_eq!(cfg.database.connect_attempts, 5);
        assert_eq!(cfg.database.connect_backoff, Duration::from_secs(5));
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage, StorageBackend::Postgres);
        Ok(())
    }

    #[test]
    fn overrides_are_read() -> Result<()> {
        let cfg = config_from(&[
            ("DATABASE_URL", "postgres://u:p@db:5432/booking"),
            ("PORT", "3000"),
            ("STORAGE_BACKEND", "memory"),
            ("DATABASE_CONNECT_ATTEMPTS", "2"),
        ])?;
        assert_eq!(
            cfg.database.url.as_deref(),
            Some("postgres://u:p@db:5432/booking")
        );
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.storage, StorageBackend::Memory);
        assert_eq!(cfg.database.connect_attempts, 2);
        Ok(())
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "redis")]).is_err());
        assert!(config_from(&[("DATABASE_CONNECT_ATTEMPTS", "0")]).is_err());
    }
}
