use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

pub mod model;

fn make_pg_connect_options(cfg: &DatabaseConfig) -> AppResult<PgConnectOptions> {
    // DATABASE_URL が指定されていればそちらを優先する
    if let Some(url) = &cfg.url {
        return url.trim().parse().map_err(AppError::ConnectionError);
    }
    Ok(PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.username)
        .password(&cfg.password)
        .database(&cfg.database))
}

#[derive(Clone)]
pub struct ConnectionPool(PgPool);

impl ConnectionPool {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &PgPool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Postgres>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }

    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(self.inner_ref()).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.0.close().await;
    }
}

/// 接続できるまで一定間隔で再試行する。
///
/// `connect_attempts` 回失敗した時点で諦め、最後のエラーを返す。
pub async fn connect_database_with_retry(cfg: &DatabaseConfig) -> AppResult<ConnectionPool> {
    let options = make_pg_connect_options(cfg)?;
    let mut attempt = 1;
    loop {
        match PgPoolOptions::new().connect_with(options.clone()).await {
            Ok(pool) => {
                tracing::info!(attempt, "Connected to database");
                return Ok(ConnectionPool(pool));
            }
            Err(e) if attempt < cfg.connect_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = cfg.connect_attempts,
                    backoff = ?cfg.connect_backoff,
                    error.message = %e,
                    "Failed to connect to database, retrying"
                );
                tokio::time::sleep(cfg.connect_backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(AppError::ConnectionError(e)),
        }
    }
}
