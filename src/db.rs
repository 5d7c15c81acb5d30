use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::{debug, info};

use crate::{config::AppConfig, models::User};

/// Table definition for a model persisted by `Database::create_all`.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub ddl: &'static str,
}

/// Every model whose table `create_all` is responsible for.
pub const MODELS: &[TableDef] = &[User::TABLE];

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Builds the pool without connecting; the file is created on first use.
    pub fn connect_lazy(config: &AppConfig) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .with_context(|| format!("parse database url {}", config.database_url))?
            .create_if_missing(true);

        // Idle connections are never reaped so an in-memory database survives
        // between requests.
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>)
            .connect_lazy_with(options);

        debug!(url = %config.database_url, "database handle created");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn create_all(&self) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await.context("begin create_all")?;
        for table in MODELS {
            sqlx::query(table.ddl)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("create table {}", table.name))?;
            debug!(table = table.name, "table ensured");
        }
        tx.commit().await.context("commit create_all")?;
        info!(tables = MODELS.len(), "schema created");
        Ok(())
    }

    pub async fn table_names(&self) -> anyhow::Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_all_builds_only_user_table() {
        let db = Database::connect_lazy(&AppConfig::in_memory()).expect("lazy pool");
        assert!(db.table_names().await.unwrap().is_empty());

        db.create_all().await.expect("create_all");
        assert_eq!(db.table_names().await.unwrap(), vec!["user".to_string()]);
    }

    #[tokio::test]
    async fn create_all_is_idempotent() {
        let db = Database::connect_lazy(&AppConfig::in_memory()).expect("lazy pool");
        db.create_all().await.expect("first create_all");
        db.create_all().await.expect("second create_all");
        assert_eq!(db.table_names().await.unwrap().len(), 1);
    }
}
