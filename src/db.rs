use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::remote::{Cell, SheetAppender};

pub async fn connect(config: &StoreConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")
}

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Append-only sheet stored as Postgres rows, one JSON array of cells each.
pub struct PgSheet {
    pool: PgPool,
    sheet: String,
}

impl PgSheet {
    pub fn new(pool: PgPool, sheet: impl Into<String>) -> Self {
        Self {
            pool,
            sheet: sheet.into(),
        }
    }
}

#[async_trait]
impl SheetAppender for PgSheet {
    async fn append(&self, row: &[Cell]) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bootcamp_scorecard.sheet_rows (id, sheet, cells, appended_at)
            VALUES ($1, $2, $3, now())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&self.sheet)
        .bind(Json(row.to_vec()))
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to append row to sheet '{}'", self.sheet))?;

        Ok(())
    }
}
