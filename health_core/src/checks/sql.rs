//! SQL check for any database sqlx can reach through its `Any` driver
//! (postgres, mysql, sqlite). Connects fresh on every run so a dead pool
//! can't mask an outage.

use crate::error::{HealthError, Result};
use crate::health::{Check, CheckContext};
use anyhow::Context;
use sqlx::{AnyConnection, Connection};

pub struct SqlCheck {
    dsn: String,
}

impl SqlCheck {
    pub fn new(dsn: impl Into<String>) -> Result<Self> {
        let dsn = dsn.into();
        if dsn.is_empty() {
            return Err(HealthError::Validation("SQL check DSN cannot be empty".to_string()));
        }

        sqlx::any::install_default_drivers();
        Ok(Self { dsn })
    }
}

#[async_trait::async_trait]
impl Check for SqlCheck {
    async fn check(&self, _ctx: CheckContext) -> anyhow::Result<()> {
        let mut conn = AnyConnection::connect(&self.dsn)
            .await
            .context("opening the database connection failed")?;

        conn.ping().await.context("pinging the database failed")?;

        sqlx::query("SELECT 1")
            .execute(&mut conn)
            .await
            .context("running the test query failed")?;

        conn.close().await.context("closing the database connection failed")?;
        Ok(())
    }
}
