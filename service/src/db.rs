//! Database pool construction and startup schema bootstrap.

use anyhow::{anyhow, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Statements to bring up the initial schema. Applied one by one at startup;
/// every statement is idempotent.
pub const CREATE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_profiles (
        id UUID PRIMARY KEY,
        profile_id UUID NOT NULL UNIQUE,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        image_url TEXT,
        total_orders INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        last_login TEXT NOT NULL DEFAULT 'not logged in yet'
    )
    "#,
    // Lookups are by email on login; neither column is unique by design.
    r#"CREATE INDEX IF NOT EXISTS idx_accounts_email ON accounts (email)"#,
    r#"CREATE INDEX IF NOT EXISTS idx_user_profiles_email ON user_profiles (email)"#,
];

pub async fn init_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    Ok(pool)
}

pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in CREATE_SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| anyhow!("Schema bootstrap failed: {}", e))?;
    }

    Ok(())
}
