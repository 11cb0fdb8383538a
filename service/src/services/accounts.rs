use anyhow::{anyhow, Result};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use userhub_models::users::Account;

pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new account. Email uniqueness is not checked; duplicate
    /// signups create duplicate rows and login resolves the first match.
    pub async fn create_account(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account> {
        let account_id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO accounts (id, name, email, password_hash) VALUES ($1, $2, $3, $4)",
        )
        .bind(account_id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Database error creating account: {:?}", e);
            anyhow!("Failed to create account: {}", e)
        })?;

        log::info!("Successfully created account: {} ({})", email, account_id);

        Ok(Account {
            id: account_id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash FROM accounts WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Database error: {}", e))?;

        Ok(row.map(|row| Account {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
        }))
    }
}
