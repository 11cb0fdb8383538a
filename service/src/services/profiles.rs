use anyhow::{anyhow, Result};
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use userhub_models::users::{Profile, UpdateProfileRequest, NEVER_LOGGED_IN};

pub struct ProfileService {
    pool: PgPool,
}

fn map_profile(row: PgRow) -> Profile {
    Profile {
        id: row.get("id"),
        profile_id: row.get("profile_id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        image_url: row.get("image_url"),
        total_orders: row.get("total_orders"),
        created_at: row.get("created_at"),
        last_login: row.get("last_login"),
    }
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new profile under a freshly generated opaque identifier.
    pub async fn insert_profile(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        image_url: Option<&str>,
    ) -> Result<Profile> {
        let row_id = Uuid::new_v4();
        let profile_id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO user_profiles (
                id, profile_id, name, email, password_hash, image_url,
                total_orders, created_at, last_login
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row_id)
        .bind(profile_id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(image_url)
        .bind(0_i32)
        .bind(now)
        .bind(NEVER_LOGGED_IN)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Database error creating profile: {:?}", e);
            anyhow!("Failed to create profile: {}", e)
        })?;

        Ok(Profile {
            id: row_id,
            profile_id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            image_url: image_url.map(|s| s.to_string()),
            total_orders: 0,
            created_at: now,
            last_login: NEVER_LOGGED_IN.to_string(),
        })
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let rows = sqlx::query(
            r#"
            SELECT id, profile_id, name, email, password_hash, image_url,
                   total_orders, created_at, last_login
            FROM user_profiles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list profiles: {}", e))?;

        Ok(rows.into_iter().map(map_profile).collect())
    }

    pub async fn find_by_profile_id(&self, profile_id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query(
            r#"
            SELECT id, profile_id, name, email, password_hash, image_url,
                   total_orders, created_at, last_login
            FROM user_profiles
            WHERE profile_id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Database error: {}", e))?;

        Ok(row.map(map_profile))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let row = sqlx::query(
            r#"
            SELECT id, profile_id, name, email, password_hash, image_url,
                   total_orders, created_at, last_login
            FROM user_profiles
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Database error: {}", e))?;

        Ok(row.map(map_profile))
    }

    /// Partial update: only the submitted fields are written, the rest keep
    /// their stored values. Updating an unknown id is a no-op.
    pub async fn update_profile(
        &self,
        profile_id: Uuid,
        update: &UpdateProfileRequest,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                image_url = COALESCE($4, image_url),
                total_orders = COALESCE($5, total_orders)
            WHERE profile_id = $1
            "#,
        )
        .bind(profile_id)
        .bind(update.name.as_ref())
        .bind(update.email.as_ref())
        .bind(update.image.as_ref())
        .bind(update.total_orders)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to update profile: {}", e))?;

        Ok(())
    }

    /// Deleting an unknown id succeeds; the operation is idempotent in effect.
    pub async fn delete_profile(&self, profile_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM user_profiles WHERE profile_id = $1")
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete profile: {}", e))?;

        Ok(())
    }

    /// Overwrites the last-login marker with the current timestamp.
    pub async fn record_login(&self, profile_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE user_profiles SET last_login = $1 WHERE profile_id = $2")
            .bind(Utc::now().to_rfc3339())
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to record login: {}", e))?;

        Ok(())
    }
}
