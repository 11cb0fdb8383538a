use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Marker stored in `last_login` until the first successful profile login.
pub const NEVER_LOGGED_IN: &str = "not logged in yet";

/// Primary credential record created at signup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Secondary user record with image, order counter and login-history fields.
///
/// Public routes key on `profile_id`, an opaque identifier assigned at
/// creation, never on the row id.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image_url: Option<String>,
    pub total_orders: i32,
    pub created_at: DateTime<Utc>,
    pub last_login: String,
}

/// Client-facing projection of a [`Profile`]; the password hash never leaves
/// the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub profile_id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub total_orders: i32,
    pub created_at: DateTime<Utc>,
    pub last_login: String,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        ProfileView {
            profile_id: profile.profile_id,
            name: profile.name,
            email: profile.email,
            image_url: profile.image_url,
            total_orders: profile.total_orders,
            created_at: profile.created_at,
            last_login: profile.last_login,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InsertProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub image: Option<String>,
}

/// Partial update: only the submitted fields are persisted. Passwords are
/// deliberately not updatable through this request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub image: Option<String>,
    pub total_orders: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub msg: String,
    pub access_token: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}
