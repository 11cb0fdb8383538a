use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use userhub_models::users::{LoginRequest, LoginResponse, SignupRequest};

use crate::services::{AccountService, SecurityService};

pub async fn signup(
    request: web::Json<SignupRequest>,
    pool: web::Data<PgPool>,
    security: web::Data<SecurityService>,
) -> Result<HttpResponse> {
    if let Err(validation_errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Validation failed",
            "details": validation_errors
        })));
    }

    let password_hash = match security.hash_password(&request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return Ok(HttpResponse::BadRequest().json(json!({ "error": e.to_string() })));
        }
    };

    let account_service = AccountService::new(pool.get_ref().clone());

    match account_service
        .create_account(&request.name, &request.email, &password_hash)
        .await
    {
        Ok(account) => {
            tracing::info!("Registered new account {} ({})", account.email, account.id);
            Ok(HttpResponse::Ok().json(json!({
                "msg": "New user has been registered successfully"
            })))
        }
        Err(e) => {
            tracing::error!("Failed to create account: {}", e);
            Ok(HttpResponse::BadRequest().json(json!({ "error": e.to_string() })))
        }
    }
}

pub async fn login(
    request: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    security: web::Data<SecurityService>,
) -> Result<HttpResponse> {
    if let Err(validation_errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Validation failed",
            "details": validation_errors
        })));
    }

    let account_service = AccountService::new(pool.get_ref().clone());

    let account = match account_service.find_by_email(&request.email).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(json!({ "msg": "Email does not exist" })));
        }
        Err(e) => {
            tracing::error!("Account lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })));
        }
    };

    match security.verify_password(&request.password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Unauthorized().json(json!({ "msg": "Password is incorrect" })));
        }
        Err(e) => {
            tracing::error!("Stored hash for account {} is malformed: {}", account.id, e);
            return Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })));
        }
    }

    let (access_token, _expires_at) = match security.issue_token(account.id) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to issue token for account {}: {}", account.id, e);
            return Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })));
        }
    };

    Ok(HttpResponse::Ok().json(LoginResponse {
        msg: "Login successful".to_string(),
        access_token,
        username: account.name,
    }))
}
