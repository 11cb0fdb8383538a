use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use userhub_models::users::{
    InsertProfileRequest, LoginRequest, ProfileView, UpdateProfileRequest,
};

use crate::services::{ProfileService, SecurityService};

pub async fn insert(
    request: web::Json<InsertProfileRequest>,
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

    let profile_service = ProfileService::new(pool.get_ref().clone());

    match profile_service
        .insert_profile(
            &request.name,
            &request.email,
            &password_hash,
            request.image.as_deref(),
        )
        .await
    {
        Ok(profile) => {
            tracing::info!("Inserted profile {} ({})", profile.email, profile.profile_id);
            Ok(HttpResponse::Ok().json(json!({
                "msg": "New user data has been added successfully"
            })))
        }
        Err(e) => {
            tracing::error!("Failed to insert profile: {}", e);
            Ok(HttpResponse::BadRequest().json(json!({ "error": e.to_string() })))
        }
    }
}

pub async fn all_data(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let profile_service = ProfileService::new(pool.get_ref().clone());

    match profile_service.list_profiles().await {
        Ok(profiles) => {
            let views: Vec<ProfileView> = profiles.into_iter().map(ProfileView::from).collect();
            Ok(HttpResponse::Ok().json(json!({ "msg": views })))
        }
        Err(e) => {
            tracing::error!("Failed to list profiles: {}", e);
            Ok(HttpResponse::BadRequest().json(json!({ "error": e.to_string() })))
        }
    }
}

pub async fn details(user_id: web::Path<String>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    // An unparseable id cannot match any profile.
    let profile_id = match Uuid::parse_str(&user_id) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::NotFound().json(json!({ "error": "User not found" })));
        }
    };

    let profile_service = ProfileService::new(pool.get_ref().clone());

    match profile_service.find_by_profile_id(profile_id).await {
        Ok(Some(profile)) => {
            Ok(HttpResponse::Ok().json(json!({ "user_data": ProfileView::from(profile) })))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(json!({ "error": "User not found" }))),
        Err(e) => {
            tracing::error!("Profile lookup failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })))
        }
    }
}

pub async fn image(user_id: web::Path<String>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let profile_id = match Uuid::parse_str(&user_id) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::NotFound().json(json!({ "error": "User not found" })));
        }
    };

    let profile_service = ProfileService::new(pool.get_ref().clone());

    match profile_service.find_by_profile_id(profile_id).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(json!({ "user_data": profile.image_url }))),
        Ok(None) => Ok(HttpResponse::NotFound().json(json!({ "error": "User not found" }))),
        Err(e) => {
            tracing::error!("Profile lookup failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })))
        }
    }
}

pub async fn update(
    user_id: web::Path<String>,
    request: web::Json<UpdateProfileRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    if let Err(validation_errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Validation failed",
            "details": validation_errors
        })));
    }

    // Updating an unknown or unparseable id is a no-op that still succeeds,
    // matching delete's idempotent contract.
    if let Ok(profile_id) = Uuid::parse_str(&user_id) {
        let profile_service = ProfileService::new(pool.get_ref().clone());

        if let Err(e) = profile_service.update_profile(profile_id, &request).await {
            tracing::error!("Failed to update profile {}: {}", profile_id, e);
            return Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })));
        }
    }

    Ok(HttpResponse::Ok().json(json!({ "msg": "User data has been updated" })))
}

pub async fn delete(user_id: web::Path<String>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    if let Ok(profile_id) = Uuid::parse_str(&user_id) {
        let profile_service = ProfileService::new(pool.get_ref().clone());

        if let Err(e) = profile_service.delete_profile(profile_id).await {
            tracing::error!("Failed to delete profile {}: {}", profile_id, e);
            return Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })));
        }
    }

    Ok(HttpResponse::Ok().json(json!({ "msg": "User data has been deleted" })))
}

pub async fn user_login(
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

    let profile_service = ProfileService::new(pool.get_ref().clone());

    let profile = match profile_service.find_by_email(&request.email).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(json!({ "msg": "Email does not exist" })));
        }
        Err(e) => {
            tracing::error!("Profile lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })));
        }
    };

    match security.verify_password(&request.password, &profile.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Unauthorized().json(json!({ "msg": "Password is incorrect" })));
        }
        Err(e) => {
            tracing::error!(
                "Stored hash for profile {} is malformed: {}",
                profile.profile_id,
                e
            );
            return Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })));
        }
    }

    // Best effort; a failed marker update must not fail the login.
    if let Err(e) = profile_service.record_login(profile.profile_id).await {
        tracing::warn!(
            "Failed to record login for profile {}: {}",
            profile.profile_id,
            e
        );
    }

    Ok(HttpResponse::Ok().json(json!({ "msg": "Login successful" })))
}
