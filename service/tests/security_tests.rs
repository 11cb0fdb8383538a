use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use userhub_config::AppConfig;
use userhub_users::services::{AuthMiddlewareFactory, SecurityService};

fn test_config(secret: &str, ttl_minutes: i64) -> AppConfig {
    AppConfig {
        port: 0,
        database_url: String::new(),
        jwt_secret: secret.to_string(),
        token_ttl_minutes: ttl_minutes,
        // Minimum bcrypt cost keeps the tests fast.
        bcrypt_cost: 4,
    }
}

fn security() -> SecurityService {
    SecurityService::new(&test_config("test_secret", 10))
}

#[core::prelude::v1::test]
fn password_roundtrip_verifies() {
    let security = security();

    let hash = security.hash_password("hunter2").unwrap();
    assert!(security.verify_password("hunter2", &hash).unwrap());
    assert!(!security.verify_password("hunter3", &hash).unwrap());
}

#[core::prelude::v1::test]
fn hashes_are_salted_per_call() {
    let security = security();

    let first = security.hash_password("hunter2").unwrap();
    let second = security.hash_password("hunter2").unwrap();

    assert_ne!(first, second);
    assert!(security.verify_password("hunter2", &first).unwrap());
    assert!(security.verify_password("hunter2", &second).unwrap());
}

#[core::prelude::v1::test]
fn malformed_hash_is_an_error_not_a_mismatch() {
    let security = security();

    assert!(security
        .verify_password("hunter2", "definitely-not-a-bcrypt-hash")
        .is_err());
}

#[core::prelude::v1::test]
fn token_roundtrip_carries_the_subject() {
    let security = security();
    let account_id = Uuid::new_v4();

    let (token, expires_at) = security.issue_token(account_id).unwrap();
    assert!(expires_at > chrono::Utc::now());

    let claims = security.verify_token(&token).unwrap();
    assert_eq!(claims.sub, account_id.to_string());
    assert!(claims.exp > claims.iat);
}

#[core::prelude::v1::test]
fn expired_token_is_rejected() {
    // Negative TTL issues a token that is already past its expiry, beyond
    // the validator's clock-skew leeway.
    let expired = SecurityService::new(&test_config("test_secret", -5));

    let (token, _) = expired.issue_token(Uuid::new_v4()).unwrap();
    assert!(expired.verify_token(&token).is_err());
}

#[core::prelude::v1::test]
fn token_signed_with_another_secret_is_rejected() {
    let issuer = SecurityService::new(&test_config("one_secret", 10));
    let verifier = SecurityService::new(&test_config("another_secret", 10));

    let (token, _) = issuer.issue_token(Uuid::new_v4()).unwrap();
    assert!(verifier.verify_token(&token).is_err());
}

#[core::prelude::v1::test]
fn tampered_token_is_rejected() {
    let security = security();

    let (token, _) = security.issue_token(Uuid::new_v4()).unwrap();
    let mut tampered = token.clone();
    tampered.push('x');

    assert!(security.verify_token(&tampered).is_err());
}

async fn protected() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "msg": "reached" }))
}

macro_rules! guarded_app {
    ($security:expr) => {
        test::init_service(
            App::new().service(
                web::resource("/protected")
                    .wrap(AuthMiddlewareFactory::new(Arc::clone(&$security)))
                    .route(web::get().to(protected)),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn missing_authorization_header_is_rejected() {
    let security = Arc::new(security());
    let app = guarded_app!(security);

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Authorization failed");
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    let security = Arc::new(security());
    let app = guarded_app!(security);

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("authorization", "not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Please login first");
}

#[actix_web::test]
async fn raw_token_is_admitted() {
    let security = Arc::new(security());
    let (token, _) = security.issue_token(Uuid::new_v4()).unwrap();
    let app = guarded_app!(security);

    // Clients send the bare token value, no Bearer prefix.
    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("authorization", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn bearer_prefixed_token_is_admitted() {
    let security = Arc::new(security());
    let (token, _) = security.issue_token(Uuid::new_v4()).unwrap();
    let app = guarded_app!(security);

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn expired_token_is_rejected_at_the_gate() {
    let security = Arc::new(SecurityService::new(&test_config("test_secret", -5)));
    let (token, _) = security.issue_token(Uuid::new_v4()).unwrap();
    let app = guarded_app!(security);

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("authorization", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
