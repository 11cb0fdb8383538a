use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use userhub_config::AppConfig;
use userhub_users::services::{AuthMiddlewareFactory, SecurityService};
use userhub_users::{db, handlers};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    db::ensure_schema(&pool).await?;
    tracing::info!("Database connection established");

    let security = Arc::new(SecurityService::new(&config));
    let auth_middleware = AuthMiddlewareFactory::new(Arc::clone(&security));
    let port = config.port;

    tracing::info!("Starting users service on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::from(Arc::clone(&security)))
            .wrap(cors)
            .wrap(Logger::default())
            .route("/", web::get().to(root))
            .route("/health", web::get().to(health_check))
            .configure(|cfg| handlers::configure_routes(cfg, auth_middleware.clone()))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().body("Welcome to User management system")
}

async fn health_check(pool: web::Data<PgPool>) -> actix_web::Result<web::Json<serde_json::Value>> {
    let db_status = match sqlx::query("SELECT 1 as test").fetch_one(pool.get_ref()).await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            "disconnected"
        }
    };

    Ok(web::Json(serde_json::json!({
        "status": "healthy",
        "service": "users-service",
        "database": db_status,
        "timestamp": chrono::Utc::now()
    })))
}
