//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use crate::middleware::{cors::create_cors, JwtAuth};
use crate::routes::auth::{me, resend_otp, send_otp, signup_otp, verify_otp, AppState};

use fm_core::repositories::UserRepository;
use fm_core::services::EmailServiceTrait;

/// Create and configure the application with all dependencies
pub fn create_app<U, M>(
    app_state: web::Data<AppState<U, M>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    let cors = create_cors();
    let token_service = Arc::clone(&app_state.token_service);

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/signup-otp", web::post().to(signup_otp::<U, M>))
                    .route("/send-otp", web::post().to(send_otp::<U, M>))
                    .route("/verify-otp", web::post().to(verify_otp::<U, M>))
                    .route("/resend-otp", web::post().to(resend_otp::<U, M>))
                    .route(
                        "/me",
                        web::get()
                            .to(me::<U, M>)
                            .wrap(JwtAuth::new(token_service)),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "freshmart-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
