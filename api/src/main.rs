use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::{info, warn};
use std::sync::Arc;

use fm_api::routes::auth::AppState;
use fm_core::services::{OtpService, OtpServiceConfig, TokenService, TokenServiceConfig};
use fm_infra::database::{create_pool, MySqlUserRepository};
use fm_infra::email::{create_email_service, EmailServiceAdapter};
use fm_shared::config::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging; the subscriber also bridges `log` records
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Freshmart API Server");

    // Load configuration
    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    if config.jwt.is_using_default_secret() && config.environment == Environment::Production {
        warn!("JWT_SECRET is not set; using the default secret in production is unsafe");
    }

    // Database and repository
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool));

    // Outbound email (Mailgun, or the console mailer when unconfigured)
    let email_transport = create_email_service(&config.email);
    let email_service = Arc::new(EmailServiceAdapter::new(email_transport));

    // Domain services
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.jwt)));

    let otp_config = OtpServiceConfig {
        // Echoing codes in responses is only for development debugging
        expose_code: config.environment == Environment::Development
            && std::env::var("EXPOSE_OTP_CODE").map(|v| v == "true").unwrap_or(false),
        ..OtpServiceConfig::default()
    };

    let otp_service = Arc::new(OtpService::new(
        user_repository,
        email_service,
        Arc::clone(&token_service),
        otp_config,
    ));

    let app_state = web::Data::new(AppState {
        otp_service,
        token_service,
    });

    HttpServer::new(move || fm_api::create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
