//! # Infrastructure Layer
//!
//! Concrete implementations behind the core boundary traits:
//! - **Database**: MySQL user repository using SQLx
//! - **Email**: outbound OTP delivery (Mailgun API, console fallback)

use thiserror::Error;

pub mod database;
pub mod email;

/// Infrastructure-level errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Email delivery error: {0}")]
    Email(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
