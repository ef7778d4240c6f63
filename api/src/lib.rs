//! # Freshmart API
//!
//! HTTP layer for the Freshmart backend. Exposes the email OTP
//! authentication endpoints over REST and wires the domain services to
//! their infrastructure implementations.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::auth::AppState;
