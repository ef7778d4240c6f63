use actix_web::{web, HttpResponse};
use validator::Validate;

use fm_core::repositories::UserRepository;
use fm_core::services::EmailServiceTrait;
use fm_shared::types::response::ApiResponse;
use fm_shared::utils::validation::mask_email;

use crate::dto::auth::VerifyOtpRequest;
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/verify-otp
///
/// Checks the submitted code against the outstanding challenge. On
/// success the email is marked verified, the challenge cleared, and a
/// session token returned alongside a redacted user summary.
///
/// # Response
///
/// ```json
/// {
///     "success": true,
///     "message": "Email verified successfully",
///     "data": {
///         "token": "eyJ...",
///         "user": {
///             "id": "550e8400-e29b-41d4-a716-446655440000",
///             "email": "alice@example.com",
///             "first_name": "Alice",
///             "last_name": "Smith"
///         }
///     }
/// }
/// ```
pub async fn verify_otp<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    log::info!(
        "Processing verify_otp request for email: {}",
        mask_email(&request.email)
    );

    match state
        .otp_service
        .verify_otp(&request.email, &request.otp)
        .await
    {
        Ok(auth) => {
            HttpResponse::Ok().json(ApiResponse::success("Email verified successfully", auth))
        }
        Err(err) => domain_error_response(err),
    }
}
