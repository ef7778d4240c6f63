use actix_web::{web, HttpResponse};
use validator::Validate;

use fm_core::repositories::UserRepository;
use fm_core::services::EmailServiceTrait;
use fm_shared::types::response::ApiResponse;
use fm_shared::utils::validation::mask_email;

use crate::dto::auth::{OtpIssuedResponse, SignupOtpRequest};
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/signup-otp
///
/// Registers an email address and sends a verification code. For an
/// already-verified email the request is rejected with 409 unless the
/// service is configured to re-issue.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "first_name": "Alice",
///     "last_name": "Smith"
/// }
/// ```
pub async fn signup_otp<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<SignupOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    log::info!(
        "Processing signup request for email: {}",
        mask_email(&request.email)
    );

    match state
        .otp_service
        .signup(&request.email, &request.first_name, &request.last_name)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success(
            "Verification code sent",
            OtpIssuedResponse::from(result),
        )),
        Err(err) => domain_error_response(err),
    }
}
