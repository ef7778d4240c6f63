use actix_web::{web, HttpResponse};
use validator::Validate;

use fm_core::repositories::UserRepository;
use fm_core::services::EmailServiceTrait;
use fm_shared::types::response::ApiResponse;
use fm_shared::utils::validation::mask_email;

use crate::dto::auth::{OtpIssuedResponse, ResendOtpRequest};
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/resend-otp
///
/// Re-issues a verification code for an existing registration. Unknown
/// emails are rejected with 404; the previous code is invalidated.
pub async fn resend_otp<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<ResendOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    log::info!(
        "Processing resend_otp request for email: {}",
        mask_email(&request.email)
    );

    match state.otp_service.resend_otp(&request.email).await {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success(
            "Verification code resent",
            OtpIssuedResponse::from(result),
        )),
        Err(err) => domain_error_response(err),
    }
}
