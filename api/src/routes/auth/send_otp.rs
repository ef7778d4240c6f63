use actix_web::{web, HttpResponse};
use validator::Validate;

use fm_core::repositories::UserRepository;
use fm_core::services::EmailServiceTrait;
use fm_shared::types::response::ApiResponse;
use fm_shared::utils::validation::mask_email;

use crate::dto::auth::{OtpIssuedResponse, SendOtpRequest};
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/send-otp
///
/// Issues a fresh verification code for the email address, creating the
/// user record on first sight. Any outstanding code is overwritten.
pub async fn send_otp<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    log::info!(
        "Processing send_otp request for email: {}",
        mask_email(&request.email)
    );

    match state.otp_service.send_otp(&request.email).await {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success(
            "Verification code sent",
            OtpIssuedResponse::from(result),
        )),
        Err(err) => domain_error_response(err),
    }
}
