use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use fm_core::repositories::UserRepository;
use fm_core::services::EmailServiceTrait;
use fm_shared::types::response::ApiResponse;

use crate::handlers::domain_error_response;
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/auth/me
///
/// Returns the redacted profile of the authenticated user. Requires a
/// valid bearer token; the JWT middleware injects the auth context.
pub async fn me<U, M>(req: HttpRequest, state: web::Data<AppState<U, M>>) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    let context = match req.extensions().get::<AuthContext>().cloned() {
        Some(context) => context,
        None => {
            return HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
                "MISSING_TOKEN",
                "Authentication required",
            ));
        }
    };

    match state.otp_service.current_user(context.user_id).await {
        Ok(summary) => HttpResponse::Ok().json(ApiResponse::success("OK", summary)),
        Err(err) => domain_error_response(err),
    }
}
