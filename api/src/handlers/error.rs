//! Mapping from domain errors to HTTP responses

use actix_web::HttpResponse;
use validator::ValidationErrors;

use fm_core::errors::{AuthError, DomainError, TokenError};
use fm_shared::types::response::ApiResponse;

/// Convert a domain error into an HTTP response with a stable error code
///
/// Status mapping:
/// - 400: invalid input, wrong or expired code
/// - 401: token errors
/// - 404: unknown user where an existing registration is required
/// - 409: signup against an already-verified email
/// - 500: everything else; internal detail is logged, not returned
pub fn domain_error_response(error: DomainError) -> HttpResponse {
    let code = error.code();

    match &error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidEmailFormat { .. }
            | AuthError::InvalidOtp
            | AuthError::OtpExpired => {
                HttpResponse::BadRequest().json(ApiResponse::<()>::error(code, error.to_string()))
            }
            AuthError::UserNotFound => {
                HttpResponse::NotFound().json(ApiResponse::<()>::error(code, error.to_string()))
            }
            AuthError::EmailAlreadyRegistered => {
                HttpResponse::Conflict().json(ApiResponse::<()>::error(code, error.to_string()))
            }
        },
        DomainError::Token(token_error) => {
            let message = match token_error {
                TokenError::TokenGenerationFailed => {
                    log::error!("Token generation failed: {}", error);
                    "Authentication failed".to_string()
                }
                _ => error.to_string(),
            };
            HttpResponse::Unauthorized().json(ApiResponse::<()>::error(code, message))
        }
        DomainError::Validation { .. } => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(code, error.to_string()))
        }
        DomainError::NotFound { .. } => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error(code, error.to_string()))
        }
        DomainError::Internal { .. } => {
            // Internal detail stays in the logs
            log::error!("Internal error: {}", error);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(code, "An internal error occurred"))
        }
    }
}

/// Convert request-body validation failures into a 400 response
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();

    log::warn!("Request validation failed for fields: {:?}", fields);

    HttpResponse::BadRequest().json(ApiResponse::<()>::error(
        "VALIDATION_ERROR",
        format!("Invalid request data: {}", fields.join(", ")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_user_not_found_maps_to_404() {
        let response = domain_error_response(DomainError::Auth(AuthError::UserNotFound));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_otp_maps_to_400() {
        let response = domain_error_response(DomainError::Auth(AuthError::InvalidOtp));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_expired_otp_maps_to_400() {
        let response = domain_error_response(DomainError::Auth(AuthError::OtpExpired));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_registration_maps_to_409() {
        let response = domain_error_response(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_token_errors_map_to_401() {
        let response = domain_error_response(DomainError::Token(TokenError::TokenExpired));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = domain_error_response(DomainError::Token(TokenError::InvalidSignature));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let response = domain_error_response(DomainError::Internal {
            message: "connection pool exhausted".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
