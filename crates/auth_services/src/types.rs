use serde::{Deserialize, Serialize};

/// JWT claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the authenticated user.
    pub user_id: i32,
    /// Expiration timestamp of the token.
    pub exp: usize,
    /// Issued-at timestamp of the token.
    pub iat: usize,
}

/// Custom error type for authentication-related errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The provided credentials are invalid.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No access token was supplied with the request.
    #[error("Missing access token")]
    MissingToken,

    /// The supplied token is malformed, tampered with, or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// An error occurred while hashing the password.
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AuthError::InvalidToken
    }
}

impl actix_web::ResponseError for AuthError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "invalid_credentials",
                "message": "Invalid email or password"
            })),
            AuthError::MissingToken => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "missing_token",
                "message": "Authorization token is required"
            })),
            AuthError::InvalidToken => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "invalid_token",
                "message": "Invalid or expired token"
            })),
            AuthError::PasswordHash(_) => HttpResponse::InternalServerError().json(
                serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }),
            ),
        }
    }
}
