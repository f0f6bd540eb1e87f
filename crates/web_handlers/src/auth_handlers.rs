use actix_web::{HttpResponse, cookie::Cookie, web};
use sqlx::PgPool;
use validator::Validate;

use auth_services::jwt::JwtService;
use auth_services::middleware::AuthenticatedUser;
use auth_services::service::AuthService;
use postgres::types::UserData;
use postgres::{Filter, UnitOfWork};

use crate::types::{ApiError, LoginRequest, RegisterRequest, UserOut};

/// Registers a user from an email and password. The password is hashed
/// before anything reaches the storage layer; a duplicate email surfaces as
/// a 409 conflict.
pub async fn register(
    pool: web::Data<PgPool>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let hashed_password = AuthService::hash_password(&request.password)?;
    let new_user = UserData {
        email: request.email.trim().to_lowercase(),
        hashed_password,
    };

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    uow.users().add(&new_user).await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK"})))
}

/// Verifies credentials and issues an access token, returned in the body and
/// set as an http-only cookie. Unknown email and bad password are
/// indistinguishable to the caller.
pub async fn login(
    pool: web::Data<PgPool>,
    jwt: web::Data<JwtService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let user = uow
        .users()
        .get_one_or_none(&Filter::new().eq("email", request.email.trim().to_lowercase()))
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !AuthService::verify_password(&request.password, &user.hashed_password)? {
        return Err(ApiError::Unauthorized);
    }

    let access_token = jwt.create_access_token(user.id)?;
    let cookie = Cookie::build("access_token", access_token.clone())
        .path("/")
        .http_only(true)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({"access_token": access_token})))
}

/// Returns the authenticated user's record, without the password hash.
pub async fn me(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let user = uow
        .users()
        .get_one_or_none(&Filter::new().eq("id", user.0))
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserOut::from(user)))
}

/// Clears the access-token cookie.
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::new("access_token", "");
    cookie.set_path("/");
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({"status": "Logout OK"}))
}
