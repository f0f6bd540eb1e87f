use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::types::{AuthError, Claims};

/// Issues and verifies HS256 access tokens. Constructed once at startup from
/// configuration and shared by handlers and middleware.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl JwtService {
    /// Creates a service signing with `secret`; issued tokens expire after
    /// `ttl_minutes`.
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            ttl_minutes,
        }
    }

    /// Signs an access token carrying the user id plus issued-at and
    /// expiration timestamps.
    pub fn create_access_token(&self, user_id: i32) -> Result<String, AuthError> {
        let now = Utc::now();
        let expire = now + Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            user_id,
            exp: expire.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Recovers the claims from a token, failing on a bad signature or an
    /// elapsed expiration.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_the_user_id() {
        let service = JwtService::new("test-secret", 30);
        let token = service.create_access_token(7).unwrap();

        let claims = service.decode_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        // A negative TTL puts the expiration well past the validation leeway.
        let service = JwtService::new("test-secret", -120);
        let token = service.create_access_token(7).unwrap();

        assert!(matches!(
            service.decode_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = JwtService::new("one-secret", 30);
        let verifier = JwtService::new("another-secret", 30);
        let token = issuer.create_access_token(7).unwrap();

        assert!(matches!(
            verifier.decode_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }
}
