/// Runtime configuration, read once from the environment at process start.
/// Everything built from it (the pool, the token service) is constructed in
/// `main` and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Secret the access tokens are signed with.
    pub jwt_secret: String,
    /// Lifetime of issued access tokens, in minutes.
    pub access_token_ttl_minutes: i64,
}

impl Config {
    /// Loads the configuration, falling back to development defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/hotel_booking".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-this-in-production".to_string()),
            access_token_ttl_minutes: std::env::var("ACCESS_TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(30),
        }
    }
}
