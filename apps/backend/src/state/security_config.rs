use std::fmt;
use std::time::Duration;

use argon2::Params;
use jsonwebtoken::Algorithm;

/// Default session lifetime: one day.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Token signing and password hashing settings, read once at startup.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Shared HMAC secret for signing and verifying session tokens
    pub jwt_secret: Vec<u8>,
    /// Pinned signing algorithm (HS256)
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
    /// argon2 cost parameters used when hashing new passwords
    pub password_params: Params,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
            password_params: Params::default(),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_password_params(mut self, params: Params) -> Self {
        self.password_params = params;
        self
    }

    /// Cheap argon2 parameters so hashing in tests stays fast.
    pub fn for_tests() -> Self {
        let params = Params::new(1024, 1, 1, None).unwrap_or_default();
        Self::default().with_password_params(params)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("password_params", &self.password_params)
            .finish()
    }
}
