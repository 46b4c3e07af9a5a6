//! JWT Token handling
//!
//! Tokens are issued by an external identity service; this crate only needs
//! to verify them. `create_token` exists for tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::ActorRole;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            issuer: "airhotel".to_string(),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: "airhotel".to_string(),
        }
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (numeric user ID as a string)
    pub sub: String,
    pub username: String,
    /// `guest` or `manager`
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: i64, username: &str, role: ActorRole, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// `None` when the subject is not a numeric id.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    pub fn role(&self) -> ActorRole {
        ActorRole::from_claim(&self.role)
    }
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: i64,
    username: &str,
    role: ActorRole,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(user_id, username, role, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}
