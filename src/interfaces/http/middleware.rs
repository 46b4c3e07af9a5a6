//! Authentication middleware for Axum
//!
//! Bearer JWTs only. The verified claims become an [`AuthenticatedUser`]
//! in the request extensions; manager routes add [`require_manager`] on top.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::common::ApiResponse;
use crate::domain::{Actor, ActorRole};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InvalidSubject,
    ManagerOnly,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
            AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
            AuthError::InvalidSubject => (StatusCode::UNAUTHORIZED, "Token subject is not a user id"),
            AuthError::ManagerOnly => (StatusCode::FORBIDDEN, "Manager role required"),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub role: ActorRole,
}

impl AuthenticatedUser {
    fn from_claims(claims: TokenClaims) -> Result<Self, AuthError> {
        let user_id = claims.user_id().ok_or(AuthError::InvalidSubject)?;
        Ok(Self {
            user_id,
            role: claims.role(),
            username: claims.username,
        })
    }

    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            role: self.role,
        }
    }

    pub fn is_manager(&self) -> bool {
        self.role == ActorRole::Manager
    }
}

/// Lets handlers take `AuthenticatedUser` directly. Only valid behind
/// [`auth_middleware`].
impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    value.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(header_value) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return AuthError::MissingToken.into_response();
    };
    let Some(token) = bearer_token(header_value) else {
        return AuthError::InvalidToken.into_response();
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            return match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AuthError::ExpiredToken.into_response()
                }
                _ => AuthError::InvalidToken.into_response(),
            };
        }
    };

    match AuthenticatedUser::from_claims(claims) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Rejects anyone but managers. Layer it inside `auth_middleware`.
pub async fn require_manager(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_manager() => next.run(request).await,
        Some(_) => AuthError::ManagerOnly.into_response(),
        None => AuthError::MissingToken.into_response(),
    }
}
