//! Bearer token checks for the log shipper.

pub mod issuer;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

pub use issuer::{DEFAULT_EXPIRES_AT, issue_token};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing bearer credentials")]
    MissingCredentials,
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("Token has no subject claim")]
    MissingSubject,
    #[error("Token subject claim is not a string")]
    NonStringSubject,
    #[error("Cannot issue token: {0}")]
    Issue(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        warn!("Rejected request: {self}");
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(serde_json::json!({ "detail": "Could not validate credentials" })),
        )
            .into_response()
    }
}

/// Authenticated caller, taken from the token's `sub` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<Value>,
}

/// Verifies HS256 tokens signed with the shared secret.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        match data.claims.sub {
            Some(Value::String(subject)) => Ok(Identity { subject }),
            None | Some(Value::Null) => Err(AuthError::MissingSubject),
            Some(_) => Err(AuthError::NonStringSubject),
        }
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

/// Token part of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

impl<S> FromRequestParts<S> for Identity
where
    Arc<TokenValidator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let validator = Arc::<TokenValidator>::from_ref(state);
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingCredentials)?;
        validator.validate(token)
    }
}
