use super::AuthError;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

/// 2050-01-01T00:00:00+00:00
pub const DEFAULT_EXPIRES_AT: i64 = 2_524_608_000;

#[derive(Serialize)]
struct IssuedClaims<'a> {
    sub: &'a str,
    iat: i64,
    exp: i64,
}

/// Sign a token for a log shipper, to be accepted by [`super::TokenValidator`].
pub fn issue_token(
    subject: &str,
    secret: &str,
    issued_at: i64,
    expires_at: i64,
) -> Result<String, AuthError> {
    if subject.is_empty() {
        return Err(AuthError::Issue("subject cannot be empty".into()));
    }
    if secret.is_empty() {
        return Err(AuthError::Issue("secret key cannot be empty".into()));
    }

    let claims = IssuedClaims {
        sub: subject,
        iat: issued_at,
        exp: expires_at,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::from)
}
