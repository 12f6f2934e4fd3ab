// JWT token generation and validation service

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::models::Role;

/// Claims carried by a short-lived access token. The role is a snapshot taken
/// at issuance.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: Uuid,
    pub role: Role,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by a long-lived refresh token. Deliberately role-free: the
/// role is re-derived from stored user state when the token is redeemed.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token service for JWT operations. Both token kinds are signed with the
/// same process-wide symmetric secret (HS256).
pub struct TokenService {
    secret: String,
    access_token_duration: i64,  // in seconds
    refresh_token_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with secret key.
    /// Access tokens expire in 15 minutes (900 seconds),
    /// refresh tokens in 7 days (604800 seconds).
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            access_token_duration: 900,
            refresh_token_duration: 604_800,
        }
    }

    /// Generate an access token embedding the user's ID and role.
    pub fn generate_access_token(&self, user_id: Uuid, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = AccessClaims {
            user_id,
            role,
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.access_token_duration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Generate a refresh token; carries the user ID as subject and no role.
    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.refresh_token_duration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Validate an access token, returning its claims.
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }

    /// Validate a refresh token, returning the user ID from its subject.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let claims = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::MalformedSubject(claims.sub))
    }

    /// Generate both access and refresh tokens.
    pub fn generate_token_pair(
        &self,
        user_id: Uuid,
        role: Role,
    ) -> Result<(String, String), AuthError> {
        let access_token = self.generate_access_token(user_id, role)?;
        let refresh_token = self.generate_refresh_token(user_id)?;
        Ok((access_token, refresh_token))
    }
}
