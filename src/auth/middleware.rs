// Authentication middleware for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::{error::AuthError, models::Role, token::TokenService};

/// Authenticated identity attached to a request once its Bearer token has
/// been validated.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// A missing header or a non-Bearer prefix is rejected before any token
/// verification is attempted.
fn bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let token_service = Arc::<TokenService>::from_ref(state);
        let claims = token_service.validate_access_token(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.user_id,
            role: claims.role,
        })
    }
}

/// Middleware enforcing a minimum role for a route group.
///
/// Any role whose rank is at least the required rank passes; lower ranks are
/// rejected with 403.
#[derive(Clone)]
pub struct RequireRole {
    required_role: Role,
    token_service: Arc<TokenService>,
}

impl RequireRole {
    pub fn new(token_service: Arc<TokenService>, required_role: Role) -> Self {
        Self {
            required_role,
            token_service,
        }
    }

    /// Require at least Analyst.
    pub fn analyst(token_service: Arc<TokenService>) -> Self {
        Self::new(token_service, Role::Analyst)
    }

    /// Require Admin.
    pub fn admin(token_service: Arc<TokenService>) -> Self {
        Self::new(token_service, Role::Admin)
    }

    pub async fn middleware(self, request: Request, next: Next) -> Result<Response, AuthError> {
        let endpoint = request.uri().path().to_string();

        let token = bearer_token(request.headers()).map_err(|e| {
            warn!(
                "Rejected unauthenticated request to protected endpoint: {}",
                endpoint
            );
            e
        })?;

        let claims = self.token_service.validate_access_token(token)?;

        if claims.role.rank() < self.required_role.rank() {
            return Err(AuthError::InsufficientPermissions {
                required: self.required_role,
                actual: claims.role,
            });
        }

        debug!(
            "Authorization successful: user_id={}, role={}, endpoint={}",
            claims.user_id, claims.role, endpoint
        );
        Ok(next.run(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_rejected_before_verification() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_non_bearer_prefix_is_rejected() {
        for value in ["Basic dXNlcjpwYXNz", "token_without_bearer", "bearer abc"] {
            let headers = headers_with_auth(value);
            assert!(matches!(
                bearer_token(&headers),
                Err(AuthError::InvalidToken)
            ));
        }
    }

    #[tokio::test]
    async fn test_extractor_attaches_identity_from_valid_token() {
        let token_service = Arc::new(TokenService::new("extractor-test-secret".to_string()));
        let user_id = Uuid::new_v4();
        let token = token_service
            .generate_access_token(user_id, Role::Analyst)
            .unwrap();

        let request = axum::http::Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let user = AuthenticatedUser::from_request_parts(&mut parts, &token_service)
            .await
            .unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, Role::Analyst);
    }

    #[tokio::test]
    async fn test_extractor_rejects_token_signed_with_other_secret() {
        let token_service = Arc::new(TokenService::new("extractor-test-secret".to_string()));
        let other_service = TokenService::new("a-different-secret".to_string());
        let token = other_service
            .generate_access_token(Uuid::new_v4(), Role::Admin)
            .unwrap();

        let request = axum::http::Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let result = AuthenticatedUser::from_request_parts(&mut parts, &token_service).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
