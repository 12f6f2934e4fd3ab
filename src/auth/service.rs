// Authentication service - business logic layer

use std::sync::Arc;
use tracing::info;

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, LoginRequest, RegisterRequest, User},
    token::TokenService,
};
use crate::store::{StoreError, UserStore};

/// Authentication service coordinating login, registration and token refresh.
#[derive(Clone)]
pub struct AuthService {
    user_store: Arc<dyn UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(user_store: Arc<dyn UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }

    /// Authenticate a user and issue a token pair.
    ///
    /// Unknown email and wrong password both surface as `InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let user = self
            .user_store
            .find_by_email(&request.email)
            .await
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AuthError::AccountInactive);
        }

        if !user.verify_password(&request.password) {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, refresh_token) =
            self.token_service.generate_token_pair(user.id, user.role)?;

        info!(user_id = %user.id, "user logged in");

        Ok(AuthResponse {
            access_token,
            refresh_token,
            user: user.into(),
        })
    }

    /// Register a new user and issue a token pair.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        match self.user_store.find_by_email(&request.email).await {
            Ok(_) => return Err(AuthError::EmailExists),
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(AuthError::DatabaseError(e.to_string())),
        }

        let user = User::new(&request.email, &request.password, request.role)?;

        self.user_store
            .save(&user)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let (access_token, refresh_token) =
            self.token_service.generate_token_pair(user.id, user.role)?;

        info!(user_id = %user.id, role = %user.role, "user registered");

        Ok(AuthResponse {
            access_token,
            refresh_token,
            user: user.into(),
        })
    }

    /// Redeem a refresh token for a new token pair.
    ///
    /// The new access token carries the user's *current* stored role, so a
    /// role change takes effect at the next refresh. The refresh token is
    /// rotated on every call.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<AuthResponse, AuthError> {
        let user_id = self
            .token_service
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = self
            .user_store
            .find_by_id(user_id)
            .await
            .map_err(|_| AuthError::UserNotFound)?;

        let (access_token, new_refresh_token) =
            self.token_service.generate_token_pair(user.id, user.role)?;

        Ok(AuthResponse {
            access_token,
            refresh_token: new_refresh_token,
            user: user.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use crate::store::InMemoryUserStore;

    fn test_service() -> (AuthService, InMemoryUserStore, Arc<TokenService>) {
        let store = InMemoryUserStore::default();
        let token_service = Arc::new(TokenService::new(
            "test_secret_key_for_testing_purposes".to_string(),
        ));
        let service = AuthService::new(Arc::new(store.clone()), token_service.clone());
        (service, store, token_service)
    }

    fn register_request(email: &str, role: Role) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "password123".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let (service, _, _) = test_service();

        let registered = service
            .register(register_request("alice@example.com", Role::Viewer))
            .await
            .unwrap();
        assert!(!registered.access_token.is_empty());
        assert!(!registered.refresh_token.is_empty());

        let logged_in = service
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert!(!logged_in.access_token.is_empty());
        assert!(!logged_in.refresh_token.is_empty());
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() {
        let (service, _, _) = test_service();

        service
            .register(register_request("alice@example.com", Role::Viewer))
            .await
            .unwrap();

        let result = service
            .register(register_request("alice@example.com", Role::Admin))
            .await;
        assert!(matches!(result, Err(AuthError::EmailExists)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_are_indistinguishable() {
        let (service, _, _) = test_service();
        service
            .register(register_request("alice@example.com", Role::Viewer))
            .await
            .unwrap();

        let unknown = service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;
        let wrong = service
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_inactive_account_fails_with_correct_password() {
        let (service, store, _) = test_service();
        let registered = service
            .register(register_request("alice@example.com", Role::Viewer))
            .await
            .unwrap();

        let mut user = store.find_by_id(registered.user.id).await.unwrap();
        user.is_active = false;
        store.save(&user).await.unwrap();

        let result = service
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::AccountInactive)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_invalid_token() {
        let (service, _, _) = test_service();

        let result = service.refresh_tokens("not-a-token").await;
        assert!(matches!(result, Err(AuthError::InvalidRefreshToken)));
    }

    #[tokio::test]
    async fn test_refresh_fails_when_user_is_gone() {
        let (service, _, token_service) = test_service();
        let token = token_service
            .generate_refresh_token(uuid::Uuid::new_v4())
            .unwrap();

        let result = service.refresh_tokens(&token).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_refresh_uses_current_stored_role() {
        let (service, store, token_service) = test_service();
        let registered = service
            .register(register_request("alice@example.com", Role::Viewer))
            .await
            .unwrap();

        // Promote the user after the refresh token was issued
        let mut user = store.find_by_id(registered.user.id).await.unwrap();
        user.role = Role::Admin;
        store.save(&user).await.unwrap();

        let refreshed = service
            .refresh_tokens(&registered.refresh_token)
            .await
            .unwrap();

        let claims = token_service
            .validate_access_token(&refreshed.access_token)
            .unwrap();
        assert_eq!(claims.role, Role::Admin);
        assert_ne!(refreshed.refresh_token, registered.refresh_token);
    }
}
