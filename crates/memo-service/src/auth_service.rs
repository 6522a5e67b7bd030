//! Authentication service implementation.

use crate::dto::{SignInRequest, SignInResponse, ViewerInfo};
use async_trait::async_trait;
use chrono::Utc;
use memo_core::{Interface, MemoError, MemoResult, ValidateExt};
use memo_repository::MemoStore;
use memo_security::{Claims, PasswordVerifierInterface, TokenProviderInterface};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Signs a user in and issues an access token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    async fn sign_in(&self, request: SignInRequest) -> MemoResult<SignInResponse>;

    /// Validates an access token and returns its claims.
    fn validate_token(&self, token: &str) -> MemoResult<Claims>;
}

/// Authentication service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = AuthService)]
pub struct AuthServiceComponent {
    #[shaku(inject)]
    store: Arc<dyn MemoStore>,
    #[shaku(inject)]
    password_verifier: Arc<dyn PasswordVerifierInterface>,
    #[shaku(inject)]
    token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthServiceComponent {
    /// Creates an authentication service outside of a Shaku module.
    #[must_use]
    pub fn new(
        store: Arc<dyn MemoStore>,
        password_verifier: Arc<dyn PasswordVerifierInterface>,
        token_provider: Arc<dyn TokenProviderInterface>,
    ) -> Self {
        Self {
            store,
            password_verifier,
            token_provider,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceComponent {
    async fn sign_in(&self, request: SignInRequest) -> MemoResult<SignInResponse> {
        debug!("Sign-in attempt for: {}", request.username);

        request.validate_request()?;

        let user = self
            .store
            .find_user_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Sign-in failed: user not found - {}", request.username);
                MemoError::InvalidCredentials
            })?;

        if !self
            .password_verifier
            .verify(&request.password, &user.salt, &user.password_hash)
        {
            warn!("Sign-in failed: invalid password for user {}", user.id);
            return Err(MemoError::InvalidCredentials);
        }

        // A failed timestamp update never blocks the sign-in.
        if let Err(e) = self.store.touch_last_access(user.id).await {
            warn!("Could not record last access for user {}: {}", user.id, e);
        }

        let token = self.token_provider.generate_access_token(user.id, &user.username)?;
        info!("User signed in: {}", user.id);

        Ok(SignInResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_at - Utc::now().timestamp(),
            user: ViewerInfo {
                id: user.id,
                username: user.username,
            },
        })
    }

    fn validate_token(&self, token: &str) -> MemoResult<Claims> {
        self.token_provider.validate_token(token)
    }
}
