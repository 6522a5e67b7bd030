//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use memo_config::SecurityConfig;
use memo_core::{Interface, MemoError, MemoResult, UserId};
use serde::Serialize;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// An issued access token.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    /// Encoded token.
    pub access_token: String,
    /// Expiration timestamp.
    pub expires_at: i64,
    /// Token type (always "Bearer").
    pub token_type: String,
}

/// Interface for token operations.
pub trait TokenProviderInterface: Interface + Send + Sync {
    /// Generates an access token for a signed-in user.
    fn generate_access_token(&self, user_id: UserId, username: &str) -> MemoResult<AccessToken>;

    /// Validates a token and returns the claims.
    fn validate_token(&self, token: &str) -> MemoResult<Claims>;
}

/// JWT token provider service.
#[derive(Component, Clone)]
#[shaku(interface = TokenProviderInterface)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Converts a configured provider into Shaku component parameters.
    #[must_use]
    pub fn into_parameters(self) -> TokenProviderParameters {
        TokenProviderParameters {
            encoding_key: self.encoding_key,
            decoding_key: self.decoding_key,
            config: self.config,
            validation: self.validation,
        }
    }
}

impl TokenProviderInterface for TokenProvider {
    fn generate_access_token(&self, user_id: UserId, username: &str) -> MemoResult<AccessToken> {
        let lifetime = Duration::from_std(self.config.access_token_expiration())
            .map_err(|e| MemoError::Configuration(format!("Invalid token lifetime: {}", e)))?;
        let expires_at = Utc::now() + lifetime;

        let claims = Claims::new_access(
            user_id,
            username.to_string(),
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| MemoError::Internal(format!("Failed to generate access token: {}", e)))?;

        debug!("Generated access token for user {}", user_id);
        Ok(AccessToken {
            access_token: token,
            expires_at: expires_at.timestamp(),
            token_type: "Bearer".to_string(),
        })
    }

    fn validate_token(&self, token: &str) -> MemoResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => MemoError::TokenExpired,
                ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                    MemoError::InvalidToken("Invalid token signature".to_string())
                }
                ErrorKind::InvalidIssuer => MemoError::InvalidToken("Invalid token issuer".to_string()),
                ErrorKind::InvalidAudience => MemoError::InvalidToken("Invalid token audience".to_string()),
                _ => MemoError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
