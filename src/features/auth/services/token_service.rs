use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims, TokenType};

/// A signed token and its lifetime in seconds
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Issues and validates HS256 access/refresh tokens signed with the service secret
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
}

impl TokenService {
    pub fn new(
        secret: &str,
        access_token_lifetime: Duration,
        refresh_token_lifetime: Duration,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_lifetime,
            refresh_token_lifetime,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.secret_key,
            config.access_token_lifetime,
            config.refresh_token_lifetime,
        )
    }

    pub fn issue(&self, user: &AuthenticatedUser, token_type: TokenType) -> Result<IssuedToken> {
        let lifetime = match token_type {
            TokenType::Access => self.access_token_lifetime,
            TokenType::Refresh => self.refresh_token_lifetime,
        };
        let expires_in = lifetime.as_secs() as i64;
        let iat = Utc::now().timestamp();

        let claims = Claims {
            sub: user.username.clone(),
            roles: user.roles.clone(),
            token_type,
            iat,
            exp: iat + expires_in,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken { token, expires_in })
    }

    /// Validate a bearer token presented on a request
    pub fn validate_access(&self, token: &str) -> Result<AuthenticatedUser> {
        self.decode(token, TokenType::Access).map(AuthenticatedUser::from)
    }

    /// Validate a refresh token presented to the refresh endpoint
    pub fn validate_refresh(&self, token: &str) -> Result<AuthenticatedUser> {
        self.decode(token, TokenType::Refresh).map(AuthenticatedUser::from)
    }

    fn decode(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?
            .claims;

        if claims.token_type != expected {
            return Err(AppError::Unauthorized(format!(
                "Token has wrong type, expected {:?} token",
                expected
            )));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::create_staff_user;

    fn service() -> TokenService {
        TokenService::new(
            "test-secret",
            Duration::from_secs(24 * 3600),
            Duration::from_secs(7 * 24 * 3600),
        )
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let issued = service
            .issue(&create_staff_user(), TokenType::Access)
            .unwrap();

        assert_eq!(issued.expires_in, 24 * 3600);

        let user = service.validate_access(&issued.token).unwrap();
        assert_eq!(user.username, "test-staff");
        assert!(user.is_staff());
    }

    #[test]
    fn test_refresh_token_lifetime_is_seven_days() {
        let issued = service()
            .issue(&create_staff_user(), TokenType::Refresh)
            .unwrap();
        assert_eq!(issued.expires_in, 7 * 24 * 3600);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let service = service();
        let refresh = service
            .issue(&create_staff_user(), TokenType::Refresh)
            .unwrap();
        let access = service
            .issue(&create_staff_user(), TokenType::Access)
            .unwrap();

        assert!(matches!(
            service.validate_access(&refresh.token),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.validate_refresh(&access.token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let other = TokenService::new("other-secret", Duration::from_secs(60), Duration::from_secs(60));
        let issued = other.issue(&create_staff_user(), TokenType::Access).unwrap();

        assert!(service().validate_access(&issued.token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "test-staff".to_string(),
            roles: vec!["staff".to_string()],
            token_type: TokenType::Access,
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service().validate_access(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(service().validate_access("not-a-jwt").is_err());
    }
}
