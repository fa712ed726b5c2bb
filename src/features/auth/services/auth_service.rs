use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    LoginRequestDto, MeResponseDto, RefreshTokenRequestDto, RefreshTokenResponseDto, TokenPairDto,
};
use crate::features::auth::model::{AuthenticatedUser, TokenType};
use crate::features::auth::services::TokenService;
use crate::shared::constants::ROLE_STAFF;

/// Credentials of the single catalog operator
struct OperatorCredentials {
    username: String,
    password_digest: [u8; 32],
}

/// Token endpoints: password login, refresh, current user
pub struct AuthService {
    token_service: Arc<TokenService>,
    operator: Option<OperatorCredentials>,
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Compare without short-circuiting on the first differing byte
fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl AuthService {
    pub fn new(token_service: Arc<TokenService>, username: &str, password: Option<&str>) -> Self {
        let operator = password.map(|password| OperatorCredentials {
            username: username.to_string(),
            password_digest: digest(password),
        });

        Self {
            token_service,
            operator,
        }
    }

    pub fn from_config(token_service: Arc<TokenService>, config: &AuthConfig) -> Self {
        Self::new(
            token_service,
            &config.admin_username,
            config.admin_password.as_deref(),
        )
    }

    /// Whether any operator account is configured
    pub fn has_operator(&self) -> bool {
        self.operator.is_some()
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<TokenPairDto> {
        let operator = self.operator.as_ref().ok_or_else(|| {
            tracing::warn!("Login attempted but no operator password is configured");
            AppError::Unauthorized("Invalid credentials".to_string())
        })?;

        let username_ok = digests_match(&digest(&dto.username), &digest(&operator.username));
        let password_ok = digests_match(&digest(&dto.password), &operator.password_digest);

        if !(username_ok && password_ok) {
            tracing::info!("Rejected login for user '{}'", dto.username);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let user = AuthenticatedUser {
            username: operator.username.clone(),
            roles: vec![ROLE_STAFF.to_string()],
        };

        let access = self.token_service.issue(&user, TokenType::Access)?;
        let refresh = self.token_service.issue(&user, TokenType::Refresh)?;

        tracing::info!("Issued token pair for '{}'", user.username);

        Ok(TokenPairDto {
            access: access.token,
            refresh: refresh.token,
            token_type: "Bearer".to_string(),
            expires_in: access.expires_in,
        })
    }

    pub async fn refresh_token(&self, dto: RefreshTokenRequestDto) -> Result<RefreshTokenResponseDto> {
        let user = self.token_service.validate_refresh(&dto.refresh)?;
        let access = self.token_service.issue(&user, TokenType::Access)?;

        tracing::debug!("Refreshed access token for '{}'", user.username);

        Ok(RefreshTokenResponseDto {
            access: access.token,
            token_type: "Bearer".to_string(),
            expires_in: access.expires_in,
        })
    }

    pub fn current_user(&self, user: AuthenticatedUser) -> MeResponseDto {
        MeResponseDto {
            is_staff: user.is_staff(),
            username: user.username,
            roles: user.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            "test-secret",
            Duration::from_secs(3600),
            Duration::from_secs(7200),
        ))
    }

    fn login(username: &str, password: &str) -> LoginRequestDto {
        LoginRequestDto {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_staff_tokens() {
        let tokens = token_service();
        let service = AuthService::new(Arc::clone(&tokens), "admin", Some("s3cret"));

        let pair = service.login(login("admin", "s3cret")).await.unwrap();
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 3600);

        let user = tokens.validate_access(&pair.access).unwrap();
        assert!(user.is_staff());
        assert!(tokens.validate_refresh(&pair.refresh).is_ok());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let service = AuthService::new(token_service(), "admin", Some("s3cret"));

        assert!(matches!(
            service.login(login("admin", "wrong")).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.login(login("root", "s3cret")).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_login_disabled_without_password() {
        let service = AuthService::new(token_service(), "admin", None);
        assert!(!service.has_operator());
        assert!(service.login(login("admin", "")).await.is_err());
    }

    #[tokio::test]
    async fn test_refresh_returns_new_access_token() {
        let tokens = token_service();
        let service = AuthService::new(Arc::clone(&tokens), "admin", Some("s3cret"));
        let pair = service.login(login("admin", "s3cret")).await.unwrap();

        let refreshed = service
            .refresh_token(RefreshTokenRequestDto {
                refresh: pair.refresh,
            })
            .await
            .unwrap();
        assert!(tokens.validate_access(&refreshed.access).is_ok());

        let err = service
            .refresh_token(RefreshTokenRequestDto {
                refresh: pair.access,
            })
            .await;
        assert!(matches!(err, Err(AppError::Unauthorized(_))));
    }
}
