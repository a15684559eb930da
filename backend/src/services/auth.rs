//! Demo authentication
//!
//! There are no user accounts: any non-empty username and password sign in
//! and the requested role is taken as given. The session token is a signed
//! JWT so the dashboard can carry it around like a real one.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::{Credentials, SessionUser};
use uuid::Uuid;

use crate::config::{JwtConfig, LatencyConfig};
use crate::error::{AppError, AppResult};
use crate::services::simulate_latency;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    token_expiry: i64,
    latency: LatencyConfig,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: SessionUser,
    pub token: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl AuthService {
    pub fn new(jwt: &JwtConfig, latency: LatencyConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            token_expiry: jwt.expiry_seconds,
            latency,
        }
    }

    pub async fn login(&self, credentials: Credentials) -> AppResult<LoginResponse> {
        simulate_latency(self.latency.auth()).await;

        if !credentials.is_present() {
            tracing::warn!("Login rejected: missing username or password");
            return Err(AppError::InvalidCredentials);
        }

        let username = credentials.username.trim().to_string();
        let token = self.generate_token(&username, &credentials.role)?;
        tracing::info!(username = %username, role = %credentials.role, "User signed in");

        Ok(LoginResponse {
            success: true,
            user: SessionUser {
                display_name: display_name(&username),
                username,
                role: credentials.role,
            },
            token,
        })
    }

    /// Validate a session token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Token(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    fn generate_token(&self, username: &str, role: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Token(format!("Token generation failed: {}", e)))
    }
}

/// "priya.sharma" -> "Priya Sharma"
fn display_name(username: &str) -> String {
    username
        .split(|c: char| c == '.' || c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(
            &JwtConfig {
                secret: "test-secret".to_string(),
                expiry_seconds: 60,
            },
            LatencyConfig::none(),
        )
    }

    #[tokio::test]
    async fn test_any_non_empty_credentials_sign_in() {
        let response = service()
            .login(Credentials::new("priya.sharma", "x", "regulator"))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.user.role, "regulator");
        assert_eq!(response.user.display_name, "Priya Sharma");

        let claims = service().validate_token(&response.token).unwrap();
        assert_eq!(claims.sub, "priya.sharma");
        assert_eq!(claims.role, "regulator");
    }

    #[tokio::test]
    async fn test_missing_password_rejected() {
        let result = service().login(Credentials::new("farmer1", "", "farmer")).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_foreign_token_rejected() {
        let other = AuthService::new(
            &JwtConfig {
                secret: "other".to_string(),
                expiry_seconds: 60,
            },
            LatencyConfig::none(),
        );
        let token = other.generate_token("a", "admin").unwrap();
        assert!(matches!(service().validate_token(&token), Err(AppError::Token(_))));
    }
}
