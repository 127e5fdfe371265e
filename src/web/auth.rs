use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use super::AppState;

/// Name of the admin session cookie
pub const AUTH_COOKIE: &str = "admin_token";

/// User credentials structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Name (username)
    pub name: Option<String>,
    /// Role (admin, user, etc.)
    pub role: String,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
}

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// JWT secret for signing/verifying tokens
    pub jwt_secret: String,
    /// Token expiration time in minutes
    pub token_expiration_minutes: i64,
    /// Admin username
    pub admin_username: String,
    /// Admin password
    pub admin_password: String,
}

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    /// Token is missing
    MissingToken,
    /// Token is invalid
    InvalidToken,
    /// User not authorized for this action
    Unauthorized,
    /// Some other error
    Other(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => {
                // For authentication errors, redirect to login
                Redirect::to("/admin/login").into_response()
            }
            AuthError::Unauthorized => {
                // For authorization errors, return forbidden
                (StatusCode::FORBIDDEN, "Not authorized").into_response()
            }
            AuthError::Other(err) => {
                // For other errors, log and return internal server error
                error!("Auth error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// JWT extractor for authentication
#[derive(Debug, Clone)]
pub struct JwtAuth {
    pub claims: Claims,
}

/// Extract the session token from the request cookie or bearer header
pub fn extract_token(parts: &Parts) -> Result<String, AuthError> {
    // First check for token in cookies
    let cookie_header = parts.headers.get(header::COOKIE);
    let mut token = None;

    if let Some(cookie) = cookie_header {
        let cookie_str = cookie.to_str().map_err(|_| AuthError::InvalidToken)?;
        for cookie_pair in cookie_str.split(';') {
            let mut pair = cookie_pair.trim().split('=');
            if let (Some(AUTH_COOKIE), Some(value)) = (pair.next(), pair.next()) {
                token = Some(value.to_string());
                break;
            }
        }
    }

    // If no token in cookie, check Authorization header
    if token.is_none() {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or(AuthError::MissingToken)?;

        let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidToken)?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AuthError::InvalidToken);
        }

        token = Some(auth_str.trim_start_matches("Bearer ").trim().to_string());
    }

    token.ok_or(AuthError::MissingToken)
}

/// Auth service for token operations
pub struct AuthService {
    config: Arc<AuthConfig>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Authenticate a user against the configured admin credentials
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if username == self.config.admin_username && password == self.config.admin_password {
            self.generate_token(username, Some(username.to_string()), "admin")
                .map_err(AuthError::Other)
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    /// Generate a new JWT token
    pub fn generate_token(
        &self,
        user_id: &str,
        name: Option<String>,
        role: &str,
    ) -> Result<String, String> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.config.token_expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            name,
            role: role.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| format!("Failed to generate token: {}", e))
    }

    /// Validate a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|token_data| token_data.claims)
        .map_err(|e| {
            error!("JWT validation error: {:?}", e);
            AuthError::InvalidToken
        })
    }
}

/// Middleware gating the admin surface.
///
/// Public site routes and the login form pass through; every other
/// `/admin` path requires a valid session token.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if !path.starts_with("/admin") || path == "/admin/login" {
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();

    match extract_token(&parts) {
        Ok(token) => match state.auth_service.validate_token(&token) {
            Ok(claims) => {
                let auth = JwtAuth { claims };

                // Reconstruct the request with auth data
                let mut req = Request::from_parts(parts, body);
                req.extensions_mut().insert(auth);

                next.run(req).await
            }
            Err(_) => Redirect::to("/admin/login").into_response(),
        },
        Err(_) => Redirect::to("/admin/login").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: "test_secret".to_string(),
            token_expiration_minutes: 60,
            admin_username: "admin".to_string(),
            admin_password: "hanbit".to_string(),
        })
    }

    #[test]
    fn test_authenticate_issues_validating_token() {
        let auth = service();

        let token = auth.authenticate("admin", "hanbit").expect("valid login");
        let claims = auth.validate_token(&token).expect("token validates");

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_authenticate_rejects_wrong_credentials() {
        let auth = service();

        assert!(matches!(
            auth.authenticate("admin", "wrong"),
            Err(AuthError::Unauthorized)
        ));
        assert!(matches!(
            auth.authenticate("visitor", "hanbit"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_validate_rejects_garbage_token() {
        let auth = service();
        assert!(auth.validate_token("not.a.token").is_err());
    }
}
