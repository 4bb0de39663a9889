//! Authentication middleware for Axum
//!
//! `auth_middleware` resolves the bearer token to an active staff account
//! and stores an [`AuthenticatedUser`] in the request extensions.
//! `admin_middleware` must run after it.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::verify_token;
use crate::interfaces::http::common::{ApiError, ApiResult};
use crate::interfaces::http::router::AppState;

/// Authenticated staff member attached to the request
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Hotels, room types and rooms are edited by managers and admins
    pub fn require_inventory_manager(&self) -> ApiResult<()> {
        if self.role.can_manage_inventory() {
            Ok(())
        } else {
            Err(ApiError::forbidden(
                "Only managers and admins may change hotel inventory",
            ))
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT bearer authentication
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
    else {
        return ApiError::unauthorized("Missing authentication token").into_response();
    };

    let Some(token) = extract_token(&auth_header) else {
        return ApiError::unauthorized("Invalid authentication token").into_response();
    };

    let claims = match verify_token(token, &state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            let message = match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token has expired",
                _ => "Invalid authentication token",
            };
            return ApiError::unauthorized(message).into_response();
        }
    };

    // Role and active flag are read fresh so revoked accounts lose access at once
    let user = match state.users.get_staff(&claims.sub).await {
        Ok(user) if user.is_active => user,
        Ok(_) => return ApiError::unauthorized("Account is disabled").into_response(),
        Err(crate::domain::DomainError::NotFound { .. }) => {
            return ApiError::unauthorized("Invalid authentication token").into_response()
        }
        Err(e) => return ApiError::from(e).into_response(),
    };

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        role: user.role,
    });
    next.run(request).await
}

/// Rejects non-admin users with 403
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => ApiError::forbidden("Admin role required").into_response(),
        None => ApiError::unauthorized("Missing authentication token").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("Bearer   "), None);
        assert_eq!(extract_token("Basic abc"), None);
    }

    #[test]
    fn receptionists_cannot_manage_inventory() {
        let user = AuthenticatedUser {
            user_id: "u1".into(),
            username: "desk".into(),
            role: UserRole::Receptionist,
        };
        assert_eq!(
            user.require_inventory_manager().unwrap_err().status(),
            axum::http::StatusCode::FORBIDDEN
        );
        let manager = AuthenticatedUser {
            role: UserRole::Manager,
            ..user
        };
        assert!(manager.require_inventory_manager().is_ok());
        assert!(!manager.is_admin());
    }
}
