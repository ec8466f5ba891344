//! User resolution middleware for planner-server.
//!
//! Login happens upstream; the fronting proxy forwards the authenticated user
//! name and roles in headers. Requests without the user header are anonymous.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use planner_core::UserContext;
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::state::AppState;

/// Build the user context from proxy headers
pub fn user_from_headers(headers: &HeaderMap, auth: &AuthConfig) -> UserContext {
    let name = headers
        .get(auth.user_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let roles = headers
        .get(auth.roles_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(|r| r.to_string())
                .collect()
        })
        .unwrap_or_default();

    UserContext { name, roles }
}

/// Attach a `UserContext` to every request
pub async fn resolve_user(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = user_from_headers(request.headers(), &state.config.auth);
    request.extensions_mut().insert(user);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_anonymous_without_header() {
        let user = user_from_headers(&HeaderMap::new(), &AuthConfig::default());
        assert_eq!(user, UserContext::anonymous());
    }

    #[test]
    fn test_user_and_roles() {
        let mut headers = HeaderMap::new();
        headers.insert("x-planner-user", HeaderValue::from_static(" alice "));
        headers.insert("x-planner-roles", HeaderValue::from_static("admin, speaker,,"));

        let user = user_from_headers(&headers, &AuthConfig::default());

        assert_eq!(user.name.as_deref(), Some("alice"));
        assert_eq!(
            user.roles.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["admin", "speaker"]
        );
    }

    #[test]
    fn test_blank_user_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert("x-planner-user", HeaderValue::from_static("   "));
        let user = user_from_headers(&headers, &AuthConfig::default());
        assert!(!user.is_authenticated());
    }

    #[test]
    fn test_custom_header_names() {
        let auth = AuthConfig {
            user_header: "X-Forwarded-User".to_string(),
            ..AuthConfig::default()
        };
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-user", HeaderValue::from_static("bob"));
        headers.insert("x-planner-user", HeaderValue::from_static("mallory"));

        let user = user_from_headers(&headers, &auth);
        assert_eq!(user.name(), "bob");
    }
}
