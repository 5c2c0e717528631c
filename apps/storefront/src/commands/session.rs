//! # Session Commands
//!
//! Sign-in form, sign-out button and the "who am I" check.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(email, password)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_login_form ──── fails ──► VALIDATION_ERROR (nothing checked) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionManager::login ── false ──► INVALID_CREDENTIALS                │
//! │       │                                                                 │
//! │       ▼ true                                                            │
//! │  SessionResponse { authenticated: true, .. }                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::validation::validate_login_form;
use storefront_core::{User, UserId};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Session status. Never includes the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user_id: Option<UserId>,
    pub email: Option<String>,
}

impl SessionResponse {
    fn from_user(user: Option<User>) -> Self {
        match user {
            Some(user) => SessionResponse {
                authenticated: true,
                user_id: Some(user.id),
                email: Some(user.email),
            },
            None => SessionResponse {
                authenticated: false,
                user_id: None,
                email: None,
            },
        }
    }
}

/// Signs in.
///
/// The email is trimmed the way the form submits it; the password is not.
pub async fn login(state: &AppState, email: &str, password: &str) -> ApiResult<SessionResponse> {
    let email = email.trim();
    debug!(email = %email, "login command");

    validate_login_form(email, password)?;

    if !state.session().login(email, password).await {
        return Err(ApiError::invalid_credentials());
    }

    Ok(whoami(state))
}

/// Signs out and empties the cart.
pub async fn logout(state: &AppState) -> SessionResponse {
    debug!("logout command");

    state.cart().clear_cart();
    state.session().logout().await;

    whoami(state)
}

/// Current session status.
pub fn whoami(state: &AppState) -> SessionResponse {
    SessionResponse::from_user(state.session().current_user())
}

/// Returns the signed-in user or `AUTH_REQUIRED`.
pub(crate) fn require_user(state: &AppState) -> ApiResult<User> {
    state
        .session()
        .current_user()
        .ok_or_else(ApiError::auth_required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{signed_in_state, state_with, FakeCatalog};
    use crate::error::ErrorCode;
    use std::sync::Arc;
    use storefront_catalog::fallback_products;
    use storefront_core::CART_STORAGE_KEY;
    use storefront_db::MemoryStore;

    #[tokio::test]
    async fn test_login_success() {
        let state = state_with(Arc::new(MemoryStore::new()), FakeCatalog::default());

        let response = login(&state, "  test@test.com ", "123456").await.unwrap();
        assert_eq!(
            response,
            SessionResponse {
                authenticated: true,
                user_id: Some(1),
                email: Some("test@test.com".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_login_form_errors() {
        let state = state_with(Arc::new(MemoryStore::new()), FakeCatalog::default());

        let err = login(&state, "not-an-email", "123456").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = login(&state, "test@test.com", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = state_with(Arc::new(MemoryStore::new()), FakeCatalog::default());

        let err = login(&state, "test@test.com", "654321").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert!(!whoami(&state).authenticated);
    }

    #[tokio::test]
    async fn test_logout_clears_cart_and_session() {
        let (state, store) = signed_in_state().await;
        state.cart().add_to_cart(&fallback_products()[0]);
        state.shutdown().await;
        assert!(store.peek(CART_STORAGE_KEY).is_some());

        let response = logout(&state).await;
        assert!(!response.authenticated);
        assert!(state.cart().is_empty());

        state.shutdown().await;
        assert!(store.peek(CART_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_require_user() {
        let state = state_with(Arc::new(MemoryStore::new()), FakeCatalog::default());
        assert_eq!(
            require_user(&state).unwrap_err().code,
            ErrorCode::AuthRequired
        );
    }
}
