//! # Session State
//!
//! Who is signed in, and keeping that across restarts.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session State Machine                              │
//! │                                                                         │
//! │              restore() finds "user"                                     │
//! │         ┌──────────────────────────────────┐                            │
//! │         │                                  ▼                            │
//! │  ┌──────────────────┐  login() → true  ┌──────────────────┐            │
//! │  │ Unauthenticated  │─────────────────►│  Authenticated   │            │
//! │  │  user = None     │◄─────────────────│  user = Some(..) │            │
//! │  └──────────────────┘     logout()     └──────────────────┘            │
//! │         ▲    │                                                          │
//! │         └────┘ login() → false (state untouched)                       │
//! │                                                                         │
//! │  Persisted record: "user" → {"id":1,"email":..,"password":..}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are logged and never change the outcome of an operation.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use storefront_core::{User, UserId, USER_STORAGE_KEY};
use storefront_db::{load_json, save_json, KeyValueStore};
use tracing::{debug, info, warn};

use crate::error::AuthError;

// =============================================================================
// Credential Validation
// =============================================================================

/// Decides whether an email/password pair identifies a user.
///
/// `Ok(None)` is a plain mismatch. `Err` means the backend itself failed;
/// the session treats that as a mismatch too, after logging it.
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    async fn validate(&self, email: &str, password: &str) -> Result<Option<User>, AuthError>;
}

/// Validator accepting exactly one registered identity.
#[derive(Clone)]
pub struct StaticCredentialValidator {
    user: User,
}

impl StaticCredentialValidator {
    /// Default demo identity.
    pub const DEFAULT_EMAIL: &'static str = "test@test.com";
    pub const DEFAULT_PASSWORD: &'static str = "123456";
    pub const DEFAULT_USER_ID: UserId = 1;

    /// Registers a single identity.
    pub fn new(id: UserId, email: impl Into<String>, password: impl Into<String>) -> Self {
        StaticCredentialValidator {
            user: User {
                id,
                email: email.into(),
                password: password.into(),
            },
        }
    }
}

impl Default for StaticCredentialValidator {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_USER_ID,
            Self::DEFAULT_EMAIL,
            Self::DEFAULT_PASSWORD,
        )
    }
}

#[async_trait]
impl CredentialValidator for StaticCredentialValidator {
    async fn validate(&self, email: &str, password: &str) -> Result<Option<User>, AuthError> {
        if email == self.user.email && password == self.user.password {
            Ok(Some(self.user.clone()))
        } else {
            Ok(None)
        }
    }
}

// =============================================================================
// Session Manager
// =============================================================================

/// Owns authentication state.
///
/// `is_authenticated()` is derived from the stored user, so the two can't
/// disagree.
pub struct SessionManager {
    user: Mutex<Option<User>>,
    store: Arc<dyn KeyValueStore>,
    validator: Arc<dyn CredentialValidator>,
}

impl SessionManager {
    /// Creates an unauthenticated session. Call [`SessionManager::restore`] next.
    pub fn new(store: Arc<dyn KeyValueStore>, validator: Arc<dyn CredentialValidator>) -> Self {
        SessionManager {
            user: Mutex::new(None),
            store,
            validator,
        }
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Loads the persisted user.
    ///
    /// Missing, malformed or unreadable records leave the session signed out.
    pub async fn restore(&self) {
        match load_json::<User>(self.store.as_ref(), USER_STORAGE_KEY).await {
            Ok(Some(user)) => {
                info!(user_id = user.id, "Session restored");
                self.set_user(Some(user));
            }
            Ok(None) => {
                debug!("No saved session");
                self.set_user(None);
            }
            Err(e) => {
                warn!(error = %e, "Could not restore session, starting signed out");
                self.set_user(None);
            }
        }
    }

    /// Attempts to sign in.
    ///
    /// ## Returns
    /// `true` if the credentials matched. On `false` nothing changes.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let user = match self.validator.validate(email, password).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!("Login rejected");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Credential check failed");
                return false;
            }
        };

        if let Err(e) = save_json(self.store.as_ref(), USER_STORAGE_KEY, &user).await {
            warn!(error = %e, "Signed in, but the session could not be saved");
        }

        info!(user_id = user.id, "Signed in");
        self.set_user(Some(user));
        true
    }

    /// Signs out. Safe to call when already signed out.
    pub async fn logout(&self) {
        if let Err(e) = self.store.remove(USER_STORAGE_KEY).await {
            warn!(error = %e, "Could not delete saved session");
        }

        self.set_user(None);
        info!("Signed out");
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("user", &self.current_user())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
