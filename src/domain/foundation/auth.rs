//! Authentication types for the domain layer.
//!
//! The core never authenticates. The transport collaborator validates the
//! caller's token and hands every operation an `AuthContext`; handlers
//! require a verified identity before touching user-scoped state, so an
//! unauthenticated call fails uniformly without revealing whether the
//! underlying cart, order, or payment exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserId;

/// Verified identity supplied by the external auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// User's email address from the token claims.
    pub email: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Per-request authentication context.
///
/// Carries either a verified identity or nothing at all; there is no
/// partially-authenticated state.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    identity: Option<AuthenticatedUser>,
}

impl AuthContext {
    /// Context for a request carrying a verified identity.
    pub fn authenticated(user: AuthenticatedUser) -> Self {
        Self {
            identity: Some(user),
        }
    }

    /// Context for a request with no verified identity.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    /// Returns the verified identity or fails with `AuthRequired`.
    pub fn require(&self) -> Result<&AuthenticatedUser, AuthError> {
        self.identity.as_ref().ok_or(AuthError::AuthRequired)
    }

    /// Returns the identity if present, without failing.
    pub fn identity(&self) -> Option<&AuthenticatedUser> {
        self.identity.as_ref()
    }
}

/// Authentication errors surfaced by the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The request carried no verified identity.
    #[error("Authentication required")]
    AuthRequired,
}
