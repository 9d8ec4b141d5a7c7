//! Authentication context types for the web layer.
//!
//! This module provides the request-scoped types produced by the auth flow:
//! - `AuthenticatedUser`: extracted from a request after the edge gate passes
//! - `LoginInitiation`: data for redirecting to the identity provider
//! - `CallbackData`: data received back from the provider

use crate::account::Account;
use crate::session::Session;

/// Represents an authenticated user context extracted from the request.
///
/// This is available in handlers after the edge gate has validated the
/// session and access-token expiry. It can be used to:
/// - Read the account claims
/// - Pull the access token for backend proxy calls
/// - Access session metadata
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The current session.
    session: Session,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user context.
    ///
    /// Callers must only construct this from a session that passed
    /// authentication checks; an unauthenticated session here is a bug.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Returns the current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the account projection.
    ///
    /// # Panics
    ///
    /// Panics if constructed from an unauthenticated session.
    #[must_use]
    pub fn account(&self) -> &Account {
        self.session
            .account()
            .expect("AuthenticatedUser built from unauthenticated session")
    }

    /// Returns the access token for backend proxy calls.
    ///
    /// # Panics
    ///
    /// Panics if constructed from an unauthenticated session.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.session
            .tokens()
            .expect("AuthenticatedUser built from unauthenticated session")
            .access_token()
    }
}

/// Login initiation data for redirecting to the identity provider.
#[derive(Debug, Clone)]
pub struct LoginInitiation {
    /// The URL to redirect the user to for authentication.
    pub authorization_url: String,
    /// State parameter for CSRF protection (store in the session).
    pub state: String,
    /// PKCE code verifier (store in the session for the callback).
    pub pkce_verifier: String,
    /// Nonce for ID token validation (store in the session for the callback).
    pub nonce: String,
}

/// Data needed to process an identity-provider callback.
#[derive(Debug, Clone)]
pub struct CallbackData {
    /// The authorization code from the provider.
    pub code: String,
    /// The state parameter (must match the one from login initiation).
    pub state: String,
}
