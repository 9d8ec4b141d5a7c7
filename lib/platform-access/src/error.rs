//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `AuthenticationError`: Authentication failures (OIDC, session)

use std::fmt;

/// Errors from authentication operations.
///
/// These errors represent failures in verifying user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// OIDC token validation failed.
    InvalidToken { reason: String },
    /// OIDC access token has expired.
    TokenExpired,
    /// Session not found or invalid.
    InvalidSession { session_id: String },
    /// Session has expired.
    SessionExpired { session_id: String },
    /// No pending login state to validate the callback against.
    MissingLoginState { session_id: String },
    /// The callback state did not match the stored CSRF token.
    StateMismatch,
    /// OIDC provider error.
    ProviderError { provider: String, reason: String },
    /// Missing required claim in token.
    MissingClaim { claim: String },
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { reason } => {
                write!(f, "invalid token: {reason}")
            }
            Self::TokenExpired => {
                write!(f, "access token has expired")
            }
            Self::InvalidSession { session_id } => {
                write!(f, "invalid session: {session_id}")
            }
            Self::SessionExpired { session_id } => {
                write!(f, "session has expired: {session_id}")
            }
            Self::MissingLoginState { session_id } => {
                write!(f, "no pending login state for session: {session_id}")
            }
            Self::StateMismatch => {
                write!(f, "callback state does not match stored CSRF token")
            }
            Self::ProviderError { provider, reason } => {
                write!(f, "OIDC provider '{provider}' error: {reason}")
            }
            Self::MissingClaim { claim } => {
                write!(f, "missing required claim: {claim}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_display() {
        let err = AuthenticationError::InvalidToken {
            reason: "malformed payload".to_string(),
        };
        assert!(err.to_string().contains("invalid token"));
        assert!(err.to_string().contains("malformed payload"));
    }

    #[test]
    fn token_expired_display() {
        let err = AuthenticationError::TokenExpired;
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn session_expired_display() {
        let err = AuthenticationError::SessionExpired {
            session_id: "sess_abc".to_string(),
        };
        assert!(err.to_string().contains("sess_abc"));
    }

    #[test]
    fn state_mismatch_display() {
        let err = AuthenticationError::StateMismatch;
        assert!(err.to_string().contains("CSRF"));
    }

    #[test]
    fn missing_claim_display() {
        let err = AuthenticationError::MissingClaim {
            claim: "preferred_username".to_string(),
        };
        assert!(err.to_string().contains("preferred_username"));
    }
}
