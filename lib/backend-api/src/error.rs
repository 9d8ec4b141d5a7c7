//! Error types for the backend-api crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `BackendError`: failures talking to the community backend

use std::fmt;

/// Errors from community-backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never produced a response (connect, timeout, TLS).
    Transport { reason: String },
    /// The backend rejected the caller's token.
    Unauthorized,
    /// The backend refused the operation for this caller.
    Forbidden,
    /// The entity does not exist.
    NotFound,
    /// Any other non-success status.
    Status { status: u16 },
    /// The response body did not match the expected shape.
    Decode { reason: String },
}

impl BackendError {
    /// Maps a non-success HTTP status to the matching variant.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            other => Self::Status { status: other },
        }
    }

    /// Returns the backend status code, if this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::Status { status } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => {
                write!(f, "backend request failed: {reason}")
            }
            Self::Unauthorized => write!(f, "backend rejected the access token"),
            Self::Forbidden => write!(f, "backend refused the operation"),
            Self::NotFound => write!(f, "entity not found on the backend"),
            Self::Status { status } => {
                write!(f, "backend returned status {status}")
            }
            Self::Decode { reason } => {
                write!(f, "failed to decode backend response: {reason}")
            }
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_maps_known_codes() {
        assert_eq!(BackendError::from_status(401), BackendError::Unauthorized);
        assert_eq!(BackendError::from_status(403), BackendError::Forbidden);
        assert_eq!(BackendError::from_status(404), BackendError::NotFound);
        assert_eq!(
            BackendError::from_status(503),
            BackendError::Status { status: 503 }
        );
    }

    #[test]
    fn status_is_none_for_transport_errors() {
        let err = BackendError::Transport {
            reason: "connection refused".to_string(),
        };
        assert!(err.status().is_none());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn status_roundtrips_for_http_errors() {
        assert_eq!(BackendError::Unauthorized.status(), Some(401));
        assert_eq!(BackendError::Status { status: 502 }.status(), Some(502));
    }
}
