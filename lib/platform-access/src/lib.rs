//! Platform access and authentication for campus-hub.
//!
//! This crate provides:
//! - Session management (`Session`, `SessionId`, `PendingLogin`, `TokenSet`)
//! - Account projection from OIDC ID-token claims (`Account`)
//! - OIDC provider configuration (`OidcConfig`)
//! - Authentication error types
//!
//! # Session Lifecycle
//!
//! A session is created on the first login attempt and mutated through the
//! authorization-code flow:
//! - The login initiator stores a [`PendingLogin`] (CSRF token, PKCE
//!   verifier, nonce) and redirects to the identity provider.
//! - The redirect handler consumes the pending state exactly once, validates
//!   the CSRF token, and establishes the session with a [`TokenSet`] and an
//!   [`Account`] projected from the ID token.
//! - Logout or expiry destroys the session.
//!
//! # Example
//!
//! ```
//! use campus_hub_platform_access::{Account, PendingLogin, Session, SessionId, TokenSet};
//! use chrono::Duration;
//!
//! // Created on first login attempt
//! let mut session = Session::new(SessionId::generate(), Duration::minutes(60));
//! session.begin_login(PendingLogin::new(
//!     "csrf_state".to_string(),
//!     "pkce_verifier".to_string(),
//!     "nonce".to_string(),
//! ));
//! assert!(!session.is_authenticated());
//!
//! // Established by the redirect handler after the token exchange
//! let pending = session.take_pending_login().expect("pending login");
//! assert_eq!(pending.csrf_token(), "csrf_state");
//!
//! let account = Account::new("sub_123".to_string(), "https://login.example.com".to_string());
//! let tokens = TokenSet::new("access".to_string(), None, "id_token".to_string(), None);
//! session.establish(tokens, account);
//! assert!(session.is_authenticated());
//! ```

pub mod account;
pub mod auth;
pub mod error;
pub mod oidc;
pub mod session;

// Re-export main types at crate root
pub use account::Account;
pub use auth::{AuthenticatedUser, CallbackData, LoginInitiation};
pub use error::AuthenticationError;
pub use oidc::{OidcConfig, OidcConfigBuilder};
pub use session::{PendingLogin, Session, SessionId, TokenSet};
