//! Authentication module for the campus-hub server.
//!
//! This module provides:
//! - OIDC authentication against the Microsoft identity platform
//!   (authorization-code flow with PKCE)
//! - In-memory, cookie-keyed session management
//! - Authentication extractors for Axum routes (the edge gate)
//!
//! # Flow
//!
//! The login initiator generates CSRF state, a PKCE pair, and a nonce,
//! stores them in a fresh session, and redirects to the provider's
//! authorize endpoint. The callback validates the returned state against
//! the session, exchanges the code for tokens, and establishes the
//! authenticated session. The edge gate then admits requests until the
//! access token's expiry claim lapses; logout tears the session down and
//! completes the provider's end-session round trip.

pub mod middleware;
pub mod oidc;
pub mod routes;
pub mod store;

use crate::config::SessionConfig;
use campus_hub_backend_api::BackendClient;
use campus_hub_schedule::{HolidayClient, TimetableClient};

pub use middleware::{OptionalAuth, RequireAuth};
pub use oidc::OidcClient;
pub use routes::{callback, login, logout};
pub use store::SessionStore;

/// Shared application state.
pub struct AppState {
    /// Active sessions, keyed by cookie-delivered ID.
    pub sessions: SessionStore,
    /// OIDC client for authentication.
    pub oidc_client: OidcClient,
    /// Session configuration.
    pub session_config: SessionConfig,
    /// Client for the community backend.
    pub backend: BackendClient,
    /// University schedule source.
    pub timetable: TimetableClient,
    /// Public-holidays source.
    pub holidays: HolidayClient,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        oidc_client: OidcClient,
        session_config: SessionConfig,
        backend: BackendClient,
        timetable: TimetableClient,
        holidays: HolidayClient,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            oidc_client,
            session_config,
            backend,
            timetable,
            holidays,
        }
    }
}
