//! Authentication extractors for Axum: the edge gate.
//!
//! Every protected request passes through [`RequireAuth`], which checks the
//! session and decodes the access token's expiry claim. No cryptographic
//! signature is verified here; the community backend re-validates the token
//! on every proxied call.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use campus_hub_platform_access::{AuthenticatedUser, SessionId};
use chrono::Utc;
use std::sync::Arc;

use super::{
    AppState,
    oidc::decode_token_expiry,
    routes::{ACCESS_TOKEN_COOKIE, SESSION_COOKIE},
};

/// Extractor for requiring an authenticated user.
///
/// If the user is not authenticated, or the access token has expired, they
/// will be redirected to the login page.
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::InternalError)?;

        // Get session ID from cookie
        let session_cookie = jar
            .get(SESSION_COOKIE)
            .ok_or(AuthRejection::NotAuthenticated)?;

        let session_id = SessionId::from(session_cookie.value());

        // Look up session in the store
        let session = app_state
            .sessions
            .find(&session_id)
            .await
            .ok_or(AuthRejection::NotAuthenticated)?;

        // Check if session is expired
        if session.is_expired() {
            // Delete the expired session
            app_state.sessions.delete(&session_id).await;
            return Err(AuthRejection::SessionExpired);
        }

        // A session mid-login has no tokens yet
        if !session.is_authenticated() {
            return Err(AuthRejection::NotAuthenticated);
        }

        // Expiry gate: decode the exp claim from the access-token cookie,
        // no signature verification. A missing or undecodable token is
        // sent back through login rather than surfacing an error.
        let access_cookie = jar
            .get(ACCESS_TOKEN_COOKIE)
            .ok_or(AuthRejection::NotAuthenticated)?;

        match decode_token_expiry(access_cookie.value()) {
            Ok(expiry) if expiry > Utc::now() => {}
            Ok(_) => {
                app_state.sessions.delete(&session_id).await;
                return Err(AuthRejection::TokenExpired);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Access token expiry could not be decoded");
                app_state.sessions.delete(&session_id).await;
                return Err(AuthRejection::TokenExpired);
            }
        }

        Ok(RequireAuth(AuthenticatedUser::new(session)))
    }
}

/// Extractor for optionally getting the authenticated user.
///
/// Returns None if the user is not authenticated.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match RequireAuth::from_request_parts(parts, state).await {
            Ok(RequireAuth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

/// Rejection type for authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    NotAuthenticated,
    SessionExpired,
    TokenExpired,
    InternalError,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated | Self::SessionExpired | Self::TokenExpired => {
                Redirect::to("/auth/login").into_response()
            }
            Self::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
