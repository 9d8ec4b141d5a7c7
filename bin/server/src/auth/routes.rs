//! Authentication routes for login, callback, and logout.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use campus_hub_platform_access::{PendingLogin, Session, SessionId, TokenSet};
use chrono::Duration as ChronoDuration;
use serde::Deserialize;
use std::sync::Arc;
use time::Duration as TimeDuration;

use super::AppState;

/// Session cookie name. Carries only the opaque session ID.
pub(crate) const SESSION_COOKIE: &str = "session";

/// Access-token cookie name. Carries the raw token whose expiry claim the
/// edge gate decodes.
pub(crate) const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Query parameters for the OIDC callback.
///
/// The provider sends either `code`+`state` or an `error` pair.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Initiates the OIDC login flow by redirecting to the identity provider.
///
/// Always starts a fresh session; an existing one (valid or not) is
/// replaced, so login restarts the flow from scratch.
pub async fn login(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let initiation = state.oidc_client.authorization_url();

    let mut session = Session::new(
        SessionId::generate(),
        ChronoDuration::minutes(state.session_config.duration_minutes),
    );
    session.begin_login(PendingLogin::new(
        initiation.state,
        initiation.pkce_verifier,
        initiation.nonce,
    ));

    let session_cookie = build_cookie(
        SESSION_COOKIE,
        session.id().to_string(),
        state.session_config.secure_cookies,
        TimeDuration::minutes(state.session_config.duration_minutes),
    );

    state.sessions.insert(session).await;

    (jar.add(session_cookie), Redirect::to(&initiation.authorization_url))
}

/// Handles the OIDC callback after the user authenticates with the identity provider.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthError> {
    // Provider-reported failures short-circuit before any token traffic.
    if let Some(error) = query.error {
        return Err(AuthError::ProviderError {
            error,
            description: query.error_description.unwrap_or_default(),
        });
    }

    let code = query.code.ok_or(AuthError::MissingCode)?;
    let callback_state = query.state.ok_or(AuthError::MissingAuthState)?;

    // The session created by the login initiator holds our expectations.
    let session_cookie = jar.get(SESSION_COOKIE).ok_or(AuthError::MissingAuthState)?;
    let session_id = SessionId::from(session_cookie.value());

    let mut session = state
        .sessions
        .find(&session_id)
        .await
        .ok_or(AuthError::MissingAuthState)?;

    if session.is_expired() {
        state.sessions.delete(&session_id).await;
        return Err(AuthError::MissingAuthState);
    }

    // Consume the pending state before validating so a replayed callback
    // has nothing left to validate against.
    let pending = session
        .take_pending_login()
        .ok_or(AuthError::MissingAuthState)?;
    state.sessions.insert(session.clone()).await;

    // Validate CSRF token
    if callback_state != pending.csrf_token() {
        return Err(AuthError::CsrfMismatch);
    }

    // Exchange the authorization code for tokens
    let token_result = state
        .oidc_client
        .exchange_code(&code, &pending)
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

    tracing::info!(
        subject = token_result.account.subject(),
        "User authenticated"
    );

    let tokens = TokenSet::new(
        token_result.access_token.clone(),
        token_result.refresh_token,
        token_result.id_token,
        token_result.access_token_expires_at,
    );
    session.establish(tokens, token_result.account);
    state.sessions.insert(session).await;

    // The access-token cookie feeds the edge gate's expiry check.
    let access_cookie = build_cookie(
        ACCESS_TOKEN_COOKIE,
        token_result.access_token,
        state.session_config.secure_cookies,
        TimeDuration::minutes(state.session_config.duration_minutes),
    );

    Ok((jar.add(access_cookie), Redirect::to("/")))
}

/// Logs out the user by destroying the session and redirecting to the
/// provider's end-session endpoint when one is configured.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session_cookie) = jar.get(SESSION_COOKIE) {
        let session_id = SessionId::from(session_cookie.value());
        state.sessions.delete(&session_id).await;
    }

    let jar = jar
        .add(removal_cookie(SESSION_COOKIE))
        .add(removal_cookie(ACCESS_TOKEN_COOKIE));

    let target = state
        .oidc_client
        .logout_url()
        .unwrap_or_else(|| "/".to_string());

    (jar, Redirect::to(&target))
}

/// Builds an HTTP-only cookie with the platform's standard attributes.
fn build_cookie(
    name: &'static str,
    value: String,
    secure: bool,
    max_age: TimeDuration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Builds a cookie that expires immediately, removing the named cookie.
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(TimeDuration::ZERO)
        .build()
}

/// Authentication errors.
#[derive(Debug)]
pub enum AuthError {
    /// The callback carried no authorization code.
    MissingCode,
    /// No session, no pending login state, or no state parameter.
    MissingAuthState,
    /// The state parameter did not match the stored CSRF token.
    CsrfMismatch,
    /// The provider reported an error instead of a code.
    ProviderError { error: String, description: String },
    /// The code-for-token exchange failed.
    TokenExchange(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingCode => (StatusCode::BAD_REQUEST, "Missing authorization code"),
            Self::MissingAuthState => (StatusCode::BAD_REQUEST, "Missing auth state"),
            Self::CsrfMismatch => (StatusCode::BAD_REQUEST, "CSRF token mismatch"),
            Self::ProviderError { error, description } => {
                tracing::warn!(error = %error, description = %description, "Identity provider returned an error");
                (StatusCode::BAD_REQUEST, "Authentication was not completed")
            }
            Self::TokenExchange(msg) => {
                tracing::error!("Token exchange failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed")
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_cookie_sets_standard_attributes() {
        let cookie = build_cookie(
            SESSION_COOKIE,
            "sess_abc".to_string(),
            true,
            TimeDuration::minutes(60),
        );

        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "sess_abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(TimeDuration::minutes(60)));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie(ACCESS_TOKEN_COOKIE);
        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
    }

    #[test]
    fn callback_query_accepts_provider_error_shape() {
        let query: CallbackQuery = serde_json::from_str(
            r#"{ "error": "access_denied", "error_description": "user cancelled" }"#,
        )
        .expect("deserialize");

        assert_eq!(query.error.as_deref(), Some("access_denied"));
        assert!(query.code.is_none());
    }
}
