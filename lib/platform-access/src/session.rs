//! Session management for the authentication flow.
//!
//! A session represents one browser's relationship with the platform. It is
//! created on the first login attempt, carries the in-flight authorization
//! state while the user is at the identity provider, holds the token cache
//! and account projection once authenticated, and is destroyed on logout or
//! expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::account::Account;

/// Unique identifier for a session.
///
/// Session IDs are opaque strings delivered to the browser in an HTTP-only
/// cookie. The identifier carries no meaning; all state lives server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from a string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generates a fresh random session ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Authorization-flow state stored between the authorize redirect and the
/// provider callback.
///
/// The CSRF token correlates the callback with the request that initiated
/// it; the PKCE verifier binds the authorization code to this client; the
/// nonce ties the ID token to this login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    csrf_token: String,
    pkce_verifier: String,
    nonce: String,
    created_at: DateTime<Utc>,
}

impl PendingLogin {
    /// Creates pending-login state for a freshly initiated flow.
    #[must_use]
    pub fn new(csrf_token: String, pkce_verifier: String, nonce: String) -> Self {
        Self {
            csrf_token,
            pkce_verifier,
            nonce,
            created_at: Utc::now(),
        }
    }

    /// Returns the CSRF state token.
    #[must_use]
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Returns the PKCE code verifier.
    #[must_use]
    pub fn pkce_verifier(&self) -> &str {
        &self.pkce_verifier
    }

    /// Returns the ID-token nonce.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Returns when the flow was initiated.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Token material cached in the session after a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    access_token: String,
    refresh_token: Option<String>,
    id_token: String,
    /// Access-token expiry as reported by the token endpoint, if any.
    access_token_expires_at: Option<DateTime<Utc>>,
}

impl TokenSet {
    /// Creates a token set from an exchange result.
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        id_token: String,
        access_token_expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            id_token,
            access_token_expires_at,
        }
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token, if the provider issued one.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the raw ID token.
    #[must_use]
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// Returns the access-token expiry, if known.
    #[must_use]
    pub fn access_token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.access_token_expires_at
    }
}

/// A server-side session, one per browser.
///
/// Created on the first login attempt and mutated through the
/// authorization-code flow. A session is authenticated once it carries both
/// a token set and an account projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// When the session expires.
    expires_at: DateTime<Utc>,
    /// In-flight authorization state, present only between the authorize
    /// redirect and the callback.
    pending_login: Option<PendingLogin>,
    /// Token cache, present once authenticated.
    tokens: Option<TokenSet>,
    /// Account projected from the ID token, present once authenticated.
    account: Option<Account>,
}

impl Session {
    /// Creates a new, unauthenticated session.
    ///
    /// The session is valid for the specified duration.
    #[must_use]
    pub fn new(id: SessionId, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            expires_at: now + duration,
            pending_login: None,
            tokens: None,
            account: None,
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Stores authorization-flow state for a newly initiated login.
    ///
    /// Replaces any prior pending state; restarting the login always
    /// restarts the flow from scratch.
    pub fn begin_login(&mut self, pending: PendingLogin) {
        self.pending_login = Some(pending);
    }

    /// Returns the pending login state without consuming it.
    #[must_use]
    pub fn pending_login(&self) -> Option<&PendingLogin> {
        self.pending_login.as_ref()
    }

    /// Consumes the pending login state.
    ///
    /// The state is cleared so a replayed callback cannot validate twice.
    pub fn take_pending_login(&mut self) -> Option<PendingLogin> {
        self.pending_login.take()
    }

    /// Marks the session authenticated with the given tokens and account.
    ///
    /// Clears any remaining pending-login state.
    pub fn establish(&mut self, tokens: TokenSet, account: Account) {
        self.pending_login = None;
        self.tokens = Some(tokens);
        self.account = Some(account);
    }

    /// Returns the cached tokens, if the session is authenticated.
    #[must_use]
    pub fn tokens(&self) -> Option<&TokenSet> {
        self.tokens.as_ref()
    }

    /// Returns the account projection, if the session is authenticated.
    #[must_use]
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Returns true if the session carries tokens and an account.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some() && self.account.is_some()
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the session is still valid (not expired).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }

    /// Replaces the token cache and extends the session expiry.
    pub fn refresh(&mut self, tokens: TokenSet, duration: Duration) {
        self.tokens = Some(tokens);
        self.expires_at = Utc::now() + duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session_id() -> SessionId {
        SessionId::new("sess_test_123".to_string())
    }

    fn test_account() -> Account {
        Account::new(
            "sub_123".to_string(),
            "https://login.microsoftonline.com/common/v2.0".to_string(),
        )
    }

    fn test_tokens() -> TokenSet {
        TokenSet::new(
            "access_token_123".to_string(),
            Some("refresh_token_456".to_string()),
            "id_token_789".to_string(),
            None,
        )
    }

    #[test]
    fn session_id_display() {
        let id = test_session_id();
        assert_eq!(id.to_string(), "sess_test_123");
    }

    #[test]
    fn session_id_from_string() {
        let id: SessionId = "test_session".to_string().into();
        assert_eq!(id.as_str(), "test_session");
    }

    #[test]
    fn generated_session_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn new_session_is_unauthenticated() {
        let session_id = test_session_id();

        let before = Utc::now();
        let session = Session::new(session_id.clone(), Duration::hours(1));
        let after = Utc::now();

        assert_eq!(session.id(), &session_id);
        assert!(session.created_at() >= before);
        assert!(session.created_at() <= after);
        assert!(session.expires_at() > session.created_at());
        assert!(!session.is_authenticated());
        assert!(session.pending_login().is_none());
        assert!(session.tokens().is_none());
        assert!(session.account().is_none());
    }

    #[test]
    fn begin_login_stores_pending_state() {
        let mut session = Session::new(test_session_id(), Duration::hours(1));
        session.begin_login(PendingLogin::new(
            "csrf".to_string(),
            "verifier".to_string(),
            "nonce".to_string(),
        ));

        let pending = session.pending_login().expect("pending login");
        assert_eq!(pending.csrf_token(), "csrf");
        assert_eq!(pending.pkce_verifier(), "verifier");
        assert_eq!(pending.nonce(), "nonce");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn begin_login_replaces_prior_state() {
        let mut session = Session::new(test_session_id(), Duration::hours(1));
        session.begin_login(PendingLogin::new(
            "first".to_string(),
            "v1".to_string(),
            "n1".to_string(),
        ));
        session.begin_login(PendingLogin::new(
            "second".to_string(),
            "v2".to_string(),
            "n2".to_string(),
        ));

        let pending = session.pending_login().expect("pending login");
        assert_eq!(pending.csrf_token(), "second");
    }

    #[test]
    fn take_pending_login_consumes_state() {
        let mut session = Session::new(test_session_id(), Duration::hours(1));
        session.begin_login(PendingLogin::new(
            "csrf".to_string(),
            "verifier".to_string(),
            "nonce".to_string(),
        ));

        let taken = session.take_pending_login();
        assert!(taken.is_some());

        // A replayed callback finds nothing to validate against.
        assert!(session.take_pending_login().is_none());
        assert!(session.pending_login().is_none());
    }

    #[test]
    fn establish_marks_authenticated_and_clears_pending() {
        let mut session = Session::new(test_session_id(), Duration::hours(1));
        session.begin_login(PendingLogin::new(
            "csrf".to_string(),
            "verifier".to_string(),
            "nonce".to_string(),
        ));

        session.establish(test_tokens(), test_account());

        assert!(session.is_authenticated());
        assert!(session.pending_login().is_none());
        assert_eq!(
            session.tokens().expect("tokens").access_token(),
            "access_token_123"
        );
        assert_eq!(session.account().expect("account").subject(), "sub_123");
    }

    #[test]
    fn session_expiration() {
        // Create a session that expires immediately
        let session = Session::new(test_session_id(), Duration::seconds(-1));

        assert!(session.is_expired());
        assert!(!session.is_valid());
    }

    #[test]
    fn session_not_expired() {
        let session = Session::new(test_session_id(), Duration::hours(1));

        assert!(!session.is_expired());
        assert!(session.is_valid());
    }

    #[test]
    fn session_refresh_extends_expiry() {
        let mut session = Session::new(test_session_id(), Duration::seconds(1));
        session.establish(test_tokens(), test_account());

        let old_expires = session.expires_at();

        // Wait briefly and refresh
        std::thread::sleep(std::time::Duration::from_millis(10));
        session.refresh(
            TokenSet::new(
                "new_access".to_string(),
                None,
                "new_id_token".to_string(),
                None,
            ),
            Duration::hours(2),
        );

        assert_eq!(session.tokens().expect("tokens").access_token(), "new_access");
        assert!(session.tokens().expect("tokens").refresh_token().is_none());
        assert!(session.expires_at() > old_expires);
    }

    #[test]
    fn token_set_accessors() {
        let tokens = test_tokens();
        assert_eq!(tokens.access_token(), "access_token_123");
        assert_eq!(tokens.refresh_token(), Some("refresh_token_456"));
        assert_eq!(tokens.id_token(), "id_token_789");
        assert!(tokens.access_token_expires_at().is_none());
    }

    #[test]
    fn session_serialization_roundtrip() {
        let mut session = Session::new(test_session_id(), Duration::hours(1));
        session.establish(test_tokens(), test_account());

        let json = serde_json::to_string(&session).expect("serialize");
        let parsed: Session = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(session, parsed);
    }
}
