//! Account projection from identity-provider claims.
//!
//! The account is a read-only view of the ID token issued at login. It is
//! never persisted separately; the community backend owns the durable user
//! profile, keyed by the same subject claim.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Read-only projection of the identity provider's ID-token claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The subject claim - unique user identifier from the provider.
    subject: String,
    /// The issuer URL - identifies which identity provider authenticated the user.
    issuer: String,
    /// Login username (from the preferred_username claim, if available).
    username: Option<String>,
    /// Display name (from the name claim, if available).
    display_name: Option<String>,
    /// Email address (from the email claim, if available).
    email: Option<String>,
    /// Remaining claims from the raw ID-token payload.
    #[serde(default)]
    claims: JsonValue,
}

impl Account {
    /// Creates an account projection with the required claims.
    #[must_use]
    pub fn new(subject: String, issuer: String) -> Self {
        Self {
            subject,
            issuer,
            username: None,
            display_name: None,
            email: None,
            claims: JsonValue::Null,
        }
    }

    /// Sets the username claim.
    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = name;
        self
    }

    /// Sets the email claim.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Attaches the raw claim payload.
    #[must_use]
    pub fn with_claims(mut self, claims: JsonValue) -> Self {
        self.claims = claims;
        self
    }

    /// Returns the subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the issuer URL.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the login username, if available.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the display name, if available.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the email address, if available.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the raw claim payload.
    #[must_use]
    pub fn claims(&self) -> &JsonValue {
        &self.claims
    }

    /// Looks up a single claim by name in the raw payload.
    #[must_use]
    pub fn claim(&self, name: &str) -> Option<&JsonValue> {
        self.claims.get(name)
    }
}
