//! OIDC (OpenID Connect) provider configuration.
//!
//! This module provides configuration types for connecting to the external
//! identity provider used for user authentication. The platform authenticates
//! against the Microsoft identity platform, but nothing here is
//! Microsoft-specific beyond the defaults.

use serde::{Deserialize, Serialize};

/// Configuration for the OIDC identity provider.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// The OIDC issuer URL used for discovery
    /// (e.g., "https://login.microsoftonline.com/{tenant}/v2.0").
    issuer_url: String,
    /// The OAuth2 client ID registered with the provider.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The redirect URI for the OAuth2 callback
    /// (e.g., "https://app.example.com/auth/callback").
    redirect_uri: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "openid,profile,email,offline_access"
    #[serde(default = "default_scopes")]
    scopes: String,
    /// The provider's end-session (logout) endpoint
    /// (e.g., "https://login.microsoftonline.com/{tenant}/oauth2/v2.0/logout").
    /// Empty disables the provider round trip on logout.
    #[serde(default)]
    end_session_uri: String,
    /// Where the provider should send the user agent after provider logout.
    /// Empty omits the parameter.
    #[serde(default)]
    post_logout_redirect_uri: String,
}

fn default_scopes() -> String {
    "openid,profile,email,offline_access".to_string()
}

impl OidcConfig {
    /// Creates a new OIDC configuration with defaults for optional fields.
    #[must_use]
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            issuer_url,
            client_id,
            client_secret,
            redirect_uri,
            scopes: default_scopes(),
            end_session_uri: String::new(),
            post_logout_redirect_uri: String::new(),
        }
    }

    /// Creates a configuration builder for more customization.
    #[must_use]
    pub fn builder(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> OidcConfigBuilder {
        OidcConfigBuilder::new(issuer_url, client_id, client_secret, redirect_uri)
    }

    /// Returns the OIDC issuer URL.
    #[must_use]
    pub fn issuer_url(&self) -> &str {
        &self.issuer_url
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the OAuth2 redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the OAuth2 scopes to request, parsed from comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes.split(',').map(str::trim).collect()
    }

    /// Returns the raw scopes string.
    #[must_use]
    pub fn scopes_raw(&self) -> &str {
        &self.scopes
    }

    /// Returns the provider's end-session endpoint, if configured.
    #[must_use]
    pub fn end_session_uri(&self) -> Option<&str> {
        if self.end_session_uri.is_empty() {
            None
        } else {
            Some(&self.end_session_uri)
        }
    }

    /// Returns the post-logout redirect URI, if configured.
    #[must_use]
    pub fn post_logout_redirect_uri(&self) -> Option<&str> {
        if self.post_logout_redirect_uri.is_empty() {
            None
        } else {
            Some(&self.post_logout_redirect_uri)
        }
    }
}

/// Builder for `OidcConfig`.
#[derive(Debug)]
pub struct OidcConfigBuilder {
    issuer_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<String>,
    end_session_uri: String,
    post_logout_redirect_uri: String,
}

impl OidcConfigBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            issuer_url,
            client_id,
            client_secret,
            redirect_uri,
            scopes: vec![
                "openid".to_string(),
                "profile".to_string(),
                "email".to_string(),
                "offline_access".to_string(),
            ],
            end_session_uri: String::new(),
            post_logout_redirect_uri: String::new(),
        }
    }

    /// Sets the OAuth2 scopes to request.
    #[must_use]
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Adds a scope to the list of scopes to request.
    #[must_use]
    pub fn add_scope(mut self, scope: String) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Sets the provider's end-session endpoint.
    #[must_use]
    pub fn end_session_uri(mut self, uri: String) -> Self {
        self.end_session_uri = uri;
        self
    }

    /// Sets the post-logout redirect URI.
    #[must_use]
    pub fn post_logout_redirect_uri(mut self, uri: String) -> Self {
        self.post_logout_redirect_uri = uri;
        self
    }

    /// Builds the `OidcConfig`.
    #[must_use]
    pub fn build(self) -> OidcConfig {
        OidcConfig {
            issuer_url: self.issuer_url,
            client_id: self.client_id,
            client_secret: self.client_secret,
            redirect_uri: self.redirect_uri,
            scopes: self.scopes.join(","),
            end_session_uri: self.end_session_uri,
            post_logout_redirect_uri: self.post_logout_redirect_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_has_defaults() {
        let config = OidcConfig::new(
            "https://login.microsoftonline.com/common/v2.0".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://app.example.com/auth/callback".to_string(),
        );

        assert_eq!(
            config.issuer_url(),
            "https://login.microsoftonline.com/common/v2.0"
        );
        assert_eq!(config.client_id(), "client-id");
        assert_eq!(config.client_secret(), "client-secret");
        assert_eq!(
            config.redirect_uri(),
            "https://app.example.com/auth/callback"
        );
        assert!(config.scopes().contains(&"openid"));
        assert!(config.scopes().contains(&"profile"));
        assert!(config.scopes().contains(&"offline_access"));
        assert!(config.end_session_uri().is_none());
        assert!(config.post_logout_redirect_uri().is_none());
    }

    #[test]
    fn builder_allows_customization() {
        let config = OidcConfig::builder(
            "https://login.microsoftonline.com/common/v2.0".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://app.example.com/auth/callback".to_string(),
        )
        .end_session_uri(
            "https://login.microsoftonline.com/common/oauth2/v2.0/logout".to_string(),
        )
        .post_logout_redirect_uri("https://app.example.com/".to_string())
        .add_scope("User.Read".to_string())
        .build();

        assert_eq!(
            config.end_session_uri(),
            Some("https://login.microsoftonline.com/common/oauth2/v2.0/logout")
        );
        assert_eq!(
            config.post_logout_redirect_uri(),
            Some("https://app.example.com/")
        );
        assert!(config.scopes().contains(&"User.Read"));
    }

    #[test]
    fn builder_add_scope_does_not_duplicate() {
        let config = OidcConfig::builder(
            "https://login.microsoftonline.com/common/v2.0".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://app.example.com/auth/callback".to_string(),
        )
        .add_scope("openid".to_string()) // Already present
        .add_scope("custom".to_string())
        .build();

        let openid_count = config.scopes().iter().filter(|s| *s == &"openid").count();
        assert_eq!(openid_count, 1);
        assert!(config.scopes().contains(&"custom"));
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = OidcConfig::new(
            "https://login.microsoftonline.com/common/v2.0".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://app.example.com/auth/callback".to_string(),
        );

        let json = serde_json::to_string(&config).expect("serialize");
        let parsed: OidcConfig = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(config.issuer_url(), parsed.issuer_url());
        assert_eq!(config.client_id(), parsed.client_id());
        assert_eq!(config.scopes(), parsed.scopes());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{
            "issuer_url": "https://login.microsoftonline.com/tenant-id/v2.0",
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_uri": "https://app.example.com/auth/callback"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.client_id(), "my-client");
        assert_eq!(
            config.scopes(),
            vec!["openid", "profile", "email", "offline_access"]
        );
        assert!(config.end_session_uri().is_none());
    }

    #[test]
    fn scopes_parses_comma_separated() {
        let json = r#"{
            "issuer_url": "https://login.microsoftonline.com/tenant-id/v2.0",
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_uri": "https://app.example.com/auth/callback",
            "scopes": "openid, profile, email, User.Read"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(
            config.scopes(),
            vec!["openid", "profile", "email", "User.Read"]
        );
    }
}
