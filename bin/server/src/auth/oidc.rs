//! OIDC client implementation using the openidconnect crate.
//!
//! Provider metadata is discovered once at startup and cached in the client
//! for the process lifetime; building an authorize URL or exchanging a code
//! never repeats the discovery round trip.

use campus_hub_platform_access::{Account, LoginInitiation, OidcConfig, PendingLogin};
use chrono::{DateTime, Utc};
use openidconnect::core::{CoreAuthenticationFlow, CoreProviderMetadata};
use openidconnect::{
    AuthorizationCode, ClientId, ClientSecret, CsrfToken, IssuerUrl, Nonce, OAuth2TokenResponse,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse,
};

/// OIDC client for authenticating users against the identity provider.
pub struct OidcClient {
    provider_metadata: CoreProviderMetadata,
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_url: RedirectUrl,
    config: OidcConfig,
}

/// Result of a successful token exchange.
pub struct TokenResult {
    /// Account projected from the validated ID token.
    pub account: Account,
    /// Access token presented to the community backend.
    pub access_token: String,
    /// Refresh token, when the provider issued one.
    pub refresh_token: Option<String>,
    /// The raw ID token.
    pub id_token: String,
    /// Access-token expiry derived from the token endpoint's expires_in.
    pub access_token_expires_at: Option<DateTime<Utc>>,
}

impl OidcClient {
    /// Creates a new OIDC client by discovering the provider metadata.
    pub async fn discover(config: OidcConfig) -> Result<Self, OidcError> {
        let issuer_url = IssuerUrl::new(config.issuer_url().to_string())
            .map_err(|e| OidcError::Configuration(format!("invalid issuer URL: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                OidcError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        let provider_metadata = CoreProviderMetadata::discover_async(issuer_url, &http_client)
            .await
            .map_err(|e| OidcError::Discovery(format!("failed to discover provider: {}", e)))?;

        let redirect_url = RedirectUrl::new(config.redirect_uri().to_string())
            .map_err(|e| OidcError::Configuration(format!("invalid redirect URI: {}", e)))?;

        let client_id = ClientId::new(config.client_id().to_string());
        let client_secret = ClientSecret::new(config.client_secret().to_string());

        Ok(Self {
            provider_metadata,
            client_id,
            client_secret,
            redirect_url,
            config,
        })
    }

    /// Generates the authorization URL for redirecting the user.
    ///
    /// The returned initiation carries the CSRF state, PKCE verifier, and
    /// nonce; the caller stores them in the session for the callback.
    pub fn authorization_url(&self) -> LoginInitiation {
        use openidconnect::core::CoreClient;

        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut auth_request = client
            .authorize_url(
                CoreAuthenticationFlow::AuthorizationCode,
                CsrfToken::new_random,
                Nonce::new_random,
            )
            .set_pkce_challenge(pkce_challenge);

        // Add configured scopes
        for scope in self.config.scopes() {
            auth_request = auth_request.add_scope(Scope::new(scope.to_string()));
        }

        let (auth_url, csrf_token, nonce) = auth_request.url();

        LoginInitiation {
            authorization_url: auth_url.to_string(),
            state: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
            nonce: nonce.secret().clone(),
        }
    }

    /// Exchanges the authorization code for tokens and projects the claims.
    pub async fn exchange_code(
        &self,
        code: &str,
        pending: &PendingLogin,
    ) -> Result<TokenResult, OidcError> {
        use openidconnect::core::CoreClient;

        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let pkce_verifier = PkceCodeVerifier::new(pending.pkce_verifier().to_string());

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                OidcError::TokenExchange(format!("failed to create HTTP client: {}", e))
            })?;

        let token_request = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .map_err(|e| OidcError::TokenExchange(format!("token endpoint error: {}", e)))?;

        let token_response = token_request
            .set_pkce_verifier(pkce_verifier)
            .request_async(&http_client)
            .await
            .map_err(|e| OidcError::TokenExchange(format!("token exchange failed: {}", e)))?;

        // Extract the ID token
        let id_token = token_response
            .id_token()
            .ok_or_else(|| OidcError::TokenExchange("no ID token in response".to_string()))?;

        // Verify and extract claims
        let nonce = Nonce::new(pending.nonce().to_string());
        let claims = id_token
            .claims(&client.id_token_verifier(), &nonce)
            .map_err(|e| {
                OidcError::TokenValidation(format!("ID token validation failed: {}", e))
            })?;

        // Extract standard claims
        let subject = claims.subject().to_string();
        let issuer = claims.issuer().to_string();
        let email: Option<String> = claims.email().map(|e| e.as_str().to_string());
        let username: Option<String> = claims
            .preferred_username()
            .map(|u| u.as_str().to_string());
        let display_name: Option<String> = claims
            .name()
            .and_then(|n| n.get(None))
            .map(|n| n.as_str().to_string());

        // Keep the raw claim payload on the account; the app surfaces
        // provider-specific claims (tenant, roles) without re-decoding.
        let raw_id_token = raw_id_token(&token_response)?;
        let extra_claims = jwt_payload(&raw_id_token)?;

        let account = Account::new(subject, issuer)
            .with_username(username)
            .with_display_name(display_name)
            .with_email(email)
            .with_claims(extra_claims);

        let access_token_expires_at = token_response
            .expires_in()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);

        Ok(TokenResult {
            account,
            access_token: token_response.access_token().secret().clone(),
            refresh_token: token_response.refresh_token().map(|t| t.secret().clone()),
            id_token: raw_id_token,
            access_token_expires_at,
        })
    }

    /// Returns the provider logout URL, when one is configured.
    pub fn logout_url(&self) -> Option<String> {
        let end_session = self.config.end_session_uri()?;

        let Ok(mut url) = reqwest::Url::parse(end_session) else {
            tracing::warn!(end_session_uri = end_session, "Invalid end-session URI configured");
            return None;
        };

        if let Some(post_logout) = self.config.post_logout_redirect_uri() {
            url.query_pairs_mut()
                .append_pair("post_logout_redirect_uri", post_logout);
        }

        Some(url.to_string())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OidcConfig {
        &self.config
    }
}

/// Extracts the raw ID token string from a token response.
fn raw_id_token<TR>(token_response: &TR) -> Result<String, OidcError>
where
    TR: serde::Serialize,
{
    // The token response includes the raw id_token string; serializing to
    // JSON is the supported way to reach it.
    let response_json = serde_json::to_value(token_response).map_err(|e| {
        OidcError::TokenValidation(format!("Failed to serialize token response: {}", e))
    })?;

    response_json
        .get("id_token")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| OidcError::TokenValidation("No id_token in response".to_string()))
}

/// Decodes the payload of a compact JWT without verifying the signature.
fn jwt_payload(token: &str) -> Result<serde_json::Value, OidcError> {
    // JWT is base64url(header).base64url(payload).signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(OidcError::TokenValidation("Invalid JWT format".to_string()));
    }

    use base64::Engine;
    let payload_bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| {
            OidcError::TokenValidation(format!("Failed to decode JWT payload: {}", e))
        })?;

    serde_json::from_slice(&payload_bytes).map_err(|e| {
        OidcError::TokenValidation(format!("Failed to parse JWT payload: {}", e))
    })
}

/// Decodes a token's `exp` claim without verifying the signature.
///
/// This feeds the edge gate's expiry check only; nothing security-relevant
/// is derived from the unverified payload.
pub fn decode_token_expiry(token: &str) -> Result<DateTime<Utc>, OidcError> {
    let payload = jwt_payload(token)?;

    let exp = payload
        .get("exp")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| OidcError::TokenValidation("No exp claim in token".to_string()))?;

    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| OidcError::TokenValidation(format!("exp claim out of range: {}", exp)))
}

/// OIDC-related errors.
#[derive(Debug)]
pub enum OidcError {
    /// Configuration error (invalid URLs, etc.)
    Configuration(String),
    /// Failed to discover provider metadata.
    Discovery(String),
    /// Token exchange failed.
    TokenExchange(String),
    /// Token validation failed.
    TokenValidation(String),
}

impl std::fmt::Display for OidcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "OIDC configuration error: {}", msg),
            Self::Discovery(msg) => write!(f, "OIDC discovery error: {}", msg),
            Self::TokenExchange(msg) => write!(f, "OIDC token exchange error: {}", msg),
            Self::TokenValidation(msg) => write!(f, "OIDC token validation error: {}", msg),
        }
    }
}

impl std::error::Error for OidcError {}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    /// Builds an unsigned compact JWT with the given payload.
    fn fake_jwt(payload: serde_json::Value) -> String {
        let engine = &base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let body = engine.encode(payload.to_string().as_bytes());
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn decode_token_expiry_reads_exp_claim() {
        let token = fake_jwt(serde_json::json!({
            "sub": "user-123",
            "exp": 1_900_000_000i64
        }));

        let expiry = decode_token_expiry(&token).expect("expiry");
        assert_eq!(expiry.timestamp(), 1_900_000_000);
    }

    #[test]
    fn decode_token_expiry_rejects_missing_exp() {
        let token = fake_jwt(serde_json::json!({ "sub": "user-123" }));

        let err = decode_token_expiry(&token).expect_err("should fail");
        assert!(err.to_string().contains("exp"));
    }

    #[test]
    fn decode_token_expiry_rejects_non_jwt() {
        assert!(decode_token_expiry("not-a-jwt").is_err());
        assert!(decode_token_expiry("a.b").is_err());
    }

    #[test]
    fn decode_token_expiry_rejects_bad_base64() {
        assert!(decode_token_expiry("header.!!!.signature").is_err());
    }

    #[test]
    fn jwt_payload_preserves_custom_claims() {
        let token = fake_jwt(serde_json::json!({
            "sub": "user-123",
            "tid": "tenant-abc",
            "exp": 1_900_000_000i64
        }));

        let payload = jwt_payload(&token).expect("payload");
        assert_eq!(
            payload.get("tid").and_then(|v| v.as_str()),
            Some("tenant-abc")
        );
    }
}
