//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//!
//! See [`OidcConfig`](campus_hub_platform_access::OidcConfig) for
//! identity-provider configuration.

use campus_hub_platform_access::OidcConfig;
use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the server listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Community backend configuration.
    pub backend: BackendConfig,

    /// Calendar source configuration.
    pub calendar: CalendarConfig,

    /// OIDC authentication configuration.
    pub oidc: OidcConfig,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session duration in minutes.
    /// Sessions outliving the access token are caught by the expiry gate.
    #[serde(default = "default_session_duration_minutes")]
    pub duration_minutes: i64,

    /// Interval between session cleanup runs, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_session_duration_minutes() -> i64 {
    60
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_session_duration_minutes(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

/// Community backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the community backend REST API.
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_backend_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_backend_timeout_seconds() -> u64 {
    10
}

/// Calendar source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// University schedule API endpoint.
    pub timetable_url: String,

    /// Public-holidays API base URL (year and country are appended).
    pub holidays_url: String,

    /// ISO 3166-1 alpha-2 country code for holiday lookups.
    #[serde(default = "default_country")]
    pub country: String,

    /// Request timeout in seconds, shared by both sources.
    #[serde(default = "default_calendar_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_country() -> String {
    "KR".to_string()
}

fn default_calendar_timeout_seconds() -> u64 {
    10
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.duration_minutes, 60);
        assert_eq!(config.cleanup_interval_seconds, 300);
        assert!(config.secure_cookies);
    }

    #[test]
    fn backend_config_defaults_timeout() {
        let config: BackendConfig =
            serde_json::from_str(r#"{ "api_url": "https://api.campus.example.com" }"#)
                .expect("deserialize");
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn calendar_config_defaults_country() {
        let config: CalendarConfig = serde_json::from_str(
            r#"{
                "timetable_url": "https://schedule.university.example.com/api/entries",
                "holidays_url": "https://date.nager.at/api/v3/PublicHolidays"
            }"#,
        )
        .expect("deserialize");
        assert_eq!(config.country, "KR");
        assert_eq!(config.timeout_seconds, 10);
    }
}
