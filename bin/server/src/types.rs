//! Shared response types for the API surface.

use campus_hub_backend_api::UserProfile;

/// Account info for display in the UI, projected from the ID token.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AccountInfo {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Response for `GET /api/me`: the identity-provider account alongside the
/// community-backend profile.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MeResponse {
    pub account: AccountInfo,
    pub profile: UserProfile,
}
