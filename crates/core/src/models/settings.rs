use serde::{Deserialize, Serialize};

/// Client configuration: service endpoints and display limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the Mercato data/store service
    pub api_base_url: String,

    /// Base URL of the external identity provider's auth API
    pub auth_base_url: String,

    /// Publishable (anon) key sent with every identity request
    pub auth_api_key: String,

    /// How many securities to request for the leaderboard
    pub leaderboard_limit: u32,

    /// How many filtered rows the leaderboard renders. The count label
    /// shown next to the list reflects the FULL filtered size, not this
    /// cap.
    pub display_cap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.mercato.app".to_string(),
            auth_base_url: "https://auth.mercato.app/auth/v1".to_string(),
            auth_api_key: String::new(),
            leaderboard_limit: 500,
            display_cap: 100,
        }
    }
}
