use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::IdentityProvider;
use crate::errors::CoreError;
use crate::models::session::{AuthGrant, AuthSession, AuthUser};

const PROVIDER_NAME: &str = "Supabase";

/// Supabase GoTrue auth client.
///
/// - **Sign-in**: `POST {base}/token?grant_type=password`
/// - **Sign-up**: `POST {base}/signup`
/// - **Sign-out**: `POST {base}/logout` (bearer token)
///
/// Every request carries the project's publishable key in the `apikey`
/// header. Token refresh is not handled here: the session lives only as
/// long as the process.
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    async fn grant_request(
        &self,
        url: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthGrant, CoreError> {
        let resp = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let failure: FailurePayload = resp.json().await.unwrap_or_default();
            return Err(CoreError::Auth(failure.reason()));
        }

        let payload: GrantPayload = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse auth response: {e}"),
        })?;

        Ok(AuthGrant {
            user: payload.user,
            session: AuthSession {
                access_token: payload.access_token,
            },
        })
    }
}

// ── GoTrue response types ───────────────────────────────────────────

#[derive(Deserialize)]
struct GrantPayload {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize, Default)]
struct FailurePayload {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl FailurePayload {
    fn reason(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .unwrap_or_else(|| "Authentication failed".to_string())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl IdentityProvider for SupabaseAuth {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthGrant, CoreError> {
        let url = format!("{}/token?grant_type=password", self.base_url);
        self.grant_request(&url, email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, CoreError> {
        let url = format!("{}/signup", self.base_url);
        self.grant_request(&url, email, password).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), CoreError> {
        let url = format!("{}/logout", self.base_url);

        self.client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
