use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use uuid::Uuid;

use super::traits::{HoldingsRemote, MarketDataProvider};
use crate::errors::CoreError;
use crate::models::holding::PortfolioHolding;
use crate::models::security::Security;

const PROVIDER_NAME: &str = "Mercato data service";

/// HTTP client for the Mercato data/store service.
///
/// - **Securities**: `GET /leaderboard?limit=N`, `GET /stock/{ticker}`
/// - **Holdings**: `GET/POST/PUT/DELETE /portfolio/{owner}[/{ticker}]`
///
/// All bodies are JSON. No request timeout is configured: failure is
/// whatever the transport reports, and no retry is attempted.
#[derive(Clone)]
pub struct MercatoApi {
    client: Client,
    base_url: String,
}

impl MercatoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

// ── Request body types ──────────────────────────────────────────────

#[derive(Serialize)]
struct SharesBody {
    shares: f64,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for MercatoApi {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn leaderboard(&self, limit: u32) -> Result<Vec<Security>, CoreError> {
        let url = format!("{}/leaderboard?limit={limit}", self.base_url);

        self.client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse leaderboard response: {e}"),
            })
    }

    async fn security(&self, ticker: &str) -> Result<Security, CoreError> {
        let ticker = ticker.trim().to_uppercase();
        let url = format!("{}/stock/{ticker}", self.base_url);

        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::SecurityNotFound(ticker));
        }

        resp.error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse security {ticker}: {e}"),
            })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HoldingsRemote for MercatoApi {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_holdings(&self, owner: Uuid) -> Result<Vec<PortfolioHolding>, CoreError> {
        let url = format!("{}/portfolio/{owner}", self.base_url);

        self.client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse holdings for {owner}: {e}"),
            })
    }

    async fn create_holding(
        &self,
        owner: Uuid,
        ticker: &str,
        shares: f64,
    ) -> Result<(), CoreError> {
        let url = format!("{}/portfolio/{owner}/{ticker}", self.base_url);

        self.client
            .post(&url)
            .json(&SharesBody { shares })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_holding(
        &self,
        owner: Uuid,
        ticker: &str,
        shares: f64,
    ) -> Result<(), CoreError> {
        let url = format!("{}/portfolio/{owner}/{ticker}", self.base_url);

        self.client
            .put(&url)
            .json(&SharesBody { shares })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_holding(&self, owner: Uuid, ticker: &str) -> Result<(), CoreError> {
        let url = format!("{}/portfolio/{owner}/{ticker}", self.base_url);

        self.client
            .delete(&url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
