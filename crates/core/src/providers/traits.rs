use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::PortfolioHolding;
use crate::models::security::Security;
use crate::models::session::AuthGrant;

/// Read side of the remote data service: scored securities.
///
/// The leaderboard order is whatever the upstream feed provides; no
/// re-ranking happens on this side of the wire.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// The ranked security set, at most `limit` rows, upstream order.
    async fn leaderboard(&self, limit: u32) -> Result<Vec<Security>, CoreError>;

    /// One security by ticker.
    async fn security(&self, ticker: &str) -> Result<Security, CoreError>;
}

/// The authoritative remote holdings store for one owner.
///
/// Mutations return only an acknowledgement; observing their effect
/// requires a fresh `fetch_holdings` round trip.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait HoldingsRemote: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// The full, enriched holdings set for `owner`.
    async fn fetch_holdings(&self, owner: Uuid) -> Result<Vec<PortfolioHolding>, CoreError>;

    /// Create a holding.
    async fn create_holding(
        &self,
        owner: Uuid,
        ticker: &str,
        shares: f64,
    ) -> Result<(), CoreError>;

    /// Replace the share count of an existing holding.
    async fn update_holding(
        &self,
        owner: Uuid,
        ticker: &str,
        shares: f64,
    ) -> Result<(), CoreError>;

    /// Delete a holding.
    async fn delete_holding(&self, owner: Uuid, ticker: &str) -> Result<(), CoreError>;
}

/// External identity provider, consumed as a capability.
///
/// Session issuance is entirely the provider's concern; this library
/// only holds on to the resulting grant for the lifetime of the
/// process.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait IdentityProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthGrant, CoreError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, CoreError>;

    /// Revoke `access_token` remotely.
    async fn sign_out(&self, access_token: &str) -> Result<(), CoreError>;
}
