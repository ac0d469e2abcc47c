pub mod errors;
pub mod logging;
pub mod models;
pub mod ports;
pub mod providers;
pub mod services;

use uuid::Uuid;

use errors::CoreError;
use models::holding::PortfolioHolding;
use models::security::Security;
use models::session::SessionContext;
use models::settings::Settings;
use ports::{ConfirmationPort, NotificationPort};
use providers::mercato_api::MercatoApi;
use providers::supabase::SupabaseAuth;
use providers::traits::{HoldingsRemote, IdentityProvider, MarketDataProvider};
use services::auth::AuthService;
use services::edit_session::EditSession;
use services::leaderboard::Leaderboard;
use services::portfolio_store::{self, CommitOutcome, PortfolioStore, RemoveOutcome};
use services::progress::LoadProgress;
use services::score;

/// Main entry point for the Mercato core library.
/// Holds the loaded state and all services needed to operate on it.
///
/// Single-writer by construction: all state is owned here and mutated
/// only through these methods. Network calls suspend the caller, not
/// the thread.
#[must_use]
pub struct Mercato {
    settings: Settings,
    identity: Box<dyn IdentityProvider>,
    market_data: Box<dyn MarketDataProvider>,
    holdings_remote: Box<dyn HoldingsRemote>,
    auth_service: AuthService,
    leaderboard: Leaderboard,
    store: PortfolioStore,
    progress: LoadProgress,
    /// Present between sign-in and sign-out; the sole gate for
    /// portfolio-mutating operations.
    session: Option<SessionContext>,
}

impl std::fmt::Debug for Mercato {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mercato")
            .field("securities", &self.leaderboard.securities().len())
            .field("holdings", &self.store.len())
            .field("signed_in", &self.session.is_some())
            .finish()
    }
}

impl Mercato {
    /// Wire up against the production endpoints in [`Settings`].
    pub fn new(settings: Settings) -> Self {
        let api = MercatoApi::new(&settings.api_base_url);
        let identity = SupabaseAuth::new(&settings.auth_base_url, &settings.auth_api_key);
        Self::build(
            settings,
            Box::new(identity),
            Box::new(api.clone()),
            Box::new(api),
        )
    }

    /// Wire up with custom capabilities (tests, alternative
    /// transports).
    pub fn with_providers(
        settings: Settings,
        identity: Box<dyn IdentityProvider>,
        market_data: Box<dyn MarketDataProvider>,
        holdings_remote: Box<dyn HoldingsRemote>,
    ) -> Self {
        Self::build(settings, identity, market_data, holdings_remote)
    }

    fn build(
        settings: Settings,
        identity: Box<dyn IdentityProvider>,
        market_data: Box<dyn MarketDataProvider>,
        holdings_remote: Box<dyn HoldingsRemote>,
    ) -> Self {
        Self {
            settings,
            identity,
            market_data,
            holdings_remote,
            auth_service: AuthService::new(),
            leaderboard: Leaderboard::new(),
            store: PortfolioStore::new(),
            progress: LoadProgress::start(),
            session: None,
        }
    }

    // ── Session ─────────────────────────────────────────────────────

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), CoreError> {
        let session = self
            .auth_service
            .sign_in(&*self.identity, email, password)
            .await?;
        self.session = Some(session);
        Ok(())
    }

    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<(), CoreError> {
        let session = self
            .auth_service
            .sign_up(&*self.identity, email, password)
            .await?;
        self.session = Some(session);
        Ok(())
    }

    /// Clear the session. The remote revocation is best-effort; the
    /// local session is gone either way.
    pub async fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            self.auth_service.sign_out(&*self.identity, session).await;
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    fn owner(&self) -> Result<Uuid, CoreError> {
        self.session
            .as_ref()
            .map(|s| s.user_id)
            .ok_or(CoreError::NotAuthenticated)
    }

    // ── Leaderboard ─────────────────────────────────────────────────

    /// Fetch the ranked security set (fail-soft: an empty board on
    /// transport failure) and snap the progress bar to done.
    pub async fn load_leaderboard(&mut self) {
        self.progress = LoadProgress::start();
        self.leaderboard
            .load(&*self.market_data, self.settings.leaderboard_limit)
            .await;
        self.progress.complete();
    }

    /// One tick of the UI's loading timer. Returns the new percentage.
    pub fn tick_progress(&mut self) -> u8 {
        self.progress.advance()
    }

    #[must_use]
    pub fn loading_progress(&self) -> u8 {
        self.progress.percent()
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn select_sector(&mut self, sector: impl Into<String>) {
        self.leaderboard.select_sector(sector);
    }

    /// The rows actually rendered: the filtered set truncated to the
    /// display cap. The count label belongs to
    /// [`Leaderboard::filtered_count`], which is NOT truncated.
    #[must_use]
    pub fn visible_securities(&self) -> Vec<&Security> {
        self.leaderboard.visible(self.settings.display_cap)
    }

    /// One security by ticker (detail view).
    pub async fn fetch_security(&self, ticker: &str) -> Result<Security, CoreError> {
        self.market_data.security(ticker).await
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Fetch the signed-in user's holdings (fail-soft: an empty set on
    /// transport failure).
    pub async fn load_portfolio(&mut self) -> Result<(), CoreError> {
        let owner = self.owner()?;
        self.store.load(&*self.holdings_remote, owner).await;
        Ok(())
    }

    #[must_use]
    pub fn holdings(&self) -> &[PortfolioHolding] {
        self.store.holdings()
    }

    /// Unweighted mean of the holdings' final scores (see
    /// [`score::portfolio_score`] for the exact contract).
    #[must_use]
    pub fn portfolio_score(&self) -> f64 {
        score::portfolio_score(self.store.holdings())
    }

    /// Total market value of the holdings.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        score::total_value(self.store.holdings())
    }

    /// Add `ticker` to the portfolio from a user-typed share count.
    /// Returns the parsed count. Local state is NOT updated; call
    /// [`Mercato::load_portfolio`] to observe the new holding.
    pub async fn add_holding(&self, ticker: &str, input: &str) -> Result<f64, CoreError> {
        let owner = self.owner()?;
        let shares = portfolio_store::parse_shares(input)?;
        let ticker = ticker.trim().to_uppercase();
        self.store
            .add(&*self.holdings_remote, owner, &ticker, shares)
            .await?;
        Ok(shares)
    }

    /// Open an in-place edit on a held ticker.
    pub fn begin_edit(&mut self, ticker: &str) -> bool {
        self.store.begin_edit(ticker)
    }

    /// Replace the typed value of the open edit.
    pub fn edit_input(&mut self, text: &str) {
        self.store.edit_input(text);
    }

    #[must_use]
    pub fn editing(&self) -> Option<&EditSession> {
        self.store.editing()
    }

    /// Commit the open edit (blur or accept keystroke).
    pub async fn commit_edit(
        &mut self,
        notify: &dyn NotificationPort,
    ) -> Result<CommitOutcome, CoreError> {
        let owner = self.owner()?;
        Ok(self
            .store
            .commit_edit(&*self.holdings_remote, owner, notify)
            .await)
    }

    /// Discard the open edit without contacting the store.
    pub fn cancel_edit(&mut self) {
        self.store.cancel_edit();
    }

    /// Remove a holding behind the confirmation gate.
    pub async fn remove_holding(
        &mut self,
        ticker: &str,
        confirm: &dyn ConfirmationPort,
        notify: &dyn NotificationPort,
    ) -> Result<RemoveOutcome, CoreError> {
        let owner = self.owner()?;
        Ok(self
            .store
            .remove(&*self.holdings_remote, owner, ticker, confirm, notify)
            .await)
    }
}
