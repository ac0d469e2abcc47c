use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::PortfolioHolding;
use crate::ports::{ConfirmationPort, NotificationPort};
use crate::providers::traits::HoldingsRemote;
use crate::services::edit_session::{EditPhase, EditSession};

const INVALID_SHARES_MSG: &str = "Please enter a valid number";
const UPDATE_FAILED_MSG: &str = "Failed to update shares";
const REMOVE_FAILED_MSG: &str = "Failed to remove stock";

/// How a removal request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Delete acknowledged and the set reloaded.
    Removed,
    /// The user declined at the confirmation gate; nothing was sent.
    Cancelled,
    /// The delete mutation failed; local state is untouched.
    Failed,
}

/// How an edit-session commit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Update acknowledged, session closed, set reloaded.
    Saved,
    /// The typed value did not validate; session kept, nothing sent.
    Rejected,
    /// The update mutation failed; session kept with the typed value.
    Failed,
    /// No edit session was open.
    NoSession,
}

/// Parse a user-typed share count.
///
/// Trims, parses as `f64`, and applies the same validity rule as the
/// typed operations: finite and strictly positive. Rejection happens
/// before any network call.
pub fn parse_shares(input: &str) -> Result<f64, CoreError> {
    let shares: f64 = input
        .trim()
        .parse()
        .map_err(|_| CoreError::ValidationError(INVALID_SHARES_MSG.into()))?;
    validate_shares(shares)?;
    Ok(shares)
}

/// Reject non-finite or non-positive share counts.
pub fn validate_shares(shares: f64) -> Result<(), CoreError> {
    if !shares.is_finite() || shares <= 0.0 {
        return Err(CoreError::ValidationError(INVALID_SHARES_MSG.into()));
    }
    Ok(())
}

/// The client-side view of one user's holdings, backed by the
/// authoritative remote store.
///
/// Consistency model: every applied mutation is followed by a full
/// reload from the remote set — never a speculative local patch. The
/// locally observed state is therefore never more stale than one round
/// trip, at the cost of visible latency between "committed" and
/// "reflected".
///
/// At most one share-count edit is open at a time across the whole
/// store.
pub struct PortfolioStore {
    holdings: Vec<PortfolioHolding>,
    editing: Option<EditSession>,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self {
            holdings: Vec::new(),
            editing: None,
        }
    }

    /// The holdings as of the last reload, upstream order.
    pub fn holdings(&self) -> &[PortfolioHolding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// The open edit session, if any.
    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Fetch the full holdings set for `owner`.
    ///
    /// A transport failure degrades to an EMPTY set rather than an
    /// error — indistinguishable from a user who genuinely holds
    /// nothing (see DESIGN.md). The failure is logged loudly.
    pub async fn load(&mut self, remote: &dyn HoldingsRemote, owner: Uuid) {
        match remote.fetch_holdings(owner).await {
            Ok(holdings) => {
                tracing::debug!(count = holdings.len(), %owner, "holdings loaded");
                self.holdings = holdings;
            }
            Err(error) => {
                tracing::warn!(%error, %owner, "holdings load failed; showing an empty set");
                self.holdings = Vec::new();
            }
        }
    }

    /// Issue a create mutation for a new holding.
    ///
    /// Validation failures are rejected locally with no network call.
    /// On success local state is NOT touched: callers must re-`load` to
    /// observe the new holding.
    pub async fn add(
        &self,
        remote: &dyn HoldingsRemote,
        owner: Uuid,
        ticker: &str,
        shares: f64,
    ) -> Result<(), CoreError> {
        validate_shares(shares)?;
        remote.create_holding(owner, ticker, shares).await?;
        tracing::info!(%ticker, shares, "holding created");
        Ok(())
    }

    /// Issue an update mutation replacing a holding's share count.
    ///
    /// Validation failures are rejected locally with no network call.
    /// On success the open edit session for that ticker (if any) is
    /// closed; callers must re-`load` to observe the change.
    pub async fn update(
        &mut self,
        remote: &dyn HoldingsRemote,
        owner: Uuid,
        ticker: &str,
        shares: f64,
    ) -> Result<(), CoreError> {
        validate_shares(shares)?;
        remote.update_holding(owner, ticker, shares).await?;
        if self.editing.as_ref().is_some_and(|s| s.ticker() == ticker) {
            self.editing = None;
        }
        tracing::info!(%ticker, shares, "holding updated");
        Ok(())
    }

    /// Remove a holding behind the confirmation gate.
    ///
    /// Declining leaves the holdings set untouched with no mutation
    /// issued. Confirming issues exactly one delete followed by one
    /// reload. A failed delete is surfaced through `notify` and leaves
    /// local state exactly as before the attempt.
    pub async fn remove(
        &mut self,
        remote: &dyn HoldingsRemote,
        owner: Uuid,
        ticker: &str,
        confirm: &dyn ConfirmationPort,
        notify: &dyn NotificationPort,
    ) -> RemoveOutcome {
        let question = format!("Are you sure you want to remove {ticker} from your portfolio?");
        if !confirm.confirm(&question) {
            return RemoveOutcome::Cancelled;
        }

        match remote.delete_holding(owner, ticker).await {
            Ok(()) => {
                tracing::info!(%ticker, "holding removed");
                self.load(remote, owner).await;
                RemoveOutcome::Removed
            }
            Err(error) => {
                tracing::warn!(%error, %ticker, "holding removal failed");
                notify.notify(REMOVE_FAILED_MSG);
                RemoveOutcome::Failed
            }
        }
    }

    // ── Edit session ────────────────────────────────────────────────

    /// Open an edit on `ticker`, seeding the input with its current
    /// share count. Replaces a session already open on another ticker.
    /// Returns `false` (and opens nothing) when the ticker is not held.
    pub fn begin_edit(&mut self, ticker: &str) -> bool {
        let Some(holding) = self.holdings.iter().find(|h| h.ticker == ticker) else {
            return false;
        };
        self.editing = Some(EditSession::begin(&holding.ticker, holding.shares));
        true
    }

    /// Replace the typed value of the open session, if any.
    pub fn edit_input(&mut self, text: &str) {
        if let Some(session) = &mut self.editing {
            session.set_input(text);
        }
    }

    /// Discard the open session without contacting the store.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commit the open session (blur or accept keystroke).
    ///
    /// An unparseable or non-positive value is surfaced through
    /// `notify` and the session stays open with the typed value — no
    /// network call. A valid value goes through `update`; on success
    /// the session is closed and the set reloaded; on failure the
    /// session stays open with the ATTEMPTED value (not rolled back to
    /// the pre-edit count) so the user can retry.
    pub async fn commit_edit(
        &mut self,
        remote: &dyn HoldingsRemote,
        owner: Uuid,
        notify: &dyn NotificationPort,
    ) -> CommitOutcome {
        let Some(session) = &mut self.editing else {
            return CommitOutcome::NoSession;
        };

        let ticker = session.ticker().to_string();
        let shares = match parse_shares(session.input()) {
            Ok(shares) => shares,
            Err(_) => {
                notify.notify(INVALID_SHARES_MSG);
                return CommitOutcome::Rejected;
            }
        };

        session.set_phase(EditPhase::Saving);
        match self.update(remote, owner, &ticker, shares).await {
            Ok(()) => {
                self.load(remote, owner).await;
                CommitOutcome::Saved
            }
            Err(error) => {
                tracing::warn!(%error, %ticker, "share update failed");
                notify.notify(UPDATE_FAILED_MSG);
                if let Some(session) = &mut self.editing {
                    session.set_phase(EditPhase::Editing);
                }
                CommitOutcome::Failed
            }
        }
    }
}

impl Default for PortfolioStore {
    fn default() -> Self {
        Self::new()
    }
}
