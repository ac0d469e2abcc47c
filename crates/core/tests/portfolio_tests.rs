// ═══════════════════════════════════════════════════════════════════
// PortfolioStore & EditSession tests — validation short-circuits,
// mutation/reload choreography, confirmation gate, edit state machine
// ═══════════════════════════════════════════════════════════════════

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use mercato_core::errors::CoreError;
use mercato_core::models::holding::PortfolioHolding;
use mercato_core::ports::{ConfirmationPort, NotificationPort};
use mercato_core::providers::traits::HoldingsRemote;
use mercato_core::services::edit_session::EditPhase;
use mercato_core::services::portfolio_store::{
    parse_shares, validate_shares, CommitOutcome, PortfolioStore, RemoveOutcome,
};

// ═══════════════════════════════════════════════════════════════════
// Recording mock remote
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Fetch,
    Create { ticker: String, shares: f64 },
    Update { ticker: String, shares: f64 },
    Delete { ticker: String },
}

/// Scripted in-memory holdings store that records every call and can
/// be told to fail any operation.
struct RecordingRemote {
    holdings: Mutex<Vec<PortfolioHolding>>,
    calls: Mutex<Vec<Call>>,
    fail_fetch: bool,
    fail_create: bool,
    fail_update: bool,
    fail_delete: bool,
}

impl RecordingRemote {
    fn with_holdings(holdings: Vec<PortfolioHolding>) -> Self {
        Self {
            holdings: Mutex::new(holdings),
            calls: Mutex::new(Vec::new()),
            fail_fetch: false,
            fail_create: false,
            fail_update: false,
            fail_delete: false,
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn remote_error(op: &str) -> CoreError {
        CoreError::Api {
            provider: "RecordingRemote".into(),
            message: format!("simulated {op} failure"),
        }
    }
}

#[async_trait]
impl HoldingsRemote for RecordingRemote {
    fn name(&self) -> &str {
        "RecordingRemote"
    }

    async fn fetch_holdings(&self, _owner: Uuid) -> Result<Vec<PortfolioHolding>, CoreError> {
        self.record(Call::Fetch);
        if self.fail_fetch {
            return Err(Self::remote_error("fetch"));
        }
        Ok(self.holdings.lock().unwrap().clone())
    }

    async fn create_holding(
        &self,
        _owner: Uuid,
        ticker: &str,
        shares: f64,
    ) -> Result<(), CoreError> {
        self.record(Call::Create {
            ticker: ticker.to_string(),
            shares,
        });
        if self.fail_create {
            return Err(Self::remote_error("create"));
        }
        self.holdings.lock().unwrap().push(make_holding(ticker, shares));
        Ok(())
    }

    async fn update_holding(
        &self,
        _owner: Uuid,
        ticker: &str,
        shares: f64,
    ) -> Result<(), CoreError> {
        self.record(Call::Update {
            ticker: ticker.to_string(),
            shares,
        });
        if self.fail_update {
            return Err(Self::remote_error("update"));
        }
        let mut holdings = self.holdings.lock().unwrap();
        if let Some(holding) = holdings.iter_mut().find(|h| h.ticker == ticker) {
            holding.shares = shares;
        }
        Ok(())
    }

    async fn delete_holding(&self, _owner: Uuid, ticker: &str) -> Result<(), CoreError> {
        self.record(Call::Delete {
            ticker: ticker.to_string(),
        });
        if self.fail_delete {
            return Err(Self::remote_error("delete"));
        }
        self.holdings.lock().unwrap().retain(|h| h.ticker != ticker);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════
// Scripted ports
// ═══════════════════════════════════════════════════════════════════

struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ConfirmationPort for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }
}

#[derive(Default)]
struct RecordingNotify {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotify {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationPort for RecordingNotify {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn make_holding(ticker: &str, shares: f64) -> PortfolioHolding {
    PortfolioHolding {
        ticker: ticker.to_string(),
        name: format!("{ticker} Inc."),
        shares,
        current_price: Some(100.0),
        price_change_pct: Some(1.5),
        final_score: Some(75.0),
    }
}

fn owner() -> Uuid {
    Uuid::new_v4()
}

async fn loaded_store(remote: &RecordingRemote, owner: Uuid) -> PortfolioStore {
    let mut store = PortfolioStore::new();
    store.load(remote, owner).await;
    store
}

// ═══════════════════════════════════════════════════════════════════
// Share-count validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn parse_accepts_positive_reals() {
        assert_eq!(parse_shares("10").unwrap(), 10.0);
        assert_eq!(parse_shares("5.5").unwrap(), 5.5);
        assert_eq!(parse_shares(" 2.25 ").unwrap(), 2.25);
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["abc", "", "ten", "1.2.3"] {
            let result = parse_shares(input);
            match result.unwrap_err() {
                CoreError::ValidationError(msg) => assert!(msg.contains("valid number")),
                other => panic!("Expected ValidationError, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_rejects_zero_and_negative() {
        assert!(parse_shares("0").is_err());
        assert!(parse_shares("-3").is_err());
    }

    #[test]
    fn parse_rejects_non_finite() {
        // "NaN" and "inf" parse as f64 but are not valid share counts.
        assert!(parse_shares("NaN").is_err());
        assert!(parse_shares("inf").is_err());
    }

    #[test]
    fn validate_typed_counts() {
        assert!(validate_shares(0.01).is_ok());
        assert!(validate_shares(0.0).is_err());
        assert!(validate_shares(-1.0).is_err());
        assert!(validate_shares(f64::NAN).is_err());
        assert!(validate_shares(f64::INFINITY).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// load
// ═══════════════════════════════════════════════════════════════════

mod load {
    use super::*;

    #[tokio::test]
    async fn load_populates_holdings() {
        let remote = RecordingRemote::with_holdings(vec![
            make_holding("AAPL", 10.0),
            make_holding("MSFT", 2.0),
        ]);
        let store = loaded_store(&remote, owner()).await;

        assert_eq!(store.len(), 2);
        assert_eq!(store.holdings()[0].ticker, "AAPL");
    }

    #[tokio::test]
    async fn failed_load_degrades_to_empty_set() {
        let mut remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 10.0)]);
        remote.fail_fetch = true;

        let store = loaded_store(&remote, owner()).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn failed_reload_clears_previous_state() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 10.0)]);
        let mut store = loaded_store(&remote, user).await;
        assert_eq!(store.len(), 1);

        let mut failing = RecordingRemote::with_holdings(Vec::new());
        failing.fail_fetch = true;
        store.load(&failing, user).await;
        assert!(store.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// add
// ═══════════════════════════════════════════════════════════════════

mod add {
    use super::*;

    #[tokio::test]
    async fn invalid_shares_never_reach_the_network() {
        let remote = RecordingRemote::with_holdings(Vec::new());
        let store = PortfolioStore::new();

        for shares in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = store.add(&remote, owner(), "AAPL", shares).await;
            assert!(matches!(result, Err(CoreError::ValidationError(_))));
        }
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn add_issues_one_create_and_nothing_else() {
        let remote = RecordingRemote::with_holdings(Vec::new());
        let store = PortfolioStore::new();

        store.add(&remote, owner(), "AAPL", 3.5).await.unwrap();
        assert_eq!(
            remote.calls(),
            vec![Call::Create {
                ticker: "AAPL".into(),
                shares: 3.5
            }]
        );
    }

    #[tokio::test]
    async fn add_does_not_touch_local_state() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![make_holding("MSFT", 1.0)]);
        let store = loaded_store(&remote, user).await;

        store.add(&remote, user, "AAPL", 3.5).await.unwrap();

        // The new holding is on the remote but invisible locally until
        // the next load.
        assert_eq!(store.len(), 1);
        assert!(store.holdings().iter().all(|h| h.ticker != "AAPL"));
    }

    #[tokio::test]
    async fn failed_add_surfaces_the_error() {
        let mut remote = RecordingRemote::with_holdings(Vec::new());
        remote.fail_create = true;
        let store = PortfolioStore::new();

        let result = store.add(&remote, owner(), "AAPL", 1.0).await;
        assert!(matches!(result, Err(CoreError::Api { .. })));
    }
}

// ═══════════════════════════════════════════════════════════════════
// update
// ═══════════════════════════════════════════════════════════════════

mod update {
    use super::*;

    #[tokio::test]
    async fn invalid_shares_never_reach_the_network() {
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 10.0)]);
        let mut store = loaded_store(&remote, owner()).await;
        let before = remote.calls().len();

        let result = store.update(&remote, owner(), "AAPL", 0.0).await;
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert_eq!(remote.calls().len(), before);
    }

    #[tokio::test]
    async fn update_clears_the_matching_edit_session() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 10.0)]);
        let mut store = loaded_store(&remote, user).await;

        assert!(store.begin_edit("AAPL"));
        store.update(&remote, user, "AAPL", 12.0).await.unwrap();
        assert!(store.editing().is_none());
    }

    #[tokio::test]
    async fn update_leaves_foreign_edit_sessions_alone() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![
            make_holding("AAPL", 10.0),
            make_holding("MSFT", 5.0),
        ]);
        let mut store = loaded_store(&remote, user).await;

        assert!(store.begin_edit("MSFT"));
        store.update(&remote, user, "AAPL", 12.0).await.unwrap();
        assert_eq!(store.editing().unwrap().ticker(), "MSFT");
    }
}

// ═══════════════════════════════════════════════════════════════════
// remove
// ═══════════════════════════════════════════════════════════════════

mod remove {
    use super::*;

    #[tokio::test]
    async fn cancelled_removal_changes_nothing() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![
            make_holding("AAPL", 10.0),
            make_holding("MSFT", 2.0),
        ]);
        let mut store = loaded_store(&remote, user).await;
        let before = store.holdings().to_vec();
        let calls_before = remote.calls().len();

        let confirm = ScriptedConfirm::answering(false);
        let notify = RecordingNotify::default();
        let outcome = store
            .remove(&remote, user, "AAPL", &confirm, &notify)
            .await;

        assert_eq!(outcome, RemoveOutcome::Cancelled);
        assert_eq!(store.holdings(), before.as_slice());
        assert_eq!(remote.calls().len(), calls_before);
        assert!(notify.messages().is_empty());
    }

    #[tokio::test]
    async fn confirmation_prompt_names_the_ticker() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 10.0)]);
        let mut store = loaded_store(&remote, user).await;

        let confirm = ScriptedConfirm::answering(false);
        let notify = RecordingNotify::default();
        store.remove(&remote, user, "AAPL", &confirm, &notify).await;

        let prompts = confirm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("AAPL"));
    }

    #[tokio::test]
    async fn confirmed_removal_is_one_delete_then_one_reload() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![
            make_holding("AAPL", 10.0),
            make_holding("MSFT", 2.0),
        ]);
        let mut store = loaded_store(&remote, user).await;
        let calls_before = remote.calls().len();

        let confirm = ScriptedConfirm::answering(true);
        let notify = RecordingNotify::default();
        let outcome = store
            .remove(&remote, user, "AAPL", &confirm, &notify)
            .await;

        assert_eq!(outcome, RemoveOutcome::Removed);
        assert_eq!(
            remote.calls()[calls_before..],
            [
                Call::Delete {
                    ticker: "AAPL".into()
                },
                Call::Fetch
            ]
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.holdings()[0].ticker, "MSFT");
    }

    #[tokio::test]
    async fn failed_removal_notifies_and_leaves_state_untouched() {
        let user = owner();
        let mut remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 10.0)]);
        remote.fail_delete = true;
        let mut store = loaded_store(&remote, user).await;
        let before = store.holdings().to_vec();

        let confirm = ScriptedConfirm::answering(true);
        let notify = RecordingNotify::default();
        let outcome = store
            .remove(&remote, user, "AAPL", &confirm, &notify)
            .await;

        assert_eq!(outcome, RemoveOutcome::Failed);
        assert_eq!(store.holdings(), before.as_slice());
        assert_eq!(notify.messages(), vec!["Failed to remove stock"]);
        // No reload after a failed delete.
        assert!(!remote.calls()[1..].contains(&Call::Fetch));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Edit session state machine
// ═══════════════════════════════════════════════════════════════════

mod edit_session {
    use super::*;

    #[tokio::test]
    async fn begin_edit_seeds_input_with_current_shares() {
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 2.5)]);
        let mut store = loaded_store(&remote, owner()).await;

        assert!(store.begin_edit("AAPL"));
        let session = store.editing().unwrap();
        assert_eq!(session.ticker(), "AAPL");
        assert_eq!(session.input(), "2.5");
        assert_eq!(session.phase(), EditPhase::Editing);
    }

    #[tokio::test]
    async fn begin_edit_on_unknown_ticker_opens_nothing() {
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 2.5)]);
        let mut store = loaded_store(&remote, owner()).await;

        assert!(!store.begin_edit("ZZZZ"));
        assert!(store.editing().is_none());
    }

    #[tokio::test]
    async fn at_most_one_session_exists_store_wide() {
        let remote = RecordingRemote::with_holdings(vec![
            make_holding("AAPL", 2.5),
            make_holding("MSFT", 4.0),
        ]);
        let mut store = loaded_store(&remote, owner()).await;

        store.begin_edit("AAPL");
        store.edit_input("99");
        store.begin_edit("MSFT");

        let session = store.editing().unwrap();
        assert_eq!(session.ticker(), "MSFT");
        // The replacement starts fresh from MSFT's shares, not the
        // abandoned typed value.
        assert_eq!(session.input(), "4");
    }

    #[tokio::test]
    async fn cancel_discards_without_contacting_the_store() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 2.5)]);
        let mut store = loaded_store(&remote, user).await;
        let calls_before = remote.calls().len();

        store.begin_edit("AAPL");
        store.edit_input("42");
        store.cancel_edit();

        assert!(store.editing().is_none());
        assert_eq!(remote.calls().len(), calls_before);

        // The holding still has its original share count.
        assert_eq!(store.holdings()[0].shares, 2.5);
    }

    #[tokio::test]
    async fn commit_without_a_session_is_a_no_op() {
        let remote = RecordingRemote::with_holdings(Vec::new());
        let mut store = PortfolioStore::new();
        let notify = RecordingNotify::default();

        let outcome = store.commit_edit(&remote, owner(), &notify).await;
        assert_eq!(outcome, CommitOutcome::NoSession);
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn commit_rejects_garbage_input_without_network() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 2.5)]);
        let mut store = loaded_store(&remote, user).await;
        let calls_before = remote.calls().len();

        store.begin_edit("AAPL");
        store.edit_input("abc");

        let notify = RecordingNotify::default();
        let outcome = store.commit_edit(&remote, user, &notify).await;

        assert_eq!(outcome, CommitOutcome::Rejected);
        assert_eq!(notify.messages(), vec!["Please enter a valid number"]);
        assert_eq!(remote.calls().len(), calls_before);

        // Still editing, typed value kept for correction.
        let session = store.editing().unwrap();
        assert_eq!(session.input(), "abc");
        assert_eq!(session.phase(), EditPhase::Editing);
    }

    #[tokio::test]
    async fn commit_rejects_zero_shares() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 2.5)]);
        let mut store = loaded_store(&remote, user).await;

        store.begin_edit("AAPL");
        store.edit_input("0");

        let notify = RecordingNotify::default();
        assert_eq!(
            store.commit_edit(&remote, user, &notify).await,
            CommitOutcome::Rejected
        );
    }

    #[tokio::test]
    async fn successful_commit_saves_clears_and_reloads() {
        let user = owner();
        let remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 2.5)]);
        let mut store = loaded_store(&remote, user).await;
        let calls_before = remote.calls().len();

        store.begin_edit("AAPL");
        store.edit_input("7.5");

        let notify = RecordingNotify::default();
        let outcome = store.commit_edit(&remote, user, &notify).await;

        assert_eq!(outcome, CommitOutcome::Saved);
        assert_eq!(
            remote.calls()[calls_before..],
            [
                Call::Update {
                    ticker: "AAPL".into(),
                    shares: 7.5
                },
                Call::Fetch
            ]
        );
        assert!(store.editing().is_none());
        // The reload reflects the committed value.
        assert_eq!(store.holdings()[0].shares, 7.5);
        assert!(notify.messages().is_empty());
    }

    #[tokio::test]
    async fn failed_commit_keeps_the_attempted_value() {
        let user = owner();
        let mut remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 2.5)]);
        remote.fail_update = true;
        let mut store = loaded_store(&remote, user).await;

        store.begin_edit("AAPL");
        store.edit_input("7.5");

        let notify = RecordingNotify::default();
        let outcome = store.commit_edit(&remote, user, &notify).await;

        assert_eq!(outcome, CommitOutcome::Failed);
        assert_eq!(notify.messages(), vec!["Failed to update shares"]);

        // The session is NOT rolled back to "2.5": the user's typed
        // value survives so they can retry.
        let session = store.editing().unwrap();
        assert_eq!(session.ticker(), "AAPL");
        assert_eq!(session.input(), "7.5");
        assert_eq!(session.phase(), EditPhase::Editing);

        // The local holding still shows the pre-edit count.
        assert_eq!(store.holdings()[0].shares, 2.5);
    }

    #[tokio::test]
    async fn retry_after_failure_succeeds() {
        let user = owner();
        let mut remote = RecordingRemote::with_holdings(vec![make_holding("AAPL", 2.5)]);
        remote.fail_update = true;
        let mut store = loaded_store(&remote, user).await;

        store.begin_edit("AAPL");
        store.edit_input("7.5");
        let notify = RecordingNotify::default();
        assert_eq!(
            store.commit_edit(&remote, user, &notify).await,
            CommitOutcome::Failed
        );

        // The backend recovers; the kept session commits cleanly.
        remote.fail_update = false;
        assert_eq!(
            store.commit_edit(&remote, user, &notify).await,
            CommitOutcome::Saved
        );
        assert_eq!(store.holdings()[0].shares, 7.5);
    }
}
