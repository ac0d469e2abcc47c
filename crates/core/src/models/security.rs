use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scored security as delivered by the data service.
///
/// The five pillar scores and `final_score` are computed upstream on a
/// weekly schedule and are opaque inputs here: this library derives
/// display metrics from them but never recomputes them. All scores are
/// real numbers in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    /// Ticker symbol, uppercased (e.g., "AAPL") — unique id
    pub ticker: String,

    /// Company name (e.g., "Apple Inc.")
    pub name: String,

    /// Sector label used for leaderboard faceting (exact-match strings)
    pub sector: String,

    /// Latest trade price; absent when the price feed has no quote
    #[serde(default)]
    pub current_price: Option<f64>,

    /// Day-over-day price change in percent, signed
    #[serde(default)]
    pub price_change_pct: Option<f64>,

    /// Pillar: financial health
    pub financial_score: f64,

    /// Pillar: profitability
    pub profitability_score: f64,

    /// Pillar: growth
    pub growth_score: f64,

    /// Pillar: momentum
    pub momentum_score: f64,

    /// Pillar: risk. Displayed inverted as safety = 100 − risk;
    /// the inversion is computed at aggregation time, never stored.
    pub risk_score: f64,

    /// The upstream composite ranking value
    pub final_score: f64,

    /// Date the scores were last computed
    #[serde(default)]
    pub score_date: Option<NaiveDate>,
}
