use serde::{Deserialize, Serialize};

/// One position in a user's portfolio, as returned (enriched) by
/// `GET /portfolio/{owner}`.
///
/// The remote store joins each `(owner, ticker, shares)` record with the
/// matching security at read time. A holding whose ticker is unknown to
/// the score feed arrives as a partial record: `current_price`,
/// `price_change_pct` and `final_score` are absent, and aggregation
/// treats them as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHolding {
    /// Ticker symbol — unique per owner
    pub ticker: String,

    /// Company name, copied from the joined security
    #[serde(default)]
    pub name: String,

    /// Share count (positive real; fractional shares allowed)
    pub shares: f64,

    /// Latest trade price of the joined security
    #[serde(default)]
    pub current_price: Option<f64>,

    /// Day-over-day price change of the joined security, in percent
    #[serde(default)]
    pub price_change_pct: Option<f64>,

    /// Composite score of the joined security
    #[serde(default)]
    pub final_score: Option<f64>,
}
