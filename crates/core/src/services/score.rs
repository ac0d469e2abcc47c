//! Pure scoring aggregation and the numeric display contract.
//!
//! Everything here derives presentation values from upstream scores;
//! nothing is recomputed or persisted. No I/O, no state.

use crate::models::holding::PortfolioHolding;
use crate::models::security::Security;

/// One pillar entry in a security's category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub name: &'static str,
    pub score: f64,
    /// Hex color tag the presentation layer keys on
    pub color_tag: &'static str,
}

/// Safety is the inverse framing of the risk pillar: `100 − risk`.
/// No clamping — callers guarantee risk ∈ [0, 100] upstream.
pub fn safety_score(risk_score: f64) -> f64 {
    100.0 - risk_score
}

/// The five pillar scores in canonical order: Financial Health,
/// Profitability, Growth, Momentum, Safety.
///
/// The order is semantically significant, not just a display
/// convention: `highest_category` breaks ties by it.
pub fn category_breakdown(security: &Security) -> Vec<CategoryScore> {
    vec![
        CategoryScore {
            name: "Financial Health",
            score: security.financial_score,
            color_tag: "#059669",
        },
        CategoryScore {
            name: "Profitability",
            score: security.profitability_score,
            color_tag: "#2563eb",
        },
        CategoryScore {
            name: "Growth",
            score: security.growth_score,
            color_tag: "#7c3aed",
        },
        CategoryScore {
            name: "Momentum",
            score: security.momentum_score,
            color_tag: "#dc2626",
        },
        CategoryScore {
            name: "Safety",
            score: safety_score(security.risk_score),
            color_tag: "#ea580c",
        },
    ]
}

/// The maximum-score entry of a breakdown. Ties resolve to the FIRST
/// entry in canonical order (Financial Health before Profitability,
/// etc.): later entries replace the champion only on a strictly greater
/// score.
pub fn highest_category(breakdown: &[CategoryScore]) -> Option<&CategoryScore> {
    let mut best = breakdown.first()?;
    for category in &breakdown[1..] {
        if category.score > best.score {
            best = category;
        }
    }
    Some(best)
}

/// Portfolio-level aggregate score: the UNWEIGHTED arithmetic mean of
/// the holdings' final scores, `0.0` for an empty portfolio.
///
/// This is deliberately NOT weighted by share count or dollar value:
/// the score describes the quality of what is held, not how much of it.
/// A one-share position moves the aggregate exactly as much as a
/// thousand-share position. A holding whose security is unknown to the
/// score feed contributes a score of zero.
pub fn portfolio_score(holdings: &[PortfolioHolding]) -> f64 {
    if holdings.is_empty() {
        return 0.0;
    }
    let sum: f64 = holdings
        .iter()
        .map(|h| h.final_score.unwrap_or(0.0))
        .sum();
    sum / holdings.len() as f64
}

/// Total market value: Σ shares × current price. A holding without a
/// known price contributes zero.
pub fn total_value(holdings: &[PortfolioHolding]) -> f64 {
    holdings.iter().map(holding_value).sum()
}

/// Market value of a single holding (zero when the price is unknown).
pub fn holding_value(holding: &PortfolioHolding) -> f64 {
    holding.shares * holding.current_price.unwrap_or(0.0)
}

// ── Display contract ────────────────────────────────────────────────

/// Scores render to one decimal place.
pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}

/// Currency renders to two decimals with comma thousands separators,
/// prefixed with `$`.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{frac_part}")
}

/// Price change renders as a directional glyph keyed on sign (a change
/// of exactly zero counts as up) followed by the magnitude to two
/// decimals and a percent sign.
pub fn format_price_change(pct: f64) -> String {
    let glyph = if pct >= 0.0 { "▲" } else { "▼" };
    format!("{glyph} {:.2}%", pct.abs())
}
