use crate::models::security::Security;
use crate::providers::traits::MarketDataProvider;

/// The sector facet that passes every security.
pub const ALL_SECTORS: &str = "All";

/// The ranked, filterable view over all loaded securities.
///
/// Owns the fetched set and the selected sector facet. Filtering is a
/// pure predicate over the full set; relative order is whatever the
/// upstream feed provided and is never re-ranked here.
pub struct Leaderboard {
    securities: Vec<Security>,
    selected_sector: String,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            securities: Vec::new(),
            selected_sector: ALL_SECTORS.to_string(),
        }
    }

    /// Fetch the ranked security set.
    ///
    /// A transport failure degrades to an EMPTY set rather than an
    /// error: the caller cannot distinguish "nothing ranked" from
    /// "fetch failed" (see DESIGN.md). The failure is logged loudly.
    pub async fn load(&mut self, provider: &dyn MarketDataProvider, limit: u32) {
        match provider.leaderboard(limit).await {
            Ok(securities) => {
                tracing::info!(count = securities.len(), "leaderboard loaded");
                self.securities = securities;
            }
            Err(error) => {
                tracing::warn!(%error, "leaderboard load failed; showing an empty set");
                self.securities = Vec::new();
            }
        }
    }

    /// The full loaded set, upstream order.
    pub fn securities(&self) -> &[Security] {
        &self.securities
    }

    /// `"All"` followed by the distinct sectors of the loaded set in
    /// first-seen order.
    pub fn sectors(&self) -> Vec<&str> {
        let mut sectors = vec![ALL_SECTORS];
        for security in &self.securities {
            if !sectors.contains(&security.sector.as_str()) {
                sectors.push(&security.sector);
            }
        }
        sectors
    }

    pub fn selected_sector(&self) -> &str {
        &self.selected_sector
    }

    /// Select a facet. `"All"` passes everything; any other value
    /// filters on exact sector equality.
    pub fn select_sector(&mut self, sector: impl Into<String>) {
        self.selected_sector = sector.into();
    }

    /// The filtered set under the selected facet, upstream order.
    pub fn filtered(&self) -> Vec<&Security> {
        self.securities
            .iter()
            .filter(|s| self.selected_sector == ALL_SECTORS || s.sector == self.selected_sector)
            .collect()
    }

    /// Size of the FULL filtered set — the number the count label
    /// shows, which intentionally exceeds the rendered rows whenever
    /// the filter passes more than the display cap.
    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// The first `cap` entries of the filtered set — the rows actually
    /// rendered.
    pub fn visible(&self, cap: usize) -> Vec<&Security> {
        let mut rows = self.filtered();
        rows.truncate(cap);
        rows
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}
