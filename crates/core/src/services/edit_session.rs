/// Lifecycle phase of an in-place share-count edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// The user is typing; nothing has been sent.
    Editing,
    /// An update mutation is in flight.
    Saving,
}

/// Transient state of one holding's share count while being modified.
///
/// At most one session exists per store ("Viewing" is the absence of a
/// session). Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    ticker: String,
    input: String,
    phase: EditPhase,
}

impl EditSession {
    /// Open a session on `ticker`, seeding the input with the current
    /// share count.
    pub fn begin(ticker: impl Into<String>, current_shares: f64) -> Self {
        Self {
            ticker: ticker.into(),
            input: current_shares.to_string(),
            phase: EditPhase::Editing,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// The user-typed value as it stands. Kept verbatim across a failed
    /// save so the user can correct and retry.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub(crate) fn set_phase(&mut self, phase: EditPhase) {
        self.phase = phase;
    }
}
