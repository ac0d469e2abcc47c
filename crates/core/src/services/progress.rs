/// Loading progress for the leaderboard fetch, in percent.
///
/// The progress bar is not transfer-driven: the transport exposes no
/// progress events, so the bar advances on an injected timer tick and
/// snaps to 100 when the fetch resolves. Ticks step +5 and cap at 90
/// while the request is in flight — the bar never reaches 100 on ticks
/// alone. Deterministic: tests drive ticks explicitly, no real delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    percent: u8,
    done: bool,
}

impl LoadProgress {
    /// Fresh bar at 0%, fetch in flight.
    pub fn start() -> Self {
        Self {
            percent: 0,
            done: false,
        }
    }

    /// One timer tick. Returns the new percentage.
    pub fn advance(&mut self) -> u8 {
        if !self.done && self.percent < 90 {
            self.percent = (self.percent + 5).min(90);
        }
        self.percent
    }

    /// The fetch resolved: snap to 100. Further ticks are no-ops.
    pub fn complete(&mut self) -> u8 {
        self.done = true;
        self.percent = 100;
        self.percent
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self::start()
    }
}
