//! Daily win counter

use chrono::NaiveDate;

/// Wins booked on the current calendar day
///
/// Rolls over to zero the first time it is consulted on a new date.
#[derive(Debug, Clone, Default)]
pub struct DailyWinTally {
    date: Option<NaiveDate>,
    wins: u32,
}

impl DailyWinTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `today`, clearing the count on a date change
    pub fn roll(&mut self, today: NaiveDate) {
        if self.date.map_or(true, |d| d < today) {
            if self.wins > 0 {
                tracing::info!(%today, previous_wins = self.wins, "New trading day, daily wins reset");
            }
            self.date = Some(today);
            self.wins = 0;
        }
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Whether the daily ceiling has been reached
    pub fn limit_reached(&self, limit: u32) -> bool {
        self.wins >= limit
    }
}
