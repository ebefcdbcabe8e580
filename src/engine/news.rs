//! Economic-calendar news gate

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::NewsGate;

/// Impact labels that pause trading
const HIGH_IMPACT: [&str; 2] = ["high", "important"];

/// One scheduled calendar event
#[derive(Debug, Clone, PartialEq)]
pub struct NewsEvent {
    pub title: String,
    pub impact: String,
    pub time: DateTime<Utc>,
}

impl NewsEvent {
    /// Build an event from calendar feed fields; `published` is RFC 2822
    ///
    /// Entries with an unparseable time are dropped.
    pub fn from_feed_entry(title: &str, category: &str, published: &str) -> Option<Self> {
        let time = DateTime::parse_from_rfc2822(published).ok()?;
        Some(Self {
            title: title.to_string(),
            impact: category.to_lowercase(),
            time: time.with_timezone(&Utc),
        })
    }

    pub fn is_high_impact(&self) -> bool {
        HIGH_IMPACT.contains(&self.impact.as_str())
    }
}

/// Pauses trading when a high-impact event starts within the buffer
#[derive(Debug, Clone)]
pub struct CalendarNewsGate {
    events: Vec<NewsEvent>,
    buffer: Duration,
}

impl CalendarNewsGate {
    pub fn new(events: Vec<NewsEvent>, buffer_minutes: u64) -> Self {
        // Clamp to a year; chrono durations are bounded
        let minutes = buffer_minutes.min(525_600) as i64;
        Self {
            events,
            buffer: Duration::minutes(minutes),
        }
    }

    /// First high-impact event starting in `[now, now + buffer]`
    pub fn imminent_at(&self, now: DateTime<Utc>) -> Option<&NewsEvent> {
        self.events.iter().find(|e| {
            let lead = e.time - now;
            e.is_high_impact() && lead >= Duration::zero() && lead <= self.buffer
        })
    }
}

#[async_trait]
impl NewsGate for CalendarNewsGate {
    async fn high_impact_imminent(&self) -> bool {
        match self.imminent_at(Utc::now()) {
            Some(event) => {
                let minutes = (event.time - Utc::now()).num_minutes();
                tracing::info!(title = %event.title, minutes, "High-impact news ahead, pausing");
                true
            }
            None => false,
        }
    }
}
