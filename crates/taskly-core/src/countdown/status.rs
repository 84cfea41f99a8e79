//! Derived countdown display state. Never persisted.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::events::Event;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Whole days/hours/minutes/seconds between two instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    /// Split a millisecond span, dropping the sub-second remainder.
    pub fn from_millis(ms: u64) -> Self {
        let total = ms / 1000;
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Snapshot of the countdown at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownStatus {
    /// The target has passed.
    pub is_overdue: bool,
    /// Time remaining when pending, time elapsed since the target when overdue.
    pub distance: DurationBreakdown,
    /// Next-due instant (epoch ms).
    pub target_at: i64,
    pub computed_at: i64,
}

impl CountdownStatus {
    /// Derive the status at `now`.
    ///
    /// With no completion on record the target collapses to `now`, which
    /// reads as pending with nothing left.
    pub fn compute(last_completed: Option<i64>, interval: Duration, now: i64) -> Self {
        let interval_ms = i64::try_from(interval.as_millis()).unwrap_or(i64::MAX);
        let target_at = match last_completed {
            Some(at) => at.saturating_add(interval_ms),
            None => now,
        };
        let is_overdue = target_at < now;
        let span = now.abs_diff(target_at);
        Self {
            is_overdue,
            distance: DurationBreakdown::from_millis(span),
            target_at,
            computed_at: now,
        }
    }

    pub fn headline(&self) -> &'static str {
        if self.is_overdue {
            "Thing overdue by"
        } else {
            "Thing due in..."
        }
    }

    pub fn to_event(&self) -> Event {
        Event::CountdownSnapshot {
            is_overdue: self.is_overdue,
            days: self.distance.days,
            hours: self.distance.hours,
            minutes: self.distance.minutes,
            seconds: self.distance.seconds,
            target_at: self.target_at,
            at: self.computed_at,
        }
    }
}

/// What the countdown screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownView {
    /// Initial read has not resolved yet.
    Loading,
    Ready(CountdownStatus),
}

impl CountdownView {
    pub fn is_loading(&self) -> bool {
        matches!(self, CountdownView::Loading)
    }

    pub fn status(&self) -> Option<&CountdownStatus> {
        match self {
            CountdownView::Ready(status) => Some(status),
            CountdownView::Loading => None,
        }
    }
}
