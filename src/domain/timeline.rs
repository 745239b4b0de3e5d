//! Gantt-style layout of deadlines on a shared time axis.
//!
//! # Invariants
//! - Every bar satisfies `0 <= start_pct <= end_pct <= 100`.
//! - Every bar is at least `MIN_BAR_WIDTH_PCT` wide.
//! - A zero-length axis maps every instant to 0 instead of dividing by zero.

use super::deadline::Deadline;
use chrono::{DateTime, Duration, Utc};

/// Smallest visible bar, in percentage points
pub const MIN_BAR_WIDTH_PCT: f64 = 1.0;

/// How far past "now" the axis always extends
pub fn look_ahead() -> Duration {
    Duration::days(7)
}

/// Where a deadline's bar starts on the axis.
///
/// - `created_at` when it is strictly before the target
/// - one day before the target when `created_at` is at or after it
/// - one week before the target when `created_at` is missing
///
/// Targets too close to the calendar's lower bound start at that bound.
pub fn span_start(deadline: &Deadline) -> DateTime<Utc> {
    match deadline.created_at {
        Some(created) if created < deadline.target_date => created,
        Some(_) => earlier_by(deadline.target_date, Duration::days(1)),
        None => earlier_by(deadline.target_date, Duration::weeks(1)),
    }
}

/// `t - lead`, pinned to the earliest representable instant
fn earlier_by(t: DateTime<Utc>, lead: Duration) -> DateTime<Utc> {
    t.checked_sub_signed(lead).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// The visible time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineAxis {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

impl TimelineAxis {
    /// Axis covering "now", every span start, every target, and one week ahead
    pub fn fit(deadlines: &[Deadline], now: DateTime<Utc>) -> Self {
        let min = deadlines
            .iter()
            .map(span_start)
            .fold(now, |acc, start| acc.min(start));
        let max = deadlines
            .iter()
            .map(|d| d.target_date)
            .fold(now + look_ahead(), |acc, target| acc.max(target));
        Self { min, max }
    }

    pub fn duration(&self) -> Duration {
        self.max - self.min
    }

    /// Position of `t` on the axis, clamped to 0..=100
    pub fn percent(&self, t: DateTime<Utc>) -> f64 {
        let total = (self.max - self.min).num_milliseconds();
        if total == 0 {
            return 0.0;
        }
        let offset = (t - self.min).num_milliseconds();
        (offset as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Instant halfway along the axis, used for the middle tick label
    pub fn midpoint(&self) -> DateTime<Utc> {
        self.min + Duration::milliseconds(self.duration().num_milliseconds() / 2)
    }
}

/// Layout of one deadline
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBar {
    pub id: String,
    pub start_pct: f64,
    pub end_pct: f64,
    pub width_pct: f64,
    pub is_past: bool,
}

/// Layout of a whole collection
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub axis: TimelineAxis,
    /// Position of the current-time marker
    pub now_pct: f64,
    /// One bar per deadline, ordered by target date
    pub bars: Vec<TimelineBar>,
}

impl Timeline {
    pub fn layout(deadlines: &[Deadline], now: DateTime<Utc>) -> Self {
        let axis = TimelineAxis::fit(deadlines, now);

        let mut ordered: Vec<&Deadline> = deadlines.iter().collect();
        ordered.sort_by_key(|d| d.target_date);

        let bars = ordered
            .into_iter()
            .map(|deadline| {
                let start_pct = axis.percent(span_start(deadline));
                let end_pct = axis.percent(deadline.target_date);
                TimelineBar {
                    id: deadline.id.clone(),
                    start_pct,
                    end_pct,
                    width_pct: (end_pct - start_pct).max(MIN_BAR_WIDTH_PCT),
                    is_past: deadline.is_past(now),
                }
            })
            .collect();

        Timeline {
            axis,
            now_pct: axis.percent(now),
            bars,
        }
    }

    pub fn bar(&self, id: &str) -> Option<&TimelineBar> {
        self.bars.iter().find(|bar| bar.id == id)
    }
}
