//! Countdown decomposition and urgency classification.
//!
//! Everything here is a pure function of two instants; the caller supplies
//! "now" and decides how often to ask again.

use super::enums::Urgency;
use chrono::{DateTime, Utc};

pub const MS_PER_DAY: i64 = 86_400_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_MINUTE: i64 = 60_000;

/// Whole days, hours and minutes between two instants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeComponents {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub is_past: bool,
}

impl TimeComponents {
    /// Urgency tier for these components
    pub fn urgency(&self) -> Urgency {
        classify_urgency(self.days, self.hours, self.is_past)
    }

    /// Format as "Xd Yh Zm", omitting zero days and hours (minutes always shown)
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.days > 0 {
            parts.push(format!("{}d", self.days));
        }
        if self.hours > 0 {
            parts.push(format!("{}h", self.hours));
        }
        parts.push(format!("{}m", self.minutes));
        parts.join(" ")
    }

    /// Label with a direction qualifier ("3h 5m left" / "2d 0m ago")
    pub fn describe(&self) -> String {
        if self.is_past {
            format!("{} ago", self.label())
        } else {
            format!("{} left", self.label())
        }
    }
}

/// Split `target - now` into whole days, hours and minutes.
/// Anything below a minute is dropped.
pub fn decompose(target: DateTime<Utc>, now: DateTime<Utc>) -> TimeComponents {
    let diff = target.timestamp_millis() - now.timestamp_millis();
    let is_past = diff < 0;
    let mut rest = diff.abs();

    let days = rest / MS_PER_DAY;
    rest -= days * MS_PER_DAY;
    let hours = rest / MS_PER_HOUR;
    rest -= hours * MS_PER_HOUR;
    let minutes = rest / MS_PER_MINUTE;

    TimeComponents {
        days,
        hours,
        minutes,
        is_past,
    }
}

/// Urgent under two days, very urgent under twelve hours. Past deadlines are
/// never urgent.
pub fn classify_urgency(days: i64, hours: i64, is_past: bool) -> Urgency {
    if is_past {
        Urgency::Normal
    } else if days == 0 && hours < 12 {
        Urgency::VeryUrgent
    } else if days < 2 {
        Urgency::Urgent
    } else {
        Urgency::Normal
    }
}
