use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;

/// Lead times offered by the form, in minutes
pub const ALERT_PRESETS: [AlertPreset; 4] = [
    AlertPreset {
        minutes: 43_200,
        label: "30 days before",
    },
    AlertPreset {
        minutes: 10_080,
        label: "7 days before",
    },
    AlertPreset {
        minutes: 1_440,
        label: "24 hours before",
    },
    AlertPreset {
        minutes: 60,
        label: "1 hour before",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPreset {
    pub minutes: u32,
    pub label: &'static str,
}

/// When a reminder for one offset becomes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAlert {
    pub offset_minutes: u32,
    pub due_at: DateTime<Utc>,
}

impl ScheduledAlert {
    /// Whether the reminder moment has already passed. Suppressing elapsed
    /// reminders is up to whoever delivers them.
    pub fn is_elapsed(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }
}

/// Due-instant for every offset, earliest first. Elapsed ones are kept.
pub fn resolve(target: DateTime<Utc>, offsets: &BTreeSet<u32>) -> Vec<ScheduledAlert> {
    // Largest offset fires first, so walk the set backwards
    offsets
        .iter()
        .rev()
        .map(|&offset_minutes| ScheduledAlert {
            offset_minutes,
            // Saturates for targets near the calendar's lower bound
            due_at: target
                .checked_sub_signed(Duration::minutes(i64::from(offset_minutes)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        })
        .collect()
}

/// Short label for an offset ("30d", "24h", "90m")
pub fn offset_label(minutes: u32) -> String {
    if minutes > 0 && minutes % 1_440 == 0 && minutes >= 2_880 {
        format!("{}d", minutes / 1_440)
    } else if minutes > 0 && minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}m", minutes)
    }
}
