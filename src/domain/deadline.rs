use super::enums::DeadlineType;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

/// Rejected input to create/update
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("case title is required")]
    MissingCaseTitle,
    #[error("case number is required")]
    MissingCaseNumber,
    #[error("invalid date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid time `{0}` (expected HH:MM)")]
    InvalidTime(String),
    #[error("{0} does not exist in the local calendar")]
    NonexistentLocalTime(String),
}

/// A tracked legal deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadline {
    /// Opaque identifier assigned by the store
    pub id: String,
    pub case_title: String,
    pub case_number: String,
    /// Instant the deadline refers to
    pub target_date: DateTime<Utc>,
    pub kind: DeadlineType,
    /// Responsible person
    pub assigned_to: Option<String>,
    /// Reminder lead times in minutes before `target_date`
    pub alert_offsets: BTreeSet<u32>,
    pub notes: Option<String>,
    /// Start of the timeline span. None only for legacy records.
    pub created_at: Option<DateTime<Utc>>,
}

impl Deadline {
    /// Attach an id to creation data
    pub fn from_new(id: String, data: NewDeadline) -> Self {
        Self {
            id,
            case_title: data.case_title,
            case_number: data.case_number,
            target_date: data.target_date,
            kind: data.kind,
            assigned_to: data.assigned_to,
            alert_offsets: data.alert_offsets,
            notes: data.notes,
            created_at: data.created_at,
        }
    }

    /// Shallow-merge the provided fields over this record
    pub fn apply(&mut self, patch: DeadlinePatch) {
        if let Some(title) = patch.case_title {
            self.case_title = title;
        }
        if let Some(number) = patch.case_number {
            self.case_number = number;
        }
        if let Some(target) = patch.target_date {
            self.target_date = target;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(offsets) = patch.alert_offsets {
            self.alert_offsets = offsets;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = Some(created_at);
        }
    }

    /// Strictly before `now`
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.target_date < now
    }
}

/// Creation data: a deadline without its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeadline {
    pub case_title: String,
    pub case_number: String,
    pub target_date: DateTime<Utc>,
    pub kind: DeadlineType,
    pub assigned_to: Option<String>,
    pub alert_offsets: BTreeSet<u32>,
    pub notes: Option<String>,
    /// Stamped by the store when absent
    pub created_at: Option<DateTime<Utc>>,
}

impl NewDeadline {
    pub fn new(case_title: impl Into<String>, case_number: impl Into<String>, target_date: DateTime<Utc>) -> Self {
        Self {
            case_title: case_title.into(),
            case_number: case_number.into(),
            target_date,
            kind: DeadlineType::default(),
            assigned_to: None,
            alert_offsets: BTreeSet::new(),
            notes: None,
            created_at: None,
        }
    }

    pub fn with_kind(mut self, kind: DeadlineType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_assignee(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    /// Offsets are collected into a set, so repeats collapse
    pub fn with_alerts(mut self, offsets: impl IntoIterator<Item = u32>) -> Self {
        self.alert_offsets = offsets.into_iter().collect();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_labels(&self.case_title, &self.case_number)
    }
}

/// Partial update. `None` leaves a field untouched; for optional fields
/// `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlinePatch {
    pub case_title: Option<String>,
    pub case_number: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    pub kind: Option<DeadlineType>,
    pub assigned_to: Option<Option<String>>,
    pub alert_offsets: Option<BTreeSet<u32>>,
    pub notes: Option<Option<String>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl DeadlinePatch {
    /// Checks only the fields this patch sets. Stored values it leaves
    /// alone are not re-judged.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.case_title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ValidationError::MissingCaseTitle);
        }
        if self.case_number.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ValidationError::MissingCaseNumber);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Generate a fresh deadline id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn validate_labels(case_title: &str, case_number: &str) -> Result<(), ValidationError> {
    if case_title.trim().is_empty() {
        return Err(ValidationError::MissingCaseTitle);
    }
    if case_number.trim().is_empty() {
        return Err(ValidationError::MissingCaseNumber);
    }
    Ok(())
}

/// Combine a `YYYY-MM-DD` date and `HH:MM` time in the host's local calendar
pub fn parse_local_datetime(date: &str, time: &str) -> Result<DateTime<Utc>, ValidationError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.trim().to_string()))?;
    let clock = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(time.trim().to_string()))?;
    let naive = day.and_time(clock);

    // Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::NonexistentLocalTime(naive.format("%Y-%m-%d %H:%M").to_string()))
}
