use super::deadline::Deadline;
use super::enums::Bucket;
use chrono::{DateTime, Utc};

/// Number of critical deadlines shown on the dashboard by default
pub const DEFAULT_CRITICAL_COUNT: usize = 3;

/// Sort a collection into canonical order: by target date, ties kept in
/// their current (insertion) order
pub fn sort_canonical(deadlines: &mut [Deadline]) {
    deadlines.sort_by_key(|d| d.target_date);
}

/// Split a collection into appointment and filing buckets.
/// Every deadline lands in exactly one of the two; input order is kept.
pub fn partition(deadlines: &[Deadline]) -> (Vec<&Deadline>, Vec<&Deadline>) {
    deadlines
        .iter()
        .partition(|d| d.kind.bucket() == Bucket::Appointment)
}

/// The `n` closest deadlines that are still in the future
pub fn critical(deadlines: &[Deadline], now: DateTime<Utc>, n: usize) -> Vec<&Deadline> {
    let mut upcoming: Vec<&Deadline> = deadlines.iter().filter(|d| d.target_date > now).collect();
    upcoming.sort_by_key(|d| d.target_date);
    upcoming.truncate(n);
    upcoming
}

/// Summary counts for the dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub past: usize,
    pub upcoming: usize,
    pub appointments: usize,
    pub filings: usize,
}

impl Summary {
    pub fn compute(deadlines: &[Deadline], now: DateTime<Utc>) -> Self {
        let total = deadlines.len();
        let past = deadlines.iter().filter(|d| d.is_past(now)).count();
        let appointments = deadlines
            .iter()
            .filter(|d| d.kind.bucket() == Bucket::Appointment)
            .count();

        Summary {
            total,
            past,
            upcoming: total - past,
            appointments,
            filings: total - appointments,
        }
    }
}

/// A row in the flattened dashboard list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow<'a> {
    pub bucket: Bucket,
    pub deadline: &'a Deadline,
}

/// Flatten both buckets into one selectable list: appointments first, then filings
pub fn flatten_buckets(deadlines: &[Deadline]) -> Vec<FlatRow<'_>> {
    let (appointments, filings) = partition(deadlines);
    appointments
        .into_iter()
        .map(|deadline| FlatRow {
            bucket: Bucket::Appointment,
            deadline,
        })
        .chain(filings.into_iter().map(|deadline| FlatRow {
            bucket: Bucket::Filing,
            deadline,
        }))
        .collect()
}
