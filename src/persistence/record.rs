//! On-disk shape of the deadline snapshot and the legacy normalization step.
//!
//! The snapshot is a JSON array of records with camelCase keys and
//! epoch-millisecond timestamps. Older records may lack `type`,
//! `alertOffsets` or `createdAt`; they are normalized here, once, so nothing
//! downstream has to care.

use crate::domain::{Deadline, DeadlineType};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// A single record as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineRecord {
    pub id: String,
    #[serde(default)]
    pub case_title: String,
    #[serde(default)]
    pub case_number: String,
    pub target_date: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_offsets: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Why a stored record could not become a `Deadline`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has an empty id")]
    EmptyId,
    #[error("record {id}: targetDate {millis} is out of range")]
    TargetOutOfRange { id: String, millis: i64 },
}

impl From<&Deadline> for DeadlineRecord {
    fn from(deadline: &Deadline) -> Self {
        Self {
            id: deadline.id.clone(),
            case_title: deadline.case_title.clone(),
            case_number: deadline.case_number.clone(),
            target_date: deadline.target_date.timestamp_millis(),
            kind: Some(deadline.kind.to_tag().to_string()),
            assigned_to: deadline.assigned_to.clone(),
            alert_offsets: Some(deadline.alert_offsets.iter().map(|&m| i64::from(m)).collect()),
            notes: deadline.notes.clone(),
            created_at: deadline.created_at.map(|t| t.timestamp_millis()),
        }
    }
}

impl TryFrom<DeadlineRecord> for Deadline {
    type Error = RecordError;

    fn try_from(record: DeadlineRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(RecordError::EmptyId);
        }
        let target_date = DateTime::<Utc>::from_timestamp_millis(record.target_date).ok_or_else(|| {
            RecordError::TargetOutOfRange {
                id: record.id.clone(),
                millis: record.target_date,
            }
        })?;

        let kind = normalize_kind(&record.id, record.kind.as_deref());
        let alert_offsets = normalize_offsets(&record.id, record.alert_offsets.unwrap_or_default());

        // A zero or unreadable createdAt counts as absent
        let created_at = record
            .created_at
            .filter(|&millis| millis != 0)
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        Ok(Deadline {
            id: record.id,
            case_title: record.case_title,
            case_number: record.case_number,
            target_date,
            kind,
            assigned_to: record.assigned_to.filter(|s| !s.trim().is_empty()),
            alert_offsets,
            notes: record.notes.filter(|s| !s.trim().is_empty()),
            created_at,
        })
    }
}

fn normalize_kind(id: &str, tag: Option<&str>) -> DeadlineType {
    match tag {
        None => DeadlineType::Hearing,
        Some(tag) => DeadlineType::from_tag(tag).unwrap_or_else(|| {
            warn!("event=record_normalize module=record status=unknown_type id={} type={}", id, tag);
            DeadlineType::Hearing
        }),
    }
}

fn normalize_offsets(id: &str, raw: Vec<i64>) -> BTreeSet<u32> {
    let mut offsets = BTreeSet::new();
    for value in raw {
        match u32::try_from(value) {
            Ok(minutes) => {
                offsets.insert(minutes);
            }
            Err(_) => warn!(
                "event=record_normalize module=record status=bad_offset id={} offset={}",
                id, value
            ),
        }
    }
    offsets
}

/// A decoded snapshot plus how many stored records had to be dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Records in stored order
    pub deadlines: Vec<Deadline>,
    pub dropped: usize,
}

/// Decode a stored snapshot.
///
/// An empty payload is an empty collection. A payload that is not a JSON
/// array is an error. Individual records that cannot be read, or that repeat
/// an id already seen, are dropped and counted.
pub fn decode_snapshot(payload: &str) -> Result<Snapshot, serde_json::Error> {
    if payload.trim().is_empty() {
        return Ok(Snapshot::default());
    }

    let values: Vec<serde_json::Value> = serde_json::from_str(payload)?;
    let mut snapshot = Snapshot::default();
    let mut seen = HashSet::new();

    for (index, value) in values.into_iter().enumerate() {
        let decoded = serde_json::from_value::<DeadlineRecord>(value)
            .map_err(|err| err.to_string())
            .and_then(|record| Deadline::try_from(record).map_err(|err| err.to_string()));

        match decoded {
            Ok(deadline) if seen.insert(deadline.id.clone()) => snapshot.deadlines.push(deadline),
            Ok(deadline) => {
                warn!(
                    "event=snapshot_decode module=record status=duplicate_id index={} id={}",
                    index, deadline.id
                );
                snapshot.dropped += 1;
            }
            Err(reason) => {
                warn!(
                    "event=snapshot_decode module=record status=dropped index={} reason={}",
                    index, reason
                );
                snapshot.dropped += 1;
            }
        }
    }

    Ok(snapshot)
}

/// Encode a collection for storage
pub fn encode_snapshot(deadlines: &[Deadline]) -> serde_json::Result<String> {
    let records: Vec<DeadlineRecord> = deadlines.iter().map(DeadlineRecord::from).collect();
    serde_json::to_string_pretty(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewDeadline;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const TARGET_MS: i64 = 1_750_000_000_000;

    #[test]
    fn test_legacy_record_without_type_is_hearing() {
        let payload = format!(
            r#"[{{"id":"old-1","caseTitle":"Estate of Haddad","caseNumber":"88/2019","targetDate":{TARGET_MS},"createdAt":{}}}]"#,
            TARGET_MS - 1_000
        );
        let snapshot = decode_snapshot(&payload).unwrap();
        assert_eq!(snapshot.dropped, 0);

        let deadline = &snapshot.deadlines[0];
        assert_eq!(deadline.kind, DeadlineType::Hearing);
        assert!(deadline.alert_offsets.is_empty());
        assert_eq!(deadline.target_date.timestamp_millis(), TARGET_MS);
        assert_eq!(deadline.created_at.unwrap().timestamp_millis(), TARGET_MS - 1_000);
    }

    #[test]
    fn test_unknown_and_null_type_fall_back_to_hearing() {
        let payload = format!(
            r#"[
                {{"id":"a","caseTitle":"A","caseNumber":"1","targetDate":{TARGET_MS},"type":"appeal"}},
                {{"id":"b","caseTitle":"B","caseNumber":"2","targetDate":{TARGET_MS},"type":null}},
                {{"id":"c","caseTitle":"C","caseNumber":"3","targetDate":{TARGET_MS},"type":"limitation"}}
            ]"#
        );
        let snapshot = decode_snapshot(&payload).unwrap();
        let kinds: Vec<DeadlineType> = snapshot.deadlines.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DeadlineType::Hearing, DeadlineType::Hearing, DeadlineType::Limitation]
        );
    }

    #[test]
    fn test_offsets_are_deduplicated_and_negative_dropped() {
        let payload = format!(
            r#"[{{"id":"a","caseTitle":"A","caseNumber":"1","targetDate":{TARGET_MS},"alertOffsets":[60,1440,60,-5]}}]"#
        );
        let snapshot = decode_snapshot(&payload).unwrap();
        assert_eq!(
            snapshot.deadlines[0].alert_offsets,
            BTreeSet::from([60, 1440])
        );
    }

    #[test]
    fn test_zero_created_at_counts_as_absent() {
        let payload = format!(
            r#"[{{"id":"a","caseTitle":"A","caseNumber":"1","targetDate":{TARGET_MS},"createdAt":0}}]"#
        );
        let snapshot = decode_snapshot(&payload).unwrap();
        assert_eq!(snapshot.deadlines[0].created_at, None);
    }

    #[test]
    fn test_bad_records_are_dropped_not_fatal() {
        let payload = format!(
            r#"[
                {{"id":"good","caseTitle":"A","caseNumber":"1","targetDate":{TARGET_MS}}},
                {{"caseTitle":"no id","targetDate":{TARGET_MS}}},
                {{"id":"","caseTitle":"blank id","targetDate":{TARGET_MS}}},
                {{"id":"no-target","caseTitle":"B"}},
                {{"id":"good","caseTitle":"dup","caseNumber":"9","targetDate":{TARGET_MS}}},
                "not an object"
            ]"#
        );
        let snapshot = decode_snapshot(&payload).unwrap();
        assert_eq!(snapshot.deadlines.len(), 1);
        assert_eq!(snapshot.deadlines[0].case_title, "A");
        assert_eq!(snapshot.dropped, 5);
    }

    #[test]
    fn test_corrupt_payload_is_an_error() {
        assert!(decode_snapshot("{not json").is_err());
        assert!(decode_snapshot(r#"{"id":"a"}"#).is_err());
    }

    #[test]
    fn test_empty_payload_is_empty_snapshot() {
        assert_eq!(decode_snapshot("").unwrap(), Snapshot::default());
        assert_eq!(decode_snapshot("  \n").unwrap(), Snapshot::default());
        assert_eq!(decode_snapshot("[]").unwrap(), Snapshot::default());
    }

    #[test]
    fn test_encoded_shape_uses_camel_case_keys() {
        let deadline = Deadline::from_new(
            "id-7".to_string(),
            NewDeadline::new("Title", "N-7", Utc.timestamp_millis_opt(TARGET_MS).unwrap())
                .with_kind(DeadlineType::Filing)
                .with_alerts([1440, 60])
                .with_created_at(Utc.timestamp_millis_opt(TARGET_MS - 5_000).unwrap()),
        );

        let encoded = encode_snapshot(&[deadline.clone()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        let record = &value[0];

        assert_eq!(record["id"], "id-7");
        assert_eq!(record["caseTitle"], "Title");
        assert_eq!(record["caseNumber"], "N-7");
        assert_eq!(record["targetDate"], TARGET_MS);
        assert_eq!(record["type"], "filing");
        assert_eq!(record["alertOffsets"], serde_json::json!([60, 1440]));
        assert_eq!(record["createdAt"], TARGET_MS - 5_000);
        assert!(record.get("assignedTo").is_none());
        assert!(record.get("notes").is_none());

        let decoded = decode_snapshot(&encoded).unwrap();
        assert_eq!(decoded.deadlines, vec![deadline]);
    }
}
