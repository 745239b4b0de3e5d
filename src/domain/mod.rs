pub mod alerts;
pub mod countdown;
pub mod deadline;
pub mod enums;
pub mod timeline;
pub mod views;

pub use alerts::{offset_label, resolve as resolve_alerts, AlertPreset, ScheduledAlert, ALERT_PRESETS};
pub use countdown::{classify_urgency, decompose, TimeComponents};
pub use deadline::{generate_id, parse_local_datetime, Deadline, DeadlinePatch, NewDeadline, ValidationError};
pub use enums::{Bucket, DeadlineType, UiMode, Urgency};
pub use timeline::{span_start, Timeline, TimelineAxis, TimelineBar};
pub use views::{critical, flatten_buckets, partition, sort_canonical, FlatRow, Summary, DEFAULT_CRITICAL_COUNT};
