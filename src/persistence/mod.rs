pub mod backend;
pub mod error;
pub mod files;
pub mod record;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, SnapshotBackend, SNAPSHOT_FILE};
pub use error::StoreError;
pub use files::{
    atomic_write, backup_file, ensure_dir, get_docket_dir, init_local_docket, log_dir, read_file, resolve_data_dir,
    settings_file,
};
pub use record::{decode_snapshot, encode_snapshot, DeadlineRecord, RecordError, Snapshot};
pub use store::{DeadlineStore, JsonFileStore, SnapshotStore};
