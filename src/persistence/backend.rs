use super::files::{atomic_write, backup_file, read_file};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the deadline snapshot inside the data directory
pub const SNAPSHOT_FILE: &str = "deadlines.v1.json";

/// A medium that holds one serialized snapshot
pub trait SnapshotBackend {
    /// Current payload, or None when nothing has been stored yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored payload
    fn write(&mut self, payload: &str) -> Result<()>;

    /// Keep a copy of the current payload before it gets overwritten.
    /// Returns where the copy went, if anywhere.
    fn preserve(&self) -> Result<Option<String>> {
        Ok(None)
    }

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Snapshot stored as a JSON file, written atomically
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for the standard snapshot file inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SNAPSHOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotBackend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        read_file(&self.path).map(Some)
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }
        atomic_write(&self.path, payload)
    }

    fn preserve(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let copy = backup_file(&self.path, "corrupt")?;
        Ok(Some(copy.display().to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Snapshot kept in memory. Failures can be switched on to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    payload: Option<String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    /// Payloads handed to `preserve`
    pub preserved: std::cell::RefCell<Vec<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl SnapshotBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        if self.fail_reads {
            bail!("memory backend: reads disabled");
        }
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        if self.fail_writes {
            bail!("memory backend: quota exceeded");
        }
        self.payload = Some(payload.to_string());
        Ok(())
    }

    fn preserve(&self) -> Result<Option<String>> {
        match &self.payload {
            Some(payload) => {
                self.preserved.borrow_mut().push(payload.clone());
                Ok(Some("memory".to_string()))
            }
            None => Ok(None),
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_missing_file_reads_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::in_dir(temp_dir.path());
        assert_eq!(backend.read().unwrap(), None);
        assert_eq!(backend.preserve().unwrap(), None);
    }

    #[test]
    fn test_file_backend_write_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let mut backend = FileBackend::in_dir(&nested);

        backend.write("[]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[]"));
        assert!(nested.join(SNAPSHOT_FILE).exists());
    }

    #[test]
    fn test_file_backend_preserve_copies_payload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::in_dir(temp_dir.path());
        backend.write("{broken").unwrap();

        let copy = backend.preserve().unwrap().unwrap();
        assert_eq!(fs::read_to_string(&copy).unwrap(), "{broken");
        assert!(copy.contains("corrupt"));
    }

    #[test]
    fn test_memory_backend_failures() {
        let mut backend = MemoryBackend::with_payload("[]");
        backend.fail_writes = true;
        assert!(backend.write("[1]").is_err());
        assert_eq!(backend.payload(), Some("[]"));

        backend.fail_reads = true;
        assert!(backend.read().is_err());
    }
}
