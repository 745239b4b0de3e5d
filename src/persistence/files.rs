use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and in the home directory
pub const DATA_DIR_NAME: &str = ".docket";

/// Get the docket directory - checks for local .docket first, then falls back to global ~/.docket
pub fn get_docket_dir() -> Result<PathBuf> {
    // Check for local .docket directory
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_docket(&current_dir) {
        return Ok(local_dir);
    }

    // Fall back to global ~/.docket
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find local .docket directory by walking up the directory tree
fn find_local_docket(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let docket_dir = current.join(DATA_DIR_NAME);
        if docket_dir.is_dir() {
            return Some(docket_dir);
        }

        current = current.parent()?;
    }
}

/// Resolve the data directory (explicit override wins over discovery) and make sure it exists
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir,
        None => get_docket_dir()?,
    };
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Create a directory (and parents) if missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Initialize a local .docket directory in the current directory
pub fn init_local_docket() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let docket_dir = current_dir.join(DATA_DIR_NAME);

    if docket_dir.exists() {
        anyhow::bail!("Docket directory already exists: {}", docket_dir.display());
    }

    fs::create_dir_all(&docket_dir)
        .with_context(|| format!("Failed to create directory: {}", docket_dir.display()))?;

    Ok(docket_dir)
}

/// Path to settings.json inside the data directory
pub fn settings_file(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

/// Directory for rolling log files
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Copy a file next to itself as `<stem>.<tag>.<timestamp>.<ext>`
pub fn backup_file<P: AsRef<Path>>(path: P, tag: &str) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bak".to_string());
    let backup_path = path.with_file_name(format!("{stem}.{tag}.{timestamp}.{ext}"));

    fs::copy(path, &backup_path)
        .with_context(|| format!("Failed to backup file: {}", path.display()))?;

    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_docket_dir() {
        let dir = get_docket_dir().unwrap();
        assert!(dir.to_string_lossy().contains(DATA_DIR_NAME));
    }

    #[test]
    fn test_find_local_docket_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docket = temp_dir.path().join(DATA_DIR_NAME);
        fs::create_dir_all(&docket).unwrap();
        let nested = temp_dir.path().join("cases").join("2025");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_docket(&nested), Some(docket));
    }

    #[test]
    fn test_resolve_data_dir_override_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("custom");

        let resolved = resolve_data_dir(Some(target.clone())).unwrap();
        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "[]").unwrap();
        assert_eq!(read_file(&test_file).unwrap(), "[]");

        atomic_write(&test_file, "[1]").unwrap();
        assert_eq!(read_file(&test_file).unwrap(), "[1]");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");

        assert_eq!(read_file(&test_file).unwrap(), "");
    }

    #[test]
    fn test_backup_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("deadlines.v1.json");

        atomic_write(&test_file, "Original content").unwrap();
        let backup_path = backup_file(&test_file, "corrupt").unwrap();

        assert!(backup_path.exists());
        assert_ne!(backup_path, test_file);
        let name = backup_path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("deadlines.v1.corrupt."));
        assert!(name.ends_with(".json"));
        assert_eq!(read_file(&backup_path).unwrap(), "Original content");
    }
}
