use crate::persistence::atomic_write;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between countdown refreshes
    pub refresh_secs: u64,
    /// Size of the critical pane
    pub critical_count: usize,
    pub log_level: String,
    /// Time prefilled in the add form (HH:MM)
    pub default_time: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_secs: 60,
            critical_count: crate::domain::DEFAULT_CRITICAL_COUNT,
            log_level: "info".to_string(),
            default_time: "09:00".to_string(),
        }
    }
}

impl Settings {
    /// Refresh cadence, never shorter than one second
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

/// Load settings, falling back to defaults when the file doesn't exist
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)?;
    Ok(())
}
