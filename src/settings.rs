use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TrackerSettings {
    /// Last job string that resolved to a registered descriptor. Used as a
    /// fallback when a snapshot arrives without any job field.
    last_valid_job: Option<String>,
}

/// JSON-file-backed settings store.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<TrackerSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            TrackerSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn last_valid_job(&self) -> Option<String> {
        self.data.read().unwrap().last_valid_job.clone()
    }

    pub fn set_last_valid_job(&self, raw_job: &str) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.last_valid_job = Some(raw_job.to_string());
        self.persist(&guard)
    }

    fn persist(&self, data: &TrackerSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
