use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{locale::Locale, metrics::MetricsPolicyKind, session::CaptureConfig};

/// Capture preferences the analyst can change between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptureSettings {
    pub locale: Locale,
    pub clip_lead_secs: f64,
    pub clip_tail_secs: f64,
    pub metrics_policy: MetricsPolicyKind,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        let config = CaptureConfig::default();
        Self {
            locale: config.locale,
            clip_lead_secs: config.clip_lead_secs,
            clip_tail_secs: config.clip_tail_secs,
            metrics_policy: config.metrics_policy,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<CaptureSettings>,
}

impl SettingsStore {
    /// Open the store at `path`. A missing or unparsable file yields defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring unreadable settings at {}: {err}",
                    path.display()
                );
                CaptureSettings::default()
            })
        } else {
            CaptureSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> CaptureSettings {
        self.read().clone()
    }

    pub fn update(&self, settings: CaptureSettings) -> Result<()> {
        let mut guard = self.write();
        *guard = settings;
        self.persist(&guard)
    }

    /// Environment-derived config with the stored preferences laid over it.
    pub fn capture_config(&self) -> CaptureConfig {
        let stored = self.read();
        CaptureConfig {
            locale: stored.locale,
            clip_lead_secs: non_negative(stored.clip_lead_secs),
            clip_tail_secs: non_negative(stored.clip_tail_secs),
            metrics_policy: stored.metrics_policy,
            ..CaptureConfig::from_env()
        }
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: CaptureSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings at {}", self.path.display()))?;
        *self.write() = data;
        Ok(())
    }

    fn persist(&self, data: &CaptureSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, CaptureSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CaptureSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.settings(), CaptureSettings::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.settings(), CaptureSettings::default());
    }

    #[test]
    fn update_persists_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update(CaptureSettings {
                locale: Locale::Portuguese,
                clip_lead_secs: 8.0,
                clip_tail_secs: 3.0,
                metrics_policy: MetricsPolicyKind::VolumeScaled,
            })
            .unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        let settings = reopened.settings();
        assert_eq!(settings.locale, Locale::Portuguese);
        assert_eq!(settings.clip_lead_secs, 8.0);
        assert_eq!(settings.metrics_policy, MetricsPolicyKind::VolumeScaled);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "clipTailSecs": 7.5 }"#).unwrap();
        let store = SettingsStore::new(path).unwrap();
        let settings = store.settings();
        assert_eq!(settings.clip_tail_secs, 7.5);
        assert_eq!(settings.clip_lead_secs, 5.0);
        assert_eq!(settings.locale, Locale::English);
    }

    #[test]
    fn capture_config_applies_stored_values() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        store
            .update(CaptureSettings {
                clip_lead_secs: -2.0,
                clip_tail_secs: 4.0,
                ..CaptureSettings::default()
            })
            .unwrap();

        let config = store.capture_config();
        assert_eq!(config.clip_lead_secs, 0.0);
        assert_eq!(config.clip_tail_secs, 4.0);
        assert_eq!(config.end_tolerance_secs, 0.05);
    }
}
