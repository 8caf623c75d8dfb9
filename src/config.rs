//! Runtime settings for tracers and the replay viewer
//!
//! Every field has a default, so a settings file only needs the keys it
//! changes. Settings are validated once after loading.

use crate::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sort: SortSettings,
    pub dp: DpSettings,
    pub replay: ReplaySettings,
}

/// Random array generation for the sorting family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    /// Used when a run asks for a negative size
    pub default_size: usize,
    pub min_value: i64,
    pub max_value: i64,
    /// Fixed seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for SortSettings {
    fn default() -> Self {
        Self {
            default_size: 10,
            min_value: 10,
            max_value: 100,
            seed: None,
        }
    }
}

/// Inputs the selector-based DP runs cannot carry in an integer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpSettings {
    pub knapsack_values: Vec<i64>,
    pub knapsack_weights: Vec<i64>,
    pub lcs_first: String,
    pub lcs_second: String,
}

impl Default for DpSettings {
    fn default() -> Self {
        Self {
            knapsack_values: vec![60, 100, 120],
            knapsack_weights: vec![10, 20, 30],
            lcs_first: "ABCBDAB".to_string(),
            lcs_second: "BDCABA".to_string(),
        }
    }
}

/// Replay viewer behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Auto-play step interval
    pub play_interval_ms: u64,
    /// Open the viewer on the last step instead of the first
    pub start_at_end: bool,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            play_interval_ms: 1000,
            start_at_end: false,
        }
    }
}

impl Settings {
    /// Read and validate a JSON settings file
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|e| EngineError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        settings.validate().map_err(|message| EngineError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(settings)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.sort.min_value > self.sort.max_value {
            return Err(format!(
                "sort.min_value ({}) is greater than sort.max_value ({})",
                self.sort.min_value, self.sort.max_value
            ));
        }
        if self.replay.play_interval_ms == 0 {
            return Err("replay.play_interval_ms must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "sort": { "seed": 42 }, "replay": { "start_at_end": true } }"#)
                .unwrap();
        assert_eq!(settings.sort.seed, Some(42));
        assert_eq!(settings.sort.default_size, 10);
        assert_eq!(settings.dp, DpSettings::default());
        assert!(settings.replay.start_at_end);
        assert_eq!(settings.replay.play_interval_ms, 1000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_inverted_range() {
        let mut settings = Settings::default();
        settings.sort.min_value = 50;
        settings.sort.max_value = 5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.replay.play_interval_ms = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_reports_path() {
        let path = std::env::temp_dir().join("algotrace-config-test.json");
        std::fs::write(&path, r#"{ "sort": { "min_value": 9, "max_value": 1 } }"#).unwrap();
        let err = Settings::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        match err {
            EngineError::Config { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
