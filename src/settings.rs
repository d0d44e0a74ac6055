//! Trace settings
//!
//! The two knobs that decide how far a laser looks ahead and how quickly a
//! bouncing trace gives up. Stored as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PREDICT_MULTIPLIER, TRACE_EPSILON};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f32),
    #[error("predict multiplier must be at least 1, got {0}")]
    InvalidPredictMultiplier(f32),
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trace tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Distance charged for every surface hit.
    ///
    /// This is an absolute distance, so it does not scale with the scene.
    /// Very small scenes lose short final segments to it; very large ones
    /// get little protection from near-degenerate bounce loops.
    pub epsilon: f32,
    /// Budget multiplier applied to Predict-mode lasers
    pub predict_multiplier: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            epsilon: TRACE_EPSILON,
            predict_multiplier: PREDICT_MULTIPLIER,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if !self.predict_multiplier.is_finite() || self.predict_multiplier < 1.0 {
            return Err(ConfigError::InvalidPredictMultiplier(self.predict_multiplier));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
