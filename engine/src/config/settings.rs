// Display settings, loaded from a JSON file or left at their defaults
use crate::animation::DEFAULT_DURATION_MS;
use crate::easing;
use crate::error::{DisplayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const SUPPORTED_LOCALE: &str = "ja-JP";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub locale: String,
    pub animation: AnimationSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationSettings {
    pub duration_ms: f64,
    pub easing: String,
    pub frame_interval_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            locale: SUPPORTED_LOCALE.to_string(),
            animation: AnimationSettings::default(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        AnimationSettings {
            duration_ms: DEFAULT_DURATION_MS,
            easing: "ease-out-quart".to_string(),
            // ~60 frames per second
            frame_interval_ms: 16,
        }
    }
}

impl AnimationSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl DisplaySettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: DisplaySettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&contents)?;
        tracing::info!("Loaded display settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.locale != SUPPORTED_LOCALE {
            return Err(DisplayError::ConfigError(format!(
                "Unsupported locale '{}', only {} grouping is available",
                self.locale, SUPPORTED_LOCALE
            )));
        }
        let duration = self.animation.duration_ms;
        if !duration.is_finite() || duration < 0.0 {
            return Err(DisplayError::ConfigError(format!(
                "animation.duration_ms must be a non-negative number, got {}",
                duration
            )));
        }
        if self.animation.frame_interval_ms == 0 {
            return Err(DisplayError::ConfigError(
                "animation.frame_interval_ms must be greater than 0".to_string(),
            ));
        }
        easing::from_name(&self.animation.easing)?;
        Ok(())
    }
}
