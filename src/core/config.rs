//! Configuration for the tween registry
//!
//! Hosts either pick a preset or deserialize a [`RegistryConfig`] from JSON.
//! Every field has a default, so partial documents are accepted.

use crate::animation::easing::EasingKind;
use crate::core::constants::{DEFAULT_TIME_SCALE, DEFAULT_TWEEN_DURATION};
use crate::{Result, TweenError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigPreset {
    Standard,
    /// Everything runs at quarter speed
    SlowMotion,
    /// Convenience tweens finish on their first tick and land exactly on the target
    ReducedMotion,
    Custom(RegistryConfig),
}

impl ConfigPreset {
    pub fn resolve(&self) -> RegistryConfig {
        match self {
            Self::Standard => RegistryConfig::default(),
            Self::SlowMotion => RegistryConfig {
                time_scale: 0.25,
                defaults: TweenDefaults::default(),
            },
            Self::ReducedMotion => RegistryConfig {
                time_scale: DEFAULT_TIME_SCALE,
                defaults: TweenDefaults {
                    easing: EasingKind::Linear,
                    duration: 0.0,
                    snap_to_end: true,
                },
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for ConfigPreset {
    fn default() -> Self {
        Self::Standard
    }
}

/// Settings applied to tweens built by the convenience constructors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenDefaults {
    pub easing: EasingKind,
    /// Seconds
    pub duration: f64,
    pub snap_to_end: bool,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self {
            easing: EasingKind::EaseInOutQuad,
            duration: DEFAULT_TWEEN_DURATION,
            snap_to_end: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Multiplier applied to every tick delta
    pub time_scale: f64,
    pub defaults: TweenDefaults,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            defaults: TweenDefaults::default(),
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(TweenError::InvalidTimeScale(self.time_scale));
        }
        if !self.defaults.duration.is_finite() || self.defaults.duration < 0.0 {
            return Err(TweenError::InvalidDuration(self.defaults.duration));
        }
        Ok(())
    }
}
