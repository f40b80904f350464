//! # Engine Configuration
//!
//! Configuration for placement mode, animation toggles, and lighting,
//! loadable from TOML or RON files with validation and sensible defaults.
//! The lighting section exists for the rendering collaborator: the engine
//! stores and mutates it (via commands) but never interprets it.

use crate::animation::{AnimationSettings, AnimationToggles, RotationAxis};
use crate::assets::{PlaceableTemplate, TemplateError};
use crate::placement::PlacementMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Kind of light illuminating placed models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LightType {
    /// Omnidirectional light at a point
    #[default]
    Point,
    /// Parallel rays from a direction
    Directional,
    /// Cone of light from a point
    Spot,
}

impl LightType {
    /// Parse a light type name as it appears in UI control values
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "point" => Some(Self::Point),
            "directional" => Some(Self::Directional),
            "spot" => Some(Self::Spot),
            _ => None,
        }
    }
}

/// Light attached to placed models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelLightConfig {
    /// Whether the model light is on
    pub enabled: bool,
    /// Kind of light
    pub light_type: LightType,
    /// Light intensity
    pub intensity: f32,
    /// RGB color, components in [0, 1]
    pub color: [f32; 3],
}

impl Default for ModelLightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            light_type: LightType::Point,
            intensity: 5.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Scene and model lighting state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Whether the ambient scene light is on
    pub scene_light_enabled: bool,
    /// Light attached to placed models
    pub model_light: ModelLightConfig,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            scene_light_enabled: true,
            model_light: ModelLightConfig::default(),
        }
    }
}

/// Animation toggles as they appear in config files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Vertical oscillation on/off
    pub jump_enabled: bool,
    /// Monotonic rotation on/off
    pub rotation_enabled: bool,
    /// Axis the rotation turns about
    pub rotation_axis: RotationAxis,
    /// Multiplier for oscillation frequency and rotation step
    pub speed_multiplier: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            jump_enabled: true,
            rotation_enabled: true,
            rotation_axis: RotationAxis::Y,
            speed_multiplier: 1.0,
        }
    }
}

impl AnimationConfig {
    /// Convert to the runtime settings the animation step consumes
    pub fn to_settings(&self) -> AnimationSettings {
        let mut toggles = AnimationToggles::empty();
        toggles.set(AnimationToggles::JUMP, self.jump_enabled);
        toggles.set(AnimationToggles::ROTATE, self.rotation_enabled);
        AnimationSettings {
            toggles,
            axis: self.rotation_axis,
            speed: self.speed_multiplier,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Single or repeated placement for the session
    pub placement_mode: PlacementMode,
    /// Animation toggles
    pub animation: AnimationConfig,
    /// Lighting state for the rendering collaborator
    pub lighting: LightingConfig,
    /// Optional path to a RON template descriptor
    pub template: Option<String>,
}

impl EngineConfig {
    /// Load configuration from a TOML or RON file (chosen by extension)
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("ron") => ron::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load the template descriptor named by `template`, if one is set
    ///
    /// Returns `Ok(None)` when the config names no descriptor; a named
    /// descriptor that fails to load is an error the caller reports, after
    /// which placement confirms stay no-ops until a template is installed.
    pub fn load_template(&self) -> Result<Option<PlaceableTemplate>, TemplateError> {
        match &self.template {
            Some(path) => PlaceableTemplate::load_from_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.speed_multiplier <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "speed_multiplier must be positive, got {}",
                self.animation.speed_multiplier
            )));
        }
        if self.lighting.model_light.intensity < 0.0 {
            return Err(ConfigError::Validation(format!(
                "light intensity must be non-negative, got {}",
                self.lighting.model_light.intensity
            )));
        }
        for component in self.lighting.model_light.color {
            if !(0.0..=1.0).contains(&component) {
                return Err(ConfigError::Validation(format!(
                    "light color components must be in [0, 1], got {}",
                    component
                )));
            }
        }
        Ok(())
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that failed to load
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// TOML parsing failed
    #[error("failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// RON parsing failed
    #[error("failed to parse RON config: {0}")]
    ParseRon(#[from] ron::error::SpannedError),

    /// File extension is not a supported config format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value failed validation
    #[error("invalid config value: {0}")]
    Validation(String),
}
