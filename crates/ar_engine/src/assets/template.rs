//! Placeable object template
//!
//! A template is loaded once at startup and is read-only afterwards, except
//! for the current material selection which the UI may change at any time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Material variants a template can be rendered with
///
/// `Original` keeps whatever materials the source asset shipped with; the
/// named variants override every mesh in the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// The asset's own materials, untouched
    #[default]
    Original,
    /// Polished gold
    Gold,
    /// Brushed silver
    Silver,
    /// Deep green emerald
    Emerald,
    /// Transparent glass with refraction
    Glass,
    /// Emissive glow
    Glow,
    /// Mirror-finish chrome
    Chrome,
}

impl MaterialKind {
    /// Parse a material name as it appears in UI control values
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            // "realistic" is what the model-placement page calls the
            // unmodified asset materials
            "original" | "realistic" => Some(Self::Original),
            "gold" => Some(Self::Gold),
            "silver" => Some(Self::Silver),
            "emerald" => Some(Self::Emerald),
            "glass" => Some(Self::Glass),
            "glow" => Some(Self::Glow),
            "chrome" => Some(Self::Chrome),
            _ => None,
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Original => "original",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Emerald => "emerald",
            Self::Glass => "glass",
            Self::Glow => "glow",
            Self::Chrome => "chrome",
        };
        write!(f, "{}", name)
    }
}

/// Template describing the object spawned on placement confirmation
///
/// Geometry itself lives with the rendering collaborator; the template
/// carries the identity and spawn parameters the placement core needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceableTemplate {
    /// Human-readable template name
    pub name: String,

    /// Source URI the rendering collaborator loads geometry from
    pub source: String,

    /// Uniform scale applied to every spawned instance
    pub default_scale: f32,

    /// Currently selected material variant (externally mutable)
    pub current_material: MaterialKind,
}

impl PlaceableTemplate {
    /// Create a template with the default spawn scale
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            default_scale: 0.1,
            current_material: MaterialKind::Original,
        }
    }

    /// Load a template descriptor from a RON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let template: Self = ron::from_str(&content)?;
        template.validate()?;
        Ok(template)
    }

    /// Validate the descriptor
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.default_scale <= 0.0 {
            return Err(TemplateError::InvalidScale(self.default_scale));
        }
        Ok(())
    }
}

/// Errors raised while loading or validating a template descriptor
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Descriptor file could not be read
    #[error("failed to read template descriptor {path}: {source}")]
    Io {
        /// Path that failed to load
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Descriptor file could not be parsed
    #[error("failed to parse template descriptor: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Spawn scale must be positive
    #[error("template default_scale must be positive, got {0}")]
    InvalidScale(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_parse() {
        assert_eq!(MaterialKind::parse("gold"), Some(MaterialKind::Gold));
        assert_eq!(MaterialKind::parse("realistic"), Some(MaterialKind::Original));
        assert_eq!(MaterialKind::parse("original"), Some(MaterialKind::Original));
        assert_eq!(MaterialKind::parse("granite"), None);
    }

    #[test]
    fn test_template_defaults() {
        let template = PlaceableTemplate::new("duck", "models/duck.gltf");
        assert_eq!(template.default_scale, 0.1);
        assert_eq!(template.current_material, MaterialKind::Original);
        assert!(template.validate().is_ok());
    }

    #[test]
    fn test_template_rejects_zero_scale() {
        let mut template = PlaceableTemplate::new("duck", "models/duck.gltf");
        template.default_scale = 0.0;
        assert!(matches!(
            template.validate(),
            Err(TemplateError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_template_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "ar_engine_{}_template_load.ron",
            std::process::id()
        ));

        let mut template = PlaceableTemplate::new("duck", "models/duck.gltf");
        std::fs::write(&path, ron::to_string(&template).unwrap()).unwrap();
        let loaded = PlaceableTemplate::load_from_file(&path).unwrap();
        assert_eq!(loaded.name, "duck");
        assert_eq!(loaded.default_scale, 0.1);

        // Descriptors failing validation are rejected by the loader too
        template.default_scale = -1.0;
        std::fs::write(&path, ron::to_string(&template).unwrap()).unwrap();
        let result = PlaceableTemplate::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(TemplateError::InvalidScale(_))));
    }

    #[test]
    fn test_template_load_missing_file() {
        let result = PlaceableTemplate::load_from_file("/nonexistent/duck.ron");
        assert!(matches!(result, Err(TemplateError::Io { .. })));
    }

    #[test]
    fn test_template_ron_roundtrip() {
        let template = PlaceableTemplate::new("scene", "https://example.com/scene.gltf");
        let text = ron::to_string(&template).unwrap();
        let parsed: PlaceableTemplate = ron::from_str(&text).unwrap();
        assert_eq!(parsed.name, "scene");
        assert_eq!(parsed.current_material, MaterialKind::Original);
    }
}
