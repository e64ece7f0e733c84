//! Host engine configuration
//!
//! A game supplies only the fields it cares about; everything else comes from
//! [`HostConfig::default`]. The merged result is handed to the JS side as the
//! engine's game config object.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ConfigError;

/// How the canvas follows the parent element's size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Letterbox to fit, keeping the logical size
    #[default]
    Fit,
    /// Fill and crop, keeping the logical size
    Cover,
    /// Canvas tracks the parent size exactly
    Resize,
}

impl ScaleMode {
    /// Engine-side scale manager mode name
    fn engine_mode(&self) -> &'static str {
        match self {
            ScaleMode::Fit => "FIT",
            ScaleMode::Cover => "ENVELOP",
            ScaleMode::Resize => "RESIZE",
        }
    }
}

/// Physics system requested from the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum PhysicsConfig {
    /// No physics plugin
    Disabled,
    /// Axis-aligned arcade physics
    Arcade {
        #[serde(default)]
        gravity: Vec2,
        #[serde(default)]
        debug: bool,
    },
    /// Matter.js; options are passed through untouched
    Matter {
        #[serde(default)]
        options: serde_json::Value,
    },
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig::Arcade {
            gravity: Vec2::ZERO,
            debug: false,
        }
    }
}

/// Fully resolved host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    /// DOM element id or selector for the canvas container
    pub parent: String,
    /// Logical width (px)
    pub width: u32,
    /// Logical height (px)
    pub height: u32,
    /// CSS color behind the game
    pub background_color: String,
    pub scale_mode: ScaleMode,
    /// Nearest-neighbour sampling for pixel art
    pub pixel_art: bool,
    pub antialias: bool,
    pub physics: PhysicsConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            parent: "app".to_string(),
            width: 800,
            height: 600,
            background_color: "#000000".to_string(),
            scale_mode: ScaleMode::Fit,
            pixel_art: true,
            antialias: false,
            physics: PhysicsConfig::default(),
        }
    }
}

/// Partial configuration; absent fields keep the defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostConfigOverrides {
    pub parent: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background_color: Option<String>,
    pub scale_mode: Option<ScaleMode>,
    pub pixel_art: Option<bool>,
    pub antialias: Option<bool>,
    pub physics: Option<PhysicsConfig>,
}

impl HostConfigOverrides {
    /// Parse overrides from a JSON object
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl HostConfig {
    /// Shallow merge: every present override replaces the default wholesale
    pub fn merged(overrides: HostConfigOverrides) -> Self {
        let d = Self::default();
        Self {
            parent: overrides.parent.unwrap_or(d.parent),
            width: overrides.width.unwrap_or(d.width),
            height: overrides.height.unwrap_or(d.height),
            background_color: overrides.background_color.unwrap_or(d.background_color),
            scale_mode: overrides.scale_mode.unwrap_or(d.scale_mode),
            pixel_art: overrides.pixel_art.unwrap_or(d.pixel_art),
            antialias: overrides.antialias.unwrap_or(d.antialias),
            physics: overrides.physics.unwrap_or(d.physics),
        }
    }

    /// Parse, merge and validate in one go
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = Self::merged(HostConfigOverrides::from_json(json)?);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parent.trim().is_empty() {
            return Err(ConfigError::invalid("parent", "must name a DOM element"));
        }
        if self.width == 0 {
            return Err(ConfigError::invalid("width", "must be greater than 0"));
        }
        if self.height == 0 {
            return Err(ConfigError::invalid("height", "must be greater than 0"));
        }
        Ok(())
    }

    /// Engine game-config object (consumed by the JS bootstrap)
    pub fn engine_config(&self) -> serde_json::Value {
        let scale = match self.scale_mode {
            ScaleMode::Fit | ScaleMode::Cover => json!({
                "mode": self.scale_mode.engine_mode(),
                "autoCenter": "CENTER_BOTH",
                "width": self.width,
                "height": self.height,
            }),
            ScaleMode::Resize => json!({ "mode": self.scale_mode.engine_mode() }),
        };

        let physics = match &self.physics {
            PhysicsConfig::Disabled => serde_json::Value::Null,
            PhysicsConfig::Arcade { gravity, debug } => json!({
                "default": "arcade",
                "arcade": { "gravity": { "x": gravity.x, "y": gravity.y }, "debug": debug },
            }),
            PhysicsConfig::Matter { options } => json!({
                "default": "matter",
                "matter": options,
            }),
        };

        json!({
            "type": "AUTO",
            "parent": self.parent,
            "backgroundColor": self.background_color,
            "pixelArt": self.pixel_art,
            "antialias": self.antialias,
            "scale": scale,
            "physics": physics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_defaults() {
        assert_eq!(
            HostConfig::merged(HostConfigOverrides::default()),
            HostConfig::default()
        );
        assert_eq!(HostConfig::from_json("{}").unwrap(), HostConfig::default());
    }

    #[test]
    fn test_present_fields_win() {
        let config = HostConfig::from_json(
            r##"{ "width": 360, "height": 640, "scaleMode": "resize", "backgroundColor": "#112233" }"##,
        )
        .unwrap();
        assert_eq!(config.width, 360);
        assert_eq!(config.height, 640);
        assert_eq!(config.scale_mode, ScaleMode::Resize);
        assert_eq!(config.background_color, "#112233");
        assert_eq!(config.parent, "app");
        assert!(config.pixel_art);
    }

    #[test]
    fn test_physics_can_be_disabled_or_swapped() {
        let off = HostConfig::from_json(r#"{ "physics": { "system": "disabled" } }"#).unwrap();
        assert_eq!(off.physics, PhysicsConfig::Disabled);
        assert!(off.engine_config()["physics"].is_null());

        let arcade = HostConfig::from_json(
            r#"{ "physics": { "system": "arcade", "gravity": [0.0, 300.0] } }"#,
        )
        .unwrap();
        assert_eq!(
            arcade.physics,
            PhysicsConfig::Arcade {
                gravity: Vec2::new(0.0, 300.0),
                debug: false
            }
        );
        assert_eq!(arcade.engine_config()["physics"]["arcade"]["gravity"]["y"], 300.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = HostConfig::from_json(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "width", .. }));

        let err = HostConfig::from_json(r#"{ "parent": "  " }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "parent", .. }));

        let err = HostConfig::from_json(r#"{ "width": "wide" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_engine_config_scale_shape() {
        let fit = HostConfig::default().engine_config();
        assert_eq!(fit["scale"]["mode"], "FIT");
        assert_eq!(fit["scale"]["autoCenter"], "CENTER_BOTH");
        assert_eq!(fit["scale"]["width"], 800);
        assert_eq!(fit["physics"]["default"], "arcade");

        let resize = HostConfig {
            scale_mode: ScaleMode::Resize,
            ..HostConfig::default()
        }
        .engine_config();
        assert_eq!(resize["scale"], json!({ "mode": "RESIZE" }));
    }
}
