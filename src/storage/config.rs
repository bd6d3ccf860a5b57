//! Configuration handling for gpub
//!
//! Global defaults live in `~/.config/gpub/config.toml` (platform config dir).
//! A book file can override any of them for one book.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    AutoRotateCropPrefs, IdGenType, PositionType, ProblemConditions, SpecOptions,
};
use crate::rules::{Corner, Side};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Auto-rotation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RotationConfig {
    /// Turn auto-rotation off entirely
    pub enabled: bool,

    pub corner: Corner,

    pub side: Side,

    /// Position types to rotate; unset keeps the current list
    pub types: Option<Vec<PositionType>>,
}

impl Default for RotationConfig {
    fn default() -> Self {
        let prefs = AutoRotateCropPrefs::default();
        Self {
            enabled: true,
            corner: prefs.corner,
            side: prefs.side,
            types: None,
        }
    }
}

/// Spec option overrides, as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SpecDefaults {
    /// Type for positions that no grouping assigns one
    pub position_type: Option<PositionType>,

    pub id_gen_type: Option<IdGenType>,

    pub rotation: Option<RotationConfig>,

    /// Replaces the default problem conditions when set
    pub problem_conditions: Option<ProblemConditions>,
}

impl SpecDefaults {
    /// Applies every set field on top of `options`
    pub fn apply(&self, options: &mut SpecOptions) {
        if let Some(position_type) = self.position_type {
            options.position_type = Some(position_type);
        }
        if let Some(id_gen_type) = self.id_gen_type {
            options.id_gen_type = id_gen_type;
        }
        if let Some(rotation) = &self.rotation {
            options.auto_rotate_crop_prefs = rotation.enabled.then_some(AutoRotateCropPrefs {
                corner: rotation.corner,
                side: rotation.side,
            });
            if let Some(types) = &rotation.types {
                options.auto_rotate_crop_types =
                    types.iter().map(|t| (*t, true)).collect::<IndexMap<_, _>>();
            }
        }
        if let Some(conditions) = &self.problem_conditions {
            options.problem_conditions = conditions.clone();
        }
    }

    /// Rejects settings that would make processing fail for every position
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.position_type == Some(PositionType::PositionVariations) {
            return Err(ConfigError::Invalid(
                "position_type POSITION_VARIATIONS is not supported".to_string(),
            ));
        }
        if let Some(conditions) = &self.problem_conditions {
            if conditions.is_empty() {
                return Err(ConfigError::Invalid(
                    "problem_conditions must name at least one property".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Spec options applied to every book
    pub spec: SpecDefaults,
}

impl GlobalConfig {
    /// Returns the global config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "gpub", "gpub").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads the global configuration, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_dir = match Self::config_dir() {
            Some(dir) => dir,
            None => return Ok(Self::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        Self::parse(&content).context("Failed to parse global config")
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.spec.validate()?;
        Ok(config)
    }

    /// Spec options with the global overrides applied
    pub fn spec_options(&self) -> SpecOptions {
        let mut options = SpecOptions::default();
        self.spec.apply(&mut options);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GlobalConfig::default();
        assert_eq!(config.default_format, OutputFormat::Text);
        assert_eq!(config.spec_options(), SpecOptions::default());
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"

[spec]
id_gen_type = "PATH"
position_type = "GAME_COMMENTARY"

[spec.problem_conditions]
C = ["Right"]
"#;

        let config = GlobalConfig::parse(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);

        let options = config.spec_options();
        assert_eq!(options.id_gen_type, IdGenType::Path);
        assert_eq!(options.position_type, Some(PositionType::GameCommentary));
        assert_eq!(options.problem_conditions.len(), 1);
        assert_eq!(options.problem_conditions["C"], vec!["Right"]);
    }

    #[test]
    fn rotation_can_be_disabled() {
        let toml = r#"
[spec.rotation]
enabled = false
"#;
        let options = GlobalConfig::parse(toml).unwrap().spec_options();
        assert_eq!(options.auto_rotate_crop_prefs, None);
        assert_eq!(options.rotation_for(PositionType::Problem), None);
    }

    #[test]
    fn rotation_targets_and_types() {
        let toml = r#"
[spec.rotation]
corner = "BOTTOM_LEFT"
side = "LEFT"
types = ["PROBLEM", "GAME_COMMENTARY"]
"#;
        let options = GlobalConfig::parse(toml).unwrap().spec_options();
        let expected = Some(AutoRotateCropPrefs {
            corner: Corner::BottomLeft,
            side: Side::Left,
        });
        assert_eq!(options.rotation_for(PositionType::GameCommentary), expected);
        assert_eq!(options.rotation_for(PositionType::Problem), expected);
        assert_eq!(options.rotation_for(PositionType::Example), None);
    }

    #[test]
    fn later_layers_win() {
        let global = SpecDefaults {
            id_gen_type: Some(IdGenType::Path),
            position_type: Some(PositionType::Problem),
            ..Default::default()
        };
        let book = SpecDefaults {
            position_type: Some(PositionType::Example),
            ..Default::default()
        };

        let mut options = SpecOptions::default();
        global.apply(&mut options);
        book.apply(&mut options);

        assert_eq!(options.id_gen_type, IdGenType::Path);
        assert_eq!(options.position_type, Some(PositionType::Example));
    }

    #[test]
    fn rejects_unsupported_position_type() {
        let toml = r#"
[spec]
position_type = "POSITION_VARIATIONS"
"#;
        assert!(matches!(
            GlobalConfig::parse(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            GlobalConfig::parse("default_format = "),
            Err(ConfigError::Parse(_))
        ));
    }
}
