//! Spec, diagram and template options

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::id::IdGenType;
use super::position::PositionType;
use crate::rules::{Corner, Side};

/// Property name to trigger substrings; see [`crate::rules::Properties::matches`]
pub type ProblemConditions = IndexMap<String, Vec<String>>;

/// Where cropped diagrams should end up after auto-rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRotateCropPrefs {
    pub corner: Corner,
    pub side: Side,
}

impl Default for AutoRotateCropPrefs {
    fn default() -> Self {
        Self {
            corner: Corner::TopRight,
            side: Side::Top,
        }
    }
}

/// Options that control spec processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecOptions {
    /// Type for positions that neither they nor a grouping specify
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_type: Option<PositionType>,

    pub id_gen_type: IdGenType,

    /// Target orientation for auto-rotation; `null` disables rotation
    pub auto_rotate_crop_prefs: Option<AutoRotateCropPrefs>,

    /// Position types that get auto-rotated
    pub auto_rotate_crop_types: IndexMap<PositionType, bool>,

    /// Conditions that mark a problem branch as correct
    pub problem_conditions: ProblemConditions,
}

impl Default for SpecOptions {
    fn default() -> Self {
        let mut auto_rotate_crop_types = IndexMap::new();
        auto_rotate_crop_types.insert(PositionType::Problem, true);

        let mut problem_conditions = IndexMap::new();
        problem_conditions.insert("GB".to_string(), vec![]);
        problem_conditions.insert(
            "C".to_string(),
            vec!["Correct".to_string(), "is correct".to_string()],
        );

        Self {
            position_type: None,
            id_gen_type: IdGenType::default(),
            auto_rotate_crop_prefs: Some(AutoRotateCropPrefs::default()),
            auto_rotate_crop_types,
            problem_conditions,
        }
    }
}

impl SpecOptions {
    /// Returns the rotation target if positions of this type get rotated
    pub fn rotation_for(&self, position_type: PositionType) -> Option<AutoRotateCropPrefs> {
        let enabled = self
            .auto_rotate_crop_types
            .get(&position_type)
            .copied()
            .unwrap_or(false);
        if enabled {
            self.auto_rotate_crop_prefs
        } else {
            None
        }
    }
}

/// Diagram notation used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagramType {
    Gnos,
    Gooe,
    Igo,
    Svg,
    Ascii,
}

/// Options handed through to the diagram renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram_type: Option<DiagramType>,

    pub clear_marks: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Renderer-specific settings
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Output format of the assembled book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookFormat {
    Latex,
    Epub,
    Ascii,
}

/// Options handed through to book assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<BookFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    /// Template-specific settings
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}
