//! Position domain model
//!
//! A position points at one board state of one game: the game is named by its
//! alias, the state by an initial treepath and optionally the moves that
//! follow it.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::SpecError;

/// How a position is expanded during processing.
///
/// Deserializes through [`FromStr`], so `game-commentary` is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionType {
    /// A single diagram, rendered as-is
    #[default]
    Example,
    /// A commented game, flattened into one diagram per comment
    GameCommentary,
    /// A problem with correct and incorrect answer branches
    Problem,
    /// Every variation from a position (not supported)
    PositionVariations,
}

impl PositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionType::Example => "EXAMPLE",
            PositionType::GameCommentary => "GAME_COMMENTARY",
            PositionType::Problem => "PROBLEM",
            PositionType::PositionVariations => "POSITION_VARIATIONS",
        }
    }
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "EXAMPLE" => Ok(PositionType::Example),
            "GAME_COMMENTARY" => Ok(PositionType::GameCommentary),
            "PROBLEM" => Ok(PositionType::Problem),
            "POSITION_VARIATIONS" => Ok(PositionType::PositionVariations),
            _ => Err(SpecError::Configuration(format!(
                "Unknown position type '{}'",
                s
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for PositionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// Role of a generated position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionLabel {
    Mainline,
    Variation,
    Problem,
    ProblemRoot,
    Correct,
    Incorrect,
    Indeterminate,
}

impl PositionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionLabel::Mainline => "MAINLINE",
            PositionLabel::Variation => "VARIATION",
            PositionLabel::Problem => "PROBLEM",
            PositionLabel::ProblemRoot => "PROBLEM_ROOT",
            PositionLabel::Correct => "CORRECT",
            PositionLabel::Incorrect => "INCORRECT",
            PositionLabel::Indeterminate => "INDETERMINATE",
        }
    }
}

impl fmt::Display for PositionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a single board state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default)]
    pub id: String,

    /// Key into the spec's SGF mapping
    #[serde(default)]
    pub alias: String,

    /// Initial treepath from the root of the game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_position: Option<String>,

    /// Treepath fragment of the moves shown after the initial position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_moves_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_type: Option<PositionType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<PositionLabel>,
}

impl Position {
    /// Creates a position for a game, starting at the root
    pub fn new(id: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: alias.into(),
            initial_position: None,
            next_moves_path: None,
            position_type: None,
            labels: Vec::new(),
        }
    }

    pub fn with_initial_position(mut self, path: impl Into<String>) -> Self {
        self.initial_position = Some(path.into());
        self
    }

    pub fn with_next_moves_path(mut self, path: impl Into<String>) -> Self {
        self.next_moves_path = Some(path.into());
        self
    }

    pub fn with_position_type(mut self, position_type: PositionType) -> Self {
        self.position_type = Some(position_type);
        self
    }

    pub fn with_labels(mut self, labels: Vec<PositionLabel>) -> Self {
        self.labels = labels;
        self
    }

    pub fn has_label(&self, label: PositionLabel) -> bool {
        self.labels.contains(&label)
    }

    /// Checks an author-supplied position
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.id.trim().is_empty() {
            return Err(SpecError::validation(&self.id, "position has no id"));
        }
        if self.alias.trim().is_empty() {
            return Err(SpecError::validation(&self.id, "position has no alias"));
        }
        if !self.labels.is_empty() {
            return Err(SpecError::validation(
                &self.id,
                "labels are assigned during processing and can't be set by hand",
            ));
        }
        Ok(())
    }

    /// Checks fields that only make sense for some position types
    pub fn validate_for_type(&self, position_type: PositionType) -> Result<(), SpecError> {
        if self.next_moves_path.is_some() && position_type != PositionType::Example {
            return Err(SpecError::validation(
                &self.id,
                format!(
                    "nextMovesPath is only allowed for {} positions, not {}",
                    PositionType::Example,
                    position_type
                ),
            ));
        }
        Ok(())
    }
}
