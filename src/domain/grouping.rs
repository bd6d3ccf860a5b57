//! Groupings: the chapter/section tree of a book
//!
//! A grouping holds positions and child groupings. Only groupings nest;
//! positions are leaves. After processing, each grouping also maps the IDs of
//! its positions to the positions generated from them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::SpecError;
use super::position::{Position, PositionLabel, PositionType};

/// Positions generated from one source position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generated {
    /// ID of the source position
    pub id: String,

    /// Type applied to the generated positions
    #[serde(default)]
    pub position_type: PositionType,

    #[serde(default)]
    pub positions: Vec<Position>,
}

impl Generated {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position_type: PositionType::Example,
            positions: Vec::new(),
        }
    }

    /// Maps each label to the IDs of the positions carrying it, in emission order
    pub fn position_labels(&self) -> BTreeMap<PositionLabel, Vec<String>> {
        let mut out: BTreeMap<PositionLabel, Vec<String>> = BTreeMap::new();
        for pos in &self.positions {
            for label in &pos.labels {
                out.entry(*label).or_default().push(pos.id.clone());
            }
        }
        out
    }

    /// Number of positions carrying a label
    pub fn label_count(&self, label: PositionLabel) -> usize {
        self.positions.iter().filter(|p| p.has_label(label)).count()
    }
}

/// A named collection of positions and child groupings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default type for positions in this grouping and its children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_type: Option<PositionType>,

    #[serde(default)]
    pub positions: Vec<Position>,

    #[serde(default)]
    pub groupings: Vec<Grouping>,

    /// Source position ID to generated positions, filled in by processing
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub generated: IndexMap<String, Generated>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grouping from raw author input.
    ///
    /// The input is copied, so changing it afterwards doesn't affect the
    /// grouping. Every position in the tree is validated.
    pub fn from_value(raw: &serde_json::Value) -> Result<Self, SpecError> {
        let grouping: Grouping = serde_json::from_value(raw.clone())?;
        grouping.validate()?;
        Ok(grouping)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_position_type(mut self, position_type: PositionType) -> Self {
        self.position_type = Some(position_type);
        self
    }

    pub fn add_position(&mut self, position: Position) {
        self.positions.push(position);
    }

    pub fn add_grouping(&mut self, grouping: Grouping) {
        self.groupings.push(grouping);
    }

    /// Validates every position in this grouping and its descendants
    pub fn validate(&self) -> Result<(), SpecError> {
        for grouping in self.descendants() {
            for pos in &grouping.positions {
                pos.validate()?;
            }
        }
        Ok(())
    }

    /// This grouping and all groupings below it, in pre-order
    pub fn descendants(&self) -> Vec<&Grouping> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(grouping) = stack.pop() {
            out.push(grouping);
            stack.extend(grouping.groupings.iter().rev());
        }
        out
    }

    /// Every generated position in the tree, in pre-order
    pub fn generated_positions(&self) -> impl Iterator<Item = &Position> {
        self.descendants()
            .into_iter()
            .flat_map(|g| g.generated.values())
            .flat_map(|gen| gen.positions.iter())
    }
}
