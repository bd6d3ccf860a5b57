//! Parsed move trees, keyed by alias
//!
//! Trees are parsed from the SGF mapping on first use. A processing run owns
//! its cache, so rotated trees stored here never leak into another run.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::domain::SpecError;
use crate::rules::{sgf, MoveTree};

pub struct MoveTreeCache<'a> {
    sgf_mapping: &'a IndexMap<String, String>,
    trees: HashMap<String, MoveTree>,
}

impl<'a> MoveTreeCache<'a> {
    pub fn new(sgf_mapping: &'a IndexMap<String, String>) -> Self {
        Self {
            sgf_mapping,
            trees: HashMap::new(),
        }
    }

    /// Returns the tree for an alias, parsing it if needed
    pub fn get(&mut self, alias: &str) -> Result<&MoveTree, SpecError> {
        if !self.trees.contains_key(alias) {
            let source = self
                .sgf_mapping
                .get(alias)
                .ok_or_else(|| SpecError::Lookup(alias.to_string()))?;
            let tree = sgf::parse(source).map_err(|source| SpecError::Sgf {
                alias: alias.to_string(),
                source,
            })?;
            tracing::debug!(alias, nodes = tree.len(), "parsed sgf");
            self.trees.insert(alias.to_string(), tree);
        }
        self.trees
            .get(alias)
            .ok_or_else(|| SpecError::Lookup(alias.to_string()))
    }

    /// Replaces the tree for an alias
    pub fn insert(&mut self, alias: impl Into<String>, tree: MoveTree) {
        self.trees.insert(alias.into(), tree);
    }

    /// Returns the tree for an alias without parsing
    pub fn peek(&self, alias: &str) -> Option<&MoveTree> {
        self.trees.get(alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.trees.contains_key(alias)
    }
}
