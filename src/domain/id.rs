//! ID generation for positions
//!
//! ID Format:
//! - Sequential: `{game-id}-{counter}` (e.g., `kogo-0`, `kogo-1`)
//! - Path: `{game-id}__{initial-path}` or `{game-id}__{initial-path}__{next-moves}`
//!   (e.g., `kogo__2_1_0__0_0`)
//!
//! Path IDs encode treepath separators so they stay usable as file names and
//! LaTeX labels: `:` becomes `-`, `.` becomes `_`, `+` becomes `p`. A missing
//! initial path is written as `z`.
//!
//! Every ID handed out by one [`IdGen`] is remembered; handing out the same ID
//! twice is an error, since it means two positions would collide downstream.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Duplicate ID: '{0}'")]
    Duplicate(String),
}

/// How generated position IDs are built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdGenType {
    /// Per-game counter
    #[default]
    Sequential,
    /// Derived from the treepath of the position
    Path,
}

/// Placeholder for a missing initial path in path IDs
const NO_PATH: &str = "z";

fn encode_path(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            ':' => '-',
            '.' => '_',
            '+' => 'p',
            c => c,
        })
        .collect()
}

/// Issues unique position IDs for one processing run
#[derive(Debug, Default)]
pub struct IdGen {
    strategy: IdGenType,
    issued: HashSet<String>,
    counters: HashMap<String, u32>,
}

impl IdGen {
    pub fn new(strategy: IdGenType) -> Self {
        Self {
            strategy,
            issued: HashSet::new(),
            counters: HashMap::new(),
        }
    }

    /// Generates the next ID for a game
    pub fn next(
        &mut self,
        game_id: &str,
        initial_path: Option<&str>,
        next_moves_path: Option<&str>,
    ) -> Result<String, IdError> {
        let id = match self.strategy {
            IdGenType::Sequential => {
                let counter = self.counters.entry(game_id.to_string()).or_insert(0);
                let id = format!("{}-{}", game_id, counter);
                *counter += 1;
                id
            }
            IdGenType::Path => {
                let mut id = format!(
                    "{}__{}",
                    game_id,
                    initial_path.map(encode_path).unwrap_or_else(|| NO_PATH.to_string())
                );
                if let Some(next) = next_moves_path {
                    id.push_str("__");
                    id.push_str(&encode_path(next));
                }
                id
            }
        };

        self.reserve(&id)?;
        Ok(id)
    }

    /// Records an externally chosen ID so it can't be issued again
    pub fn reserve(&mut self, id: &str) -> Result<(), IdError> {
        if !self.issued.insert(id.to_string()) {
            return Err(IdError::Duplicate(id.to_string()));
        }
        Ok(())
    }

    /// Returns true if the ID was issued or reserved
    pub fn contains(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    /// Number of IDs issued or reserved so far
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
