//! gpub - book specs from Go game records
//!
//! A book is described by a spec: a tree of groupings holding positions, each
//! pointing into an SGF game. Processing expands positions by type (game
//! commentary, problems, examples) into the diagrams a renderer draws.

pub mod cli;
pub mod domain;
pub mod process;
pub mod rules;
pub mod storage;

pub use domain::{Generated, Grouping, Position, PositionLabel, PositionType, Spec, SpecError};
pub use process::SpecProcessor;
