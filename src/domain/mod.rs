//! Domain models for gpub specs
//!
//! The book structure (groupings and positions), its options, and position ID
//! generation. No I/O happens here.

mod error;
mod grouping;
mod id;
mod options;
mod position;
mod spec;

pub use error::SpecError;
pub use grouping::{Generated, Grouping};
pub use id::{IdError, IdGen, IdGenType};
pub use options::{
    AutoRotateCropPrefs, BookFormat, DiagramOptions, DiagramType, ProblemConditions, SpecOptions,
    TemplateOptions,
};
pub use position::{Position, PositionLabel, PositionType};
pub use spec::{BookOptions, GameSource, Spec, SpecVersion};
