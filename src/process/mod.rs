//! Spec processing
//!
//! [`SpecProcessor`] walks the groupings of a spec and expands each position
//! according to its type:
//!
//! - `GAME_COMMENTARY`: one diagram per comment, see [`game_commentary`]
//! - `PROBLEM`: the problem root plus every classified answer, see [`problem`]
//! - `EXAMPLE`: kept as written
//!
//! Trees for auto-rotated types are first turned so their region lands in the
//! preferred corner, see [`orientation`].

mod cache;
mod emit;
pub mod game_commentary;
pub mod orientation;
pub mod problem;
mod processor;
mod variations;

pub use cache::MoveTreeCache;
pub use orientation::{auto_rotate_crop, find_canonical_rotation};
pub use problem::ProblemResult;
pub use processor::SpecProcessor;
pub use variations::variation_paths;

use crate::domain::{Spec, SpecError};

/// Processes a spec with a fresh run
pub fn process(spec: &Spec) -> Result<Spec, SpecError> {
    SpecProcessor::new(spec).process()
}
