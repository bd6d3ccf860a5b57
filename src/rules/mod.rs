//! # Move trees
//!
//! The slice of a Go engine that spec generation needs: reading SGF into an
//! arena-backed move tree, navigating it with cursors, describing routes
//! through it as treepaths, and working with board points and regions.
//!
//! There is no rules engine here. Legality and captures are never checked;
//! properties are carried through as text.

mod movetree;
mod point;
mod properties;
mod region;
pub mod sgf;
mod treepath;

pub use movetree::{Cursor, Descendants, MoveTree, Node, NodeId};
pub use point::{Point, PointError, Rotation};
pub use properties::Properties;
pub use region::{quad_crop, BoardRegion, Corner, Side};
pub use sgf::SgfError;
pub use treepath::{find_next_moves_path, InitialPath, NextMovesPath, Treepath, TreepathError};
