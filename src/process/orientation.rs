//! Auto-rotation of cropped diagrams
//!
//! Problems are easier to compare when they all sit in the same corner. The
//! tree's quad-crop region is rotated onto the preferred corner (or side).

use crate::domain::AutoRotateCropPrefs;
use crate::rules::{quad_crop, MoveTree, Rotation};

/// Finds the clockwise rotation that moves the tree's region onto the preferred one.
///
/// Trees that use the whole board are never rotated.
pub fn find_canonical_rotation(tree: &MoveTree, prefs: &AutoRotateCropPrefs) -> Rotation {
    let region = quad_crop(tree);
    let degrees = if let Some(corner) = region.as_corner() {
        (corner.degrees(), prefs.corner.degrees())
    } else if let Some(side) = region.as_side() {
        (side.degrees(), prefs.side.degrees())
    } else {
        return Rotation::NoRotation;
    };

    let (source, target) = degrees;
    Rotation::from_degrees((360 + source - target) % 360).unwrap_or_default()
}

/// Returns a rotated copy of the tree; the input is left untouched
pub fn auto_rotate_crop(tree: &MoveTree, prefs: &AutoRotateCropPrefs) -> MoveTree {
    let mut rotated = tree.clone();
    rotated.rotate(find_canonical_rotation(tree, prefs));
    rotated
}
