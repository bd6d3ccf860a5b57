use crate::rules::{Cursor, Treepath};

/// Treepaths to the commented nodes in the variations beside `cursor`.
///
/// Looks at the siblings of the cursor's node other than the mainline
/// (variations 1 and up) and walks each branch in pre-order. Paths are
/// absolute. The root has no siblings, so it yields nothing.
pub fn variation_paths(cursor: Cursor<'_>) -> Vec<Treepath> {
    let Some(parent) = cursor.parent() else {
        return Vec::new();
    };

    (1..parent.num_children())
        .filter_map(|n| parent.child(n))
        .flat_map(|branch| branch.descendants())
        .filter(|node| node.properties().comment().is_some())
        .map(|node| node.treepath_to_here())
        .collect()
}
