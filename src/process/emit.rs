//! Shared helpers for the expanders

use crate::domain::{IdGen, Position, PositionLabel, SpecError};
use crate::rules::{find_next_moves_path, Cursor, InitialPath, MoveTree, Treepath};

/// Resolves where a position starts: its initial path, or the root
pub(crate) fn resolve_start<'t>(
    tree: &'t MoveTree,
    position: &Position,
) -> Result<Cursor<'t>, SpecError> {
    let Some(raw) = position.initial_position.as_deref() else {
        return Ok(tree.root());
    };
    let initial: InitialPath = raw
        .parse()
        .map_err(|e| SpecError::treepath(&position.id, e))?;
    tree.cursor_at_initial(&initial)
        .map_err(|e| SpecError::treepath(&position.id, e))
}

/// Builds a generated position showing the node under `cursor`.
///
/// The diagram starts at the nearest commented ancestor (or where a variation
/// leaves the mainline) and shows the moves from there.
pub(crate) fn emit_at(
    cursor: Cursor<'_>,
    alias: &str,
    id_gen: &mut IdGen,
    labels: Vec<PositionLabel>,
) -> Result<Position, SpecError> {
    let path = find_next_moves_path(cursor);
    emit_between(&path.treepath, &path.next_moves, alias, id_gen, labels)
}

/// Builds a generated position starting at `initial` and showing `next_moves`
pub(crate) fn emit_between(
    initial: &Treepath,
    next_moves: &Treepath,
    alias: &str,
    id_gen: &mut IdGen,
    labels: Vec<PositionLabel>,
) -> Result<Position, SpecError> {
    let initial = initial.to_init_path_string();
    let next = (!next_moves.is_empty()).then(|| next_moves.to_fragment_string());
    let id = id_gen.next(alias, Some(&initial), next.as_deref())?;

    let mut position = Position::new(id, alias)
        .with_initial_position(initial)
        .with_labels(labels);
    position.next_moves_path = next;
    Ok(position)
}
