//! Game commentary: one diagram per comment
//!
//! Walks the mainline from the starting position. Every node with a comment,
//! and the final node, gets a MAINLINE diagram showing the moves since the
//! previous one. Commented variations passed along the way, including those
//! beside the starting node, follow that diagram, labelled VARIATION.

use crate::domain::{Generated, IdGen, Position, PositionLabel, PositionType, SpecError};
use crate::rules::{MoveTree, Treepath};

use super::emit::{emit_at, resolve_start};
use super::variations::variation_paths;

pub fn process(
    tree: &MoveTree,
    position: &Position,
    id_gen: &mut IdGen,
) -> Result<Generated, SpecError> {
    let mut generated = Generated::new(&position.id);
    generated.position_type = PositionType::Example;

    let mut cursor = resolve_start(tree, position)?;
    let mut pending: Vec<Treepath> = Vec::new();

    loop {
        pending.extend(variation_paths(cursor));

        if cursor.properties().comment().is_some() || cursor.is_terminal() {
            generated.positions.push(emit_at(
                cursor,
                &position.alias,
                id_gen,
                vec![PositionLabel::Mainline],
            )?);

            for path in pending.drain(..) {
                let variation = tree
                    .cursor_at(&path)
                    .map_err(|e| SpecError::treepath(&position.id, e))?;
                generated.positions.push(emit_at(
                    variation,
                    &position.alias,
                    id_gen,
                    vec![PositionLabel::Variation],
                )?);
            }
        }

        if !cursor.move_down(0) {
            break;
        }
    }

    tracing::debug!(
        id = %position.id,
        generated = generated.positions.len(),
        "expanded game commentary"
    );
    Ok(generated)
}
