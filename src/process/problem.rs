//! Problem expansion
//!
//! A problem is a starting position plus answer branches. Every branch is
//! classified by whether its lines reach a node that meets the problem
//! conditions (by default a `GB` property or a comment saying "Correct").

use std::collections::HashMap;

use crate::domain::{
    Generated, IdGen, Position, PositionLabel, PositionType, ProblemConditions, SpecError,
};
use crate::rules::{Cursor, MoveTree, NodeId, Treepath};

use super::emit::{emit_between, resolve_start};

/// Outcome of the lines below a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemResult {
    /// Every line reaches a node meeting the conditions
    Correct,
    /// Some lines do, some don't
    Indeterminate,
    /// No line does
    Incorrect,
}

impl ProblemResult {
    pub fn label(&self) -> PositionLabel {
        match self {
            ProblemResult::Correct => PositionLabel::Correct,
            ProblemResult::Indeterminate => PositionLabel::Indeterminate,
            ProblemResult::Incorrect => PositionLabel::Incorrect,
        }
    }
}

/// Classifies the node under `cursor`
pub fn classify(cursor: Cursor<'_>, conditions: &ProblemConditions) -> ProblemResult {
    let results = classify_subtree(cursor, conditions);
    results
        .get(&cursor.node_id())
        .copied()
        .unwrap_or(ProblemResult::Incorrect)
}

/// Classifies every node at or below `cursor`
fn classify_subtree(
    cursor: Cursor<'_>,
    conditions: &ProblemConditions,
) -> HashMap<NodeId, ProblemResult> {
    let order: Vec<Cursor<'_>> = cursor.descendants().collect();
    let mut results = HashMap::with_capacity(order.len());

    // Children come after their parent in pre-order, so walk it backwards.
    for node in order.iter().rev() {
        let result = if node.properties().matches(conditions) {
            ProblemResult::Correct
        } else if node.is_terminal() {
            ProblemResult::Incorrect
        } else {
            let mut correct = 0;
            let mut incorrect = 0;
            for child in node.node().children() {
                match results.get(child) {
                    Some(ProblemResult::Correct) => correct += 1,
                    Some(ProblemResult::Incorrect) => incorrect += 1,
                    _ => {}
                }
            }
            let total = node.num_children();
            if correct == total {
                ProblemResult::Correct
            } else if incorrect == total {
                ProblemResult::Incorrect
            } else {
                ProblemResult::Indeterminate
            }
        };
        results.insert(node.node_id(), result);
    }
    results
}

pub fn process(
    tree: &MoveTree,
    position: &Position,
    id_gen: &mut IdGen,
    conditions: &ProblemConditions,
) -> Result<Generated, SpecError> {
    let mut generated = Generated::new(&position.id);
    generated.position_type = PositionType::Problem;

    let start = resolve_start(tree, position)?;
    let start_path = start.treepath_to_here();
    let results = classify_subtree(start, conditions);

    generated.positions.push(emit_between(
        &start_path,
        &Treepath::new(),
        &position.alias,
        id_gen,
        vec![PositionLabel::ProblemRoot, PositionLabel::Problem],
    )?);

    // (node, path of the last emitted ancestor)
    let mut stack: Vec<(Cursor<'_>, Treepath)> = Vec::new();
    for n in (0..start.num_children()).rev() {
        if let Some(child) = start.child(n) {
            stack.push((child, start_path.clone()));
        }
    }

    while let Some((node, anchor)) = stack.pop() {
        let here = node.treepath_to_here();
        let interesting = node.is_terminal()
            || node.num_children() > 1
            || node.properties().comment().is_some();

        let anchor = if interesting {
            let result = results
                .get(&node.node_id())
                .copied()
                .unwrap_or(ProblemResult::Incorrect);
            let next_moves = Treepath::from(here[anchor.len()..].to_vec());
            generated.positions.push(emit_between(
                &anchor,
                &next_moves,
                &position.alias,
                id_gen,
                vec![result.label(), PositionLabel::Problem],
            )?);
            here
        } else {
            anchor
        };

        for n in (0..node.num_children()).rev() {
            if let Some(child) = node.child(n) {
                stack.push((child, anchor.clone()));
            }
        }
    }

    tracing::debug!(
        id = %position.id,
        generated = generated.positions.len(),
        "expanded problem"
    );
    Ok(generated)
}
