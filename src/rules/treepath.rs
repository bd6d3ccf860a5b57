//! Treepaths: routes through a move tree
//!
//! A treepath is a list of variation numbers, one per move. Two string forms
//! exist:
//!
//! - Initial paths describe a route from the root. The leading number is a
//!   count of mainline moves, the following `.`-separated numbers are
//!   variation choices: `2.1.0` is `[0, 0, 1, 0]`. A trailing `+` follows the
//!   mainline to the end of the game.
//! - Fragments are plain variation lists: `0.1` is `[0, 1]`.
//!
//! In both forms `k:n` repeats variation `k` n times, so the fragment `0:3.1`
//! is `[0, 0, 0, 1]`. Paths longer than [`MAX_PATH_LEN`] moves are rejected.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

use super::movetree::Cursor;

/// Longest route a treepath may describe
pub const MAX_PATH_LEN: usize = 100_000;

#[derive(Debug, Error, PartialEq)]
pub enum TreepathError {
    #[error("Invalid treepath '{path}': {reason}")]
    Invalid { path: String, reason: String },

    #[error("Treepath '{path}' leaves the tree at move {depth} (no variation {variation})")]
    OutOfBounds {
        path: String,
        depth: usize,
        variation: usize,
    },
}

fn invalid(path: &str, reason: impl Into<String>) -> TreepathError {
    TreepathError::Invalid {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// A sequence of variation numbers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Treepath(Vec<usize>);

impl Treepath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, variation: usize) {
        self.0.push(variation);
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Formats the path as an initial path string; the empty path is `0`
    pub fn to_init_path_string(&self) -> String {
        match self.0.iter().position(|&v| v != 0) {
            None => self.0.len().to_string(),
            Some(first) => {
                let mut parts = vec![first.to_string()];
                parts.extend(self.0[first..].iter().map(|v| v.to_string()));
                parts.join(".")
            }
        }
    }

    /// Formats the path as a fragment string
    pub fn to_fragment_string(&self) -> String {
        self.0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Parses a fragment such as `0:3.1`
    pub fn parse_fragment(s: &str) -> Result<Self, TreepathError> {
        let mut out = Vec::new();
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self(out));
        }
        for segment in s.split('.') {
            push_segment(s, segment, &mut out)?;
        }
        Ok(Self(out))
    }
}

/// Expands one `k` or `k:n` segment
fn push_segment(path: &str, segment: &str, out: &mut Vec<usize>) -> Result<(), TreepathError> {
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|_| invalid(path, format!("'{}' is not a number", v)))
    };
    match segment.split_once(':') {
        Some((var, times)) => {
            let var = parse(var)?;
            let times = parse(times)?;
            push_repeated(path, var, times, out)?;
        }
        None => push_repeated(path, parse(segment)?, 1, out)?,
    }
    Ok(())
}

fn push_repeated(
    path: &str,
    variation: usize,
    times: usize,
    out: &mut Vec<usize>,
) -> Result<(), TreepathError> {
    if times > MAX_PATH_LEN - out.len() {
        return Err(invalid(path, format!("longer than {} moves", MAX_PATH_LEN)));
    }
    out.extend(std::iter::repeat(variation).take(times));
    Ok(())
}

impl Deref for Treepath {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<usize>> for Treepath {
    fn from(path: Vec<usize>) -> Self {
        Self(path)
    }
}

impl fmt::Display for Treepath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment_string())
    }
}

/// A parsed initial path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitialPath {
    pub path: Treepath,
    /// Follow the mainline to the end after `path`
    pub to_end: bool,
}

impl FromStr for InitialPath {
    type Err = TreepathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (body, to_end) = match trimmed.strip_suffix('+') {
            Some(body) => (body, true),
            None => (trimmed, false),
        };
        if body.contains('+') {
            return Err(invalid(s, "'+' is only allowed at the end"));
        }

        let mut out = Vec::new();
        if !body.is_empty() {
            let mut segments = body.split('.');
            if let Some(first) = segments.next() {
                let moves = first
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(s, "must start with a move number"))?;
                push_repeated(s, 0, moves, &mut out)?;
            }
            for segment in segments {
                push_segment(s, segment, &mut out)?;
            }
        }

        Ok(Self {
            path: Treepath(out),
            to_end,
        })
    }
}

/// A position expressed as an initial path plus the moves that follow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextMovesPath {
    pub treepath: Treepath,
    pub next_moves: Treepath,
}

/// Splits the route to `cursor` into a starting position and the moves after it.
///
/// Walks up from the cursor, stopping at the first ancestor with a comment
/// (that ancestor's diagram already shows the earlier moves) or, when starting
/// in a variation, at the point where the variation leaves the mainline.
pub fn find_next_moves_path(cursor: Cursor<'_>) -> NextMovesPath {
    let start_on_mainline = cursor.on_mainline();
    let mut current = cursor;
    let mut next_moves = Vec::new();

    while let Some(parent) = current.parent() {
        next_moves.push(current.var_num());
        current = parent;
        if current.properties().comment().is_some() {
            break;
        }
        if !start_on_mainline && current.on_mainline() {
            break;
        }
    }
    next_moves.reverse();

    NextMovesPath {
        treepath: current.treepath_to_here(),
        next_moves: Treepath(next_moves),
    }
}
