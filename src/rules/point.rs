//! Board points and rotations
//!
//! Points use SGF coordinates: `a`-`z` for 0-25, `A`-`Z` for 26-51.
//! The x axis runs left to right, the y axis top to bottom.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Largest board SGF coordinates can describe
pub const MAX_INTERSECTIONS: u32 = 52;

#[derive(Debug, Error, PartialEq)]
pub enum PointError {
    #[error("Invalid SGF point: '{0}'")]
    InvalidPoint(String),

    #[error("Point ({x}, {y}) has no SGF coordinates")]
    OutOfRange { x: u32, y: u32 },
}

/// A clockwise rotation of the board by a multiple of 90 degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rotation {
    #[default]
    NoRotation,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Maps degrees to a rotation; only multiples of 90 below 360 are valid
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::NoRotation),
            90 => Some(Rotation::Clockwise90),
            180 => Some(Rotation::Clockwise180),
            270 => Some(Rotation::Clockwise270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::NoRotation => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Rotation::NoRotation)
    }
}

/// An intersection on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

fn coord_from_char(c: char) -> Option<u32> {
    match c {
        'a'..='z' => Some(c as u32 - 'a' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 26),
        _ => None,
    }
}

fn coord_to_char(v: u32) -> Option<char> {
    match v {
        0..=25 => Some(char::from(b'a' + v as u8)),
        26..=51 => Some(char::from(b'A' + (v - 26) as u8)),
        _ => None,
    }
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// True if the point lies on a board with `ints` intersections per side
    pub fn on_board(&self, ints: u32) -> bool {
        self.x < ints && self.y < ints
    }

    /// Rotates the point clockwise on a board with `ints` intersections per side.
    ///
    /// Returns `None` for points off the board.
    pub fn rotate(self, ints: u32, rotation: Rotation) -> Option<Self> {
        if !self.on_board(ints) {
            return None;
        }
        let max = ints - 1;
        Some(match rotation {
            Rotation::NoRotation => self,
            Rotation::Clockwise90 => Point::new(max - self.y, self.x),
            Rotation::Clockwise180 => Point::new(max - self.x, max - self.y),
            Rotation::Clockwise270 => Point::new(self.y, max - self.x),
        })
    }

    /// Returns the SGF representation of this point (e.g. `cd`)
    pub fn to_sgf(&self) -> Result<String, PointError> {
        let out_of_range = || PointError::OutOfRange {
            x: self.x,
            y: self.y,
        };
        let x = coord_to_char(self.x).ok_or_else(out_of_range)?;
        let y = coord_to_char(self.y).ok_or_else(out_of_range)?;
        Ok([x, y].iter().collect())
    }
}

impl FromStr for Point {
    type Err = PointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => {
                let x = coord_from_char(a).ok_or_else(|| PointError::InvalidPoint(s.to_string()))?;
                let y = coord_from_char(b).ok_or_else(|| PointError::InvalidPoint(s.to_string()))?;
                Ok(Point::new(x, y))
            }
            _ => Err(PointError::InvalidPoint(s.to_string())),
        }
    }
}
