//! Board regions and quadrant cropping

use serde::{Deserialize, Serialize};

use super::movetree::MoveTree;

/// A board corner, in clockwise order starting top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Corner {
    TopLeft,
    BottomLeft,
    BottomRight,
    TopRight,
}

impl Corner {
    pub fn degrees(&self) -> u32 {
        match self {
            Corner::TopLeft => 0,
            Corner::BottomLeft => 90,
            Corner::BottomRight => 180,
            Corner::TopRight => 270,
        }
    }
}

/// A board side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Top,
    Left,
    Bottom,
    Right,
}

impl Side {
    pub fn degrees(&self) -> u32 {
        match self {
            Side::Top => 0,
            Side::Left => 90,
            Side::Bottom => 180,
            Side::Right => 270,
        }
    }
}

/// The part of the board a diagram needs to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardRegion {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    All,
}

impl BoardRegion {
    pub fn as_corner(&self) -> Option<Corner> {
        match self {
            BoardRegion::TopLeft => Some(Corner::TopLeft),
            BoardRegion::TopRight => Some(Corner::TopRight),
            BoardRegion::BottomLeft => Some(Corner::BottomLeft),
            BoardRegion::BottomRight => Some(Corner::BottomRight),
            _ => None,
        }
    }

    pub fn as_side(&self) -> Option<Side> {
        match self {
            BoardRegion::Top => Some(Side::Top),
            BoardRegion::Bottom => Some(Side::Bottom),
            BoardRegion::Left => Some(Side::Left),
            BoardRegion::Right => Some(Side::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Band {
    Low,
    High,
    Center,
}

/// Classifies a span of coordinates; a span may reach one line past the middle
fn band(min: u32, max: u32, ints: u32) -> Band {
    let reach = ints / 2 + 1;
    let low = max <= reach;
    let high = min >= ints.saturating_sub(1).saturating_sub(reach);
    match (low, high) {
        (true, false) => Band::Low,
        (false, true) => Band::High,
        _ => Band::Center,
    }
}

/// Finds the smallest region containing every point used anywhere in the tree
pub fn quad_crop(tree: &MoveTree) -> BoardRegion {
    let ints = tree.intersections();
    let points: Vec<_> = tree
        .root()
        .descendants()
        .flat_map(|c| c.properties().points(ints))
        .collect();

    let (Some(min_x), Some(max_x)) = (
        points.iter().map(|p| p.x).min(),
        points.iter().map(|p| p.x).max(),
    ) else {
        return BoardRegion::All;
    };
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);

    match (band(min_x, max_x, ints), band(min_y, max_y, ints)) {
        (Band::Low, Band::Low) => BoardRegion::TopLeft,
        (Band::High, Band::Low) => BoardRegion::TopRight,
        (Band::Low, Band::High) => BoardRegion::BottomLeft,
        (Band::High, Band::High) => BoardRegion::BottomRight,
        (Band::Center, Band::Low) => BoardRegion::Top,
        (Band::Center, Band::High) => BoardRegion::Bottom,
        (Band::Low, Band::Center) => BoardRegion::Left,
        (Band::High, Band::Center) => BoardRegion::Right,
        (Band::Center, Band::Center) => BoardRegion::All,
    }
}
