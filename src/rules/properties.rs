//! SGF node properties
//!
//! Properties keep their source order. Values are stored unescaped.

use indexmap::IndexMap;

use super::point::{Point, Rotation};

/// Properties whose values are single points or compressed `aa:cc` rectangles
const POINT_PROPERTIES: &[&str] = &[
    "B", "W", "AB", "AW", "AE", "TR", "SQ", "CR", "MA", "SL", "TB", "TW", "DD",
];

/// Label property, values look like `aa:text`
const LABEL_PROPERTY: &str = "LB";

/// Comment property
pub const COMMENT: &str = "C";

/// The properties attached to one node of a move tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(IndexMap<String, Vec<String>>);

impl Properties {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Appends a value to a property, creating it if needed
    pub fn add(&mut self, prop: impl Into<String>, value: impl Into<String>) {
        self.0.entry(prop.into()).or_default().push(value.into());
    }

    /// Replaces all values of a property
    pub fn set(&mut self, prop: impl Into<String>, values: Vec<String>) {
        self.0.insert(prop.into(), values);
    }

    pub fn contains(&self, prop: &str) -> bool {
        self.0.contains_key(prop)
    }

    pub fn get_all(&self, prop: &str) -> &[String] {
        self.0.get(prop).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_one(&self, prop: &str) -> Option<&str> {
        self.get_all(prop).first().map(String::as_str)
    }

    /// Returns the node comment, ignoring comments that are only whitespace
    pub fn comment(&self) -> Option<&str> {
        self.get_one(COMMENT).filter(|c| !c.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Returns true if any condition is met.
    ///
    /// A condition maps a property to trigger substrings. It is met when the
    /// property is present and either has no substrings or one of its values
    /// contains one of them.
    pub fn matches(&self, conditions: &IndexMap<String, Vec<String>>) -> bool {
        conditions.iter().any(|(prop, substrings)| {
            let Some(values) = self.0.get(prop) else {
                return false;
            };
            substrings.is_empty()
                || values
                    .iter()
                    .any(|v| substrings.iter().any(|s| v.contains(s.as_str())))
        })
    }

    /// Collects every on-board point referenced by point-valued properties.
    ///
    /// Passes (`tt` on small boards) and other off-board points are skipped.
    pub fn points(&self, ints: u32) -> Vec<Point> {
        let mut out = Vec::new();
        for (prop, values) in &self.0 {
            let is_label = prop == LABEL_PROPERTY;
            if !is_label && !POINT_PROPERTIES.contains(&prop.as_str()) {
                continue;
            }
            for value in values {
                if is_label {
                    let label = value.split(':').next().and_then(|s| s.parse::<Point>().ok());
                    if let Some(p) = label.filter(|p| p.on_board(ints)) {
                        out.push(p);
                    }
                    continue;
                }
                for part in value.split(':') {
                    match part.parse::<Point>() {
                        Ok(p) if p.on_board(ints) => out.push(p),
                        _ => {}
                    }
                }
            }
        }
        out
    }

    /// Rotates every point-valued property in place.
    ///
    /// Values naming off-board points are left untouched.
    pub fn rotate(&mut self, ints: u32, rotation: Rotation) {
        if rotation.is_identity() {
            return;
        }
        for (prop, values) in self.0.iter_mut() {
            if prop == LABEL_PROPERTY {
                for value in values.iter_mut() {
                    *value = rotate_label(value, ints, rotation);
                }
            } else if POINT_PROPERTIES.contains(&prop.as_str()) {
                for value in values.iter_mut() {
                    *value = rotate_point_value(value, ints, rotation);
                }
            }
        }
    }
}

fn rotate_sgf(p: Point, ints: u32, rotation: Rotation) -> Option<String> {
    p.rotate(ints, rotation)?.to_sgf().ok()
}

fn rotate_label(value: &str, ints: u32, rotation: Rotation) -> String {
    let rotated = value.split_once(':').and_then(|(pt, text)| {
        let p = pt.parse::<Point>().ok()?;
        Some(format!("{}:{}", rotate_sgf(p, ints, rotation)?, text))
    });
    rotated.unwrap_or_else(|| value.to_string())
}

/// Compressed rectangle: rotate both corners, then renormalize
fn rotate_rectangle(a: &str, b: &str, ints: u32, rotation: Rotation) -> Option<String> {
    let a = a.parse::<Point>().ok()?.rotate(ints, rotation)?;
    let b = b.parse::<Point>().ok()?.rotate(ints, rotation)?;
    let top_left = Point::new(a.x.min(b.x), a.y.min(b.y));
    let bottom_right = Point::new(a.x.max(b.x), a.y.max(b.y));
    Some(format!("{}:{}", top_left.to_sgf().ok()?, bottom_right.to_sgf().ok()?))
}

fn rotate_point_value(value: &str, ints: u32, rotation: Rotation) -> String {
    let rotated = match value.split_once(':') {
        Some((a, b)) => rotate_rectangle(a, b, ints, rotation),
        None => value
            .parse::<Point>()
            .ok()
            .and_then(|p| rotate_sgf(p, ints, rotation)),
    };
    rotated.unwrap_or_else(|| value.to_string())
}
