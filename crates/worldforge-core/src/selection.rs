//! Rectangular multi-selection in region coordinates.

use crate::region::TilePosition;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle. `x`/`y` is the top-left corner; the right and
/// bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corners, both inclusive. A span wider than
    /// `u32::MAX` tiles is clamped, dropping the far edge.
    pub fn from_corners(a: TilePosition, b: TilePosition) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: a.x.abs_diff(b.x).saturating_add(1),
            height: a.y.abs_diff(b.y).saturating_add(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the position lies inside this rectangle.
    pub fn contains(&self, pos: TilePosition) -> bool {
        let dx = i64::from(pos.x) - i64::from(self.x);
        let dy = i64::from(pos.y) - i64::from(self.y);
        dx >= 0 && dy >= 0 && dx < i64::from(self.width) && dy < i64::from(self.height)
    }

    /// Inclusive top-left and bottom-right corners, or `None` when empty.
    pub fn corners(&self) -> Option<(TilePosition, TilePosition)> {
        if self.is_empty() {
            return None;
        }
        let max_x = (i64::from(self.x) + i64::from(self.width) - 1).min(i64::from(i32::MAX));
        let max_y = (i64::from(self.y) + i64::from(self.height) - 1).min(i64::from(i32::MAX));
        Some((
            TilePosition::new(self.x, self.y),
            TilePosition::new(max_x as i32, max_y as i32),
        ))
    }
}

/// The set of rectangles a batch may touch. Rectangles may overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    rectangles: Vec<Rectangle>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(rect: Rectangle) -> Self {
        Self {
            rectangles: vec![rect],
        }
    }

    /// Add a rectangle. Exact duplicates are dropped.
    pub fn add(&mut self, rect: Rectangle) {
        if !self.rectangles.contains(&rect) {
            self.rectangles.push(rect);
        }
    }

    pub fn with(mut self, rect: Rectangle) -> Self {
        self.add(rect);
        self
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    /// `true` when no rectangle covers any position.
    pub fn is_empty(&self) -> bool {
        self.rectangles.iter().all(Rectangle::is_empty)
    }

    pub fn contains(&self, pos: TilePosition) -> bool {
        self.rectangles.iter().any(|r| r.contains(pos))
    }
}

impl FromIterator<Rectangle> for Selection {
    fn from_iter<I: IntoIterator<Item = Rectangle>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for rect in iter {
            selection.add(rect);
        }
        selection
    }
}
