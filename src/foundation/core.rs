use crate::foundation::error::{RotoError, RotoResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Integer pixel rectangle. `x1`/`y1` are inclusive, `x2`/`y2` exclusive; coordinates may be
/// negative because a region of interest lives in canvas space, not buffer space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> RotoResult<Self> {
        if x2 < x1 || y2 < y1 {
            return Err(RotoError::validation(format!(
                "RectI must satisfy x1 <= x2 and y1 <= y2, got ({x1},{y1})-({x2},{y2})"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn width(self) -> u32 {
        self.x2.saturating_sub(self.x1).max(0) as u32
    }

    pub fn height(self) -> u32 {
        self.y2.saturating_sub(self.y1).max(0) as u32
    }

    pub fn is_empty(self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    pub fn contains_point(self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    pub fn contains(self, other: RectI) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }

    pub fn intersect(self, other: RectI) -> Option<RectI> {
        let r = RectI {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        };
        (!r.is_empty()).then_some(r)
    }

    /// Smallest pixel rectangle enclosing `r`.
    pub fn enclosing(r: Rect) -> Self {
        Self {
            x1: r.x0.floor() as i32,
            y1: r.y0.floor() as i32,
            x2: r.x1.ceil() as i32,
            y2: r.y1.ceil() as i32,
        }
    }
}

/// Straight (non-premultiplied) shape color, each channel nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
