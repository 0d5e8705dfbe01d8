//! Screen geometry primitives.

use serde::{Deserialize, Serialize};

/// A point in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned capture rectangle in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column to the right of the region.
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// First row below the region.
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// The point at the given fractions of the region's width and height.
    pub fn at(&self, fx: f32, fy: f32) -> Point {
        Point::new(
            self.x + (self.width as f32 * fx).round() as i32,
            self.y + (self.height as f32 * fy).round() as i32,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}
