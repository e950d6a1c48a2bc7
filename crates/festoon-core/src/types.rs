//! Spatial and common types

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D vector / offset from a slot's visual center
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Smallest viewport dimension accepted for spawn ranges.
/// Degenerate sizes from the UI collaborator are clamped up to this.
const MIN_VIEWPORT_EXTENT: f32 = 1.0;

/// A display surface size, centered on the slot's visual center.
///
/// Bounds run from `-width/2..width/2` and `-height/2..height/2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns a copy with zero/negative/NaN dimensions clamped to a
    /// minimum positive size.
    pub fn clamped(&self) -> Self {
        let sanitize = |v: f32| {
            if v.is_finite() && v >= MIN_VIEWPORT_EXTENT {
                v
            } else {
                MIN_VIEWPORT_EXTENT
            }
        };
        Self {
            width: sanitize(self.width),
            height: sanitize(self.height),
        }
    }

    /// True if the offset lies within the centered half-bounds.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.width / 2.0 && p.y.abs() <= self.height / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // Matches the prototype's minimum window size
        Self::new(400.0, 300.0)
    }
}

/// An RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// The fixed streamer palette: red, green, blue, yellow, purple, orange.
pub const PALETTE: [Color; 6] = [
    Color::rgb(1.0, 0.0, 0.0),
    Color::rgb(0.0, 0.8, 0.0),
    Color::rgb(0.0, 0.0, 1.0),
    Color::rgb(1.0, 0.9, 0.0),
    Color::rgb(0.6, 0.0, 0.8),
    Color::rgb(1.0, 0.5, 0.0),
];
