use core::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const CENTER: Self = Self::new(0.5, 0.5);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Component-wise product.
    pub fn scale(self, other: Vector2) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<Dimensions> for Vector2 {
    fn from(value: Dimensions) -> Self {
        Self::new(value.width, value.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

impl Mul<f32> for Dimensions {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.width * rhs, self.height * rhs)
    }
}

impl From<(f32, f32)> for Dimensions {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Axis-aligned box; `x`/`y` is the bottom-left corner in a y-up space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the box of a rect placed at `position` with its `pivot` point
    /// (normalized, `(0, 0)` = bottom-left) on that position.
    pub fn from_pivot(position: Vector2, size: Dimensions, pivot: Vector2) -> Self {
        Self::new(
            position.x - pivot.x * size.width,
            position.y - pivot.y * size.height,
            size.width,
            size.height,
        )
    }

    /// Edges are inclusive.
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_box_corners() {
        let size = Dimensions::new(10.0, 4.0);
        let centered = BoundingBox::from_pivot(Vector2::new(5.0, 2.0), size, Vector2::CENTER);
        assert_eq!(centered, BoundingBox::new(0.0, 0.0, 10.0, 4.0));

        let top_right = BoundingBox::from_pivot(Vector2::new(10.0, 4.0), size, Vector2::new(1.0, 1.0));
        assert_eq!(top_right, BoundingBox::new(0.0, 0.0, 10.0, 4.0));
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let bb = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        assert!(bb.contains(Vector2::new(0.0, 0.0)));
        assert!(bb.contains(Vector2::new(2.0, 2.0)));
        assert!(!bb.contains(Vector2::new(2.01, 1.0)));
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(-0.5, 0.5, 0.0), -0.5);
        assert_eq!(lerp(-0.5, 0.5, 0.5), 0.0);
        assert_eq!(lerp(-0.5, 0.5, 1.0), 0.5);
    }
}
