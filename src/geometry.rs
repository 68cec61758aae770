//! Geometry primitives
//!
//! Pixel types are what the host works in. Logical types are what the
//! toolkit lays out in; they differ by the render scaling.

use std::ops::Div;

/// A size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    /// Create a new pixel size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert to a logical size for the given scaling
    pub fn to_size(self, scaling: f64) -> Size {
        Size::new(
            self.width as f64 / scaling,
            self.height as f64 / scaling,
        )
    }

    /// Convert a logical size to pixels, truncating fractional pixels
    pub fn from_size(size: Size, scaling: f64) -> Self {
        Self::new(
            (size.width * scaling).max(0.0) as u32,
            (size.height * scaling).max(0.0) as u32,
        )
    }
}

/// A position in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new pixel point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to a logical point for the given scaling
    pub fn to_point(self, scaling: f64) -> Point {
        Point::new(self.x as f64 / scaling, self.y as f64 / scaling)
    }

    /// Convert a logical point to pixels, truncating toward zero
    pub fn from_point(point: Point, scaling: f64) -> Self {
        Self::new((point.x * scaling) as i32, (point.y * scaling) as i32)
    }
}

/// A size in logical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const INFINITY: Self = Self::new(f64::INFINITY, f64::INFINITY);

    /// Create a new logical size
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp both dimensions to be non-negative
    pub fn floor_to_nonnegative(self) -> Self {
        Self::new(self.width.max(0.0), self.height.max(0.0))
    }

    /// True when both dimensions are finite and strictly positive
    pub fn is_positive_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A position in logical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new logical point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// A two-dimensional delta, used for wheel scrolling
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A logical rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin covering `size`
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }
}

/// Edge thickness, used for title bar margins
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    /// Create a new thickness
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}
