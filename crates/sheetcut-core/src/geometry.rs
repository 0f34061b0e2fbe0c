//! Geometric primitives for sheet layouts.
//!
//! - [`Point`] - A 2D coordinate in sheet space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Sheet coordinates follow SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The origin is the top-left corner of the sheet. Placements returned by the
//! optimizer use the same convention, so they map onto the diagram without a
//! transform.

use serde::{Deserialize, Serialize};

/// A 2D point in sheet coordinate space.
///
/// # Examples
///
/// ```
/// # use sheetcut_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate
    pub fn y(self) -> f32 {
        self.y
    }

    /// Converts this point into bounds, treating it as the top-left corner.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the size rounded up to whole pixels.
    ///
    /// Each dimension is at least one pixel, and non-finite values
    /// collapse to one pixel.
    ///
    /// ```
    /// # use sheetcut_core::geometry::Size;
    /// assert_eq!(Size::new(199.2, 0.0).to_pixels(), (200, 1));
    /// ```
    pub fn to_pixels(self) -> (u32, u32) {
        fn dimension(value: f32) -> u32 {
            if value.is_finite() && value >= 1.0 {
                value.ceil().min(u32::MAX as f32) as u32
            } else {
                1
            }
        }

        (dimension(self.width), dimension(self.height))
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns true if `other` lies entirely within these bounds.
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}
