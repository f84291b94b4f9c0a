/*! Geometry types for screen coordinates. */

use serde::{Deserialize, Serialize};

/// Window rectangle in integer screen coordinates.
///
/// [`Rect::EMPTY`] doubles as the "geometry unavailable" answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
}

impl Rect {
  /// The zero rectangle.
  pub const EMPTY: Self = Self::new(0, 0, 0, 0);

  pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// True when the rectangle covers no pixels.
  pub const fn is_empty(&self) -> bool {
    self.width <= 0 || self.height <= 0
  }

  /// Check if a point lies inside the rectangle.
  ///
  /// Half-open: the left and top edges are inside, the right and bottom edges
  /// (`x + width`, `y + height`) are not. An empty rectangle contains nothing.
  pub const fn contains(&self, point: Point) -> bool {
    if self.is_empty() {
      return false;
    }
    let dx = point.x as i64 - self.x as i64;
    let dy = point.y as i64 - self.y as i64;
    dx >= 0 && dx < self.width as i64 && dy >= 0 && dy < self.height as i64
  }

  /// Build a rectangle from floating-point window-server bounds.
  ///
  /// Fractions are truncated toward zero; out-of-range values saturate.
  #[allow(clippy::cast_possible_truncation)]
  pub fn from_f64(x: f64, y: f64, width: f64, height: f64) -> Self {
    Self::new(x as i32, y as i32, width as i32, height as i32)
  }
}

/// A 2D point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
  pub x: i32,
  pub y: i32,
}

impl Point {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }
}

impl From<(i32, i32)> for Point {
  fn from((x, y): (i32, i32)) -> Self {
    Self::new(x, y)
  }
}
