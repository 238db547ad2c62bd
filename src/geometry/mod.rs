//! Geometric primitives in page space.
//!
//! Page space follows PDF conventions: the origin is the lower-left corner of
//! the page, y grows upwards, and all lengths are in points (1/72 inch).

use serde::Serialize;

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_barcode::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in page space, anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// X coordinate of lower-left corner
    pub x: f32,
    /// Y coordinate of lower-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_barcode::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Whether both dimensions are strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_barcode::geometry::Rect;
    ///
    /// assert!(Rect::new(0.0, 0.0, 1.0, 1.0).has_area());
    /// assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).has_area());
    /// ```
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Per-axis scale factors that stretch this rectangle to `width` x `height`.
    ///
    /// A degenerate axis scales by 1.0.
    pub fn scale_to(&self, width: f32, height: f32) -> (f32, f32) {
        let sx = if self.width > 0.0 {
            width / self.width
        } else {
            1.0
        };
        let sy = if self.height > 0.0 {
            height / self.height
        } else {
            1.0
        };
        (sx, sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 70.0);
    }

    #[test]
    fn test_rect_has_area() {
        assert!(Rect::new(0.0, 0.0, 0.5, 0.5).has_area());
        assert!(!Rect::new(0.0, 0.0, 10.0, 0.0).has_area());
        assert!(!Rect::new(0.0, 0.0, -1.0, 10.0).has_area());
    }

    #[test]
    fn test_rect_scale_to() {
        let r = Rect::new(0.0, 0.0, 50.0, 20.0);
        assert_eq!(r.scale_to(100.0, 10.0), (2.0, 0.5));
    }

    #[test]
    fn test_rect_scale_to_degenerate() {
        let r = Rect::new(0.0, 0.0, 0.0, 20.0);
        assert_eq!(r.scale_to(100.0, 20.0), (1.0, 1.0));
    }
}
