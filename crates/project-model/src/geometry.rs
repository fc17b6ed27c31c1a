//! Geometry primitives for camera framing.
//!
//! Unlike the editing types, geometry lives in pixel space: either the
//! captured viewport's space (input) or the output video's space.

use serde::{Deserialize, Serialize};

/// A 2D point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(-dx, -dy)`.
    pub fn offset_by(&self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x - dx,
            y: self.y - dy,
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scale both dimensions by `1 / factor`.
    pub fn shrink_by(&self, factor: f64) -> Size {
        Size {
            width: self.width / factor,
            height: self.height / factor,
        }
    }
}

/// A rectangular camera framing box in output pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ZoomBox {
    /// The box covering the whole frame (no zoom).
    pub fn full(frame: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: frame.width,
            height: frame.height,
        }
    }

    /// A box of `size` centered on `center`, shift-clamped into `frame`.
    ///
    /// The box is translated, never resized. `size` must not exceed `frame`.
    pub fn centered_clamped(center: Point, size: Size, frame: Size) -> Self {
        let max_x = (frame.width - size.width).max(0.0);
        let max_y = (frame.height - size.height).max(0.0);

        Self {
            x: clamp_or_min(center.x - size.width / 2.0, max_x),
            y: clamp_or_min(center.y - size.height / 2.0, max_y),
            width: size.width,
            height: size.height,
        }
    }

    /// The center point of this box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the box lies entirely within `frame` (tolerates float noise).
    pub fn fits_within(&self, frame: Size) -> bool {
        const EPS: f64 = 1e-9;
        self.x >= -EPS
            && self.y >= -EPS
            && self.right() <= frame.width + EPS
            && self.bottom() <= frame.height + EPS
    }

    /// Effective zoom factor relative to `frame` (1.0 = no zoom).
    pub fn zoom_factor(&self, frame: Size) -> f64 {
        (frame.width / self.width).min(frame.height / self.height)
    }
}

/// `value.clamp(0.0, max)`, with NaN coordinates pinned to the origin.
fn clamp_or_min(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Size = Size {
        width: 1920.0,
        height: 1080.0,
    };

    #[test]
    fn test_full_box() {
        let full = ZoomBox::full(FRAME);
        assert_eq!(full.x, 0.0);
        assert_eq!(full.width, 1920.0);
        assert!((full.zoom_factor(FRAME) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_centered_in_middle_is_unclamped() {
        let b = ZoomBox::centered_clamped(Point::new(960.0, 540.0), FRAME.shrink_by(2.0), FRAME);
        assert_eq!(b.x, 480.0);
        assert_eq!(b.y, 270.0);
        assert_eq!(b.center(), Point::new(960.0, 540.0));
    }

    #[test]
    fn test_centered_near_corner_shifts_without_resizing() {
        let size = FRAME.shrink_by(2.0);
        let top_left = ZoomBox::centered_clamped(Point::new(10.0, 10.0), size, FRAME);
        assert_eq!((top_left.x, top_left.y), (0.0, 0.0));
        assert_eq!((top_left.width, top_left.height), (960.0, 540.0));

        let bottom_right = ZoomBox::centered_clamped(Point::new(1910.0, 1075.0), size, FRAME);
        assert_eq!((bottom_right.x, bottom_right.y), (960.0, 540.0));
        assert!(bottom_right.fits_within(FRAME));
    }

    #[test]
    fn test_nan_center_pins_to_origin() {
        let b = ZoomBox::centered_clamped(Point::new(f64::NAN, 100.0), FRAME.shrink_by(2.0), FRAME);
        assert_eq!(b.x, 0.0);
        assert!(b.fits_within(FRAME));
    }

    #[test]
    fn test_point_offset() {
        assert_eq!(Point::new(100.0, 50.0).offset_by(20.0, 10.0), Point::new(80.0, 40.0));
    }
}
