//! Projection from captured viewport space into output video space.

use clipzoom_project_model::event::CapturedEvent;
use clipzoom_project_model::geometry::{Point, Size};

/// Maps points from the captured viewport into output video pixels.
///
/// The scheduler only needs this capability; how the host letterboxes or
/// scales the recording is up to the implementation.
pub trait OutputMapping {
    /// Output video size in pixels.
    fn output_video_size(&self) -> Size;

    /// Project a captured-viewport point into output pixel space.
    fn project_input_to_output(&self, point: Point) -> Point;
}

/// Uniform "contain" fit of the input into the output, centered, with an
/// optional padding fraction on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitMapping {
    output: Size,
    scale: f64,
    offset: Point,
}

impl FitMapping {
    /// Fit `input` into `output` leaving `padding * output` on each side.
    ///
    /// Padding is clamped to `[0.0, 0.5)`. A degenerate input size falls back
    /// to a scale of 1.0.
    pub fn new(input: Size, output: Size, padding: f64) -> Self {
        let padding = if padding.is_finite() {
            padding.clamp(0.0, 0.49)
        } else {
            0.0
        };
        let available = Size::new(
            output.width * (1.0 - 2.0 * padding),
            output.height * (1.0 - 2.0 * padding),
        );

        let scale = (available.width / input.width).min(available.height / input.height);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };

        let offset = Point::new(
            (output.width - input.width * scale) / 2.0,
            (output.height - input.height * scale) / 2.0,
        );

        Self {
            output,
            scale,
            offset,
        }
    }

    /// Fit using the viewport recorded with the first event that reports one,
    /// or `fallback_input` when no event carries a viewport size.
    pub fn for_events(
        events: &[CapturedEvent],
        fallback_input: Size,
        output: Size,
        padding: f64,
    ) -> Self {
        let input = events
            .iter()
            .map(CapturedEvent::viewport)
            .find(|v| v.width > 0.0 && v.height > 0.0)
            .unwrap_or(fallback_input);
        Self::new(input, output, padding)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl OutputMapping for FitMapping {
    fn output_video_size(&self) -> Size {
        self.output
    }

    fn project_input_to_output(&self, point: Point) -> Point {
        Point::new(
            self.offset.x + point.x * self.scale,
            self.offset.y + point.y * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_size_is_identity() {
        let size = Size::new(1920.0, 1080.0);
        let mapping = FitMapping::new(size, size, 0.0);
        assert_eq!(mapping.scale(), 1.0);
        assert_eq!(
            mapping.project_input_to_output(Point::new(100.0, 200.0)),
            Point::new(100.0, 200.0)
        );
    }

    #[test]
    fn test_upscale_keeps_aspect() {
        let mapping = FitMapping::new(Size::new(1280.0, 720.0), Size::new(1920.0, 1080.0), 0.0);
        assert!((mapping.scale() - 1.5).abs() < 1e-9);
        let p = mapping.project_input_to_output(Point::new(640.0, 360.0));
        assert!((p.x - 960.0).abs() < 1e-9);
        assert!((p.y - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_letterbox_centers_narrow_input() {
        // 4:3 input into 16:9 output: pillarboxed horizontally.
        let mapping = FitMapping::new(Size::new(1440.0, 1080.0), Size::new(1920.0, 1080.0), 0.0);
        assert_eq!(mapping.scale(), 1.0);
        let origin = mapping.project_input_to_output(Point::new(0.0, 0.0));
        assert_eq!(origin, Point::new(240.0, 0.0));
    }

    #[test]
    fn test_padding_shrinks_content() {
        let size = Size::new(1000.0, 1000.0);
        let mapping = FitMapping::new(size, size, 0.1);
        assert!((mapping.scale() - 0.8).abs() < 1e-9);
        let origin = mapping.project_input_to_output(Point::new(0.0, 0.0));
        assert!((origin.x - 100.0).abs() < 1e-9);
        assert!((origin.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_input_falls_back() {
        let mapping = FitMapping::new(Size::new(0.0, 0.0), Size::new(1920.0, 1080.0), 0.0);
        assert_eq!(mapping.scale(), 1.0);
    }

    #[test]
    fn test_for_events_prefers_recorded_viewport() {
        let viewport = Size::new(960.0, 540.0);
        let events = vec![CapturedEvent::click(0.0, 10.0, 10.0, viewport)];
        let mapping =
            FitMapping::for_events(&events, Size::new(1920.0, 1080.0), Size::new(1920.0, 1080.0), 0.0);
        assert_eq!(mapping.scale(), 2.0);

        let fallback = FitMapping::for_events(&[], Size::new(1920.0, 1080.0), Size::new(1920.0, 1080.0), 0.0);
        assert_eq!(fallback.scale(), 1.0);
    }
}
