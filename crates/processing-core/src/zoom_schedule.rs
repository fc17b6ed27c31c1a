//! Click-driven zoom scheduling.
//!
//! Turns the captured event stream into camera framing keyframes in output
//! pixel space.
//!
//! # Algorithm
//!
//! 1. **Filter** the stream down to clicks and stable-sort them by timestamp.
//! 2. **Start** unzoomed: a full-frame keyframe at `t = 0`.
//! 3. **Size** the zoom box once as `output / zoom_intensity`. Every click
//!    re-centers the box; none re-scale it.
//! 4. **Project** each click: subtract the scroll offset, then map from the
//!    captured viewport into output pixels.
//! 5. **Clamp** by shifting the box back inside the frame, never resizing it.
//!
//! The result has `1 + clicks` keyframes and is fully determined by its inputs.

use clipzoom_project_model::event::CapturedEvent;
use clipzoom_project_model::geometry::ZoomBox;
use clipzoom_project_model::timeline::ZoomKeyframe;

use crate::mapping::OutputMapping;

/// Configuration for the zoom scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomScheduleConfig {
    /// How far each click zooms in (2.0 = box is half the output size).
    /// Values below 1.0 or non-finite values are treated as 1.0.
    pub zoom_intensity: f64,
}

impl Default for ZoomScheduleConfig {
    fn default() -> Self {
        Self {
            zoom_intensity: 2.0,
        }
    }
}

impl ZoomScheduleConfig {
    /// Zoom intensity usable as a divisor that never grows the box past the frame.
    pub fn effective_intensity(&self) -> f64 {
        if self.zoom_intensity.is_finite() && self.zoom_intensity >= 1.0 {
            self.zoom_intensity
        } else {
            1.0
        }
    }
}

/// The click-driven zoom scheduler.
pub struct ZoomScheduler {
    config: ZoomScheduleConfig,
}

impl ZoomScheduler {
    /// Create a new scheduler with the given configuration.
    pub fn new(config: ZoomScheduleConfig) -> Self {
        Self { config }
    }

    /// Create a scheduler with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ZoomScheduleConfig::default())
    }

    /// Compute zoom keyframes for `events`.
    pub fn schedule<M>(&self, mapping: &M, events: &[CapturedEvent]) -> Vec<ZoomKeyframe>
    where
        M: OutputMapping + ?Sized,
    {
        let frame = mapping.output_video_size();

        let mut clicks: Vec<&CapturedEvent> = events.iter().filter(|e| e.is_click()).collect();
        clicks.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        let mut keyframes = Vec::with_capacity(clicks.len() + 1);
        keyframes.push(ZoomKeyframe::initial(frame));

        if clicks.is_empty() {
            tracing::debug!("no clicks captured; schedule stays unzoomed");
            return keyframes;
        }

        let box_size = frame.shrink_by(self.config.effective_intensity());

        for click in clicks {
            let Some(position) = click.pointer_position() else {
                continue;
            };
            let content = position.offset_by(click.scroll_x, click.scroll_y);
            let center = mapping.project_input_to_output(content);

            keyframes.push(ZoomKeyframe {
                timestamp: click.timestamp,
                zoom_box: ZoomBox::centered_clamped(center, box_size, frame),
            });
        }

        tracing::debug!(
            keyframes = keyframes.len(),
            intensity = self.config.effective_intensity(),
            "computed zoom schedule"
        );

        keyframes
    }
}

/// Compute zoom keyframes for `events` with the given configuration and mapping.
pub fn calculate_zoom_schedule<M>(
    config: &ZoomScheduleConfig,
    mapping: &M,
    events: &[CapturedEvent],
) -> Vec<ZoomKeyframe>
where
    M: OutputMapping + ?Sized,
{
    ZoomScheduler::new(config.clone()).schedule(mapping, events)
}
