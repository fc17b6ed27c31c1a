//! Clipzoom Processing Core
//!
//! Turns captured interaction events into editing decisions:
//! - **Zoom Scheduler:** Click-driven camera framing keyframes
//! - **Output Mapping:** Projection from captured viewport to output pixels
//! - **Assembly:** Default project construction for a fresh recording
//!
//! This crate is pure computation. No I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod assemble;
pub mod mapping;
pub mod zoom_schedule;

pub use assemble::{create_project_from_source, create_project_with_mapping, recompute_viewport_motions};
pub use mapping::{FitMapping, OutputMapping};
pub use zoom_schedule::{calculate_zoom_schedule, ZoomScheduleConfig, ZoomScheduler};
