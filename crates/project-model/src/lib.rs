//! Clipzoom Project Model
//!
//! Defines the core data contracts for Clipzoom projects:
//! - **Events:** Timestamped interaction records handed over by the capture side
//! - **Clips / Tracks / Timeline:** Editing structure with linked splitting
//! - **Project:** Source library, timeline, and output settings
//!
//! Edits never mutate in place. Every structural operation borrows the
//! current value and returns a new one, so a failed edit leaves the input
//! untouched.

pub mod clip;
pub mod error;
pub mod event;
pub mod geometry;
pub mod project;
pub mod timeline;
pub mod track;

pub use clip::*;
pub use error::*;
pub use event::*;
pub use geometry::*;
pub use project::*;
pub use timeline::*;
pub use track::*;
