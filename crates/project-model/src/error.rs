//! Edit errors raised by clip, track, and timeline operations.

use uuid::Uuid;

/// Errors that can occur when editing the timeline structure.
///
/// Every operation that returns one of these leaves its input unmodified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Invalid clip duration: source in {source_in_ms}ms must be before source out {source_out_ms}ms")]
    InvalidDuration {
        source_in_ms: f64,
        source_out_ms: f64,
    },

    #[error("Invalid clip speed {speed}: must be finite and greater than zero")]
    InvalidSpeed { speed: f64 },

    #[error("Split point {split_ms}ms is outside clip bounds ({timeline_in_ms}ms, {timeline_out_ms}ms)")]
    SplitOutOfBounds {
        split_ms: f64,
        timeline_in_ms: f64,
        timeline_out_ms: f64,
    },

    #[error("Clip {clip_id} overlaps existing clip {existing_id} on track {track_id}")]
    Overlap {
        clip_id: Uuid,
        existing_id: Uuid,
        track_id: Uuid,
    },

    #[error("Track {track_id} is locked")]
    TrackLocked { track_id: Uuid },

    #[error("Track {track_id} not found")]
    TrackNotFound { track_id: Uuid },

    #[error("Clip {clip_id} not found")]
    ClipNotFound { clip_id: Uuid },
}

/// Result type alias for edit operations.
pub type EditResult<T> = Result<T, EditError>;
