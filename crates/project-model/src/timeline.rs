//! Timeline: the multi-track arrangement plus the camera-motion schedule.
//!
//! # Splitting
//!
//! [`Timeline::split_at`] is the razor tool. It collects the clips under the
//! playhead on every eligible track (or only on the targeted track), expands
//! that set through link groups, then splits each affected track once.
//!
//! - Locked or hidden tracks are never split.
//! - Without a target every eligible track is split by position, linked or not.
//! - A linked clip is pulled in only if it also contains the split time.
//!   Expansion follows one group id at a time; it never chains across groups.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clip::{Clip, ClipId};
use crate::error::{EditError, EditResult};
use crate::geometry::{Size, ZoomBox};
use crate::track::{Track, TrackId};

/// A timestamped camera framing box in output pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomKeyframe {
    /// Milliseconds since recording start.
    pub timestamp: f64,

    pub zoom_box: ZoomBox,
}

impl ZoomKeyframe {
    /// The unzoomed keyframe every schedule starts with.
    pub fn initial(frame: Size) -> Self {
        Self {
            timestamp: 0.0,
            zoom_box: ZoomBox::full(frame),
        }
    }
}

/// A time range to export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputWindow {
    pub start_ms: f64,
    pub end_ms: f64,
}

impl OutputWindow {
    pub fn duration_ms(&self) -> f64 {
        (self.end_ms - self.start_ms).max(0.0)
    }
}

/// Links the timeline back to the recording it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingDescriptor {
    /// Where the recording starts on the timeline.
    pub timeline_offset_ms: f64,

    pub screen_source_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_source_id: Option<String>,

    /// Camera framing schedule, ordered by timestamp.
    #[serde(default)]
    pub viewport_motions: Vec<ZoomKeyframe>,
}

/// Unique timeline identifier.
pub type TimelineId = Uuid;

/// Ordered tracks plus optional recording and export metadata.
///
/// Track order is presentation order (first track is composited first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub id: TimelineId,

    tracks: Vec<Track>,

    pub duration_ms: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_windows: Option<Vec<OutputWindow>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording: Option<RecordingDescriptor>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            tracks: vec![],
            duration_ms: 0.0,
            output_windows: None,
            recording: None,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn track_index(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Every clip on every track, in track order.
    pub fn clips(&self) -> impl Iterator<Item = (&Track, &Clip)> {
        self.tracks
            .iter()
            .flat_map(|track| track.clips().iter().map(move |clip| (track, clip)))
    }

    /// Camera framing schedule, empty when no recording is attached.
    pub fn viewport_motions(&self) -> &[ZoomKeyframe] {
        self.recording
            .as_ref()
            .map(|r| r.viewport_motions.as_slice())
            .unwrap_or(&[])
    }

    /// Return a timeline with `track` appended on top.
    pub fn add_track(&self, track: Track) -> Self {
        let duration_ms = self.duration_ms.max(track.end_ms());
        let mut tracks = self.tracks.clone();
        tracks.push(track);
        Self {
            tracks,
            duration_ms,
            ..self.clone()
        }
    }

    /// Return a timeline where the track with the same id is replaced.
    pub fn replace_track(&self, track: Track) -> EditResult<Self> {
        let index = self
            .track_index(track.id)
            .ok_or(EditError::TrackNotFound { track_id: track.id })?;
        let duration_ms = self.duration_ms.max(track.end_ms());
        let mut tracks = self.tracks.clone();
        tracks[index] = track;
        Ok(Self {
            tracks,
            duration_ms,
            ..self.clone()
        })
    }

    /// Add `clip` to the track `track_id`, growing the duration to cover it.
    pub fn add_clip(&self, track_id: TrackId, clip: Clip) -> EditResult<Self> {
        let track = self
            .track(track_id)
            .ok_or(EditError::TrackNotFound { track_id })?;
        self.replace_track(track.add_clip(clip)?)
    }

    pub fn with_recording(&self, recording: RecordingDescriptor) -> Self {
        Self {
            recording: Some(recording),
            ..self.clone()
        }
    }

    pub fn with_output_windows(&self, windows: Vec<OutputWindow>) -> Self {
        Self {
            output_windows: Some(windows),
            ..self.clone()
        }
    }

    /// Split clips under `time_ms`, propagating through link groups.
    ///
    /// With `target_track_id` only that track is hit directly; linked clips on
    /// other tracks follow. Without it every visible, unlocked track is cut.
    /// Returns an unchanged copy when nothing lies under the playhead.
    pub fn split_at(&self, time_ms: f64, target_track_id: Option<TrackId>) -> EditResult<Self> {
        let direct_hits: Vec<&Clip> = self
            .tracks
            .iter()
            .filter(|track| track.is_editable())
            .filter(|track| target_track_id.map_or(true, |target| track.id == target))
            .filter_map(|track| track.find_clip_at_time(time_ms))
            .collect();

        if direct_hits.is_empty() {
            tracing::debug!(time_ms, ?target_track_id, "split found no clips");
            return Ok(self.clone());
        }

        let mut hit_ids: HashSet<ClipId> = direct_hits.iter().map(|c| c.id).collect();
        for group in direct_hits.iter().filter_map(|c| c.link_group_id.as_deref()) {
            let linked = self
                .tracks
                .iter()
                .filter(|track| !track.locked)
                .flat_map(|track| track.clips())
                .filter(|clip| clip.is_linked_with(group) && clip.contains_time(time_ms));
            hit_ids.extend(linked.map(|clip| clip.id));
        }

        let mut tracks = Vec::with_capacity(self.tracks.len());
        for track in &self.tracks {
            if track.clips().iter().any(|clip| hit_ids.contains(&clip.id)) {
                tracks.push(track.split_at(time_ms)?);
            } else {
                tracks.push(track.clone());
            }
        }

        tracing::debug!(
            time_ms,
            ?target_track_id,
            clips = hit_ids.len(),
            "split timeline"
        );

        Ok(Self {
            tracks,
            ..self.clone()
        })
    }
}
