//! Tracks: non-overlapping lanes of clips.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clip::{Clip, ClipId};
use crate::error::{EditError, EditResult};

/// Unique track identifier.
pub type TrackId = Uuid;

/// What a track carries. Informational only; editing rules are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    #[default]
    Video,
    Audio,
    Overlay,
}

/// An ordered lane of clips.
///
/// Clips are kept in insertion order and queried by time, never by index.
/// No two clips overlap in half-open timeline time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,

    pub name: String,

    #[serde(default)]
    pub kind: TrackKind,

    clips: Vec<Clip>,

    /// Locked tracks reject edits and are invisible to time queries.
    #[serde(default)]
    pub locked: bool,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Track {
    /// Create an empty, unlocked, visible track.
    pub fn create(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            clips: vec![],
            locked: false,
            visible: true,
        }
    }

    /// Create an empty video track.
    pub fn new(name: impl Into<String>) -> Self {
        Self::create(name, TrackKind::Video)
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Whether the timeline split pass may touch this track.
    pub fn is_editable(&self) -> bool {
        !self.locked && self.visible
    }

    /// Latest clip end on this track, or `0.0` when empty.
    pub fn end_ms(&self) -> f64 {
        self.clips
            .iter()
            .map(Clip::timeline_out_ms)
            .fold(0.0_f64, f64::max)
    }

    pub fn with_locked(&self, locked: bool) -> Self {
        Self {
            locked,
            ..self.clone()
        }
    }

    pub fn with_visible(&self, visible: bool) -> Self {
        Self {
            visible,
            ..self.clone()
        }
    }

    /// Return a track with `clip` appended.
    ///
    /// Rejects clips whose interval intersects an existing clip. Exact
    /// adjacency (`new.timeline_in == existing.timeline_out`) is allowed.
    pub fn add_clip(&self, clip: Clip) -> EditResult<Self> {
        if self.locked {
            tracing::warn!(track = %self.id, "rejected add_clip on locked track");
            return Err(EditError::TrackLocked { track_id: self.id });
        }

        if let Some(existing) = self.clips.iter().find(|c| c.overlaps(&clip)) {
            tracing::warn!(
                track = %self.id,
                clip = %clip.id,
                existing = %existing.id,
                "rejected overlapping clip"
            );
            return Err(EditError::Overlap {
                clip_id: clip.id,
                existing_id: existing.id,
                track_id: self.id,
            });
        }

        let mut clips = self.clips.clone();
        clips.push(clip);
        Ok(Self {
            clips,
            ..self.clone()
        })
    }

    /// Return a track without the clip `id`.
    pub fn remove_clip(&self, id: ClipId) -> EditResult<Self> {
        if self.locked {
            return Err(EditError::TrackLocked { track_id: self.id });
        }
        if self.clip(id).is_none() {
            return Err(EditError::ClipNotFound { clip_id: id });
        }

        Ok(Self {
            clips: self.clips.iter().filter(|c| c.id != id).cloned().collect(),
            ..self.clone()
        })
    }

    /// The clip whose half-open interval contains `time_ms`.
    ///
    /// Locked tracks never report a clip.
    pub fn find_clip_at_time(&self, time_ms: f64) -> Option<&Clip> {
        if self.locked {
            return None;
        }
        self.clips.iter().find(|c| c.contains_time(time_ms))
    }

    /// Split the clip under `time_ms`, replacing it in place with its two halves.
    ///
    /// Returns an unchanged copy when the track is locked or hidden, when no
    /// clip contains the time, or when `time_ms` sits on the containing clip's
    /// start edge (there is already a cut there).
    pub fn split_at(&self, time_ms: f64) -> EditResult<Self> {
        if !self.is_editable() {
            return Ok(self.clone());
        }
        let Some(target) = self.find_clip_at_time(time_ms) else {
            return Ok(self.clone());
        };
        if time_ms == target.timeline_in_ms {
            return Ok(self.clone());
        }

        let (left, right) = match target.split(time_ms) {
            Ok(halves) => halves,
            Err(EditError::SplitOutOfBounds { .. }) => return Ok(self.clone()),
            Err(e) => return Err(e),
        };
        tracing::debug!(
            track = %self.id,
            clip = %target.id,
            left = %left.id,
            right = %right.id,
            time_ms,
            "split clip"
        );

        let mut clips = Vec::with_capacity(self.clips.len() + 1);
        for clip in &self.clips {
            if clip.id == target.id {
                clips.push(left.clone());
                clips.push(right.clone());
            } else {
                clips.push(clip.clone());
            }
        }

        Ok(Self {
            clips,
            ..self.clone()
        })
    }

    /// Overlapping clip pairs, for validating deserialized data.
    pub fn overlapping_pairs(&self) -> Vec<(ClipId, ClipId)> {
        let mut pairs = vec![];
        for (i, a) in self.clips.iter().enumerate() {
            for b in self.clips.iter().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((a.id, b.id));
                }
            }
        }
        pairs
    }
}
