//! Clips: trimmed, time-scaled references into source media.
//!
//! A clip maps the source range `[source_in_ms, source_out_ms)` onto the
//! timeline starting at `timeline_in_ms`. Playback speed scales the
//! timeline footprint: a 2x clip occupies half of its source length.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EditError, EditResult};

/// Unique clip identifier.
pub type ClipId = Uuid;

/// A clip placed on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,

    /// Key into the project's source library.
    pub source_id: String,

    /// Start of the used range within the source.
    pub source_in_ms: f64,

    /// End of the used range within the source (exclusive).
    pub source_out_ms: f64,

    /// Placement on the track.
    pub timeline_in_ms: f64,

    /// Playback-rate multiplier, always > 0.
    pub speed: f64,

    pub audio_volume: f64,

    pub audio_muted: bool,

    /// Clips sharing a group key are split together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_group_id: Option<String>,
}

/// Optional clip attributes applied on top of the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipOptions {
    pub speed: f64,
    pub audio_volume: f64,
    pub audio_muted: bool,
    pub link_group_id: Option<String>,
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            audio_volume: 1.0,
            audio_muted: false,
            link_group_id: None,
        }
    }
}

impl ClipOptions {
    /// Default options with the given link group.
    pub fn linked(group: impl Into<String>) -> Self {
        Self {
            link_group_id: Some(group.into()),
            ..Default::default()
        }
    }
}

impl Clip {
    /// Create a clip with a fresh id.
    ///
    /// Fails with [`EditError::InvalidDuration`] when `source_in_ms >= source_out_ms`
    /// and with [`EditError::InvalidSpeed`] when the speed is not a positive number.
    /// Negative volumes are clamped to silence.
    pub fn create(
        source_id: impl Into<String>,
        source_in_ms: f64,
        source_out_ms: f64,
        timeline_in_ms: f64,
        options: ClipOptions,
    ) -> EditResult<Self> {
        if source_in_ms.is_nan() || source_out_ms.is_nan() || source_in_ms >= source_out_ms {
            return Err(EditError::InvalidDuration {
                source_in_ms,
                source_out_ms,
            });
        }
        if !options.speed.is_finite() || options.speed <= 0.0 {
            return Err(EditError::InvalidSpeed {
                speed: options.speed,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            source_id: source_id.into(),
            source_in_ms,
            source_out_ms,
            timeline_in_ms,
            speed: options.speed,
            audio_volume: options.audio_volume.max(0.0),
            audio_muted: options.audio_muted,
            link_group_id: options.link_group_id,
        })
    }

    /// Timeline footprint: source length divided by speed.
    pub fn duration_ms(&self) -> f64 {
        (self.source_out_ms - self.source_in_ms) / self.speed
    }

    /// Exclusive end on the timeline.
    pub fn timeline_out_ms(&self) -> f64 {
        self.timeline_in_ms + self.duration_ms()
    }

    /// Half-open containment: `timeline_in <= t < timeline_out`.
    pub fn contains_time(&self, time_ms: f64) -> bool {
        self.timeline_in_ms <= time_ms && time_ms < self.timeline_out_ms()
    }

    /// Whether the half-open timeline intervals of two clips intersect.
    pub fn overlaps(&self, other: &Clip) -> bool {
        self.timeline_in_ms < other.timeline_out_ms() && other.timeline_in_ms < self.timeline_out_ms()
    }

    pub fn is_linked_with(&self, group: &str) -> bool {
        self.link_group_id.as_deref() == Some(group)
    }

    /// Split into two clips at a timeline instant strictly inside this clip.
    ///
    /// The timeline delta is converted to a source delta by multiplying with
    /// `speed`. Both halves get fresh ids and keep every other attribute.
    pub fn split(&self, split_ms: f64) -> EditResult<(Clip, Clip)> {
        let timeline_out_ms = self.timeline_out_ms();
        if split_ms.is_nan() || split_ms <= self.timeline_in_ms || split_ms >= timeline_out_ms {
            return Err(EditError::SplitOutOfBounds {
                split_ms,
                timeline_in_ms: self.timeline_in_ms,
                timeline_out_ms,
            });
        }

        let offset_ms = (split_ms - self.timeline_in_ms) * self.speed;
        let split_source_ms = self.source_in_ms + offset_ms;
        // Rounding at large source offsets can land the cut on a source edge.
        if split_source_ms <= self.source_in_ms || split_source_ms >= self.source_out_ms {
            return Err(EditError::SplitOutOfBounds {
                split_ms,
                timeline_in_ms: self.timeline_in_ms,
                timeline_out_ms,
            });
        }

        let left = Clip {
            id: Uuid::new_v4(),
            source_out_ms: split_source_ms,
            ..self.clone()
        };
        let right = Clip {
            id: Uuid::new_v4(),
            source_in_ms: split_source_ms,
            timeline_in_ms: split_ms,
            ..self.clone()
        };

        Ok((left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clip(source_in: f64, source_out: f64, timeline_in: f64) -> Clip {
        Clip::create("screen", source_in, source_out, timeline_in, ClipOptions::default()).unwrap()
    }

    #[test]
    fn test_create_applies_defaults() {
        let c = clip(0.0, 1000.0, 0.0);
        assert_eq!(c.speed, 1.0);
        assert_eq!(c.audio_volume, 1.0);
        assert!(!c.audio_muted);
        assert_eq!(c.link_group_id, None);
    }

    #[test]
    fn test_create_rejects_empty_or_inverted_range() {
        for (src_in, src_out) in [(1000.0, 1000.0), (2000.0, 1000.0), (f64::NAN, 10.0)] {
            let err = Clip::create("s", src_in, src_out, 0.0, ClipOptions::default()).unwrap_err();
            assert!(matches!(err, EditError::InvalidDuration { .. }));
        }
    }

    #[test]
    fn test_create_rejects_non_positive_speed() {
        for speed in [0.0, -1.0, f64::INFINITY] {
            let options = ClipOptions {
                speed,
                ..Default::default()
            };
            let err = Clip::create("s", 0.0, 10.0, 0.0, options).unwrap_err();
            assert!(matches!(err, EditError::InvalidSpeed { .. }));
        }
    }

    #[test]
    fn test_create_clamps_negative_volume() {
        let options = ClipOptions {
            audio_volume: -0.5,
            ..Default::default()
        };
        let c = Clip::create("s", 0.0, 10.0, 0.0, options).unwrap();
        assert_eq!(c.audio_volume, 0.0);
    }

    #[test]
    fn test_duration_scales_with_speed() {
        let mut c = clip(1000.0, 5000.0, 2000.0);
        assert_eq!(c.duration_ms(), 4000.0);
        assert_eq!(c.timeline_out_ms(), 6000.0);

        c.speed = 2.0;
        assert_eq!(c.duration_ms(), 2000.0);
        assert_eq!(c.timeline_out_ms(), 4000.0);
    }

    #[test]
    fn test_contains_time_is_half_open() {
        let c = clip(0.0, 1000.0, 500.0);
        assert!(!c.contains_time(499.9));
        assert!(c.contains_time(500.0));
        assert!(c.contains_time(1499.9));
        assert!(!c.contains_time(1500.0));
    }

    #[test]
    fn test_adjacent_clips_do_not_overlap() {
        let a = clip(0.0, 1000.0, 0.0);
        let b = clip(0.0, 1000.0, 1000.0);
        let c = clip(0.0, 1000.0, 999.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_split_at_speed_two() {
        let options = ClipOptions {
            speed: 2.0,
            link_group_id: Some("rec".to_string()),
            audio_muted: true,
            ..Default::default()
        };
        let c = Clip::create("screen", 0.0, 10_000.0, 1000.0, options).unwrap();
        assert_eq!(c.timeline_out_ms(), 6000.0);

        let (left, right) = c.split(2000.0).unwrap();
        assert_eq!(left.source_out_ms, 2000.0);
        assert_eq!(right.source_in_ms, 2000.0);
        assert_eq!(right.timeline_in_ms, 2000.0);
        assert_eq!(left.timeline_out_ms(), 2000.0);
        assert_eq!(right.timeline_out_ms(), 6000.0);
        assert_eq!(right.link_group_id.as_deref(), Some("rec"));
        assert!(left.audio_muted && right.audio_muted);
        assert_eq!(left.speed, 2.0);
    }

    #[test]
    fn test_split_on_edges_is_out_of_bounds() {
        let c = clip(0.0, 1000.0, 0.0);
        for t in [0.0, 1000.0, -5.0, 2000.0] {
            assert!(matches!(
                c.split(t),
                Err(EditError::SplitOutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_split_rounding_onto_source_edge_is_out_of_bounds() {
        let c = clip(1e9, 1e9 + 1000.0, 1e6);
        let just_after_start = f64::from_bits(1e6f64.to_bits() + 1);
        assert!(c.contains_time(just_after_start));
        assert!(matches!(
            c.split(just_after_start),
            Err(EditError::SplitOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_serde_omits_missing_link_group() {
        let c = clip(0.0, 10.0, 0.0);
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("link_group_id"));
        let parsed: Clip = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }

    proptest! {
        #[test]
        fn prop_create_fails_exactly_on_empty_range(
            source_in in -10_000.0f64..10_000.0,
            source_out in -10_000.0f64..10_000.0,
        ) {
            let result = Clip::create("s", source_in, source_out, 0.0, ClipOptions::default());
            prop_assert_eq!(result.is_err(), source_in >= source_out);
        }

        #[test]
        fn prop_split_preserves_bounds(
            source_in in 0.0f64..50_000.0,
            length in 10.0f64..50_000.0,
            timeline_in in 0.0f64..100_000.0,
            speed in 0.25f64..4.0,
            fraction in 0.01f64..0.99,
        ) {
            let options = ClipOptions { speed, ..Default::default() };
            let c = Clip::create("s", source_in, source_in + length, timeline_in, options).unwrap();
            let split_ms = c.timeline_in_ms + c.duration_ms() * fraction;
            prop_assume!(split_ms > c.timeline_in_ms && split_ms < c.timeline_out_ms());

            let (left, right) = c.split(split_ms).unwrap();
            prop_assert_eq!(left.timeline_in_ms, c.timeline_in_ms);
            prop_assert!((right.timeline_out_ms() - c.timeline_out_ms()).abs() < 1e-6);
            prop_assert!((left.timeline_out_ms() - right.timeline_in_ms).abs() < 1e-6);
            prop_assert_eq!(left.source_out_ms, right.source_in_ms);
            prop_assert!(left.id != right.id);
            prop_assert!(left.id != c.id && right.id != c.id);
        }
    }
}
