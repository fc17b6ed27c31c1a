//! Project metadata and configuration types.
//!
//! A project is the top-level container that ties together the source
//! library, the editing timeline, and output settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Size;
use crate::timeline::Timeline;

/// File name used when a project path points at a directory.
pub const PROJECT_FILE_NAME: &str = "project.json";

/// Top-level project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Schema version.
    pub version: String,

    pub id: Uuid,

    /// Human-readable project name.
    pub name: String,

    /// Creation timestamp (RFC 3339).
    pub created_at: String,

    /// Last modified timestamp (RFC 3339).
    pub modified_at: String,

    /// Captured media streams, keyed by source id.
    pub sources: BTreeMap<String, SourceMetadata>,

    pub timeline: Timeline,

    pub settings: OutputSettings,
}

/// Kind of captured stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Screen,
    Camera,
    Audio,
}

/// Metadata for one captured stream, as reported by the capture side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    pub id: String,

    pub kind: SourceKind,

    pub duration_ms: f64,

    /// Frame size in pixels (zero for audio-only sources).
    #[serde(default)]
    pub size: Size,

    /// Whether the stream carries an audio track.
    #[serde(default)]
    pub has_audio: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Output rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Output resolution in pixels.
    pub width: u32,
    pub height: u32,

    pub fps: u32,

    /// Zoom intensity for auto-zoom keyframes (2.0 = half-size box).
    pub max_zoom: f64,

    /// Generate zoom keyframes from clicks for fresh recordings.
    pub auto_zoom: bool,

    #[serde(default)]
    pub background: BackgroundStyle,

    /// Padding around the content as a fraction of output size, per side.
    #[serde(default)]
    pub padding: f64,
}

/// Canvas/background styling behind the recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundStyle {
    /// Background color as hex string (for example `#1a1a1a`).
    pub color: String,
    /// Rounded corner radius in output pixels.
    pub corner_radius: u32,
    /// Shadow intensity multiplier in `[0.0, 1.0]`.
    pub shadow_intensity: f64,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            color: "#1a1a1a".to_string(),
            corner_radius: 12,
            shadow_intensity: 0.5,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
            max_zoom: 2.0,
            auto_zoom: true,
            background: BackgroundStyle::default(),
            padding: 0.0,
        }
    }
}

impl OutputSettings {
    pub fn output_size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

impl Project {
    /// Create an empty project.
    pub fn new(name: impl Into<String>, settings: OutputSettings) -> Self {
        Self::from_timeline(name, BTreeMap::new(), Timeline::new(), settings)
    }

    /// Create a project around an already assembled timeline.
    pub fn from_timeline(
        name: impl Into<String>,
        sources: BTreeMap<String, SourceMetadata>,
        timeline: Timeline,
        settings: OutputSettings,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: "1.0".to_string(),
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now.clone(),
            modified_at: now,
            sources,
            timeline,
            settings,
        }
    }

    /// Return a project with `source` registered (replacing one with the same id).
    pub fn add_source(&self, source: SourceMetadata) -> Self {
        let mut sources = self.sources.clone();
        sources.insert(source.id.clone(), source);
        Self {
            sources,
            ..self.clone()
        }
        .touched()
    }

    /// Return a project holding `timeline`.
    pub fn with_timeline(&self, timeline: Timeline) -> Self {
        Self {
            timeline,
            ..self.clone()
        }
        .touched()
    }

    /// Refresh the modification timestamp.
    pub fn touched(self) -> Self {
        Self {
            modified_at: chrono::Utc::now().to_rfc3339(),
            ..self
        }
    }

    pub fn source(&self, id: &str) -> Option<&SourceMetadata> {
        self.sources.get(id)
    }

    /// Load a project from a file, or from `project.json` inside a directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = resolve_project_path(path.as_ref());

        let json = std::fs::read_to_string(&path).map_err(|e| ProjectError::IoError {
            path: path.clone(),
            source: e,
        })?;

        serde_json::from_str(&json).map_err(|e| ProjectError::ParseError { path, source: e })
    }

    /// Save the project as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, ProjectError> {
        let path = resolve_project_path(path.as_ref());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json =
            serde_json::to_string_pretty(self).map_err(|e| ProjectError::SerializeError {
                path: path.clone(),
                source: e,
            })?;
        std::fs::write(&path, json).map_err(|e| ProjectError::IoError {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(project = %self.id, path = %path.display(), "saved project");
        Ok(path)
    }

    /// Check structural invariants that deserialized data may violate.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];

        for track in self.timeline.tracks() {
            for (a, b) in track.overlapping_pairs() {
                errors.push(format!(
                    "Track '{}' has overlapping clips {a} and {b}",
                    track.name
                ));
            }
            for clip in track.clips() {
                if !self.sources.contains_key(&clip.source_id) {
                    errors.push(format!(
                        "Clip {} on track '{}' references unknown source '{}'",
                        clip.id, track.name, clip.source_id
                    ));
                }
                if clip.source_in_ms >= clip.source_out_ms || clip.speed <= 0.0 {
                    errors.push(format!(
                        "Clip {} on track '{}' has an invalid range or speed",
                        clip.id, track.name
                    ));
                }
            }
        }

        if let Some(recording) = &self.timeline.recording {
            let referenced = std::iter::once(&recording.screen_source_id)
                .chain(recording.camera_source_id.as_ref());
            for id in referenced {
                if !self.sources.contains_key(id) {
                    errors.push(format!("Recording references unknown source '{id}'"));
                }
            }

            let motions = &recording.viewport_motions;
            if motions.windows(2).any(|w| w[1].timestamp < w[0].timestamp) {
                errors.push("Viewport motions are not ordered by timestamp".to_string());
            }
            if let Some(first) = motions.first() {
                if first.timestamp != 0.0 {
                    errors.push(format!(
                        "First viewport motion starts at {}ms instead of 0",
                        first.timestamp
                    ));
                }
            }
        }

        errors
    }
}

fn resolve_project_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(PROJECT_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Errors that can occur when working with project files.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize project for {path}: {source}")]
    SerializeError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Clip, ClipOptions};
    use crate::timeline::{RecordingDescriptor, ZoomKeyframe};
    use crate::track::Track;

    fn screen_source() -> SourceMetadata {
        SourceMetadata {
            id: "screen-1".to_string(),
            kind: SourceKind::Screen,
            duration_ms: 10_000.0,
            size: Size::new(1920.0, 1080.0),
            has_audio: true,
            mime_type: Some("video/webm".to_string()),
        }
    }

    fn project_with_clip(source_id: &str) -> Project {
        let clip = Clip::create(source_id, 0.0, 10_000.0, 0.0, ClipOptions::default()).unwrap();
        let timeline = Timeline::new().add_track(Track::new("Screen").add_clip(clip).unwrap());
        Project::new("Test", OutputSettings::default())
            .add_source(screen_source())
            .with_timeline(timeline)
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("Test Recording", OutputSettings::default());
        assert_eq!(project.name, "Test Recording");
        assert_eq!(project.version, "1.0");
        assert!(project.sources.is_empty());
        assert_eq!(project.settings.output_size(), Size::new(1920.0, 1080.0));
    }

    #[test]
    fn test_add_source_keys_by_id() {
        let project = Project::new("Test", OutputSettings::default()).add_source(screen_source());
        assert_eq!(project.source("screen-1").unwrap().duration_ms, 10_000.0);
        assert!(project.source("camera").is_none());
    }

    #[test]
    fn test_source_metadata_wire_format() {
        let raw = r#"{"id":"cam","kind":"camera","durationMs":5000,"size":{"width":640,"height":480}}"#;
        let source: SourceMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(source.kind, SourceKind::Camera);
        assert!(!source.has_audio);
        assert_eq!(source.size.width, 640.0);
    }

    #[test]
    fn test_validate_clean_project() {
        assert!(project_with_clip("screen-1").validate().is_empty());
    }

    #[test]
    fn test_validate_reports_unknown_source() {
        let errors = project_with_clip("missing").validate();
        assert!(errors.iter().any(|e| e.contains("unknown source 'missing'")));
    }

    #[test]
    fn test_validate_reports_unordered_motions() {
        let project = project_with_clip("screen-1");
        let frame = project.settings.output_size();
        let mut late = ZoomKeyframe::initial(frame);
        late.timestamp = 500.0;
        let timeline = project.timeline.with_recording(RecordingDescriptor {
            timeline_offset_ms: 0.0,
            screen_source_id: "screen-1".to_string(),
            camera_source_id: Some("camera".to_string()),
            viewport_motions: vec![ZoomKeyframe::initial(frame), late, ZoomKeyframe::initial(frame)],
        });
        let errors = project.with_timeline(timeline).validate();
        assert!(errors.iter().any(|e| e.contains("not ordered")));
        assert!(errors.iter().any(|e| e.contains("unknown source 'camera'")));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("clipzoom_test_project");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let project = project_with_clip("screen-1");
        let written = project.save(&dir).unwrap();
        assert_eq!(written, dir.join(PROJECT_FILE_NAME));

        let loaded = Project::load(&dir).unwrap();
        assert_eq!(loaded, project);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("clipzoom_missing_project.json");
        assert!(matches!(
            Project::load(&path),
            Err(ProjectError::IoError { .. })
        ));
    }

    #[test]
    fn test_load_and_save_errors_name_their_direction() {
        let path = std::env::temp_dir().join(format!(
            "clipzoom_corrupt_project_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();
        let err = Project::load(&path).unwrap_err();
        assert!(matches!(err, ProjectError::ParseError { .. }));
        assert!(err.to_string().starts_with("Parse error in"));
        std::fs::remove_file(&path).ok();

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ProjectError::SerializeError {
            path: PathBuf::from("/tmp/project.json"),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("Failed to serialize project for /tmp/project.json"));
    }

    #[test]
    fn test_settings_deserialization_defaults_background() {
        let raw = r#"{"width":1280,"height":720,"fps":60,"max_zoom":1.5,"auto_zoom":false}"#;
        let settings: OutputSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.background, BackgroundStyle::default());
        assert_eq!(settings.padding, 0.0);
    }
}
