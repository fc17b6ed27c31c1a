//! Project assembly for a freshly captured recording.
//!
//! Builds the default timeline (screen, optional camera, optional audio),
//! links every clip of the recording into one group so the razor keeps them
//! aligned, and fills the recording's viewport motions from the scheduler.

use std::collections::BTreeMap;

use clipzoom_project_model::clip::{Clip, ClipOptions};
use clipzoom_project_model::error::EditResult;
use clipzoom_project_model::event::CapturedEvent;
use clipzoom_project_model::project::{OutputSettings, Project, SourceMetadata};
use clipzoom_project_model::timeline::{RecordingDescriptor, Timeline, ZoomKeyframe};
use clipzoom_project_model::track::{Track, TrackKind};
use uuid::Uuid;

use crate::mapping::{FitMapping, OutputMapping};
use crate::zoom_schedule::{ZoomScheduleConfig, ZoomScheduler};

/// Build a project from a finished recording using the default output mapping.
///
/// The mapping fits the captured viewport (taken from the event log, or the
/// screen source size when no event reports one) into the output frame with
/// the configured padding.
pub fn create_project_from_source(
    name: impl Into<String>,
    screen: SourceMetadata,
    camera: Option<SourceMetadata>,
    events: &[CapturedEvent],
    settings: OutputSettings,
) -> EditResult<Project> {
    let mapping = default_mapping(&settings, &screen, events);
    create_project_with_mapping(name, screen, camera, events, settings, &mapping)
}

/// Build a project from a finished recording with a caller-supplied mapping.
pub fn create_project_with_mapping<M>(
    name: impl Into<String>,
    screen: SourceMetadata,
    camera: Option<SourceMetadata>,
    events: &[CapturedEvent],
    settings: OutputSettings,
    mapping: &M,
) -> EditResult<Project>
where
    M: OutputMapping + ?Sized,
{
    let link_group = Uuid::new_v4().to_string();
    let linked = || ClipOptions::linked(link_group.clone());

    let mut timeline = Timeline::new();

    let screen_clip = Clip::create(&screen.id, 0.0, screen.duration_ms, 0.0, linked())?;
    timeline = timeline.add_track(Track::create("Screen", TrackKind::Video).add_clip(screen_clip)?);

    if let Some(camera) = &camera {
        let camera_clip = Clip::create(&camera.id, 0.0, camera.duration_ms, 0.0, linked())?;
        timeline =
            timeline.add_track(Track::create("Camera", TrackKind::Overlay).add_clip(camera_clip)?);
    }

    if screen.has_audio {
        let audio_clip = Clip::create(&screen.id, 0.0, screen.duration_ms, 0.0, linked())?;
        timeline =
            timeline.add_track(Track::create("Audio", TrackKind::Audio).add_clip(audio_clip)?);
    }

    timeline.duration_ms = screen.duration_ms;

    let viewport_motions = schedule_for(&settings, mapping, events);
    timeline = timeline.with_recording(RecordingDescriptor {
        timeline_offset_ms: 0.0,
        screen_source_id: screen.id.clone(),
        camera_source_id: camera.as_ref().map(|c| c.id.clone()),
        viewport_motions,
    });

    let mut sources = BTreeMap::new();
    sources.insert(screen.id.clone(), screen);
    if let Some(camera) = camera {
        sources.insert(camera.id.clone(), camera);
    }

    let project = Project::from_timeline(name, sources, timeline, settings);
    tracing::info!(
        project = %project.id,
        tracks = project.timeline.tracks().len(),
        keyframes = project.timeline.viewport_motions().len(),
        "assembled project from recording"
    );
    Ok(project)
}

/// Re-run the scheduler for an existing project and store the new motions.
///
/// Projects without a recording descriptor are returned unchanged.
pub fn recompute_viewport_motions(project: &Project, events: &[CapturedEvent]) -> Project {
    let Some(recording) = &project.timeline.recording else {
        tracing::warn!(project = %project.id, "project has no recording; nothing to analyze");
        return project.clone();
    };

    let screen_size = project
        .source(&recording.screen_source_id)
        .map(|s| s.size)
        .unwrap_or_else(|| project.settings.output_size());
    let mapping = FitMapping::for_events(
        events,
        screen_size,
        project.settings.output_size(),
        project.settings.padding,
    );

    let recording = RecordingDescriptor {
        viewport_motions: schedule_for(&project.settings, &mapping, events),
        ..recording.clone()
    };
    project.with_timeline(project.timeline.with_recording(recording))
}

fn default_mapping(
    settings: &OutputSettings,
    screen: &SourceMetadata,
    events: &[CapturedEvent],
) -> FitMapping {
    FitMapping::for_events(events, screen.size, settings.output_size(), settings.padding)
}

fn schedule_for<M>(settings: &OutputSettings, mapping: &M, events: &[CapturedEvent]) -> Vec<ZoomKeyframe>
where
    M: OutputMapping + ?Sized,
{
    if !settings.auto_zoom {
        return vec![ZoomKeyframe::initial(mapping.output_video_size())];
    }

    let config = ZoomScheduleConfig {
        zoom_intensity: settings.max_zoom,
    };
    ZoomScheduler::new(config).schedule(mapping, events)
}
