//! Build a new Clipzoom project from a finished recording.

use std::path::PathBuf;

use clipzoom_common::config::AppConfig;
use clipzoom_processing_core::create_project_from_source;
use clipzoom_project_model::project::{BackgroundStyle, OutputSettings};

use super::{read_events, read_source};

pub fn run(
    config: &AppConfig,
    name: String,
    screen: PathBuf,
    camera: Option<PathBuf>,
    events: PathBuf,
    output: Option<PathBuf>,
    auto_zoom: bool,
) -> anyhow::Result<()> {
    let screen = read_source(&screen)?;
    let camera = camera.as_deref().map(read_source).transpose()?;
    let events = read_events(&events)?;

    let defaults = &config.output;
    let settings = OutputSettings {
        width: defaults.width,
        height: defaults.height,
        fps: defaults.fps,
        max_zoom: defaults.max_zoom,
        auto_zoom: auto_zoom && defaults.auto_zoom,
        background: BackgroundStyle {
            color: defaults.background.clone(),
            ..Default::default()
        },
        padding: defaults.padding,
    };

    let project_dir = output
        .unwrap_or_else(|| config.projects_dir.clone())
        .join(&name);
    println!("Creating project '{}' at {}", name, project_dir.display());

    let project = create_project_from_source(&name, screen, camera, &events, settings)
        .map_err(|e| anyhow::anyhow!("Failed to assemble project: {e}"))?;
    let path = project
        .save(&project_dir.join(clipzoom_project_model::PROJECT_FILE_NAME))
        .map_err(|e| anyhow::anyhow!("Failed to save project: {e}"))?;

    println!("Project created successfully:");
    println!("  File: {}", path.display());
    println!("  Loaded {} events", events.len());
    println!("  Tracks: {}", project.timeline.tracks().len());
    println!(
        "  Zoom keyframes: {}",
        project.timeline.viewport_motions().len()
    );
    println!(
        "  Output: {}x{} @ {}fps",
        project.settings.width, project.settings.height, project.settings.fps
    );

    Ok(())
}
