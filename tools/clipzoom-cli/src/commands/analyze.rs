//! Recompute auto-zoom keyframes for a project.

use std::path::PathBuf;

use clipzoom_processing_core::recompute_viewport_motions;
use clipzoom_project_model::project::{OutputSettings, Project};

use super::read_events;

pub fn run(path: PathBuf, events: PathBuf, intensity: Option<f64>) -> anyhow::Result<()> {
    println!("Analyzing project at: {}", path.display());

    let mut project =
        Project::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    let events = read_events(&events)?;
    println!("  Loaded {} events", events.len());

    if let Some(intensity) = intensity {
        anyhow::ensure!(
            intensity.is_finite() && intensity >= 1.0,
            "Zoom intensity must be >= 1.0, got {intensity}"
        );
        project.settings = OutputSettings {
            max_zoom: intensity,
            // An explicit intensity always enables zoom keyframes.
            auto_zoom: true,
            ..project.settings.clone()
        };
    }

    let project = recompute_viewport_motions(&project, &events);
    println!(
        "  Generated {} keyframes (max zoom {})",
        project.timeline.viewport_motions().len(),
        project.settings.max_zoom
    );

    let saved = project
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to save project: {e}"))?;
    println!("  Project saved to: {}", saved.display());
    println!("\nAnalysis complete.");

    Ok(())
}
