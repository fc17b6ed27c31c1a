//! Split clips under the playhead.

use std::path::PathBuf;

use clipzoom_project_model::project::Project;
use uuid::Uuid;

pub fn run(path: PathBuf, at_ms: f64, track: Option<Uuid>) -> anyhow::Result<()> {
    let project =
        Project::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    if let Some(track_id) = track {
        anyhow::ensure!(
            project.timeline.track(track_id).is_some(),
            "Track {track_id} not found in project"
        );
    }

    let before = project.timeline.clips().count();
    let timeline = project
        .timeline
        .split_at(at_ms, track)
        .map_err(|e| anyhow::anyhow!("Split failed: {e}"))?;
    let after = timeline.clips().count();

    if after == before {
        println!("No clips under {at_ms}ms; project unchanged.");
        return Ok(());
    }

    let project = project.with_timeline(timeline);
    project
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to save project: {e}"))?;

    println!("Split {} clip(s) at {at_ms}ms", after - before);
    for t in project.timeline.tracks() {
        println!("  {}: {} clip(s)", t.name, t.clips().len());
    }

    Ok(())
}
