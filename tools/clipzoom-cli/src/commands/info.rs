//! Show project information.

use std::path::PathBuf;

use clipzoom_project_model::project::Project;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let p = Project::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    println!("Project: {}", p.name);
    println!("  ID: {}", p.id);
    println!("  Created: {}", p.created_at);
    println!("  Modified: {}", p.modified_at);
    println!();

    println!("Sources:");
    for source in p.sources.values() {
        println!(
            "  {} ({:?}): {:.1}s, {}x{}{}",
            source.id,
            source.kind,
            source.duration_ms / 1000.0,
            source.size.width,
            source.size.height,
            if source.has_audio { ", audio" } else { "" }
        );
    }
    println!();

    println!("Timeline:");
    println!("  Duration: {:.1}s", p.timeline.duration_ms / 1000.0);
    for track in p.timeline.tracks() {
        let mut flags = vec![];
        if track.locked {
            flags.push("locked");
        }
        if !track.visible {
            flags.push("hidden");
        }
        println!(
            "  Track '{}' [{:?}] {} ({} clip(s)) {}",
            track.name,
            track.kind,
            track.id,
            track.clips().len(),
            flags.join(", ")
        );
        for clip in track.clips() {
            println!(
                "    {:>9.1}ms → {:>9.1}ms  src {} [{:.1}, {:.1}) x{}{}",
                clip.timeline_in_ms,
                clip.timeline_out_ms(),
                clip.source_id,
                clip.source_in_ms,
                clip.source_out_ms,
                clip.speed,
                clip.link_group_id
                    .as_deref()
                    .map(|g| format!("  link {g}"))
                    .unwrap_or_default()
            );
        }
    }
    if let Some(windows) = &p.timeline.output_windows {
        println!("  Output windows: {}", windows.len());
        for window in windows {
            println!(
                "    {:>9.1}ms → {:>9.1}ms  ({:.1}s)",
                window.start_ms,
                window.end_ms,
                window.duration_ms() / 1000.0
            );
        }
    }

    let frame = p.settings.output_size();
    let motions = p.timeline.viewport_motions();
    println!("  Zoom keyframes: {}", motions.len());
    for keyframe in motions {
        let b = &keyframe.zoom_box;
        println!(
            "    {:>9.1}ms  {:.2}x  at ({:.0}, {:.0}) {:.0}x{:.0}",
            keyframe.timestamp,
            b.zoom_factor(frame),
            b.x,
            b.y,
            b.width,
            b.height
        );
    }
    println!();

    println!("Output settings:");
    println!(
        "  Output: {}x{} @ {}fps",
        p.settings.width, p.settings.height, p.settings.fps
    );
    println!(
        "  Auto-zoom: {} (max zoom {})",
        p.settings.auto_zoom, p.settings.max_zoom
    );
    println!(
        "  Background: {} (padding {:.0}%)",
        p.settings.background.color,
        p.settings.padding * 100.0
    );

    Ok(())
}
