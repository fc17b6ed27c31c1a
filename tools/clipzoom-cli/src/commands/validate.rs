//! Validate a Clipzoom project.

use std::path::PathBuf;

use clipzoom_project_model::project::Project;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating project at: {}", path.display());

    let project =
        Project::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    println!("  Name: {}", project.name);
    println!("  Version: {}", project.version);
    println!("  Sources: {}", project.sources.len());
    println!("  Tracks: {}", project.timeline.tracks().len());
    println!(
        "  Zoom keyframes: {}",
        project.timeline.viewport_motions().len()
    );

    let errors = project.validate();
    if errors.is_empty() {
        println!("\nProject is valid.");
        return Ok(());
    }

    println!("\nValidation issues:");
    for error in &errors {
        println!("  - {error}");
    }
    anyhow::bail!("{} issue(s) found", errors.len())
}
