pub mod analyze;
pub mod info;
pub mod init;
pub mod split;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use clipzoom_project_model::event::{parse_events_auto, CapturedEvent};
use clipzoom_project_model::project::SourceMetadata;

/// Read a captured event log (JSON array or JSONL).
pub fn read_events(path: &Path) -> anyhow::Result<Vec<CapturedEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Events file not found: {}", path.display()))?;
    parse_events_auto(&content).with_context(|| format!("Failed to parse events: {}", path.display()))
}

/// Read a source metadata record.
pub fn read_source(path: &Path) -> anyhow::Result<SourceMetadata> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Source metadata not found: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse source metadata: {}", path.display()))
}
