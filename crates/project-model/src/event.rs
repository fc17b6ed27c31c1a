//! Captured interaction events.
//!
//! The capture side records a flat, timestamp-ordered log of interaction
//! records. Every record carries the viewport size and scroll offsets at
//! capture time; pointer coordinates are viewport pixels.
//!
//! Wire form is one JSON object per event, tagged by `"type"` with camelCase
//! field names, either as a JSON array or as JSONL.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Milliseconds since recording start.
pub type TimestampMs = f64;

/// A single recorded interaction with its capture-time geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedEvent {
    pub timestamp: TimestampMs,

    #[serde(default)]
    pub viewport_width: f64,
    #[serde(default)]
    pub viewport_height: f64,

    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,

    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Discriminated union of event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    Click {
        x: f64,
        y: f64,
    },

    /// Pointer movement sample.
    Mouse {
        x: f64,
        y: f64,
    },

    MouseDown {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },

    MouseUp {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },

    /// Navigation to a new page.
    Url { url: String },

    #[serde(rename_all = "camelCase")]
    KeyDown {
        key: String,
        code: String,
        #[serde(default)]
        ctrl_key: bool,
        #[serde(default)]
        meta_key: bool,
        #[serde(default)]
        shift_key: bool,
        #[serde(default)]
        alt_key: bool,
    },

    /// DOM mutation marker; carries no payload the editor uses.
    Mutation,
}

impl CapturedEvent {
    /// Create a click event with zero scroll.
    pub fn click(timestamp: TimestampMs, x: f64, y: f64, viewport: Size) -> Self {
        Self {
            timestamp,
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            scroll_x: 0.0,
            scroll_y: 0.0,
            kind: EventKind::Click { x, y },
        }
    }

    /// Create a pointer movement event with zero scroll.
    pub fn mouse(timestamp: TimestampMs, x: f64, y: f64, viewport: Size) -> Self {
        Self {
            timestamp,
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            scroll_x: 0.0,
            scroll_y: 0.0,
            kind: EventKind::Mouse { x, y },
        }
    }

    /// Replace the scroll offsets.
    pub fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    pub fn is_click(&self) -> bool {
        matches!(self.kind, EventKind::Click { .. })
    }

    /// Pointer position in viewport pixels, for events that carry one.
    pub fn pointer_position(&self) -> Option<Point> {
        match &self.kind {
            EventKind::Click { x, y }
            | EventKind::Mouse { x, y }
            | EventKind::MouseDown { x, y }
            | EventKind::MouseUp { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    /// Viewport size at capture time.
    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }
}

/// Parse events from a JSON array.
pub fn parse_events(json: &str) -> Result<Vec<CapturedEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse events from JSONL content (one JSON object per line).
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_events_jsonl(jsonl: &str) -> Result<Vec<CapturedEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse either wire form, deciding by the first non-blank character.
pub fn parse_events_auto(content: &str) -> Result<Vec<CapturedEvent>, serde_json::Error> {
    if content.trim_start().starts_with('[') {
        parse_events(content)
    } else {
        parse_events_jsonl(content)
    }
}

/// Serialize events to JSONL format.
pub fn serialize_events_jsonl(events: &[CapturedEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn test_click_wire_format() {
        let event = CapturedEvent::click(1500.0, 100.0, 200.0, VIEWPORT).with_scroll(0.0, 40.0);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"click\""));
        assert!(json.contains("\"viewportWidth\":1280.0"));
        assert!(json.contains("\"scrollY\":40.0"));
        assert!(json.contains("\"x\":100.0"));
    }

    #[test]
    fn test_parse_browser_style_records() {
        let raw = r#"[
            {"type":"mouse","timestamp":10,"x":5,"y":6,"viewportWidth":1280,"viewportHeight":720,"scrollX":0,"scrollY":0},
            {"type":"keydown","timestamp":20,"key":"a","code":"KeyA","ctrlKey":true,"metaKey":false,"shiftKey":false,"altKey":false,"viewportWidth":1280,"viewportHeight":720,"scrollX":0,"scrollY":0},
            {"type":"url","timestamp":30,"url":"https://example.com","viewportWidth":1280,"viewportHeight":720,"scrollX":0,"scrollY":0},
            {"type":"mutation","timestamp":40,"viewportWidth":1280,"viewportHeight":720,"scrollX":0,"scrollY":0},
            {"type":"mousedown","timestamp":50,"x":1,"y":2,"viewportWidth":1280,"viewportHeight":720,"scrollX":0,"scrollY":0}
        ]"#;

        let events = parse_events(raw).unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0].pointer_position(), Some(Point::new(5.0, 6.0)));
        match &events[1].kind {
            EventKind::KeyDown { code, ctrl_key, .. } => {
                assert_eq!(code, "KeyA");
                assert!(*ctrl_key);
            }
            other => panic!("expected keydown, got {other:?}"),
        }
        assert_eq!(events[3].kind, EventKind::Mutation);
        assert_eq!(events[3].pointer_position(), None);
        assert!(matches!(events[4].kind, EventKind::MouseDown { .. }));
        assert!(!events[4].is_click());
    }

    #[test]
    fn test_jsonl_skips_comments_and_blanks() {
        let jsonl = "# recorded by capture\n\n{\"type\":\"click\",\"timestamp\":5,\"x\":1,\"y\":2}\n";
        let events = parse_events_jsonl(jsonl).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_click());
        assert_eq!(events[0].scroll_x, 0.0);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let events = vec![
            CapturedEvent::mouse(0.0, 0.0, 0.0, VIEWPORT),
            CapturedEvent::click(100.0, 50.0, 60.0, VIEWPORT),
        ];
        let jsonl = serialize_events_jsonl(&events).unwrap();
        assert_eq!(parse_events_auto(&jsonl).unwrap(), events);
    }

    #[test]
    fn test_auto_detects_array() {
        let events = parse_events_auto("  [{\"type\":\"mutation\",\"timestamp\":1}]").unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(parse_events("[{\"type\":\"wheel\",\"timestamp\":1}]").is_err());
    }
}
