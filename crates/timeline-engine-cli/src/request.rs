//! JSON input accepted by the CLI.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use timeline_engine::{Event, Lane, LayoutOptions, Viewport, VisibleHours};

/// One layout request: a day, its events, and how to display them.
///
/// ```json
/// {
///   "date": "2026-03-16",
///   "viewport": { "width": 400, "height": 1440 },
///   "visible_hours": { "start": 0, "end": 24 },
///   "lanes": [{ "id": "work" }, { "id": "home" }],
///   "events": [{ "title": "Standup", "start": "2026-03-16T09:00:00", "lane_key": "work" }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub viewport: Viewport,
    #[serde(default)]
    pub visible_hours: VisibleHours,
    #[serde(default)]
    pub lanes: Vec<Lane>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub options: LayoutOptions,
}

impl LayoutRequest {
    /// Read a request from `path`, or from stdin when `path` is `None` or `-`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let raw = match path {
            Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?,
            _ => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                buf
            }
        };
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid layout request JSON")
    }
}
