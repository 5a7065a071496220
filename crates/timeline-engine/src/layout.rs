//! The layout pass: partition, resolve, map.
//!
//! [`layout_with_options`] is a pure function of its inputs. It validates the
//! lane and viewport configuration, keeps the events that start on the
//! selected day, routes them into lanes, resolves overlaps lane by lane and
//! maps every placement to a rectangle. Nothing is cached between calls.
//!
//! The engine never reads the system clock: the caller provides "now" through
//! [`LayoutOptions::now`] when a current-time indicator is wanted.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::event::Event;
use crate::geometry::{GeometryMapper, LaneSlice, LayoutRect, Viewport, VisibleHours};
use crate::lane::{partition, Lane, LaneSet};
use crate::overlap::{resolve_lane, ColumnStrategy, OverlapInfo, SameStartSlot};
use crate::time::{day_start, is_same_day};

/// Options for [`layout_with_options`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// The caller's "now". Enables the current-time indicator when it falls
    /// on the selected day.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
    /// Column assignment for overlapping events.
    #[serde(default)]
    pub strategy: ColumnStrategy,
}

/// One event placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEvent {
    pub event: Event,
    pub lane_id: String,
    pub rect: LayoutRect,
    pub overlap: OverlapInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_start: Option<SameStartSlot>,
}

/// A rendered lane and the horizontal slice it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneColumn {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub slice: LaneSlice,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Placed events, by lane display order and then by start.
    pub rects: Vec<PlacedEvent>,
    /// Rendered lanes, left to right.
    pub lanes: Vec<LaneColumn>,
    /// Vertical offset of the current-time line, when shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_indicator_top: Option<f64>,
}

impl LayoutResult {
    /// Placed events belonging to `lane_id`.
    pub fn in_lane<'r>(&'r self, lane_id: &'r str) -> impl Iterator<Item = &'r PlacedEvent> {
        self.rects.iter().filter(move |p| p.lane_id == lane_id)
    }
}

/// Lay out one day with default options (greedy columns, no now indicator).
///
/// # Errors
///
/// See [`layout_with_options`].
pub fn layout(
    events: &[Event],
    selected_date: NaiveDate,
    lanes: &[Lane],
    viewport: Viewport,
    visible_hours: VisibleHours,
) -> Result<LayoutResult> {
    layout_with_options(
        events,
        selected_date,
        lanes,
        viewport,
        visible_hours,
        &LayoutOptions::default(),
    )
}

/// Lay out one day.
///
/// Events that start on another day are ignored. Events that start on the
/// selected day but end after it take part in overlap resolution yet get no
/// rectangle.
///
/// The now indicator is only produced when `options.now` falls on
/// `selected_date` and at least one event starts on that day.
///
/// # Errors
///
/// Returns [`LayoutError::LaneCount`](crate::LayoutError::LaneCount) or
/// [`LayoutError::DuplicateLane`](crate::LayoutError::DuplicateLane) for an
/// invalid lane configuration, and
/// [`LayoutError::InvalidViewport`](crate::LayoutError::InvalidViewport) or
/// [`LayoutError::InvalidHours`](crate::LayoutError::InvalidHours) for an
/// invalid viewport. Validation happens before any layout work.
pub fn layout_with_options(
    events: &[Event],
    selected_date: NaiveDate,
    lanes: &[Lane],
    viewport: Viewport,
    visible_hours: VisibleHours,
    options: &LayoutOptions,
) -> Result<LayoutResult> {
    let lane_set = LaneSet::new(lanes.to_vec())?;
    let mapper = GeometryMapper::new(viewport, visible_hours)?;

    let midnight = day_start(selected_date);
    let day_events: Vec<&Event> = events
        .iter()
        .filter(|e| is_same_day(e.start(), midnight))
        .collect();

    let partitioned = partition(day_events.iter().copied(), &lane_set);
    let slices = mapper.lane_slices(partitioned.len());

    debug!(
        date = %selected_date,
        events = events.len(),
        day_events = day_events.len(),
        lanes = partitioned.len(),
        strategy = ?options.strategy,
        "laying out day"
    );

    let mut rects = Vec::with_capacity(day_events.len());
    let mut columns = Vec::with_capacity(partitioned.len());

    for ((lane_id, title, lane_events), slice) in partitioned.lanes().zip(slices) {
        columns.push(LaneColumn {
            id: lane_id.to_string(),
            title: title.map(str::to_string),
            slice,
        });

        for placement in resolve_lane(lane_events, selected_date, options.strategy) {
            let Some(rect) = mapper.map(&placement, slice, selected_date) else {
                debug!(
                    title = placement.event.title(),
                    lane = lane_id,
                    "event leaves the selected day, excluded"
                );
                continue;
            };
            rects.push(PlacedEvent {
                event: placement.event.clone(),
                lane_id: lane_id.to_string(),
                rect,
                overlap: placement.overlap,
                same_start: placement.same_start,
            });
        }
    }

    let now_indicator_top = options
        .now
        .filter(|now| is_same_day(*now, midnight) && !day_events.is_empty())
        .map(|now| mapper.offset_for(now, selected_date));

    Ok(LayoutResult {
        rects,
        lanes: columns,
        now_indicator_top,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
