//! # timeline-engine
//!
//! Deterministic layout for day-scoped calendar timelines.
//!
//! Given the events of a selected day, optionally split into named lanes, the
//! engine decides which events overlap, which column each one takes within its
//! group, and the rectangle it occupies in a viewport showing a configured
//! window of hours. It is a pure function of its inputs: no clock access, no
//! caching, no I/O. Drawing the result is left to the caller.
//!
//! ## Modules
//!
//! - [`time`] — Day boundaries and minute-of-day conversion
//! - [`event`] — Immutable event values with a guaranteed positive duration
//! - [`lane`] — Lane validation and event-to-lane routing
//! - [`overlap`] — Per-lane overlap detection and column assignment
//! - [`geometry`] — Conversion of resolved events into viewport rectangles
//! - [`layout`] — The full layout pass
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use timeline_engine::{layout, Event, Viewport, VisibleHours};
//!
//! let day = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//! let events = vec![
//!     Event::new("Standup", day.and_hms_opt(9, 0, 0).unwrap()),
//!     Event::new("Review", day.and_hms_opt(9, 30, 0).unwrap()),
//! ];
//!
//! let result = layout(
//!     &events,
//!     day,
//!     &[],
//!     Viewport::new(300.0, 1440.0),
//!     VisibleHours::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(result.rects.len(), 2);
//! // "Review" starts while "Standup" is running, so it takes the second column.
//! assert_eq!(result.rects[1].overlap.overlap_index, 1);
//! assert_eq!(result.rects[1].rect.width, 150.0);
//! ```

pub mod error;
pub mod event;
pub mod geometry;
pub mod lane;
pub mod layout;
pub mod overlap;
pub mod time;

pub use error::LayoutError;
pub use event::{Color, Event};
pub use geometry::{GeometryMapper, LaneSlice, LayoutRect, Viewport, VisibleHours};
pub use lane::{partition, Lane, LaneSet, Partition, DEFAULT_LANE_ID};
pub use layout::{
    layout, layout_with_options, LaneColumn, LayoutOptions, LayoutResult, PlacedEvent,
};
pub use overlap::{resolve_lane, ColumnStrategy, OverlapInfo, Placement, SameStartSlot};
pub use time::{day_end, day_start, is_same_day, minutes_since_day_start};
