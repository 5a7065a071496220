//! Mapping resolved events onto viewport rectangles.
//!
//! The viewport covers the visible hour window `[start, end)`; one minute
//! maps to `height / ((end - start) * 60)` units. Events are excluded, never
//! clipped, when they reach outside the selected day, and geometry is not
//! clamped to the viewport: an event inside the day but outside the visible
//! hours yields a rectangle above or below it.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::overlap::Placement;
use crate::time::{day_end, day_start, minutes_since_day_start};

/// Size of the drawable timeline area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Build a viewport. Dimensions are checked when a [`GeometryMapper`] is
    /// created, not here.
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidViewport(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// The hour window shown by the viewport, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleHours {
    pub start: u32,
    pub end: u32,
}

impl Default for VisibleHours {
    fn default() -> Self {
        VisibleHours { start: 0, end: 24 }
    }
}

impl VisibleHours {
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidHours`] unless `start < end <= 24`.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        let hours = VisibleHours { start, end };
        hours.validate()?;
        Ok(hours)
    }

    fn validate(&self) -> Result<()> {
        if self.start < self.end && self.end <= 24 {
            Ok(())
        } else {
            Err(LayoutError::InvalidHours {
                start: self.start,
                end: self.end,
            })
        }
    }

    /// Number of visible hours.
    pub fn span_hours(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Full scrollable height when every hour row is `hour_row_height` tall.
    pub fn content_height(&self, hour_row_height: f64) -> f64 {
        f64::from(self.span_hours()) * hour_row_height
    }
}

/// Horizontal slice of the viewport owned by one lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSlice {
    pub left: f64,
    pub width: f64,
}

/// Rectangle an event occupies, in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

impl LayoutRect {
    /// `top + height`.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// `left + width`.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Converts time ranges and overlap metadata into [`LayoutRect`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    viewport: Viewport,
    hours: VisibleHours,
    minute_height: f64,
}

impl GeometryMapper {
    /// Validate the viewport and hour window and precompute the minute height.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidViewport`] for a non-positive or
    /// non-finite dimension and [`LayoutError::InvalidHours`] for an empty or
    /// out-of-range hour window.
    pub fn new(viewport: Viewport, hours: VisibleHours) -> Result<Self> {
        viewport.validate()?;
        hours.validate()?;
        let minute_height = viewport.height / f64::from(hours.span_hours() * 60);
        Ok(GeometryMapper {
            viewport,
            hours,
            minute_height,
        })
    }

    /// The viewport this mapper draws into.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The visible hour window.
    pub fn hours(&self) -> VisibleHours {
        self.hours
    }

    /// Vertical units per minute: `height / (span_hours * 60)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeline_engine::{GeometryMapper, Viewport, VisibleHours};
    ///
    /// let hours = VisibleHours::new(8, 20).unwrap();
    /// let mapper = GeometryMapper::new(Viewport::new(400.0, 720.0), hours).unwrap();
    /// assert_eq!(mapper.minute_height(), 1.0);
    /// ```
    pub fn minute_height(&self) -> f64 {
        self.minute_height
    }

    /// Split the viewport width into `count` equal lanes, left to right.
    pub fn lane_slices(&self, count: usize) -> Vec<LaneSlice> {
        if count == 0 {
            return Vec::new();
        }
        let width = self.viewport.width / count as f64;
        (0..count)
            .map(|i| LaneSlice {
                left: width * i as f64,
                width,
            })
            .collect()
    }

    /// Vertical offset of `time` relative to the top of the visible window.
    pub fn offset_for(&self, time: NaiveDateTime, day: NaiveDate) -> f64 {
        let minutes = minutes_since_day_start(time, day) - i64::from(self.hours.start) * 60;
        minutes as f64 * self.minute_height
    }

    /// Rectangle for a resolved event within `slice`.
    ///
    /// Returns `None` when the event starts before or ends after the selected
    /// day.
    pub fn map(
        &self,
        placement: &Placement<'_>,
        slice: LaneSlice,
        day: NaiveDate,
    ) -> Option<LayoutRect> {
        let event = placement.event;
        if event.start() < day_start(day) || event.end() > day_end(day) {
            return None;
        }

        let top = self.offset_for(event.start(), day);
        let height = event.duration_minutes() as f64 * self.minute_height;

        let (index, columns) = match placement.same_start {
            Some(slot) => (slot.index, slot.group_size),
            None => (
                placement.overlap.overlap_index,
                placement.overlap.total_overlapping,
            ),
        };
        let width = slice.width / columns.max(1) as f64;
        let left = slice.left + width * index as f64;

        Some(LayoutRect {
            top,
            height,
            left,
            width,
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
