//! Calendar events as laid out on a day timeline.
//!
//! An [`Event`] is an immutable value. Its end is always strictly after its
//! start: a missing or degenerate end is replaced with `start + 1 hour` at
//! construction time, including when the event is deserialized, so nothing
//! downstream ever sees a zero or negative duration. Near the upper limit of
//! [`NaiveDateTime`] the default end saturates at [`NaiveDateTime::MAX`], and an
//! event starting exactly at that limit is moved back by the default duration.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Default duration applied when an event has no usable end.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// A 32-bit ARGB color carried through layout untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Pack alpha, red, green and blue channels into one value.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The alpha channel.
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Color(0xFF21_96F3)
    }
}

/// A calendar event for one render pass.
///
/// Equality and hashing are structural over every field, so two events with
/// the same content are interchangeable as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "EventRecord")]
pub struct Event {
    id: Option<String>,
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    lane_key: Option<String>,
    color: Color,
    description: Option<String>,
}

/// Wire shape of an [`Event`]; `end` is optional and normalized on conversion.
#[derive(Deserialize)]
struct EventRecord {
    #[serde(default)]
    id: Option<String>,
    title: String,
    start: NaiveDateTime,
    #[serde(default)]
    end: Option<NaiveDateTime>,
    #[serde(default)]
    lane_key: Option<String>,
    #[serde(default)]
    color: Color,
    #[serde(default)]
    description: Option<String>,
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        let mut event = Event::new(record.title, record.start).with_color(record.color);
        if let Some(end) = record.end {
            event = event.with_end(end);
        }
        event.id = record.id;
        event.lane_key = record.lane_key;
        event.description = record.description;
        event
    }
}

impl Event {
    /// Create an event lasting [`DEFAULT_DURATION_MINUTES`] from `start`.
    ///
    /// The end saturates at [`NaiveDateTime::MAX`]. A `start` equal to
    /// [`NaiveDateTime::MAX`] is moved back so the event keeps its default
    /// duration.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use timeline_engine::Event;
    ///
    /// let start = NaiveDate::from_ymd_opt(2026, 3, 16)
    ///     .unwrap()
    ///     .and_hms_opt(9, 0, 0)
    ///     .unwrap();
    /// let standup = Event::new("Standup", start);
    /// assert_eq!(standup.duration_minutes(), 60);
    /// ```
    pub fn new(title: impl Into<String>, start: NaiveDateTime) -> Self {
        let start = if start == NaiveDateTime::MAX {
            start
                .checked_sub_signed(default_duration())
                .unwrap_or(NaiveDateTime::MIN)
        } else {
            start
        };
        Event {
            id: None,
            title: title.into(),
            start,
            end: default_end(start),
            lane_key: None,
            color: Color::default(),
            description: None,
        }
    }

    /// Set the end. An end at or before the start falls back to the default
    /// one-hour duration.
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = if end > self.start {
            end
        } else {
            default_end(self.start)
        };
        self
    }

    /// Attach a caller-side identifier. Layout never reads it.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Route the event to the lane with this id.
    ///
    /// A key that matches no configured lane sends the event to the implicit
    /// default lane.
    pub fn with_lane(mut self, lane_key: impl Into<String>) -> Self {
        self.lane_key = Some(lane_key.into());
        self
    }

    /// Set the display color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Attach free-form text carried through layout untouched.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Caller-side identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Inclusive start.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end, always after [`Event::start`].
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Lane this event asks to be routed to.
    pub fn lane_key(&self) -> Option<&str> {
        self.lane_key.as_deref()
    }

    /// Display color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Free-form description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whole minutes between start and end. Always positive.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open interval overlap: an event ending exactly when another
    /// starts does not overlap it.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn default_duration() -> Duration {
    Duration::minutes(DEFAULT_DURATION_MINUTES)
}

/// `start` plus the default duration, saturating at [`NaiveDateTime::MAX`].
fn default_end(start: NaiveDateTime) -> NaiveDateTime {
    start
        .checked_add_signed(default_duration())
        .unwrap_or(NaiveDateTime::MAX)
}

// ── Tests ───────────────────────────────────────────────────────────────────
