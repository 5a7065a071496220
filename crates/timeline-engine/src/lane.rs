//! Lanes: named vertical partitions of the day timeline.
//!
//! A lane set is either empty, in which case every event shares one implicit
//! [`DEFAULT_LANE_ID`] lane, or holds between [`MIN_LANES`] and [`MAX_LANES`]
//! lanes. Events are routed by their `lane_key`; anything without a matching
//! lane lands in the implicit default lane, which is appended after the
//! defined lanes and only rendered when it is non-empty.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{LayoutError, Result};
use crate::event::Event;

/// Id of the implicit lane that collects unrouted events.
pub const DEFAULT_LANE_ID: &str = "default";

/// Smallest non-empty lane set.
pub const MIN_LANES: usize = 2;

/// Largest lane set.
pub const MAX_LANES: usize = 10;

/// A named lane.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Lane {
    /// A lane with no display title.
    pub fn new(id: impl Into<String>) -> Self {
        Lane {
            id: id.into(),
            title: None,
        }
    }

    /// Set the display title shown above the lane.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A validated lane configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaneSet {
    lanes: Vec<Lane>,
}

impl LaneSet {
    /// Validate a lane configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::LaneCount`] if the set holds exactly one lane or
    /// more than [`MAX_LANES`], and [`LayoutError::DuplicateLane`] if two lanes
    /// share an id.
    pub fn new(lanes: Vec<Lane>) -> Result<Self> {
        if !lanes.is_empty() && !(MIN_LANES..=MAX_LANES).contains(&lanes.len()) {
            return Err(LayoutError::LaneCount(lanes.len()));
        }

        let mut seen = HashSet::with_capacity(lanes.len());
        for lane in &lanes {
            if !seen.insert(lane.id.as_str()) {
                return Err(LayoutError::DuplicateLane(lane.id.clone()));
            }
        }

        Ok(LaneSet { lanes })
    }

    /// Configured lanes in display order, without the implicit default lane.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// `true` when every event goes to the implicit default lane.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    fn contains(&self, id: &str) -> bool {
        self.lanes.iter().any(|l| l.id == id)
    }
}

/// Events grouped by lane, in display order.
///
/// Lane order follows the lane set, with the implicit default lane last.
/// Within a lane, events keep their original input order.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    buckets: IndexMap<String, Bucket<'a>>,
}

#[derive(Debug, Clone)]
struct Bucket<'a> {
    title: Option<String>,
    events: Vec<&'a Event>,
}

impl<'a> Partition<'a> {
    /// Iterate `(lane id, lane title, events)` in display order.
    pub fn lanes(&self) -> impl Iterator<Item = (&str, Option<&str>, &[&'a Event])> {
        self.buckets
            .iter()
            .map(|(id, b)| (id.as_str(), b.title.as_deref(), b.events.as_slice()))
    }

    /// Events routed to `lane_id`, if that lane is rendered.
    pub fn get(&self, lane_id: &str) -> Option<&[&'a Event]> {
        self.buckets.get(lane_id).map(|b| b.events.as_slice())
    }

    /// Number of rendered lanes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// `true` when no lane is rendered.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Route events into lanes.
///
/// With an empty lane set, every event goes to the implicit default lane,
/// which is always present. Otherwise each event joins the lane whose id
/// equals its `lane_key`, and events with a missing or unknown key join the
/// default lane, which only appears when it received at least one event.
pub fn partition<'a, I>(events: I, lane_set: &LaneSet) -> Partition<'a>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut buckets: IndexMap<String, Bucket<'a>> = lane_set
        .lanes()
        .iter()
        .map(|lane| {
            (
                lane.id.clone(),
                Bucket {
                    title: lane.title.clone(),
                    events: Vec::new(),
                },
            )
        })
        .collect();

    if lane_set.is_empty() {
        buckets.insert(
            DEFAULT_LANE_ID.to_string(),
            Bucket {
                title: None,
                events: Vec::new(),
            },
        );
    }

    for event in events {
        let lane_id = match event.lane_key() {
            Some(key) if lane_set.contains(key) => key,
            _ => DEFAULT_LANE_ID,
        };
        trace!(title = event.title(), lane = lane_id, "routed event");
        buckets
            .entry(lane_id.to_string())
            .or_insert_with(|| Bucket {
                title: None,
                events: Vec::new(),
            })
            .events
            .push(event);
    }

    Partition { buckets }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 16)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn lanes(ids: &[&str]) -> Vec<Lane> {
        ids.iter().map(|id| Lane::new(*id)).collect()
    }

    // ── LaneSet validation ──────────────────────────────────────────────

    #[test]
    fn test_empty_lane_set_is_valid() {
        assert!(LaneSet::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_single_lane_is_rejected() {
        let err = LaneSet::new(lanes(&["work"])).unwrap_err();
        assert_eq!(err, LayoutError::LaneCount(1));
        assert!(err.to_string().contains("Invalid lane count"));
    }

    #[test]
    fn test_two_and_ten_lanes_are_valid() {
        assert!(LaneSet::new(lanes(&["a", "b"])).is_ok());
        let ten: Vec<Lane> = (0..10).map(|i| Lane::new(format!("l{i}"))).collect();
        assert!(LaneSet::new(ten).is_ok());
    }

    #[test]
    fn test_eleven_lanes_are_rejected() {
        let eleven: Vec<Lane> = (0..11).map(|i| Lane::new(format!("l{i}"))).collect();
        assert_eq!(LaneSet::new(eleven).unwrap_err(), LayoutError::LaneCount(11));
    }

    #[test]
    fn test_duplicate_lane_ids_are_rejected() {
        let err = LaneSet::new(lanes(&["work", "home", "work"])).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateLane("work".to_string()));
    }

    // ── partition ───────────────────────────────────────────────────────

    #[test]
    fn test_no_lanes_routes_everything_to_default() {
        let events = vec![
            Event::new("A", at(9)).with_lane("work"),
            Event::new("B", at(10)),
        ];
        let set = LaneSet::new(Vec::new()).unwrap();
        let p = partition(&events, &set);
        assert_eq!(p.len(), 1);
        let default = p.get(DEFAULT_LANE_ID).unwrap();
        assert_eq!(default.len(), 2);
        assert_eq!(default[0].title(), "A");
    }

    #[test]
    fn test_no_lanes_and_no_events_still_has_default_lane() {
        let set = LaneSet::new(Vec::new()).unwrap();
        let p = partition(&[] as &[Event], &set);
        assert_eq!(p.len(), 1);
        assert!(p.get(DEFAULT_LANE_ID).unwrap().is_empty());
    }

    #[test]
    fn test_routes_by_lane_key_in_input_order() {
        let events = vec![
            Event::new("W2", at(11)).with_lane("work"),
            Event::new("H1", at(9)).with_lane("home"),
            Event::new("W1", at(8)).with_lane("work"),
        ];
        let set = LaneSet::new(lanes(&["work", "home"])).unwrap();
        let p = partition(&events, &set);

        let work: Vec<&str> = p.get("work").unwrap().iter().map(|e| e.title()).collect();
        assert_eq!(work, vec!["W2", "W1"]);
        assert_eq!(p.get("home").unwrap().len(), 1);
        assert!(p.get(DEFAULT_LANE_ID).is_none());
    }

    #[test]
    fn test_unknown_and_missing_keys_go_to_trailing_default_lane() {
        let events = vec![
            Event::new("Unknown", at(9)).with_lane("gym"),
            Event::new("Work", at(10)).with_lane("work"),
            Event::new("Missing", at(11)),
        ];
        let set = LaneSet::new(lanes(&["work", "home"])).unwrap();
        let p = partition(&events, &set);

        let order: Vec<&str> = p.lanes().map(|(id, _, _)| id).collect();
        assert_eq!(order, vec!["work", "home", DEFAULT_LANE_ID]);

        let default: Vec<&str> = p
            .get(DEFAULT_LANE_ID)
            .unwrap()
            .iter()
            .map(|e| e.title())
            .collect();
        assert_eq!(default, vec!["Unknown", "Missing"]);
    }

    #[test]
    fn test_defined_lanes_render_even_when_empty() {
        let events = vec![Event::new("Work", at(10)).with_lane("work")];
        let set = LaneSet::new(lanes(&["work", "home"])).unwrap();
        let p = partition(&events, &set);
        assert_eq!(p.len(), 2);
        assert!(p.get("home").unwrap().is_empty());
    }

    #[test]
    fn test_defined_default_lane_absorbs_unrouted_events() {
        let events = vec![Event::new("Loose", at(10))];
        let set = LaneSet::new(lanes(&["work", DEFAULT_LANE_ID])).unwrap();
        let p = partition(&events, &set);
        assert_eq!(p.len(), 2);
        assert_eq!(p.get(DEFAULT_LANE_ID).unwrap().len(), 1);
    }

    #[test]
    fn test_lane_titles_are_carried() {
        let set = LaneSet::new(vec![
            Lane::new("work").with_title("Work"),
            Lane::new("home"),
        ])
        .unwrap();
        let p = partition(&[] as &[Event], &set);
        let titles: Vec<Option<&str>> = p.lanes().map(|(_, t, _)| t).collect();
        assert_eq!(titles, vec![Some("Work"), None]);
    }
}
