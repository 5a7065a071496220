//! Property tests for the layout pass.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use timeline_engine::{
    day_end, day_start, layout_with_options, ColumnStrategy, Event, Lane, LayoutOptions,
    LayoutResult, Viewport, VisibleHours,
};

const EPS: f64 = 1e-6;
const LANE_KEYS: [&str; 3] = ["work", "home", "stray"];

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn event_strategy() -> impl Strategy<Value = Event> {
    // Starts range over the previous, selected and next day; durations up to 6h.
    (-1440i64..2880, 1i64..360, 0usize..4).prop_map(|(start_min, dur_min, lane)| {
        let start = day_start(day()) + Duration::minutes(start_min);
        let event = Event::new(format!("e{start_min}-{dur_min}"), start)
            .with_end(start + Duration::minutes(dur_min));
        match LANE_KEYS.get(lane) {
            Some(key) => event.with_lane(*key),
            None => event,
        }
    })
}

fn strategy_strategy() -> impl Strategy<Value = ColumnStrategy> {
    prop_oneof![
        Just(ColumnStrategy::GreedyFirstFit),
        Just(ColumnStrategy::SweepLine)
    ]
}

fn run(events: &[Event], with_lanes: bool, strategy: ColumnStrategy) -> LayoutResult {
    let lanes = if with_lanes {
        vec![Lane::new("work"), Lane::new("home")]
    } else {
        Vec::new()
    };
    let options = LayoutOptions {
        now: None,
        strategy,
    };
    layout_with_options(
        events,
        day(),
        &lanes,
        Viewport::new(600.0, 1440.0),
        VisibleHours::default(),
        &options,
    )
    .unwrap()
}

fn in_day(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    start >= day_start(day()) && end <= day_end(day())
}

proptest! {
    #[test]
    fn prop_index_within_total(
        events in prop::collection::vec(event_strategy(), 0..30),
        with_lanes in any::<bool>(),
        strategy in strategy_strategy(),
    ) {
        let result = run(&events, with_lanes, strategy);
        for placed in &result.rects {
            prop_assert!(placed.overlap.total_overlapping >= 1);
            prop_assert!(placed.overlap.overlap_index < placed.overlap.total_overlapping);
        }
    }

    #[test]
    fn prop_overlapping_events_get_distinct_columns(
        events in prop::collection::vec(event_strategy(), 0..30),
        with_lanes in any::<bool>(),
        strategy in strategy_strategy(),
    ) {
        let result = run(&events, with_lanes, strategy);
        for (i, a) in result.rects.iter().enumerate() {
            for b in &result.rects[i + 1..] {
                if a.lane_id != b.lane_id || a.same_start.is_some() || b.same_start.is_some() {
                    continue;
                }
                if a.event.overlaps(&b.event) {
                    prop_assert_ne!(a.overlap.overlap_index, b.overlap.overlap_index);
                }
            }
        }
    }

    #[test]
    fn prop_width_is_an_equal_share_of_the_lane(
        events in prop::collection::vec(event_strategy(), 0..30),
        with_lanes in any::<bool>(),
        strategy in strategy_strategy(),
    ) {
        let result = run(&events, with_lanes, strategy);
        for placed in &result.rects {
            let lane = result.lanes.iter().find(|l| l.id == placed.lane_id).unwrap();
            let columns = placed
                .same_start
                .map_or(placed.overlap.total_overlapping, |s| s.group_size);
            prop_assert!((placed.rect.width * columns as f64 - lane.slice.width).abs() < EPS);
            prop_assert!(placed.rect.left >= lane.slice.left - EPS);
            prop_assert!(placed.rect.right() <= lane.slice.left + lane.slice.width + EPS);
        }
    }

    #[test]
    fn prop_sweep_line_columns_do_not_overlap_on_screen(
        events in prop::collection::vec(event_strategy(), 0..30),
        with_lanes in any::<bool>(),
    ) {
        let result = run(&events, with_lanes, ColumnStrategy::SweepLine);
        for (i, a) in result.rects.iter().enumerate() {
            for b in &result.rects[i + 1..] {
                if a.lane_id != b.lane_id || a.same_start.is_some() || b.same_start.is_some() {
                    continue;
                }
                if a.event.overlaps(&b.event) {
                    prop_assert_eq!(a.overlap.total_overlapping, b.overlap.total_overlapping);
                    let disjoint = a.rect.right() <= b.rect.left + EPS
                        || b.rect.right() <= a.rect.left + EPS;
                    prop_assert!(disjoint, "{:?} and {:?} share screen space", a.rect, b.rect);
                }
            }
        }
    }

    #[test]
    fn prop_same_start_subsets_share_the_lane_equally(
        events in prop::collection::vec(event_strategy(), 0..30),
        strategy in strategy_strategy(),
    ) {
        let result = run(&events, false, strategy);
        for placed in &result.rects {
            let k = result
                .rects
                .iter()
                .filter(|o| o.event.start() == placed.event.start())
                .count();
            let in_day_peers = events
                .iter()
                .filter(|o| o.start() == placed.event.start())
                .count();
            // Peers that leave the day still count towards the subset.
            if in_day_peers >= 2 {
                prop_assert!(placed.same_start.is_some());
                prop_assert!((placed.rect.width - 600.0 / in_day_peers as f64).abs() < EPS);
            } else {
                prop_assert_eq!(k, 1);
                prop_assert!(placed.same_start.is_none());
            }
        }
    }

    #[test]
    fn prop_events_outside_the_day_are_absent(
        events in prop::collection::vec(event_strategy(), 0..30),
        with_lanes in any::<bool>(),
    ) {
        let result = run(&events, with_lanes, ColumnStrategy::GreedyFirstFit);
        for placed in &result.rects {
            prop_assert!(in_day(placed.event.start(), placed.event.end()));
        }
        let expected = events.iter().filter(|e| in_day(e.start(), e.end())).count();
        prop_assert_eq!(result.rects.len(), expected);
    }

    #[test]
    fn prop_layout_is_idempotent(
        events in prop::collection::vec(event_strategy(), 0..30),
        with_lanes in any::<bool>(),
        strategy in strategy_strategy(),
    ) {
        let first = run(&events, with_lanes, strategy);
        let second = run(&events, with_lanes, strategy);
        prop_assert_eq!(first, second);
    }
}
