//! Overlap resolution within a single lane.
//!
//! Given the events of one lane, [`resolve_lane`] keeps the events that start
//! on the selected day, sorts them by start (stable, so equal starts keep
//! their input order), and assigns each one a display column:
//!
//! - Events that share their exact start with at least one other event form a
//!   *same-start subset*. They are laid out as equal-width siblings in input
//!   order and take no part in the general column assignment.
//! - Every other event goes through a [`ColumnStrategy`]. The default,
//!   [`ColumnStrategy::GreedyFirstFit`], sweeps in start order and gives each
//!   event the smallest column not taken by an overlapping predecessor. Its
//!   `total_overlapping` counts the overlapping predecessors plus itself.
//!
//! Overlap is half-open: an event ending exactly when another starts does not
//! overlap it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Per-event overlap metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlapInfo {
    /// Whether the event shares horizontal space with another event.
    pub is_overlapping: bool,
    /// 0-based column within the concurrent group.
    pub overlap_index: usize,
    /// Number of columns the group is split into. Always at least 1.
    pub total_overlapping: usize,
}

impl OverlapInfo {
    /// An event that has its lane to itself.
    pub const SOLO: OverlapInfo = OverlapInfo {
        is_overlapping: false,
        overlap_index: 0,
        total_overlapping: 1,
    };
}

/// Position of an event inside a same-start subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SameStartSlot {
    /// 0-based position, in input order.
    pub index: usize,
    /// Number of events sharing the start. Always at least 2.
    pub group_size: usize,
}

/// How non-same-start events are assigned columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnStrategy {
    /// First-fit sweep. `total_overlapping` counts overlapping predecessors
    /// plus the event itself, so the earliest event of a group may still
    /// report a single column.
    #[default]
    GreedyFirstFit,
    /// Sweep-line with a min-heap of freed columns. Every event in a connected
    /// overlap cluster reports the number of columns the cluster uses.
    SweepLine,
}

/// Overlap resolution result for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a> {
    pub event: &'a Event,
    pub overlap: OverlapInfo,
    /// Set when the event belongs to a same-start subset.
    pub same_start: Option<SameStartSlot>,
}

/// Resolve overlaps for one lane.
///
/// Only events whose start date equals `day` are considered. The returned
/// placements are in start order.
pub fn resolve_lane<'a>(
    events: &[&'a Event],
    day: NaiveDate,
    strategy: ColumnStrategy,
) -> Vec<Placement<'a>> {
    let mut sorted: Vec<&'a Event> = events
        .iter()
        .copied()
        .filter(|e| e.start().date() == day)
        .collect();
    sorted.sort_by_key(|e| e.start());

    let slots = same_start_slots(&sorted);

    let general: Vec<&'a Event> = sorted
        .iter()
        .zip(&slots)
        .filter(|(_, slot)| slot.is_none())
        .map(|(e, _)| *e)
        .collect();

    let mut general_infos = match strategy {
        ColumnStrategy::GreedyFirstFit => greedy_first_fit(&general),
        ColumnStrategy::SweepLine => sweep_line(&general),
    }
    .into_iter();

    let mut placements = Vec::with_capacity(sorted.len());
    for (event, slot) in sorted.into_iter().zip(slots) {
        let overlap = match slot {
            Some(s) => OverlapInfo {
                is_overlapping: true,
                overlap_index: s.index,
                total_overlapping: s.group_size,
            },
            // One info per general event, consumed in the same order.
            None => general_infos.next().unwrap_or(OverlapInfo::SOLO),
        };
        placements.push(Placement {
            event,
            overlap,
            same_start: slot,
        });
    }
    placements
}

/// Same-start slot for each event of a start-sorted list.
fn same_start_slots(sorted: &[&Event]) -> Vec<Option<SameStartSlot>> {
    let mut slots = vec![None; sorted.len()];
    let mut run_begin = 0;
    while run_begin < sorted.len() {
        let start = sorted[run_begin].start();
        let run_len = sorted[run_begin..]
            .iter()
            .take_while(|e| e.start() == start)
            .count();
        if run_len >= 2 {
            for (index, slot) in slots[run_begin..run_begin + run_len].iter_mut().enumerate() {
                *slot = Some(SameStartSlot {
                    index,
                    group_size: run_len,
                });
            }
        }
        run_begin += run_len;
    }
    slots
}

fn greedy_first_fit(sorted: &[&Event]) -> Vec<OverlapInfo> {
    let mut infos: Vec<OverlapInfo> = Vec::with_capacity(sorted.len());
    for (i, event) in sorted.iter().enumerate() {
        let mut taken: Vec<usize> = sorted[..i]
            .iter()
            .zip(&infos)
            .filter(|(prev, _)| prev.overlaps(event))
            .map(|(_, info)| info.overlap_index)
            .collect();
        let count = taken.len() + 1;

        taken.sort_unstable();
        taken.dedup();

        infos.push(OverlapInfo {
            is_overlapping: count > 1,
            overlap_index: smallest_free(&taken),
            total_overlapping: count,
        });
    }
    infos
}

/// Smallest non-negative integer missing from a sorted, deduplicated list.
fn smallest_free(taken: &[usize]) -> usize {
    let mut candidate = 0;
    for &t in taken {
        if t != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

fn sweep_line(sorted: &[&Event]) -> Vec<OverlapInfo> {
    let mut columns = vec![0usize; sorted.len()];
    let mut totals = vec![1usize; sorted.len()];

    let mut active: BinaryHeap<Reverse<(NaiveDateTime, usize)>> = BinaryHeap::new();
    let mut free: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
    let mut next_column = 0;
    let mut cluster_begin = 0;

    for (i, event) in sorted.iter().enumerate() {
        while let Some(Reverse((end, column))) = active.peek().copied() {
            if end > event.start() {
                break;
            }
            active.pop();
            free.push(Reverse(column));
        }

        if active.is_empty() {
            totals[cluster_begin..i].fill(next_column.max(1));
            cluster_begin = i;
            next_column = 0;
            free.clear();
        }

        let column = match free.pop() {
            Some(Reverse(c)) => c,
            None => {
                next_column += 1;
                next_column - 1
            }
        };
        columns[i] = column;
        active.push(Reverse((event.end(), column)));
    }
    totals[cluster_begin..].fill(next_column.max(1));

    columns
        .into_iter()
        .zip(totals)
        .map(|(overlap_index, total_overlapping)| OverlapInfo {
            is_overlapping: total_overlapping > 1,
            overlap_index,
            total_overlapping,
        })
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────
