//! `timeline` — lay out a day of calendar events from JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use timeline_engine::{
    layout_with_options, partition, resolve_lane, ColumnStrategy, LaneSet, OverlapInfo,
    SameStartSlot,
};
use tracing_subscriber::EnvFilter;

mod request;

use request::LayoutRequest;

/// Lay out a day of calendar events into lanes, columns and rectangles
#[derive(Parser, Debug)]
#[command(name = "timeline")]
#[command(version, about, long_about = None)]
struct Args {
    /// Log engine decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full layout (rectangles, lanes, now indicator) as JSON
    Layout {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print per-lane overlap columns without geometry
    Overlaps {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Request JSON file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Day to lay out (YYYY-MM-DD); overrides the request's "date"
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Current time (YYYY-MM-DDTHH:MM:SS, or "now" for the local clock)
    #[arg(long)]
    now: Option<String>,

    /// Column assignment for overlapping events
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Greedy,
    Sweep,
}

impl From<StrategyArg> for ColumnStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => ColumnStrategy::GreedyFirstFit,
            StrategyArg::Sweep => ColumnStrategy::SweepLine,
        }
    }
}

#[derive(Serialize)]
struct LaneOverlaps<'a> {
    lane_id: &'a str,
    events: Vec<EventOverlap<'a>>,
}

#[derive(Serialize)]
struct EventOverlap<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    title: &'a str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    overlap: OverlapInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    same_start: Option<SameStartSlot>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Layout { input } => run_layout(&input),
        Command::Overlaps { input } => run_overlaps(&input),
    }
}

/// Load the request and apply command-line overrides.
fn prepare(input: &InputArgs) -> Result<(LayoutRequest, NaiveDate)> {
    let mut request = LayoutRequest::load(input.input.as_deref())?;

    if let Some(now) = &input.now {
        request.options.now = Some(parse_now(now)?);
    }
    if let Some(strategy) = input.strategy {
        request.options.strategy = strategy.into();
    }

    let date = input
        .date
        .or(request.date)
        .unwrap_or_else(|| Local::now().date_naive());
    tracing::debug!(%date, events = request.events.len(), "loaded request");

    Ok((request, date))
}

fn parse_now(s: &str) -> Result<NaiveDateTime> {
    if s.eq_ignore_ascii_case("now") {
        return Ok(Local::now().naive_local());
    }
    s.parse::<NaiveDateTime>()
        .with_context(|| format!("invalid --now value: {s}"))
}

fn run_layout(input: &InputArgs) -> Result<()> {
    let (request, date) = prepare(input)?;
    let result = layout_with_options(
        &request.events,
        date,
        &request.lanes,
        request.viewport,
        request.visible_hours,
        &request.options,
    )
    .context("layout failed")?;
    print_json(&result, input.pretty)
}

fn run_overlaps(input: &InputArgs) -> Result<()> {
    let (request, date) = prepare(input)?;
    let lane_set = LaneSet::new(request.lanes.clone()).context("invalid lanes")?;
    let partitioned = partition(
        request.events.iter().filter(|e| e.start().date() == date),
        &lane_set,
    );

    let lanes: Vec<LaneOverlaps<'_>> = partitioned
        .lanes()
        .map(|(lane_id, _, events)| LaneOverlaps {
            lane_id,
            events: resolve_lane(events, date, request.options.strategy)
                .into_iter()
                .map(|p| EventOverlap {
                    id: p.event.id(),
                    title: p.event.title(),
                    start: p.event.start(),
                    end: p.event.end(),
                    overlap: p.overlap,
                    same_start: p.same_start,
                })
                .collect(),
        })
        .collect();

    print_json(&lanes, input.pretty)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
