//! Error types for timeline-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid lane count: {0} (expected 0 or 2-10 lanes)")]
    LaneCount(usize),

    #[error("Duplicate lane id: {0}")]
    DuplicateLane(String),

    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("Invalid visible hours: {start}..{end} (expected start < end <= 24)")]
    InvalidHours { start: u32, end: u32 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
