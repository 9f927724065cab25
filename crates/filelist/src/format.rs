//! Display formatting for sizes, FILETIME timestamps, and aggregates.
//!
//! Everything on the size and time path stays in integer arithmetic so that
//! values beyond 2^53 render exactly.

mod size;
mod time;

pub use size::{aggregate_size, format_record_size, format_size, sum_sizes};
pub use time::{
    filetime_to_datetime, format_date, FormattedDate, EPOCH_DIFFERENCE, MAX_SAFE_MILLISECONDS,
    TICKS_PER_MILLISECOND,
};

/// Rendered for absent values and zero aggregates.
pub const PLACEHOLDER: &str = "\u{2014}";
