//! Aggregate statistics derived from the week data.
//!
//! - [`mood`]: average mood across recorded slots
//! - [`screen_time`]: bar heights normalized against the busiest day
//! - [`summary`]: per-day and per-category totals for the legend and
//!   the `--summary` report
//!
//! Everything here is pure and guards its divisions: an empty week yields
//! `None` / zero instead of NaN.

pub mod mood;
pub mod screen_time;
pub mod summary;

pub use mood::{average_mood, mood_values};
pub use screen_time::{max_total, normalized_height, screen_time_bars, ScreenTimeBar};
pub use summary::{category_breakdown, CategoryShare, DaySummary, WeekSummary};
