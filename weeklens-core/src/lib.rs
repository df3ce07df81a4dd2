//! # weeklens-core
//!
//! Core library for weeklens - a terminal week-in-review dashboard.
//!
//! This library provides:
//! - Domain types for slots, categories, screen time and chat messages
//! - Loading and validation of the week data and screen-time inputs
//! - The slot grid, its color palette and the tooltip it drives
//! - Aggregates: average mood, screen-time bar heights, week summary
//! - The chat state machine and the remote assistant client
//! - Configuration management and logging infrastructure
//!
//! ## Data flow
//!
//! The [`WeekDataset`] feeds the [`TimeSlotGrid`] and the [`analytics`]
//! module independently. The grid turns pointer positions into
//! [`GridEvent`]s for the [`TooltipController`]. The [`ChatSession`] is
//! independent of both and only talks to the network through
//! [`AssistantClient`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use weeklens_core::{Config, TimeSlotGrid, WeekDataset};
//!
//! let config = Config::load().expect("failed to load config");
//! let grid_config = config.grid_config().expect("invalid grid config");
//!
//! let dataset = WeekDataset::load(&config.dataset.week_data_path(), &grid_config)
//!     .expect("failed to load week data");
//! let grid = TimeSlotGrid::new(&dataset, grid_config);
//! assert_eq!(grid.columns().len(), 7);
//! ```

// Re-export commonly used items at the crate root
pub use chat::{AssistantClient, ChatRequest, ChatRequestState, ChatSession};
pub use config::Config;
pub use dataset::{ScreenTimeSeries, WeekDataset};
pub use error::{Error, Result};
pub use grid::{CellRef, GridConfig, GridEvent, HoverEvent, TimeSlotGrid};
pub use palette::{CategoryPalette, Rgb};
pub use tooltip::{AnchorRect, TooltipController, TooltipState};
pub use types::*;

// Public modules
pub mod analytics;
pub mod chat;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod grid;
pub mod logging;
pub mod palette;
pub mod tooltip;
pub mod types;
