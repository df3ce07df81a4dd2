//! The week grid: seven day columns of half-hour cells.
//!
//! The grid is a pure projection of a [`WeekDataset`] through a [`GridConfig`].
//! It keeps no interaction state; pointer input is turned into [`GridEvent`]s
//! that the caller forwards to a [`TooltipController`](crate::tooltip::TooltipController).

use chrono::NaiveDate;

use crate::dataset::{WeekDataset, DAYS_PER_WEEK};
use crate::palette::{CategoryPalette, Rgb};
use crate::types::Slot;

/// Length of one slot in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Grid shape, labels and colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    weekdays: Vec<String>,
    day_start_minutes: u32,
    slots_per_day: usize,
    palette: CategoryPalette,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            weekdays: ["Wed", "Thu", "Fri", "Sat", "Sun", "Mon", "Tue"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            day_start_minutes: 0,
            slots_per_day: 14,
            palette: CategoryPalette::default(),
        }
    }
}

impl GridConfig {
    pub fn new(
        weekdays: Vec<String>,
        day_start_minutes: u32,
        slots_per_day: usize,
        palette: CategoryPalette,
    ) -> Self {
        Self {
            weekdays,
            day_start_minutes,
            slots_per_day,
            palette,
        }
    }

    pub fn weekdays(&self) -> &[String] {
        &self.weekdays
    }

    pub fn day_start_minutes(&self) -> u32 {
        self.day_start_minutes
    }

    pub fn slots_per_day(&self) -> usize {
        self.slots_per_day
    }

    pub fn palette(&self) -> &CategoryPalette {
        &self.palette
    }

    /// Start time of a slot, e.g. "6:30 AM".
    pub fn time_label(&self, index: usize) -> String {
        time_label(self.day_start_minutes, index)
    }

    /// Compact hour labels for the time axis: `(slot index, "12a")` for every
    /// slot that starts on a whole hour.
    pub fn axis_labels(&self) -> Vec<(usize, String)> {
        (0..self.slots_per_day)
            .filter_map(|index| {
                let minutes = self.day_start_minutes + index as u32 * SLOT_MINUTES;
                (minutes % 60 == 0).then(|| (index, axis_label(minutes)))
            })
            .collect()
    }
}

/// Format the start of slot `index` as a 12-hour clock time.
///
/// Hour 0 displays as 12, hours past noon drop 12.
pub fn time_label(day_start_minutes: u32, index: usize) -> String {
    let total = day_start_minutes + index as u32 * SLOT_MINUTES;
    let hours = (total / 60) % 24;
    let minutes = total % 60;
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display_hours = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hours, minutes, period)
}

fn axis_label(minutes: u32) -> String {
    let hours = (minutes / 60) % 24;
    let suffix = if hours >= 12 { "p" } else { "a" };
    let display_hours = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}{}", display_hours, suffix)
}

/// Position of a cell: column (day) and row (slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub day: usize,
    pub slot: usize,
}

impl CellRef {
    pub fn new(day: usize, slot: usize) -> Self {
        Self { day, slot }
    }
}

/// Details raised when a recorded slot is hovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverEvent {
    pub activity: String,
    pub mood: Option<u8>,
    /// Slot start time, e.g. "9:30 AM"
    pub time: String,
    /// Weekday label of the column
    pub day: String,
}

/// Pointer events raised by the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    Hover(HoverEvent),
    Leave,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub slot: Slot,
    pub color: Rgb,
}

/// One day of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub label: String,
    /// Source date, `None` when the dataset has fewer days than columns
    pub date: Option<NaiveDate>,
    pub cells: Vec<GridCell>,
}

/// Seven columns of colored cells built from a week of data.
#[derive(Debug, Clone)]
pub struct TimeSlotGrid {
    config: GridConfig,
    columns: Vec<DayColumn>,
}

impl TimeSlotGrid {
    /// Project a dataset onto the grid.
    ///
    /// Always yields seven columns. Column `i` takes the `i`-th date in
    /// ascending order and renders exactly the slots recorded for it, so a
    /// malformed dataset shows short or empty columns instead of shifting days.
    pub fn new(dataset: &WeekDataset, config: GridConfig) -> Self {
        let columns = (0..DAYS_PER_WEEK)
            .map(|index| {
                let label = config.weekdays.get(index).cloned().unwrap_or_default();
                let (date, cells) = match dataset.day(index) {
                    Some((date, slots)) => (
                        Some(date),
                        slots
                            .iter()
                            .map(|slot| GridCell {
                                slot: slot.clone(),
                                color: config.palette.slot_color(slot),
                            })
                            .collect(),
                    ),
                    None => (None, Vec::new()),
                };
                DayColumn { label, date, cells }
            })
            .collect();

        Self { config, columns }
    }

    pub fn columns(&self) -> &[DayColumn] {
        &self.columns
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Longest column, in cells.
    pub fn max_rows(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }

    pub fn cell(&self, at: CellRef) -> Option<&GridCell> {
        self.columns.get(at.day)?.cells.get(at.slot)
    }

    /// Hover a cell. Returns `None` for empty slots and positions off the grid.
    pub fn hover(&self, at: CellRef) -> Option<GridEvent> {
        let column = self.columns.get(at.day)?;
        let record = column.cells.get(at.slot)?.slot.as_ref()?;

        Some(GridEvent::Hover(HoverEvent {
            activity: record.activity.clone(),
            mood: record.mood,
            time: self.config.time_label(at.slot),
            day: column.label.clone(),
        }))
    }

    /// The pointer left a cell.
    pub fn leave(&self) -> GridEvent {
        GridEvent::Leave
    }
}
