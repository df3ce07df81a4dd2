//! Week-level summary: totals, per-day breakdown and category shares.
//!
//! Drives the category legend in the TUI and the `--summary` output.

use chrono::NaiveDate;
use serde::Serialize;

use super::mood::{collect_moods, mean_rounded};
use crate::dataset::{ScreenTimeSeries, WeekDataset};
use crate::grid::{GridConfig, SLOT_MINUTES};
use crate::types::Category;

/// Hours covered by one slot.
const SLOT_HOURS: f64 = SLOT_MINUTES as f64 / 60.0;

/// Recorded time for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub slots: usize,
    pub hours: f64,
}

/// Recorded slots per category, in legend order.
///
/// Every category is listed, including those with no slots. Records with a
/// label outside the closed set count towards [`Category::Other`].
pub fn category_breakdown(dataset: &WeekDataset) -> Vec<CategoryShare> {
    Category::ALL
        .iter()
        .map(|&category| {
            let slots = dataset
                .slots()
                .flatten()
                .filter(|r| r.category() == category)
                .count();
            CategoryShare {
                category,
                slots,
                hours: slots as f64 * SLOT_HOURS,
            }
        })
        .collect()
}

/// One column of the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub label: String,
    pub date: Option<NaiveDate>,
    pub recorded_slots: usize,
    pub tracked_hours: f64,
    pub average_mood: Option<f64>,
}

/// Aggregate statistics for the whole week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    /// First date of the week
    pub week_start: Option<NaiveDate>,
    pub average_mood: Option<f64>,
    pub recorded_slots: usize,
    pub tracked_hours: f64,
    pub days: Vec<DaySummary>,
    pub screen_time_hours: f64,
    pub unproductive_hours: f64,
    pub categories: Vec<CategoryShare>,
}

impl WeekSummary {
    pub fn build(dataset: &WeekDataset, series: &ScreenTimeSeries, config: &GridConfig) -> Self {
        let days: Vec<DaySummary> = config
            .weekdays()
            .iter()
            .enumerate()
            .map(|(index, label)| match dataset.day(index) {
                Some((date, slots)) => {
                    let recorded_slots = slots.iter().flatten().count();
                    DaySummary {
                        label: label.clone(),
                        date: Some(date),
                        recorded_slots,
                        tracked_hours: recorded_slots as f64 * SLOT_HOURS,
                        average_mood: mean_rounded(&collect_moods(slots)),
                    }
                }
                None => DaySummary {
                    label: label.clone(),
                    date: None,
                    recorded_slots: 0,
                    tracked_hours: 0.0,
                    average_mood: None,
                },
            })
            .collect();

        let recorded_slots = dataset.slots().flatten().count();

        Self {
            week_start: dataset.first_date(),
            average_mood: super::average_mood(dataset),
            recorded_slots,
            tracked_hours: recorded_slots as f64 * SLOT_HOURS,
            days,
            screen_time_hours: series.days().iter().map(|d| d.total).sum(),
            unproductive_hours: series.days().iter().map(|d| d.unproductive).sum(),
            categories: category_breakdown(dataset),
        }
    }

    /// Category with the most recorded slots, if anything was recorded.
    pub fn top_category(&self) -> Option<&CategoryShare> {
        self.categories
            .iter()
            .filter(|c| c.slots > 0)
            .max_by_key(|c| c.slots)
    }

    /// Day with the most recorded slots (earliest wins ties).
    pub fn busiest_day(&self) -> Option<&DaySummary> {
        self.days
            .iter()
            .filter(|d| d.recorded_slots > 0)
            .fold(None, |best: Option<&DaySummary>, day| match best {
                Some(b) if b.recorded_slots >= day.recorded_slots => Some(b),
                _ => Some(day),
            })
    }

    /// Share of screen time spent on unproductive apps, in 0..=1.
    pub fn unproductive_share(&self) -> f64 {
        if self.screen_time_hours <= 0.0 {
            0.0
        } else {
            self.unproductive_hours / self.screen_time_hours
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScreenTimeDay, Slot, SlotRecord};
    use std::collections::BTreeMap;

    fn slot(category: &str, mood: u8) -> Slot {
        Some(SlotRecord {
            activity: "Something".to_string(),
            category: category.to_string(),
            mood: Some(mood),
        })
    }

    fn dataset() -> WeekDataset {
        let start = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let mut days = BTreeMap::new();
        for i in 0..7 {
            let mut slots = vec![None; 14];
            if i == 1 {
                slots[0] = slot("Work/Internship", 6);
                slots[1] = slot("Work/Internship", 8);
                slots[2] = slot("Napping", 9);
            }
            if i == 4 {
                slots[5] = slot("Travel", 3);
            }
            days.insert(start + chrono::Duration::days(i), slots);
        }
        WeekDataset::from_days(days)
    }

    #[test]
    fn test_category_breakdown() {
        let shares = category_breakdown(&dataset());
        assert_eq!(shares.len(), Category::ALL.len());

        let work = shares
            .iter()
            .find(|s| s.category == Category::WorkInternship)
            .unwrap();
        assert_eq!(work.slots, 2);
        assert_eq!(work.hours, 1.0);

        // Unknown label folds into Other
        let other = shares.iter().find(|s| s.category == Category::Other).unwrap();
        assert_eq!(other.slots, 1);

        let food = shares
            .iter()
            .find(|s| s.category == Category::FoodPreparation)
            .unwrap();
        assert_eq!(food.slots, 0);
    }

    #[test]
    fn test_week_summary() {
        let summary = WeekSummary::build(
            &dataset(),
            &ScreenTimeSeries::default(),
            &GridConfig::default(),
        );

        assert_eq!(summary.recorded_slots, 4);
        assert_eq!(summary.tracked_hours, 2.0);
        assert_eq!(summary.average_mood, Some(6.5));
        assert_eq!(summary.days.len(), 7);
        assert_eq!(summary.days[1].label, "Thu");
        assert_eq!(summary.days[1].average_mood, Some(7.7));
        assert_eq!(summary.days[0].average_mood, None);
        assert_eq!(summary.busiest_day().unwrap().label, "Thu");
        assert_eq!(
            summary.top_category().unwrap().category,
            Category::WorkInternship
        );
        assert!((summary.screen_time_hours - 19.1).abs() < 1e-9);
        assert!(summary.unproductive_share() > 0.0);
    }

    #[test]
    fn test_empty_week_summary() {
        let zero = vec![
            ScreenTimeDay {
                day: "X".to_string(),
                total: 0.0,
                unproductive: 0.0,
            };
            7
        ];
        let summary = WeekSummary::build(
            &WeekDataset::default(),
            &ScreenTimeSeries::new(zero).unwrap(),
            &GridConfig::default(),
        );
        assert_eq!(summary.average_mood, None);
        assert!(summary.busiest_day().is_none());
        assert!(summary.top_category().is_none());
        assert_eq!(summary.unproductive_share(), 0.0);
        assert_eq!(summary.days.len(), 7);
    }
}
