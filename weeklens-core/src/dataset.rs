//! Loading the week data and screen-time series.
//!
//! Both inputs are read once at startup and never mutated afterwards.
//!
//! Week data is a JSON object keyed by ISO-8601 date, each value an array of
//! slots (`null` or `{activity, category, mood}`). Shape problems inside a
//! slot degrade gracefully; problems with the week itself (wrong number of
//! days, gaps, wrong first weekday, wrong slot count) are rejected by
//! [`WeekDataset::validate`] so that columns never silently map to the wrong
//! weekday.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::grid::GridConfig;
use crate::types::{ScreenTimeDay, Slot, SlotRecord};

/// Number of days in a tracked week.
pub const DAYS_PER_WEEK: usize = 7;

/// Slot as it appears on disk, before mood sanitizing.
#[derive(Debug, Deserialize)]
struct RawSlot {
    #[serde(default)]
    activity: String,
    #[serde(default = "default_category")]
    category: String,
    #[serde(default)]
    mood: Option<serde_json::Value>,
}

fn default_category() -> String {
    "Other".to_string()
}

/// Whole-number mood in 1..=10. `7` and `7.0` are the same score.
fn whole_mood(value: &serde_json::Value) -> Option<u8> {
    let mood = value.as_f64()?;
    (mood.is_finite() && mood.fract() == 0.0 && (1.0..=10.0).contains(&mood))
        .then_some(mood as u8)
}

impl RawSlot {
    fn into_record(self, date: NaiveDate, index: usize) -> SlotRecord {
        let mood = match self.mood {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => match whole_mood(&value) {
                Some(m) => Some(m),
                None => {
                    tracing::warn!(
                        %date,
                        slot = index,
                        mood = %value,
                        "Ignoring mood that is not a whole number in 1..=10"
                    );
                    None
                }
            },
        };

        SlotRecord {
            activity: self.activity,
            category: self.category,
            mood,
        }
    }
}

/// One week of classified half-hour slots, keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekDataset {
    days: BTreeMap<NaiveDate, Vec<Slot>>,
}

impl WeekDataset {
    /// Build a dataset from already-parsed days. No validation is performed.
    pub fn from_days(days: BTreeMap<NaiveDate, Vec<Slot>>) -> Self {
        Self { days }
    }

    /// Parse week data JSON without checking the week's shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<Option<RawSlot>>> = serde_json::from_str(json)?;

        let mut days = BTreeMap::new();
        for (key, slots) in raw {
            let date = NaiveDate::parse_from_str(&key, "%Y-%m-%d")
                .map_err(|e| Error::Dataset(format!("invalid date key {:?}: {}", key, e)))?;

            let slots = slots
                .into_iter()
                .enumerate()
                .map(|(index, slot)| slot.map(|s| s.into_record(date, index)))
                .collect();
            days.insert(date, slots);
        }

        Ok(Self { days })
    }

    /// Read, parse and validate a week data file.
    pub fn load(path: &Path, config: &GridConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Dataset(format!("failed to read week data {}: {}", path.display(), e))
        })?;
        let dataset = Self::from_json(&content)?;
        dataset.validate(config)?;

        let unknown = dataset
            .slots()
            .flatten()
            .filter(|r| !r.has_known_category())
            .count();
        if unknown > 0 {
            tracing::warn!(
                count = unknown,
                "Slots with unknown categories will use the Other color"
            );
        }

        tracing::info!(
            path = %path.display(),
            first = ?dataset.first_date(),
            recorded = dataset.slots().flatten().count(),
            "Loaded week data"
        );
        Ok(dataset)
    }

    /// Check that the dates form exactly the configured week.
    ///
    /// Requires seven consecutive dates, each with `slots_per_day` entries.
    /// When the first weekday label names a weekday ("Wed", "Monday"), the
    /// first date must fall on it.
    pub fn validate(&self, config: &GridConfig) -> Result<()> {
        if self.days.len() != DAYS_PER_WEEK {
            return Err(Error::Dataset(format!(
                "expected {} dates, found {}",
                DAYS_PER_WEEK,
                self.days.len()
            )));
        }

        let dates: Vec<NaiveDate> = self.days.keys().copied().collect();
        for pair in dates.windows(2) {
            if pair[0].succ_opt() != Some(pair[1]) {
                return Err(Error::Dataset(format!(
                    "dates are not consecutive: {} is followed by {}",
                    pair[0], pair[1]
                )));
            }
        }

        if let Some(label) = config.weekdays().first() {
            if let Ok(expected) = label.parse::<Weekday>() {
                let first = dates[0];
                if first.weekday() != expected {
                    return Err(Error::Dataset(format!(
                        "week must start on {} but {} is a {}",
                        expected,
                        first,
                        first.weekday()
                    )));
                }
            }
        }

        for (date, slots) in &self.days {
            if slots.len() != config.slots_per_day() {
                return Err(Error::Dataset(format!(
                    "{} has {} slots, expected {}",
                    date,
                    slots.len(),
                    config.slots_per_day()
                )));
            }
        }

        Ok(())
    }

    /// Days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[Slot])> {
        self.days.iter().map(|(d, s)| (*d, s.as_slice()))
    }

    /// The `index`-th day in ascending date order.
    pub fn day(&self, index: usize) -> Option<(NaiveDate, &[Slot])> {
        self.days().nth(index)
    }

    /// All slots, day by day in date order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.days.values().flatten()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Daily screen time, one record per tracked day.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenTimeSeries {
    days: Vec<ScreenTimeDay>,
}

impl Default for ScreenTimeSeries {
    fn default() -> Self {
        let days = [
            ("T", 2.5, 0.4),
            ("W", 3.3, 1.8),
            ("T", 1.8, 0.1),
            ("F", 2.4, 0.6),
            ("S", 2.5, 0.9),
            ("S", 2.5, 1.0),
            ("M", 4.1, 1.9),
        ]
        .iter()
        .map(|&(day, total, unproductive)| ScreenTimeDay {
            day: day.to_string(),
            total,
            unproductive,
        })
        .collect();

        Self { days }
    }
}

impl ScreenTimeSeries {
    /// Validate and wrap a series.
    pub fn new(days: Vec<ScreenTimeDay>) -> Result<Self> {
        if days.len() != DAYS_PER_WEEK {
            return Err(Error::ScreenTime(format!(
                "expected {} days, found {}",
                DAYS_PER_WEEK,
                days.len()
            )));
        }

        for day in &days {
            if !day.total.is_finite() || !day.unproductive.is_finite() {
                return Err(Error::ScreenTime(format!(
                    "{}: hours must be finite numbers",
                    day.day
                )));
            }
            if day.total < 0.0 || day.unproductive < 0.0 {
                return Err(Error::ScreenTime(format!(
                    "{}: hours must not be negative",
                    day.day
                )));
            }
            if day.unproductive > day.total {
                return Err(Error::ScreenTime(format!(
                    "{}: unproductive hours ({}) exceed total ({})",
                    day.day, day.unproductive, day.total
                )));
            }
        }

        Ok(Self { days })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let days: Vec<ScreenTimeDay> = serde_json::from_str(json)?;
        Self::new(days)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ScreenTime(format!("failed to read {}: {}", path.display(), e))
        })?;
        let series = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), "Loaded screen time series");
        Ok(series)
    }

    pub fn days(&self) -> &[ScreenTimeDay] {
        &self.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn week_json(start: NaiveDate, days: usize, slots: usize) -> String {
        let mut map = serde_json::Map::new();
        for offset in 0..days {
            let date = start + chrono::Duration::days(offset as i64);
            let mut day = vec![serde_json::Value::Null; slots];
            if slots > 0 {
                day[0] = json!({"activity": "Sleep", "category": "Other", "mood": 5});
            }
            map.insert(date.format("%Y-%m-%d").to_string(), json!(day));
        }
        serde_json::Value::Object(map).to_string()
    }

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
    }

    #[test]
    fn test_valid_week() {
        let dataset = WeekDataset::from_json(&week_json(wednesday(), 7, 14)).unwrap();
        assert!(dataset.validate(&GridConfig::default()).is_ok());
        assert_eq!(dataset.len(), 7);
        assert_eq!(dataset.first_date(), Some(wednesday()));
        assert_eq!(dataset.slots().count(), 7 * 14);
    }

    #[test]
    fn test_wrong_day_count_rejected() {
        let dataset = WeekDataset::from_json(&week_json(wednesday(), 6, 14)).unwrap();
        let err = dataset.validate(&GridConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[test]
    fn test_gap_rejected() {
        let json = json!({
            "2025-10-15": [], "2025-10-16": [], "2025-10-17": [], "2025-10-18": [],
            "2025-10-19": [], "2025-10-20": [], "2025-10-22": []
        });
        let dataset = WeekDataset::from_json(&json.to_string()).unwrap();
        let err = dataset.validate(&GridConfig::default()).unwrap_err();
        assert!(err.to_string().contains("not consecutive"));
    }

    #[test]
    fn test_wrong_first_weekday_rejected() {
        let thursday = wednesday().succ_opt().unwrap();
        let dataset = WeekDataset::from_json(&week_json(thursday, 7, 14)).unwrap();
        let err = dataset.validate(&GridConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Wed"));
    }

    #[test]
    fn test_wrong_slot_count_rejected() {
        let dataset = WeekDataset::from_json(&week_json(wednesday(), 7, 13)).unwrap();
        assert!(dataset.validate(&GridConfig::default()).is_err());
    }

    #[test]
    fn test_bad_date_key() {
        let err = WeekDataset::from_json(r#"{"yesterday": []}"#).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[test]
    fn test_mood_sanitizing() {
        let json = json!({
            "2025-10-15": [
                {"activity": "A", "category": "Travel", "mood": 11},
                {"activity": "B", "category": "Travel", "mood": 0},
                {"activity": "C", "category": "Travel"},
                {"activity": "D", "category": "Travel", "mood": 7.5},
                {"activity": "E", "category": "Travel", "mood": 10},
                null,
                {"activity": "F", "category": "Travel", "mood": 7.0},
                {"activity": "G", "category": "Travel", "mood": "7"},
                {"activity": "H", "category": "Travel", "mood": 10.0}
            ]
        });
        let dataset = WeekDataset::from_json(&json.to_string()).unwrap();
        let moods: Vec<Option<u8>> = dataset
            .slots()
            .map(|s| s.as_ref().and_then(|r| r.mood))
            .collect();
        assert_eq!(
            moods,
            vec![None, None, None, None, Some(10), None, Some(7), None, Some(10)]
        );
        // Records with bad moods are still present
        assert_eq!(dataset.slots().flatten().count(), 8);
    }

    #[test]
    fn test_missing_category_defaults_to_other() {
        let json = json!({"2025-10-15": [{"activity": "Walk", "mood": 6}]});
        let dataset = WeekDataset::from_json(&json.to_string()).unwrap();
        let record = dataset.slots().flatten().next().unwrap();
        assert_eq!(record.category, "Other");
    }

    #[test]
    fn test_default_screen_time_is_valid() {
        let series = ScreenTimeSeries::default();
        assert!(ScreenTimeSeries::new(series.days().to_vec()).is_ok());
        assert_eq!(series.days()[6].total, 4.1);
    }

    #[test]
    fn test_screen_time_invariants() {
        let day = |total: f64, unproductive: f64| ScreenTimeDay {
            day: "X".to_string(),
            total,
            unproductive,
        };

        assert!(ScreenTimeSeries::new(vec![day(1.0, 0.5); 6]).is_err());
        assert!(ScreenTimeSeries::new(vec![day(1.0, 1.5); 7]).is_err());
        assert!(ScreenTimeSeries::new(vec![day(-1.0, 0.0); 7]).is_err());
        assert!(ScreenTimeSeries::new(vec![day(f64::NAN, 0.0); 7]).is_err());
        assert!(ScreenTimeSeries::new(vec![day(0.0, 0.0); 7]).is_ok());
    }

    #[test]
    fn test_screen_time_from_json() {
        let json = r#"[
            {"day": "W", "total": 1, "unproductive": 0.5},
            {"day": "T", "total": 2, "unproductive": 0},
            {"day": "F", "total": 3, "unproductive": 1},
            {"day": "S", "total": 4, "unproductive": 2},
            {"day": "S", "total": 1, "unproductive": 1},
            {"day": "M", "total": 0, "unproductive": 0},
            {"day": "T", "total": 2, "unproductive": 1}
        ]"#;
        let series = ScreenTimeSeries::from_json(json).unwrap();
        assert_eq!(series.days().len(), 7);
        assert_eq!(series.days()[3].total, 4.0);
    }
}
