//! Average mood across the week.

use crate::dataset::WeekDataset;
use crate::types::Slot;

/// Mood values of every recorded slot, day by day in date order.
///
/// Empty slots and records without a usable mood are skipped, never counted
/// as zero.
pub fn mood_values(dataset: &WeekDataset) -> Vec<u8> {
    collect_moods(dataset.slots())
}

/// Mean mood rounded to one decimal, or `None` when nothing has a mood.
pub fn average_mood(dataset: &WeekDataset) -> Option<f64> {
    mean_rounded(&mood_values(dataset))
}

pub(crate) fn collect_moods<'a>(slots: impl IntoIterator<Item = &'a Slot>) -> Vec<u8> {
    slots
        .into_iter()
        .filter_map(|slot| slot.as_ref().and_then(|r| r.mood))
        .collect()
}

pub(crate) fn mean_rounded(values: &[u8]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u32 = values.iter().map(|&v| v as u32).sum();
    let mean = sum as f64 / values.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SlotRecord;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn slot(mood: Option<u8>) -> Slot {
        Some(SlotRecord {
            activity: "Study".to_string(),
            category: "Education/Lecture".to_string(),
            mood,
        })
    }

    fn dataset(days: Vec<Vec<Slot>>) -> WeekDataset {
        let start = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let map: BTreeMap<_, _> = days
            .into_iter()
            .enumerate()
            .map(|(i, slots)| (start + chrono::Duration::days(i as i64), slots))
            .collect();
        WeekDataset::from_days(map)
    }

    #[test]
    fn test_average_of_three() {
        let data = dataset(vec![
            vec![slot(Some(3)), None, None],
            vec![None, slot(Some(5))],
            vec![slot(Some(7))],
        ]);
        assert_eq!(mood_values(&data), vec![3, 5, 7]);
        assert_eq!(average_mood(&data), Some(5.0));
    }

    #[test]
    fn test_all_absent_has_no_average() {
        let data = dataset(vec![vec![None; 14]; 7]);
        assert_eq!(average_mood(&data), None);
        assert_eq!(average_mood(&WeekDataset::default()), None);
    }

    #[test]
    fn test_missing_moods_are_excluded() {
        let data = dataset(vec![vec![slot(Some(8)), slot(None), slot(Some(9))]]);
        assert_eq!(average_mood(&data), Some(8.5));
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        let data = dataset(vec![vec![slot(Some(7)), slot(Some(8)), slot(Some(8))]]);
        // 23 / 3 = 7.666...
        assert_eq!(average_mood(&data), Some(7.7));

        let data = dataset(vec![vec![slot(Some(1)), slot(Some(1)), slot(Some(2))]]);
        // 4 / 3 = 1.333...
        assert_eq!(average_mood(&data), Some(1.3));
    }
}
