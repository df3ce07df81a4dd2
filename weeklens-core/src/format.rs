//! Formatting helpers shared across UIs.

/// Average mood as shown in the mood widget, e.g. "6.8 / 10".
///
/// A week with no moods shows a dash instead of a number.
pub fn format_mood_score(average: Option<f64>) -> String {
    match average {
        Some(avg) => format!("{:.1} / 10", avg),
        None => "— / 10".to_string(),
    }
}

/// Mood line of a slot tooltip, e.g. "Mood: 7/10".
pub fn format_slot_mood(mood: Option<u8>) -> String {
    match mood {
        Some(m) => format!("Mood: {}/10", m),
        None => "Mood: —".to_string(),
    }
}

/// Hours with at most one decimal, e.g. "2.5h", "4h".
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}h", rounded)
    } else {
        format!("{:.1}h", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mood_score() {
        assert_eq!(format_mood_score(Some(5.0)), "5.0 / 10");
        assert_eq!(format_mood_score(Some(6.76)), "6.8 / 10");
        assert_eq!(format_mood_score(None), "— / 10");
    }

    #[test]
    fn test_format_slot_mood() {
        assert_eq!(format_slot_mood(Some(7)), "Mood: 7/10");
        assert_eq!(format_slot_mood(None), "Mood: —");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(4.0), "4h");
        assert_eq!(format_hours(2.5), "2.5h");
        assert_eq!(format_hours(19.1), "19.1h");
        assert_eq!(format_hours(0.0), "0h");
    }
}
