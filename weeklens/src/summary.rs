//! `--summary` output: the week in plain text or JSON.

use anyhow::Result;
use clap::ValueEnum;
use weeklens_core::analytics::WeekSummary;
use weeklens_core::format::{format_hours, format_mood_score};

/// Output format for `--summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    Text,
    Json,
}

pub fn print(summary: &WeekSummary, format: SummaryFormat) -> Result<()> {
    match format {
        SummaryFormat::Text => {
            print!("{}", render_text(summary));
            Ok(())
        }
        SummaryFormat::Json => print_json(summary),
    }
}

fn print_json(summary: &WeekSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Plain-text report, one section per widget of the dashboard.
pub fn render_text(summary: &WeekSummary) -> String {
    let mut out = String::new();
    let title = match summary.week_start {
        Some(start) => format!("Week in Review: week of {}", start.format("%b %-d, %Y")),
        None => "Week in Review".to_string(),
    };

    out.push('\n');
    out.push_str(&format!("╭{}╮\n", "─".repeat(60)));
    out.push_str(&format!("│{:^60}│\n", title));
    out.push_str(&format!("╰{}╯\n", "─".repeat(60)));
    out.push('\n');

    if summary.recorded_slots == 0 {
        out.push_str("  No activity recorded for this week.\n\n");
    }

    out.push_str("SUMMARY\n");
    out.push_str(&format!(
        "   Average mood: {:<12} Tracked: {}\n",
        format_mood_score(summary.average_mood),
        format_hours(summary.tracked_hours)
    ));
    out.push_str(&format!(
        "   Recorded:     {:<12} Screen time: {}\n",
        format!("{} slots", summary.recorded_slots),
        format_hours(summary.screen_time_hours)
    ));
    out.push_str(&format!(
        "   Unproductive: {} ({:.0}% of screen time)\n",
        format_hours(summary.unproductive_hours),
        summary.unproductive_share() * 100.0
    ));
    out.push('\n');

    out.push_str("DAYS\n");
    for day in &summary.days {
        let date = day
            .date
            .map(|d| d.format("%b %-d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let mood = day
            .average_mood
            .map(|m| format!("mood {:.1}", m))
            .unwrap_or_default();
        out.push_str(&format!(
            "   {:<4} {:<7} {:>5}  {}\n",
            day.label,
            date,
            format_hours(day.tracked_hours),
            mood
        ));
    }
    if let Some(busiest) = summary.busiest_day() {
        out.push_str(&format!("   Busiest day: {}\n", busiest.label));
    }
    out.push('\n');

    let recorded: Vec<_> = summary.categories.iter().filter(|c| c.slots > 0).collect();
    if !recorded.is_empty() {
        out.push_str("CATEGORIES\n");
        for share in recorded {
            out.push_str(&format!(
                "   {:<24} {:>5}\n",
                share.category.as_str(),
                format_hours(share.hours)
            ));
        }
        out.push('\n');
    }

    out
}
