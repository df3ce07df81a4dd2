//! UI rendering for the dashboard.

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use weeklens_core::format::{format_hours, format_mood_score, format_slot_mood};
use weeklens_core::{CellRef, ChatRole, Rgb};

use crate::app::{App, Focus};

// ========== Colors ==========

/// Border color for the week grid
const BORDER_GRID: Color = Color::Rgb(100, 140, 200);
/// Border color for the screen-time chart
const BORDER_SCREEN: Color = Color::Rgb(0, 150, 150);
/// Border color for the mood widget
const BORDER_MOOD: Color = Color::Rgb(180, 100, 180);
/// Border color for the chat panel
const BORDER_CHAT: Color = Color::Rgb(80, 160, 80);
/// Border color of the panel with keyboard focus
const BORDER_FOCUSED: Color = Color::Yellow;
/// Total screen time bars
const BAR_TOTAL: Color = Color::Rgb(99, 102, 241);
/// Unproductive screen time bars
const BAR_UNPRODUCTIVE: Color = Color::Rgb(239, 68, 68);
/// Label color for axis and day headers
const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Dim gray for secondary text
const DIM: Color = Color::Rgb(128, 128, 128);
/// User chat prefix
const CHAT_USER: Color = Color::Cyan;
/// Assistant chat prefix
const CHAT_ASSISTANT: Color = Color::Rgb(220, 180, 0);

/// Width of the time axis left of the grid.
const AXIS_WIDTH: u16 = 4;

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // Header
        Constraint::Min(10),   // Grid and side panels
        Constraint::Length(3), // Category legend
        Constraint::Length(1), // Footer
    ])
    .split(frame.area());

    render_header(frame, app, chunks[0]);

    let body = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_grid(frame, app, body[0]);

    let side = Layout::vertical([
        Constraint::Length(12), // Screen time
        Constraint::Length(5),  // Mood
        Constraint::Min(6),     // Chat
    ])
    .split(body[1]);
    render_screen_time(frame, app, side[0]);
    render_mood(frame, app, side[1]);
    render_chat(frame, app, side[2]);

    render_legend(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    // Overlay goes last so it sits on top of everything else
    render_tooltip(frame, app);
}

/// Render the header with title and week.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Week in Review",
        Style::default().fg(Color::Cyan).bold(),
    )];
    if let Some(start) = app.week_start {
        spans.push(Span::styled(
            format!("  week of {}", start.format("%b %-d, %Y")),
            Style::default().fg(DIM),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn panel(title: &str, color: Color, focused: bool) -> Block<'_> {
    let border = if focused { BORDER_FOCUSED } else { color };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(border).bold())
}

/// Render the week grid and record where each cell landed.
fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel(" This Week ", BORDER_GRID, app.focus == Focus::Grid);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.cell_areas.clear();

    let rows = app.grid.max_rows();
    let columns = app.grid.columns().len() as u16;
    let column_width = inner.width.saturating_sub(AXIS_WIDTH) / columns.max(1);
    if rows == 0 || column_width < 2 || inner.height < 2 {
        let message = if rows == 0 {
            "No activity recorded"
        } else {
            "Window too small"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(DIM))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let cell_height = ((inner.height - 1) / rows as u16).clamp(1, 2);
    let grid_top = inner.y + 1;
    let grid_bottom = inner.y + inner.height;
    let marked = app.cursor.or(app.hovered());

    // Day headers
    for (index, column) in app.grid.columns().iter().enumerate() {
        let x = inner.x + AXIS_WIDTH + index as u16 * column_width;
        let header = Paragraph::new(column.label.as_str())
            .style(Style::default().fg(LABEL_COLOR).bold())
            .alignment(Alignment::Center);
        frame.render_widget(header, Rect::new(x, inner.y, column_width - 1, 1));
    }

    // Time axis
    for (index, label) in app.grid.config().axis_labels() {
        let y = grid_top + index as u16 * cell_height;
        if y >= grid_bottom {
            break;
        }
        let axis = Paragraph::new(label)
            .style(Style::default().fg(DIM))
            .alignment(Alignment::Right);
        frame.render_widget(axis, Rect::new(inner.x, y, AXIS_WIDTH - 1, 1));
    }

    let mut cell_areas = Vec::with_capacity(rows * columns as usize);
    for (day, column) in app.grid.columns().iter().enumerate() {
        let x = inner.x + AXIS_WIDTH + day as u16 * column_width;
        for (slot, cell) in column.cells.iter().enumerate() {
            let y = grid_top + slot as u16 * cell_height;
            if y + cell_height > grid_bottom {
                break;
            }
            let rect = Rect::new(x, y, column_width - 1, cell_height);
            let at = CellRef::new(day, slot);
            let style = Style::default().bg(rgb(cell.color));

            if marked == Some(at) {
                let marker = Paragraph::new("◆")
                    .style(style.fg(Color::White))
                    .alignment(Alignment::Center);
                frame.render_widget(marker, rect);
            } else {
                frame.render_widget(Block::default().style(style), rect);
            }
            cell_areas.push((at, rect));
        }
    }

    app.cell_areas = cell_areas;
    app.reanchor_tooltip();
}

/// Render total and unproductive screen time as two overlapping bars per day.
fn render_screen_time(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel(" Screen Time ", BORDER_SCREEN, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Scale, chart, day labels, legend
    let chart_height = inner.height.saturating_sub(3) as usize;
    let day_count = app.screen_time.len().max(1);
    let slot_width = (inner.width as usize / day_count).max(2);
    let bar_width = (slot_width - 1).clamp(1, 4);
    let padding = slot_width - bar_width;

    let mut lines = vec![Line::from(Span::styled(
        format!("max {}", format_hours(app.max_screen_time)),
        Style::default().fg(DIM),
    ))];

    let heights: Vec<(usize, usize)> = app
        .screen_time
        .iter()
        .map(|bar| {
            (
                (bar.total_fraction * chart_height as f64).round() as usize,
                (bar.unproductive_fraction * chart_height as f64).round() as usize,
            )
        })
        .collect();

    for row in 0..chart_height {
        let level = chart_height - row;
        let mut spans = Vec::with_capacity(heights.len() * 2);
        for &(total, unproductive) in &heights {
            let color = if level <= unproductive {
                Some(BAR_UNPRODUCTIVE)
            } else if level <= total {
                Some(BAR_TOTAL)
            } else {
                None
            };
            let bar = match color {
                Some(color) => Span::styled("█".repeat(bar_width), Style::default().fg(color)),
                None => Span::raw(" ".repeat(bar_width)),
            };
            spans.push(bar);
            spans.push(Span::raw(" ".repeat(padding)));
        }
        lines.push(Line::from(spans));
    }

    let labels: Vec<Span> = app
        .screen_time
        .iter()
        .map(|bar| {
            Span::styled(
                format!("{:<width$}", bar.label, width = slot_width),
                Style::default().fg(LABEL_COLOR),
            )
        })
        .collect();
    lines.push(Line::from(labels));

    lines.push(Line::from(vec![
        Span::styled("■", Style::default().fg(BAR_TOTAL)),
        Span::raw(" Total Screen Time  "),
        Span::styled("■", Style::default().fg(BAR_UNPRODUCTIVE)),
        Span::raw(" Unproductive Apps"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the average mood score.
fn render_mood(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel(" Average Mood ", BORDER_MOOD, false);

    let color = match app.average_mood {
        Some(m) if m >= 7.0 => Color::Green,
        Some(m) if m >= 4.0 => Color::Yellow,
        Some(_) => Color::Red,
        None => DIM,
    };
    let detail = match app.rated_slots {
        0 => "no moods recorded".to_string(),
        1 => "from 1 rated slot".to_string(),
        n => format!("from {} rated slots", n),
    };

    let lines = vec![
        Line::from(Span::styled(
            format_mood_score(app.average_mood),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(detail, Style::default().fg(DIM))),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render the chat log and input line.
fn render_chat(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Chat;
    let block = panel(" Ask About Your Week ", BORDER_CHAT, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(inner);
    render_chat_log(frame, app, chunks[0]);
    render_chat_input(frame, app, chunks[1]);
}

fn render_chat_log(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if app.chat.messages().is_empty() && !app.chat.is_pending() {
        lines.push(Line::from(Span::styled(
            "Ask anything about this week's activities.",
            Style::default().fg(DIM).add_modifier(Modifier::ITALIC),
        )));
    }

    for message in app.chat.messages() {
        let (prefix, color) = match message.role {
            ChatRole::User => ("You: ", CHAT_USER),
            ChatRole::Assistant => ("Assistant: ", CHAT_ASSISTANT),
        };
        lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(color).bold()),
            Span::raw(message.content.clone()),
        ]));
    }

    if let Some(waited) = app.chat.pending_for() {
        let mut spans = vec![
            Span::styled("Assistant: ", Style::default().fg(CHAT_ASSISTANT).bold()),
            loading_dots(app.animation_frame),
        ];
        if let Some(label) = waiting_label(waited) {
            spans.push(Span::styled(format!("  {label}"), Style::default().fg(DIM)));
        }
        lines.push(Line::from(spans));
    }

    // Keep the newest message in view. The row count comes from the same
    // word wrapping the paragraph renders with.
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(area.width);
    let scroll = rows.saturating_sub(usize::from(area.height));
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(paragraph.scroll((scroll, 0)), area);
}

/// Seconds spent waiting on the assistant, once it is long enough to notice.
fn waiting_label(waited: Duration) -> Option<String> {
    let secs = waited.as_secs();
    (secs >= 1).then(|| format!("{secs}s"))
}

/// Three dots, one more lit every few ticks.
fn loading_dots(frame: u64) -> Span<'static> {
    let lit = ((frame / 3) % 3) as usize + 1;
    let dots: Vec<&str> = (0..3).map(|i| if i < lit { "●" } else { "○" }).collect();
    Span::styled(dots.join(" "), Style::default().fg(DIM))
}

fn render_chat_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Chat;
    let pending = app.chat.is_pending();
    let border = if focused && !pending {
        BORDER_FOCUSED
    } else {
        DIM
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));

    let visible = area.width.saturating_sub(3) as usize;
    let line = if pending {
        Line::from(Span::styled(
            "Waiting for a reply...",
            Style::default().fg(DIM),
        ))
    } else if app.chat.draft().is_empty() && !focused {
        Line::from(Span::styled(
            "Ask a question... (Tab to type)",
            Style::default().fg(DIM),
        ))
    } else {
        // Show the tail of long drafts
        let draft = app.chat.draft();
        let chars = draft.chars().count();
        let shown: String = draft.chars().skip(chars.saturating_sub(visible)).collect();
        let mut spans = vec![Span::raw(shown)];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(BORDER_FOCUSED)));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
    app.chat_input_area = Some(area);
}

/// Render category colors with the time recorded for each.
fn render_legend(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.grid.config().palette();
    let mut spans = Vec::with_capacity(app.categories.len() * 3);

    for share in &app.categories {
        spans.push(Span::styled(
            "■ ",
            Style::default().fg(rgb(palette.color(share.category))),
        ));
        spans.push(Span::raw(share.category.as_str()));
        let hours = if share.slots > 0 {
            format!(" {}   ", format_hours(share.hours))
        } else {
            "   ".to_string()
        };
        spans.push(Span::styled(hours, Style::default().fg(DIM)));
    }

    let legend = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(DIM)));
    frame.render_widget(legend, area);
}

/// Render the footer with key hints for the focused panel.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let spans = match app.focus {
        Focus::Grid => vec![
            Span::styled("←↓↑→/hjkl", key),
            Span::raw(" move  "),
            Span::styled("mouse", key),
            Span::raw(" hover  "),
            Span::styled("Tab", key),
            Span::raw(" chat  "),
            Span::styled("Esc", key),
            Span::raw(" clear  "),
            Span::styled("q", key),
            Span::raw(" quit"),
        ],
        Focus::Chat => vec![
            Span::styled("Enter", key),
            Span::raw(" send  "),
            Span::styled("Tab/Esc", key),
            Span::raw(" grid  "),
            Span::styled("Ctrl-C", key),
            Span::raw(" quit"),
        ],
    };

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

/// Render the slot tooltip with its bottom edge centered on the anchor point.
fn render_tooltip(frame: &mut Frame, app: &App) {
    let Some((content, x, y)) = app.tooltip.visible() else {
        return;
    };

    let lines = vec![
        Line::from(Span::styled(
            content.activity.clone(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!("{} · {}", content.day, content.time),
            Style::default().fg(LABEL_COLOR),
        )),
        Line::from(Span::styled(
            format_slot_mood(content.mood),
            Style::default().fg(DIM),
        )),
    ];

    let screen = frame.area();
    let text_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as i32;
    let width = (text_width + 4).min(i32::from(screen.width));
    let height = (lines.len() as i32 + 2).min(i32::from(screen.height));

    let min_x = i32::from(screen.x);
    let min_y = i32::from(screen.y);
    let left = (x - width / 2).clamp(min_x, (i32::from(screen.right()) - width).max(min_x));
    let top = (y - height + 1).clamp(min_y, (i32::from(screen.bottom()) - height).max(min_y));
    let rect = Rect::new(left as u16, top as u16, width as u16, height as u16);

    let tooltip = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::White))
            .padding(ratatui::widgets::Padding::horizontal(1)),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(tooltip, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::{KeyModifiers, MouseEvent, MouseEventKind};
    use ratatui::{backend::TestBackend, Terminal};
    use std::collections::BTreeMap;
    use weeklens_core::{GridConfig, ScreenTimeSeries, SlotRecord, WeekDataset};

    fn sample_app() -> App {
        let mut days = BTreeMap::new();
        for d in 0..7u32 {
            let mut slots = vec![None; 14];
            if d == 1 {
                slots[13] = Some(SlotRecord {
                    activity: "Morning run".to_string(),
                    category: "Personal Development".to_string(),
                    mood: Some(8),
                });
            }
            days.insert(NaiveDate::from_ymd_opt(2025, 10, 15 + d).unwrap(), slots);
        }
        App::new(
            &WeekDataset::from_days(days),
            &ScreenTimeSeries::default(),
            GridConfig::default(),
            "Sorry, something went wrong.",
        )
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_lays_out_every_cell() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        assert_eq!(app.cell_areas.len(), 7 * 14);
        assert!(app.chat_input_area.is_some());

        let text = buffer_text(&terminal);
        assert!(text.contains("Week in Review"));
        assert!(text.contains("week of Oct 15, 2025"));
        assert!(text.contains("8.0 / 10"));
        assert!(text.contains("Personal Development"));
        assert!(text.contains("Unproductive Apps"));
    }

    #[test]
    fn test_render_tooltip_after_hover() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let (_, rect) = *app
            .cell_areas
            .iter()
            .find(|(cell, _)| *cell == CellRef::new(1, 13))
            .unwrap();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: rect.x,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        });
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Morning run"));
        assert!(text.contains("Thu · 6:30 AM"));
        assert!(text.contains("Mood: 8/10"));
    }

    #[test]
    fn test_render_pending_chat() {
        let mut app = sample_app();
        app.chat.submit("what did I do on Thursday?");
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Waiting for a reply"));
        assert!(text.contains("● ○ ○"));
    }

    #[test]
    fn test_chat_log_scrolls_to_last_reply() {
        let mut app = sample_app();
        // Words too long to share a row, so every reply wraps word by word
        let long_reply = vec!["abcdefghijklmnopqrstuv"; 6].join(" ");
        for question in ["monday?", "tuesday?", "wednesday?"] {
            let request = app.chat.submit(question).unwrap();
            app.chat.resolve(request.id(), Ok(long_reply.clone()));
        }
        let request = app.chat.submit("and today?").unwrap();
        app.chat.resolve(request.id(), Ok("FINALREPLY".to_string()));

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("FINALREPLY"));
        assert!(text.contains("and today?"));
        assert!(!text.contains("monday?"));
    }

    #[test]
    fn test_waiting_label() {
        assert_eq!(waiting_label(Duration::from_millis(400)), None);
        assert_eq!(waiting_label(Duration::from_millis(3_200)), Some("3s".to_string()));
        assert_eq!(waiting_label(Duration::from_secs(75)), Some("75s".to_string()));
    }

    #[test]
    fn test_loading_dots_cycle() {
        assert_eq!(loading_dots(0).content, "● ○ ○");
        assert_eq!(loading_dots(3).content, "● ● ○");
        assert_eq!(loading_dots(6).content, "● ● ●");
        assert_eq!(loading_dots(9).content, "● ○ ○");
    }

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb(Rgb::new(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
