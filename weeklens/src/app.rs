//! Application state and input handling for the dashboard.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use weeklens_core::analytics::{
    category_breakdown, max_total, mood_values, screen_time_bars, CategoryShare, ScreenTimeBar,
};
use weeklens_core::{
    AnchorRect, CellRef, ChatRequest, ChatSession, GridConfig, ScreenTimeSeries, TimeSlotGrid,
    TooltipController, WeekDataset,
};

use crate::chat_worker::ChatReply;

/// Rows between the tooltip and the hovered cell.
const TOOLTIP_OFFSET: i32 = 1;

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Chat,
}

/// Application state.
pub struct App {
    pub grid: TimeSlotGrid,
    pub tooltip: TooltipController,
    pub chat: ChatSession,
    pub week_start: Option<NaiveDate>,
    pub screen_time: Vec<ScreenTimeBar>,
    /// Largest daily total, the top of the screen-time scale
    pub max_screen_time: f64,
    pub average_mood: Option<f64>,
    /// Number of slots carrying a mood
    pub rated_slots: usize,
    pub categories: Vec<CategoryShare>,
    pub focus: Focus,
    /// Keyboard cursor on the grid
    pub cursor: Option<CellRef>,
    /// Cell currently under the pointer or cursor
    hovered: Option<CellRef>,
    /// Screen area of every drawn cell, refreshed on each render
    pub cell_areas: Vec<(CellRef, Rect)>,
    pub chat_input_area: Option<Rect>,
    /// Request waiting to be handed to the chat worker
    outgoing: Option<ChatRequest>,
    pub animation_frame: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        dataset: &WeekDataset,
        screen_time: &ScreenTimeSeries,
        grid_config: GridConfig,
        fallback_message: &str,
    ) -> Self {
        Self {
            grid: TimeSlotGrid::new(dataset, grid_config),
            tooltip: TooltipController::new(TOOLTIP_OFFSET),
            chat: ChatSession::new(fallback_message),
            week_start: dataset.first_date(),
            screen_time: screen_time_bars(screen_time.days()),
            max_screen_time: max_total(screen_time.days()),
            average_mood: weeklens_core::analytics::average_mood(dataset),
            rated_slots: mood_values(dataset).len(),
            categories: category_breakdown(dataset),
            focus: Focus::Grid,
            cursor: None,
            hovered: None,
            cell_areas: Vec::new(),
            chat_input_area: None,
            outgoing: None,
            animation_frame: 0,
            should_quit: false,
        }
    }

    /// Advance the loading animation. Called once per loop iteration.
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn hovered(&self) -> Option<CellRef> {
        self.hovered
    }

    /// Request submitted since the last call, if any.
    pub fn take_outgoing(&mut self) -> Option<ChatRequest> {
        self.outgoing.take()
    }

    /// Apply a reply from the chat worker.
    pub fn on_chat_reply(&mut self, reply: ChatReply) {
        self.chat.resolve(reply.request_id, reply.outcome);
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Grid => self.handle_grid_key(key),
            Focus::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Char('c') => {
                self.focus = Focus::Chat;
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Esc => {
                self.cursor = None;
                self.set_hovered(None);
            }
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = Focus::Grid;
            }
            KeyCode::Enter => self.submit_chat(),
            KeyCode::Backspace => self.chat.backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.chat.push_char(c);
            }
            _ => {}
        }
    }

    fn submit_chat(&mut self) {
        if let Some(request) = self.chat.submit_draft() {
            self.outgoing = Some(request);
        }
    }

    /// Handle mouse input: pointer movement hovers cells, clicks move focus.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let at = self.cell_at(mouse.column, mouse.row);
                self.set_hovered(at);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self
                    .chat_input_area
                    .is_some_and(|area| contains(area, mouse.column, mouse.row))
                {
                    self.focus = Focus::Chat;
                } else if let Some(at) = self.cell_at(mouse.column, mouse.row) {
                    self.focus = Focus::Grid;
                    self.cursor = Some(at);
                    self.set_hovered(Some(at));
                }
            }
            _ => {}
        }
    }

    /// Cell drawn at a screen position.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<CellRef> {
        self.cell_areas
            .iter()
            .find(|(_, area)| contains(*area, column, row))
            .map(|(cell, _)| *cell)
    }

    /// Move the keyboard cursor, placing it on the first cell if unset.
    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let columns = self.grid.columns().len();
        let rows = self.grid.max_rows();
        if columns == 0 || rows == 0 {
            return;
        }

        let next = match self.cursor {
            None => CellRef::new(0, 0),
            Some(at) => CellRef::new(
                at.day.saturating_add_signed(dx).min(columns - 1),
                at.slot.saturating_add_signed(dy).min(rows - 1),
            ),
        };
        self.cursor = Some(next);
        self.set_hovered(Some(next));
    }

    /// Move the pointer to a cell (or off the grid).
    ///
    /// Leaving a cell always clears the tooltip; entering a recorded cell
    /// shows it. Entering an empty cell changes nothing.
    fn set_hovered(&mut self, at: Option<CellRef>) {
        if self.hovered == at {
            return;
        }

        if self.hovered.take().is_some() {
            let leave = self.grid.leave();
            self.tooltip.handle(&leave, AnchorRect::default());
        }

        if let Some(cell) = at {
            self.hovered = Some(cell);
            self.show_tooltip_for(cell);
        }
    }

    /// Show the tooltip for a recorded cell, but only once it has been drawn.
    fn show_tooltip_for(&mut self, cell: CellRef) {
        let Some(anchor) = self.anchor_for(cell) else {
            return;
        };
        if let Some(event) = self.grid.hover(cell) {
            self.tooltip.handle(&event, anchor);
        }
    }

    /// Re-place the tooltip after the cells were laid out again.
    ///
    /// A hovered cell that no longer fits on screen hides the tooltip.
    pub fn reanchor_tooltip(&mut self) {
        let Some(cell) = self.hovered else {
            return;
        };
        if self.anchor_for(cell).is_some() {
            self.show_tooltip_for(cell);
        } else if self.tooltip.visible().is_some() {
            let leave = self.grid.leave();
            self.tooltip.handle(&leave, AnchorRect::default());
        }
    }

    fn anchor_for(&self, cell: CellRef) -> Option<AnchorRect> {
        self.cell_areas
            .iter()
            .find(|(c, _)| *c == cell)
            .map(|(_, area)| AnchorRect {
                left: i32::from(area.x),
                top: i32::from(area.y),
                width: i32::from(area.width),
                height: i32::from(area.height),
            })
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
