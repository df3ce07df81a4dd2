//! Single transient tooltip driven by grid pointer events.

use crate::grid::{GridEvent, HoverEvent};

/// Gap between the tooltip and the top edge of the hovered cell.
pub const DEFAULT_TOOLTIP_OFFSET: i32 = 10;

/// Screen-space bounding box of a hovered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// What the tooltip shows and where.
///
/// `(x, y)` is the bottom-center point of the tooltip box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub x: i32,
    pub y: i32,
    pub content: Option<HoverEvent>,
}

/// Owns the one tooltip. A new hover replaces whatever was showing.
#[derive(Debug, Clone)]
pub struct TooltipController {
    state: TooltipState,
    offset: i32,
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new(DEFAULT_TOOLTIP_OFFSET)
    }
}

impl TooltipController {
    /// Controller placing tooltips `offset` units above the hovered cell.
    pub fn new(offset: i32) -> Self {
        Self {
            state: TooltipState::default(),
            offset,
        }
    }

    /// Show the tooltip centered just above `anchor`.
    pub fn on_hover(&mut self, event: &HoverEvent, anchor: AnchorRect) {
        self.state = TooltipState {
            visible: true,
            x: anchor.left + anchor.width / 2,
            y: anchor.top - self.offset,
            content: Some(event.clone()),
        };
    }

    pub fn on_leave(&mut self) {
        self.state = TooltipState::default();
    }

    /// Apply a grid event.
    pub fn handle(&mut self, event: &GridEvent, anchor: AnchorRect) {
        match event {
            GridEvent::Hover(hover) => self.on_hover(hover, anchor),
            GridEvent::Leave => self.on_leave(),
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    /// Content and position when the tooltip should be drawn.
    pub fn visible(&self) -> Option<(&HoverEvent, i32, i32)> {
        match (&self.state.visible, &self.state.content) {
            (true, Some(content)) => Some((content, self.state.x, self.state.y)),
            _ => None,
        }
    }
}
