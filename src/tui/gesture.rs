//! Pointer gestures on the floating panels.
//!
//! A press picks a target (title row, maximize button, resize handle). Moves
//! stream `Drag` actions; a resize is reported once, on release, as the total
//! pointer delta.

use crate::core::action::Action;
use crate::core::geometry::Panel;
use crate::core::state::App;
use crate::tui::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Dragging a panel; `grab` is the pointer offset from the panel origin.
    Move { panel: Panel, grab: (i32, i32) },
    /// Resizing the chat window from its bottom-right handle.
    Resize { start: (i32, i32) },
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    active: Option<Gesture>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Gesture> {
        self.active
    }

    /// Start a gesture. Returns an action for instant gestures (maximize button).
    pub fn press(&mut self, app: &App, grid: &Grid, col: u16, row: u16) -> Option<Action> {
        self.active = None;
        let (c, r) = (i32::from(col), i32::from(row));
        let pointer = grid.pointer(col, row);

        // Login panel sits on top while visible.
        if app.show_login() {
            let login = grid.cells(app.login_panel.bounds);
            if login.title_contains(c, r, false) {
                let b = app.login_panel.bounds;
                self.active = Some(Gesture::Move {
                    panel: Panel::Login,
                    grab: (pointer.0 - b.x, pointer.1 - b.y),
                });
                return None;
            }
            if login.contains(c, r) {
                return None;
            }
        }

        let chat = grid.cells(app.chat_window.bounds);
        if chat.maximize_button_contains(c, r) {
            return Some(Action::ToggleMaximize);
        }
        if app.chat_window.maximized {
            return None;
        }
        if chat.resize_handle_contains(c, r) {
            self.active = Some(Gesture::Resize { start: pointer });
        } else if chat.title_contains(c, r, true) {
            let b = app.chat_window.bounds;
            self.active = Some(Gesture::Move {
                panel: Panel::Chat,
                grab: (pointer.0 - b.x, pointer.1 - b.y),
            });
        }
        None
    }

    pub fn drag(&self, grid: &Grid, col: u16, row: u16) -> Option<Action> {
        match self.active? {
            Gesture::Move { panel, grab } => {
                let (px, py) = grid.pointer(col, row);
                Some(Action::Drag {
                    panel,
                    x: px - grab.0,
                    y: py - grab.1,
                })
            }
            Gesture::Resize { .. } => None,
        }
    }

    pub fn release(&mut self, grid: &Grid, col: u16, row: u16) -> Option<Action> {
        match self.active.take()? {
            Gesture::Resize { start } => {
                let (px, py) = grid.pointer(col, row);
                let (dw, dh) = (px - start.0, py - start.1);
                (dw != 0 || dh != 0).then_some(Action::Resize { dw, dh })
            }
            Gesture::Move { .. } => None,
        }
    }
}
