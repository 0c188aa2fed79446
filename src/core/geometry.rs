//! # Window Geometry
//!
//! Position and size of the two floating panels, in pixels.
//!
//! ```text
//! ChatWindow                       LoginPanel
//! ├── bounds: Bounds               └── bounds: Bounds (fixed 400×200)
//! ├── maximized: bool
//! ├── saved: Option<Bounds>   // Some only while maximized
//! └── min_width / min_height  // floors, never violated
//! ```
//!
//! Nothing here clamps to the viewport. A panel dragged off-screen stays
//! off-screen; only the initial placement is pinned to the top-left corner.

use log::debug;

pub const DEFAULT_CHAT_WIDTH: i32 = 768;
pub const DEFAULT_CHAT_HEIGHT: i32 = 600;
pub const MIN_CHAT_WIDTH: i32 = 400;
pub const MIN_CHAT_HEIGHT: i32 = 300;
pub const LOGIN_WIDTH: i32 = 400;
pub const LOGIN_HEIGHT: i32 = 200;

/// Visible page area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounds of the given size centered in the viewport, never at negative coordinates.
    pub fn centered(viewport: Viewport, width: i32, height: i32) -> Self {
        Self {
            x: ((viewport.width - width) / 2).max(0),
            y: ((viewport.height - height) / 2).max(0),
            width,
            height,
        }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Which floating panel a drag gesture targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chat,
    Login,
}

/// The main chat window: movable, resizable, maximizable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatWindow {
    pub bounds: Bounds,
    pub maximized: bool,
    saved: Option<Bounds>,
    min_width: i32,
    min_height: i32,
}

impl ChatWindow {
    /// Place a window of the default size centered in `viewport`.
    pub fn centered(viewport: Viewport, size: (i32, i32), min: (i32, i32)) -> Self {
        let (min_width, min_height) = min;
        let width = size.0.max(min_width);
        let height = size.1.max(min_height);
        Self {
            bounds: Bounds::centered(viewport, width, height),
            maximized: false,
            saved: None,
            min_width,
            min_height,
        }
    }

    pub fn saved(&self) -> Option<Bounds> {
        self.saved
    }

    pub fn min_size(&self) -> (i32, i32) {
        (self.min_width, self.min_height)
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        if self.maximized {
            return;
        }
        self.bounds.x = x;
        self.bounds.y = y;
    }

    /// Grow or shrink by a delta, floored at the minimum size.
    pub fn resize_by(&mut self, dx: i32, dy: i32) {
        if self.maximized {
            debug!("Ignoring resize while maximized");
            return;
        }
        self.bounds.width = self.bounds.width.saturating_add(dx).max(self.min_width);
        self.bounds.height = self.bounds.height.saturating_add(dy).max(self.min_height);
    }

    pub fn toggle_maximize(&mut self, viewport: Viewport) {
        if self.maximized {
            if let Some(saved) = self.saved.take() {
                self.bounds = saved;
            }
            self.maximized = false;
        } else {
            self.saved = Some(self.bounds);
            self.bounds = self.fill(viewport);
            self.maximized = true;
        }
        debug!(
            "Chat window maximized={} bounds={:?}",
            self.maximized, self.bounds
        );
    }

    /// A maximized window tracks the viewport; a normal one stays put.
    pub fn on_viewport_resized(&mut self, viewport: Viewport) {
        if self.maximized {
            self.bounds = self.fill(viewport);
        }
    }

    fn fill(&self, viewport: Viewport) -> Bounds {
        Bounds::new(
            0,
            0,
            viewport.width.max(self.min_width),
            viewport.height.max(self.min_height),
        )
    }
}

/// The login prompt: fixed size, movable only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPanel {
    pub bounds: Bounds,
}

impl LoginPanel {
    pub fn centered(viewport: Viewport) -> Self {
        Self {
            bounds: Bounds::centered(viewport, LOGIN_WIDTH, LOGIN_HEIGHT),
        }
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }
}
