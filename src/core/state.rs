//! # Application State
//!
//! Core business state for chatterm. Domain logic only, no TUI types.
//! Presentation state (input buffers, scroll, gestures) lives in `tui`.
//!
//! ```text
//! App
//! ├── session: Session          // name, phase, message log
//! ├── chat_window: ChatWindow   // movable, resizable, maximizable
//! ├── login_panel: LoginPanel   // movable only
//! ├── viewport: Viewport        // page size in pixels
//! ├── channel_open: bool        // last lifecycle event was Opened
//! └── local_echo: bool          // append our own lines to the log
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::geometry::{ChatWindow, LoginPanel, Viewport};
use crate::core::session::{Phase, Session};

pub struct App {
    pub session: Session,
    pub chat_window: ChatWindow,
    pub login_panel: LoginPanel,
    pub viewport: Viewport,
    pub channel_open: bool,
    pub local_echo: bool,
}

impl App {
    /// Both panels are placed once, from the viewport at startup.
    pub fn new(viewport: Viewport, config: &ResolvedConfig) -> Self {
        Self {
            session: Session::new(),
            chat_window: ChatWindow::centered(
                viewport,
                config.window_size,
                config.min_window_size,
            ),
            login_panel: LoginPanel::centered(viewport),
            viewport,
            channel_open: false,
            local_echo: config.local_echo,
        }
    }

    pub fn status_line(&self) -> String {
        match self.session.phase {
            Phase::AwaitingName if self.channel_open => "Enter a name".to_string(),
            Phase::AwaitingName => "Connecting...".to_string(),
            Phase::Connected => match &self.session.display_name {
                Some(name) => format!("Connected as {name}"),
                None => "Connected".to_string(),
            },
            Phase::Disconnected => "Disconnected".to_string(),
        }
    }

    pub fn show_login(&self) -> bool {
        self.session.phase == Phase::AwaitingName
    }
}
