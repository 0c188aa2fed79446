//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each iteration draws (only when something changed), waits up to 250ms for
//! a terminal event, drains every pending terminal event, then drains channel
//! events from the socket task. Every handler runs to completion before the
//! next one; the socket task never touches `App`.

mod component;
mod components;
mod event;
mod gesture;
mod grid;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::connection::{ChannelEvent, ConnectionManager};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::session::Phase;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputEvent, InputLine, MessageLogState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::gesture::GestureTracker;
use crate::tui::grid::Grid;

const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub grid: Grid,
    pub url: String,
    pub login_input: InputLine,
    pub chat_input: InputLine,
    pub message_log: MessageLogState,
    pub gestures: GestureTracker,
}

impl TuiState {
    pub fn new(grid: Grid, url: String) -> Self {
        Self {
            grid,
            url,
            login_input: InputLine::new(),
            chat_input: InputLine::new(),
            message_log: MessageLogState::new(),
            gestures: GestureTracker::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Map one terminal event to at most one core action, updating
/// presentation state (inputs, scroll, gestures) along the way.
pub fn dispatch(tui: &mut TuiState, app: &App, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::ToggleMaximize => Some(Action::ToggleMaximize),
        TuiEvent::Resize(cols, rows) => Some(Action::ViewportResized(tui.grid.viewport(cols, rows))),
        TuiEvent::MouseDown(col, row) => tui.gestures.press(app, &tui.grid, col, row),
        TuiEvent::MouseDrag(col, row) => tui.gestures.drag(&tui.grid, col, row),
        TuiEvent::MouseUp(col, row) => tui.gestures.release(&tui.grid, col, row),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_log.handle_event(&event);
            None
        }
        _ => match app.session.phase {
            Phase::AwaitingName => match tui.login_input.handle_event(&event)? {
                InputEvent::Submit(name) => {
                    if !app.channel_open {
                        // Names are refused until the channel opens; keep it for another try.
                        tui.login_input.restore(name.clone());
                    }
                    Some(Action::SubmitName(name))
                }
                InputEvent::ContentChanged => None,
            },
            Phase::Connected => match tui.chat_input.handle_event(&event)? {
                InputEvent::Submit(line) => {
                    // Follow the conversation after sending.
                    tui.message_log.offset_from_bottom = 0;
                    Some(Action::SubmitMessage(line))
                }
                InputEvent::ContentChanged => None,
            },
            Phase::Disconnected => None,
        },
    }
}

fn channel_action(event: ChannelEvent) -> Action {
    match event {
        ChannelEvent::Opened => Action::ChannelOpened,
        ChannelEvent::Message(text) => Action::MessageReceived(text),
        ChannelEvent::Closed => Action::ChannelClosed,
    }
}

/// Run `update` and perform the resulting effect. Returns true on quit.
fn apply(app: &mut App, connection: &ConnectionManager, action: Action) -> bool {
    debug!("Applying {:?}", action);
    match update(app, action) {
        Effect::None => false,
        Effect::Send(text) => {
            if !connection.send(text) {
                warn!("Outbound payload dropped: channel is {:?}", connection.state());
            }
            false
        }
        Effect::Quit => true,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
        .ok();

    let grid = Grid::new(config.cell_size);
    let size = terminal.size()?;
    let viewport = grid.viewport(size.width, size.height);
    info!("Viewport {}x{} px ({}x{} cells)", viewport.width, viewport.height, size.width, size.height);

    let mut app = App::new(viewport, &config);
    let mut tui = TuiState::new(grid, config.url.clone());

    let (tx, rx) = mpsc::channel();
    let mut connection = ConnectionManager::connect(config.url.clone(), tx);

    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if let Some(action) = dispatch(&mut tui, &app, event)
                && apply(&mut app, &connection, action)
            {
                should_quit = true;
                break;
            }
        }

        while let Ok(event) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", event);
            connection.handle_event(&event);
            if apply(&mut app, &connection, channel_action(event)) {
                should_quit = true;
            }
        }
    }

    info!("Shutting down");
    connection.close();
    ratatui::restore();
    Ok(())
}
