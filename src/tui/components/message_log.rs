//! # MessageLog Component
//!
//! Scrollable view of the session's message log.
//!
//! `MessageLog` is a transient component (created each frame) that wraps
//! `&'a mut MessageLogState` (persistent state) and the log entries (props).
//!
//! Scrolling is measured from the bottom: an offset of 0 keeps the newest
//! line visible as messages arrive.
//!
//! Every view opens with a fixed banner. It is drawn ahead of the log
//! entries and never stored in the session log.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::session::{Message, MessageKind};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PAGE_LINES: usize = 10;

pub const BANNER: [&str; 2] = ["System initialized...", "Welcome to chatterm"];

/// Must be persisted in the parent TuiState.
#[derive(Debug, Default)]
pub struct MessageLogState {
    /// Wrapped lines scrolled up from the bottom
    pub offset_from_bottom: usize,
    /// Last rendered (total lines, visible height), for clamping between frames
    last_layout: (usize, usize),
}

impl MessageLogState {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_offset(&self) -> usize {
        let (total, height) = self.last_layout;
        total.saturating_sub(height)
    }

    fn scroll_up(&mut self, lines: usize) {
        self.offset_from_bottom = (self.offset_from_bottom + lines).min(self.max_offset());
    }

    fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }
}

impl EventHandler for MessageLogState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_up(1),
            TuiEvent::ScrollDown => self.scroll_down(1),
            TuiEvent::ScrollPageUp => self.scroll_up(PAGE_LINES),
            TuiEvent::ScrollPageDown => self.scroll_down(PAGE_LINES),
            TuiEvent::ScrollToBottom => self.offset_from_bottom = 0,
            _ => return None,
        }
        Some(())
    }
}

pub struct MessageLog<'a> {
    pub state: &'a mut MessageLogState,
    pub messages: &'a [Message],
}

impl<'a> MessageLog<'a> {
    pub fn new(state: &'a mut MessageLogState, messages: &'a [Message]) -> Self {
        Self { state, messages }
    }
}

/// Wrap every message to `width`, preserving order. Empty messages keep one blank line.
pub fn wrap_messages(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }
    for message in messages {
        let style = message_style(message.kind);
        let wrapped = textwrap::wrap(&message.text, width);
        if wrapped.is_empty() {
            lines.push(Line::styled(String::new(), style));
        }
        for piece in wrapped {
            lines.push(Line::styled(piece.into_owned(), style));
        }
    }
    lines
}

/// Banner lines followed by the wrapped log.
pub fn log_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }
    for text in BANNER {
        for piece in textwrap::wrap(text, width) {
            lines.push(Line::styled(piece.into_owned(), Style::default().fg(Color::LightGreen)));
        }
    }
    lines.extend(wrap_messages(messages, width));
    lines
}

fn message_style(kind: MessageKind) -> Style {
    match kind {
        MessageKind::System => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
        MessageKind::Relayed => Style::default().fg(Color::Green),
    }
}

impl Component for MessageLog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = log_lines(self.messages, area.width as usize);
        let height = area.height as usize;
        self.state.last_layout = (lines.len(), height);
        self.state.offset_from_bottom = self.state.offset_from_bottom.min(self.state.max_offset());

        let end = lines.len() - self.state.offset_from_bottom;
        let start = end.saturating_sub(height);
        let visible: Vec<Line> = lines[start..end].to_vec();
        frame.render_widget(Paragraph::new(visible), area);
    }
}
