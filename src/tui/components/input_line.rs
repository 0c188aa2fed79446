//! # InputLine Component
//!
//! Single-row text field used by both the login prompt and the chat window.
//!
//! The buffer is internal state. Submitting hands the buffer to the parent
//! and clears it; blank input is never submitted and stays in place.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputLine
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Submit(String),
    ContentChanged,
}

#[derive(Debug, Default)]
pub struct InputLine {
    pub buffer: String,
    /// Cursor position as byte offset in buffer
    pos: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Put back text that was submitted but not accepted, cursor at the end.
    pub fn restore(&mut self, text: String) {
        self.pos = text.len();
        self.buffer = text;
    }

    fn insert_str(&mut self, text: &str) {
        // One line only: pasted newlines become spaces.
        let flat: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        self.buffer.insert_str(self.pos, &flat);
        self.pos += flat.len();
    }

    /// Draw `prompt` followed by the buffer, scrolled so the cursor stays
    /// visible. Places the terminal cursor when `focused`.
    pub fn render(&self, frame: &mut Frame, area: Rect, prompt: &str, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let prompt_width = prompt.width() as u16;
        let available = area.width.saturating_sub(prompt_width.saturating_add(1)) as usize;

        // Drop leading characters until the cursor fits. Widths are measured
        // on the remaining text, since per-char widths do not sum to the
        // width of grapheme clusters such as ZWJ emoji.
        let before = &self.buffer[..self.pos];
        let mut skip = 0;
        while skip < before.len() && before[skip..].width() > available {
            skip = next_char_boundary(before, skip);
        }

        let visible = &self.buffer[skip..];
        let line = Line::from(vec![
            Span::styled(prompt.to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled(visible.to_string(), Style::default().fg(Color::Green)),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        if focused {
            let cursor_col = before[skip..].width() as u16;
            let x = area.x + prompt_width.saturating_add(cursor_col).min(area.width - 1);
            frame.set_cursor_position((x, area.y));
        }
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl EventHandler for InputLine {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(self.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.pos > 0).then(|| {
                self.pos = prev_char_boundary(&self.buffer, self.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.pos < self.buffer.len()).then(|| {
                self.pos = next_char_boundary(&self.buffer, self.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.pos != 0).then(|| {
                self.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.pos != self.buffer.len()).then(|| {
                self.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                self.pos = 0;
                Some(InputEvent::Submit(std::mem::take(&mut self.buffer)))
            }
            _ => None,
        }
    }
}
