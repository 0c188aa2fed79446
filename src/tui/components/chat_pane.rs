//! # ChatPane Component
//!
//! The floating "terminal window": a bordered block at the chat window's
//! geometry, holding the message log and an input row.
//!
//! ```text
//! ┌ chatterm ────────────────────────[□]┐
//! │ Connected to server...              │
//! │ hello from the relay                │
//! │> _                                  │
//! └ Connected as neo ──────────────────◢┘
//! ```
//!
//! Follows the transient wrapper pattern: created each frame with borrowed
//! state, like `MessageLog`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::session::Phase;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::input_line::InputLine;
use crate::tui::components::message_log::{MessageLog, MessageLogState};
use crate::tui::grid::Grid;

pub struct ChatPane<'a> {
    pub app: &'a App,
    pub grid: &'a Grid,
    pub log_state: &'a mut MessageLogState,
    pub input: &'a InputLine,
    /// Whether the input row owns the terminal cursor
    pub focused: bool,
}

impl Component for ChatPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let cells = self.grid.cells(self.app.chat_window.bounds);
        let Some(visible) = cells.clip(area) else {
            return;
        };

        let border_style = Style::default().fg(Color::Green);
        let button = if self.app.chat_window.maximized {
            "[▣]"
        } else {
            "[□]"
        };
        let block = Block::bordered()
            .border_type(BorderType::Plain)
            .border_style(border_style)
            .title_top(Line::from(" chatterm ").left_aligned())
            .title_top(Line::from(button).right_aligned())
            .title_bottom(Line::from(format!(" {} ", self.app.status_line())).left_aligned());

        frame.render_widget(Clear, visible);
        let inner = block.inner(visible);
        frame.render_widget(block, visible);

        // Resize handle on the bottom-right corner, when it's on screen.
        if !self.app.chat_window.maximized
            && visible.right() as i32 == cells.right()
            && visible.bottom() as i32 == cells.bottom()
        {
            let corner = Rect::new(visible.right() - 1, visible.bottom() - 1, 1, 1);
            frame.render_widget(Paragraph::new("◢").style(border_style), corner);
        }

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let log_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let input_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);

        MessageLog::new(self.log_state, self.app.session.log.entries()).render(frame, log_area);

        match self.app.session.phase {
            Phase::Connected => self.input.render(frame, input_area, "> ", self.focused),
            Phase::AwaitingName => {}
            Phase::Disconnected => {
                let notice = Paragraph::new("Connection closed. Restart to reconnect.").style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                );
                frame.render_widget(notice, input_area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn draw(app: &App, terminal: &mut Terminal<TestBackend>) {
        let grid = Grid::new((8, 16));
        let mut log_state = MessageLogState::new();
        let input = InputLine::new();
        terminal
            .draw(|f| {
                ChatPane {
                    app,
                    grid: &grid,
                    log_state: &mut log_state,
                    input: &input,
                    focused: true,
                }
                .render(f, f.area())
            })
            .unwrap();
    }

    #[test]
    fn test_renders_log_and_status() {
        let mut app = test_app();
        update(&mut app, Action::ChannelOpened);
        update(&mut app, Action::SubmitName("neo".to_string()));
        update(&mut app, Action::MessageReceived("wake up".to_string()));

        let mut terminal = Terminal::new(TestBackend::new(128, 48)).unwrap();
        draw(&app, &mut terminal);

        let text = screen_text(&terminal);
        assert!(text.contains("chatterm"));
        assert!(text.contains("System initialized..."));
        assert!(text.contains("[□]"));
        assert!(text.contains("Connected to server..."));
        assert!(text.contains("wake up"));
        assert!(text.contains("Connected as neo"));
        assert!(text.contains('◢'));
    }

    #[test]
    fn test_window_is_placed_from_geometry() {
        let app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(128, 48)).unwrap();
        draw(&app, &mut terminal);

        // Top-left corner of the window at cell (16, 5).
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(16, 5)].symbol(), "┌");
        assert_eq!(buffer[(15, 5)].symbol(), " ");
    }

    #[test]
    fn test_disconnected_notice() {
        let mut app = test_app();
        update(&mut app, Action::ChannelOpened);
        update(&mut app, Action::SubmitName("neo".to_string()));
        update(&mut app, Action::ChannelClosed);

        let mut terminal = Terminal::new(TestBackend::new(128, 48)).unwrap();
        draw(&app, &mut terminal);

        let text = screen_text(&terminal);
        assert!(text.contains("Disconnected from server..."));
        assert!(text.contains("Restart to reconnect"));
    }

    #[test]
    fn test_offscreen_window_draws_nothing() {
        let mut app = test_app();
        update(&mut app, Action::Drag { panel: crate::core::geometry::Panel::Chat, x: -5000, y: 0 });

        let mut terminal = Terminal::new(TestBackend::new(128, 48)).unwrap();
        draw(&app, &mut terminal);
        assert!(!screen_text(&terminal).contains("chatterm"));
    }

    #[test]
    fn test_maximized_button_glyph() {
        let mut app = test_app();
        update(&mut app, Action::ToggleMaximize);

        let mut terminal = Terminal::new(TestBackend::new(128, 48)).unwrap();
        draw(&app, &mut terminal);
        let text = screen_text(&terminal);
        assert!(text.contains("[▣]"));
        assert!(!text.contains('◢'));
    }
}
