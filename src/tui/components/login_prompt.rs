//! # LoginPrompt Component
//!
//! Fixed-size panel asking for a display name. Shown on top of the chat
//! window until the session connects. Draggable by its title row.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::input_line::InputLine;
use crate::tui::grid::Grid;

pub struct LoginPrompt<'a> {
    pub app: &'a App,
    pub grid: &'a Grid,
    pub input: &'a InputLine,
    /// Relay address, shown while the channel is still opening
    pub url: &'a str,
}

impl Component for LoginPrompt<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(visible) = self.grid.cells(self.app.login_panel.bounds).clip(area) else {
            return;
        };

        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Green))
            .title(" login ");

        frame.render_widget(Clear, visible);
        let inner = block.inner(visible);
        frame.render_widget(block, visible);

        let [status_area, _, label_area, input_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let status = if self.app.channel_open {
            "Connection ready.".to_string()
        } else {
            format!("Connecting to {}...", self.url)
        };
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
            status_area,
        );
        frame.render_widget(Paragraph::new("Enter your name:"), label_area);
        self.input.render(frame, input_area, "$ ", true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use crate::tui::component::EventHandler;
    use crate::tui::event::TuiEvent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, input: &InputLine) -> String {
        let grid = Grid::new((8, 16));
        let mut terminal = Terminal::new(TestBackend::new(128, 48)).unwrap();
        terminal
            .draw(|f| {
                LoginPrompt {
                    app,
                    grid: &grid,
                    input,
                    url: "ws://relay.test",
                }
                .render(f, f.area())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_shows_connecting_until_open() {
        let mut app = test_app();
        let input = InputLine::new();
        let text = draw(&app, &input);
        assert!(text.contains("login"));
        assert!(text.contains("Connecting to ws://relay.test..."));

        update(&mut app, Action::ChannelOpened);
        let text = draw(&app, &input);
        assert!(text.contains("Connection ready."));
        assert!(text.contains("Enter your name:"));
    }

    #[test]
    fn test_shows_typed_name() {
        let app = test_app();
        let mut input = InputLine::new();
        for c in "neo".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        assert!(draw(&app, &input).contains("$ neo"));
    }
}
