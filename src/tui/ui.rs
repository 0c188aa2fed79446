use ratatui::Frame;
use ratatui::widgets::Clear;

use crate::core::session::Phase;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ChatPane, LoginPrompt};

/// Draw the page: empty background, chat window, then the login panel on top.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let show_login = app.show_login();
    ChatPane {
        app,
        grid: &tui.grid,
        log_state: &mut tui.message_log,
        input: &tui.chat_input,
        focused: app.session.phase == Phase::Connected,
    }
    .render(frame, area);

    if show_login {
        LoginPrompt {
            app,
            grid: &tui.grid,
            input: &tui.login_input,
            url: &tui.url,
        }
        .render(frame, area);
    }
}
