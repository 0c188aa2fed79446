//! # Actions
//!
//! Everything that can happen in chatterm becomes an `Action`.
//! User presses Enter on the login prompt? That's `Action::SubmitName`.
//! The relay sends a line? That's `Action::MessageReceived(line)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the caller should perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::geometry::{Panel, Viewport};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Channel lifecycle
    ChannelOpened,
    MessageReceived(String),
    ChannelClosed,

    // User commands
    SubmitName(String),
    SubmitMessage(String),
    Drag { panel: Panel, x: i32, y: i32 },
    Resize { dw: i32, dh: i32 },
    ToggleMaximize,
    ViewportResized(Viewport),
    Quit,
}

/// I/O requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send one text payload over the channel.
    Send(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ChannelOpened => {
            app.channel_open = true;
            Effect::None
        }
        Action::MessageReceived(text) => {
            app.session.on_message(text);
            Effect::None
        }
        Action::ChannelClosed => {
            app.channel_open = false;
            app.session.on_close();
            Effect::None
        }
        Action::SubmitName(name) => match app.session.submit_name(&name, app.channel_open) {
            Some(name) => {
                debug!("Session connected as {:?}", name);
                Effect::Send(name)
            }
            None => Effect::None,
        },
        Action::SubmitMessage(text) => match app.session.submit_message(&text, app.local_echo) {
            Some(line) => Effect::Send(line),
            None => Effect::None,
        },
        Action::Drag { panel, x, y } => {
            match panel {
                Panel::Chat => app.chat_window.move_to(x, y),
                Panel::Login => app.login_panel.move_to(x, y),
            }
            Effect::None
        }
        Action::Resize { dw, dh } => {
            app.chat_window.resize_by(dw, dh);
            Effect::None
        }
        Action::ToggleMaximize => {
            app.chat_window.toggle_maximize(app.viewport);
            Effect::None
        }
        Action::ViewportResized(viewport) => {
            app.viewport = viewport;
            app.chat_window.on_viewport_resized(viewport);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Bounds;
    use crate::core::session::{CONNECTED_NOTICE, DISCONNECTED_NOTICE, Phase};
    use crate::test_support::{log_texts, test_app};

    #[test]
    fn test_login_scenario() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ChannelOpened), Effect::None);

        let effect = update(&mut app, Action::SubmitName("neo".to_string()));

        assert_eq!(effect, Effect::Send("neo".to_string()));
        assert_eq!(app.session.phase, Phase::Connected);
        assert_eq!(log_texts(&app), vec![CONNECTED_NOTICE]);
    }

    #[test]
    fn test_blank_name_sends_nothing() {
        let mut app = test_app();
        update(&mut app, Action::ChannelOpened);

        for name in ["", "   "] {
            let effect = update(&mut app, Action::SubmitName(name.to_string()));
            assert_eq!(effect, Effect::None);
            assert_eq!(app.session.phase, Phase::AwaitingName);
        }
        assert!(app.session.log.is_empty());
    }

    #[test]
    fn test_name_before_open_sends_nothing() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitName("neo".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.session.phase, Phase::AwaitingName);
    }

    #[test]
    fn test_chat_line_is_sent_trimmed() {
        let mut app = test_app();
        update(&mut app, Action::ChannelOpened);
        update(&mut app, Action::SubmitName("neo".to_string()));

        let effect = update(&mut app, Action::SubmitMessage("  follow the rabbit ".to_string()));
        assert_eq!(effect, Effect::Send("follow the rabbit".to_string()));

        let effect = update(&mut app, Action::SubmitMessage(" \t ".to_string()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_double_close_appends_one_notice() {
        let mut app = test_app();
        update(&mut app, Action::ChannelOpened);
        update(&mut app, Action::SubmitName("neo".to_string()));
        update(&mut app, Action::ChannelClosed);
        update(&mut app, Action::ChannelClosed);

        assert_eq!(log_texts(&app), vec![CONNECTED_NOTICE, DISCONNECTED_NOTICE]);
        assert_eq!(app.session.phase, Phase::Disconnected);
        assert!(!app.channel_open);

        let effect = update(&mut app, Action::SubmitMessage("anyone?".to_string()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_inbound_order_and_length_preserved() {
        let mut app = test_app();
        let payloads: Vec<String> = (0..50).map(|i| format!("line {}", i % 7)).collect();
        for p in &payloads {
            update(&mut app, Action::MessageReceived(p.clone()));
        }
        assert_eq!(log_texts(&app), payloads);
    }

    #[test]
    fn test_geometry_commands() {
        let mut app = test_app();

        update(&mut app, Action::Drag { panel: Panel::Login, x: 5, y: 6 });
        assert_eq!(app.login_panel.bounds, Bounds::new(5, 6, 400, 200));

        update(&mut app, Action::Drag { panel: Panel::Chat, x: 10, y: 20 });
        update(&mut app, Action::Resize { dw: -1000, dh: 40 });
        assert_eq!(app.chat_window.bounds, Bounds::new(10, 20, 400, 640));
    }

    #[test]
    fn test_maximize_scenario() {
        let mut app = test_app();
        assert_eq!(app.chat_window.bounds, Bounds::new(128, 84, 768, 600));

        update(&mut app, Action::ToggleMaximize);
        assert_eq!(app.chat_window.bounds, Bounds::new(0, 0, 1024, 768));

        update(&mut app, Action::ToggleMaximize);
        assert_eq!(app.chat_window.bounds, Bounds::new(128, 84, 768, 600));
        assert!(!app.chat_window.maximized);
    }

    #[test]
    fn test_viewport_resize_keeps_initial_placement() {
        let mut app = test_app();
        update(&mut app, Action::ViewportResized(Viewport::new(2048, 1536)));
        assert_eq!(app.viewport, Viewport::new(2048, 1536));
        assert_eq!(app.chat_window.bounds, Bounds::new(128, 84, 768, 600));

        update(&mut app, Action::ToggleMaximize);
        assert_eq!(app.chat_window.bounds, Bounds::new(0, 0, 2048, 1536));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
