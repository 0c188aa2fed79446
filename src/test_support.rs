use crate::core::config::ResolvedConfig;
use crate::core::geometry::Viewport;
use crate::core::state::App;

/// App on a 1024×768 viewport with default config.
pub fn test_app() -> App {
    App::new(Viewport::new(1024, 768), &ResolvedConfig::default())
}

pub fn log_texts(app: &App) -> Vec<String> {
    app.session
        .log
        .entries()
        .iter()
        .map(|m| m.text.clone())
        .collect()
}
