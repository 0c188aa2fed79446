use std::fs::File;
use std::path::PathBuf;

use chatterm::core::config;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "chatterm", about = "Terminal-window chat client for a websocket relay")]
struct Args {
    /// Relay websocket URL (overrides CHATTERM_URL and the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Config file to use instead of ~/.chatterm/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "chatterm.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger; the terminal belongs to the TUI.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        config::ChattermConfig::default()
    });
    let resolved = config::resolve(&file_config, args.url.as_deref());

    log::info!("chatterm starting up, relay: {}", resolved.url);

    chatterm::tui::run(resolved)
}
