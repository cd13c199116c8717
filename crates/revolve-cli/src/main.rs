use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revolve_core::{AppConfig, OptionsPatch};

mod commands;

#[derive(Parser)]
#[command(name = "revolve")]
#[command(author, version, about = "A terminal carousel demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Slides shown per view (may be fractional, e.g. 1.5)
    #[arg(long)]
    items_to_show: Option<f64>,

    /// Slides advanced per navigation step
    #[arg(long)]
    items_to_slide: Option<i64>,

    /// Slide shown on startup
    #[arg(long)]
    initial_slide: Option<i64>,

    /// Wrap around seamlessly using a clone buffer
    #[arg(long)]
    infinite: bool,

    /// Center the current slide in the view
    #[arg(long)]
    center: bool,

    /// Slide along the vertical axis
    #[arg(long)]
    vertical: bool,

    /// Right-to-left layout
    #[arg(long)]
    rtl: bool,

    /// Advance automatically on a timer
    #[arg(long)]
    autoplay: bool,

    /// Autoplay interval in milliseconds
    #[arg(long)]
    play_speed: Option<u64>,

    /// Transition time in milliseconds
    #[arg(long)]
    transition: Option<u64>,

    /// Suppress navigation into the whitespace after the last full view
    #[arg(long)]
    trim: bool,

    /// Number of demo slides
    #[arg(long)]
    slides: Option<usize>,

    /// Extra carousel options as JSON, e.g. '{"wheel_control": false}'
    #[arg(long)]
    settings: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI demo
    Run,
    /// Write a default configuration file
    ConfigInit,
    /// Print the configuration file path
    ConfigPath,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    match cli.command {
        Some(Commands::ConfigInit) => commands::config::init(&config),
        Some(Commands::ConfigPath) => commands::config::path(),
        Some(Commands::Run) | None => {
            let settings = build_settings(&cli, &config)?;
            commands::run::run(config, settings, cli.slides)
        }
    }
}

/// Stack the option layers: config file, then `--settings` JSON, then
/// individual flags.
fn build_settings(cli: &Cli, config: &AppConfig) -> Result<OptionsPatch> {
    let mut settings = config.carousel.clone();

    if let Some(json) = &cli.settings {
        let patch: OptionsPatch = serde_json::from_str(json)?;
        settings.merge(&patch);
    }

    let flags = OptionsPatch {
        items_to_show: cli.items_to_show,
        items_to_slide: cli.items_to_slide,
        initial_slide: cli.initial_slide,
        infinite_scroll: cli.infinite.then_some(true),
        center_mode: cli.center.then_some(true),
        vertical: cli.vertical.then_some(true),
        rtl: cli.rtl.then_some(true),
        auto_play: cli.autoplay.then_some(true),
        play_speed_ms: cli.play_speed,
        transition_ms: cli.transition,
        trim_white_space: cli.trim.then_some(true),
        ..Default::default()
    };
    settings.merge(&flags);

    Ok(settings)
}
