use anyhow::{Context, Result};
use clap::Parser;
use snek::app::App;
use snek::game::GameConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snek")]
#[command(version, about = "Terminal snake on a toroidal grid")]
struct Cli {
    /// Surface width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Pixels per grid cell
    #[arg(long, default_value = "20")]
    cell_size: u32,

    /// Milliseconds between snake moves
    #[arg(long, default_value = "200")]
    move_interval: u64,

    /// Log file (the terminal is busy drawing the game)
    #[arg(long, default_value = "snek.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = std::fs::File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    let config = GameConfig {
        surface_width: cli.width,
        surface_height: cli.height,
        cell_size: cli.cell_size,
        move_interval_ms: cli.move_interval,
        ..Default::default()
    };
    config.validate().context("Invalid game configuration")?;

    let mut app = App::new(config);
    app.run().await
}
