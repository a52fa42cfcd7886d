use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use street_canvas::config::{DEFAULT_PLAYER_NAME, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use street_canvas::game::Game;
use street_canvas::logging;
use street_canvas::render::Renderer;
use street_canvas::score::LogScoreSink;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Initial window width in pixels. The stage is capped at 800.
    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    width: i32,

    /// Initial window height in pixels. The stage is capped at 450.
    #[arg(long, default_value_t = DEFAULT_WINDOW_HEIGHT)]
    height: i32,

    /// Seed for the CPU opponent's decisions (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Name reported alongside the final score.
    #[arg(long, default_value = DEFAULT_PLAYER_NAME)]
    player_name: String,

    /// Debug filter to specify log topics (e.g., "physics,combat")
    /// Available topics: physics, combat, cpu, round
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    let args = Args::parse();
    Conf {
        window_title: "Street Canvas".to_owned(),
        window_width: args.width.max(1),
        window_height: args.height.max(1),
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    let log_level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Street Canvas...");

    let mut game = match Game::new(
        screen_width(),
        screen_height(),
        args.seed,
        args.player_name,
        Box::new(LogScoreSink),
    ) {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to create game: {}", e);
            std::process::exit(1);
        }
    };

    info!("Initializing macroquad rendering system");
    let mut renderer = Renderer::new();
    info!("Renderer initialized.");

    if let Err(e) = game.run(&mut renderer).await {
        error!("Game loop failed: {}", e);
    }
}
