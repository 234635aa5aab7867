mod animation;
mod config;
mod sound;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use ttt_common::{Mark, Stats, log, logger};

use config::{Config, default_config_path, get_config_manager};
use ui::{TicTacToeApp, board_side};

const WINDOW_TITLE: &str = "Ultimate Tic Tac Toe";

#[derive(Parser)]
#[command(name = "ultimate_ttt", about = "Tic-tac-toe against a minimax opponent")]
struct Args {
    /// Path to the YAML config file. Defaults to a file next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_path = args.config.unwrap_or_else(default_config_path);
    let config_manager = get_config_manager(&config_path);
    let (config, persist_config) = match config_manager.get_config() {
        Ok(config) => {
            log!("Using config file {}", config_path.display());
            (config, true)
        }
        Err(e) => {
            log!(
                "Failed to load config file {}, using defaults without saving: {}",
                config_path.display(),
                e
            );
            (Config::default(), false)
        }
    };

    let stats = Stats::load(&config.stats_file);
    log!(
        "Loaded stats from {}: X {} / O {}",
        config.stats_file.display(),
        stats.wins(Mark::X),
        stats.wins(Mark::O)
    );

    let side = board_side(config.board_size as usize);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side + 40.0, side + 110.0])
            .with_resizable(false)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(TicTacToeApp::new(
                config,
                config_manager,
                persist_config,
                stats,
            )))
        }),
    )?;

    log!("Window closed");
    Ok(())
}
