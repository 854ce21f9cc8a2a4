//! Game constants and command-line options.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Cells along each side of the default grid
pub const DEFAULT_GRID_SIZE: i16 = 20;

/// Time between ticks at the start of the first round
pub const INITIAL_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// The tick interval never goes below this
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// How much faster each speed-up makes the game
pub const TICK_INTERVAL_STEP: Duration = Duration::from_millis(10);

/// The game speeds up whenever the score lands on a multiple of this
pub const SPEEDUP_EVERY: u32 = 50;

/// Points awarded per food eaten
pub const FOOD_POINTS: u32 = 10;

/// Random draws tried before placement falls back to scanning free cells
pub const MAX_PLACEMENT_ATTEMPTS: usize = 64;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Grid snake with obstacles that pile up as you eat")]
pub struct Options {
    /// Number of cells along each side of the square grid.
    #[arg(
        long,
        value_name = "CELLS",
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = clap::value_parser!(i16).range(5..=40)
    )]
    pub grid_size: i16,
    /// Seed for food and obstacle placement. Random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
    /// Where the high score is kept.
    #[arg(long, value_name = "PATH")]
    pub score_file: Option<PathBuf>,
    /// Where log lines are written. Filter with RUST_LOG.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Forget the stored high score before starting.
    #[arg(long)]
    pub reset_high_score: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
            score_file: None,
            log_file: None,
            reset_high_score: false,
        }
    }
}
