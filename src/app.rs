use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::Options;
use crate::game::{Game, Phase};
use crate::grid::Grid;
use crate::input::Command;
use crate::render::BoardView;
use crate::rules::Outcome;
use crate::store::{FileScoreStore, ScoreStore};
use crate::term::TermManager;

/// How long to wait for keys while no tick is scheduled
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Terminal front end: feeds keys and ticks to a [`Game`] and draws it.
pub struct SnakeApp<S: ScoreStore> {
    game: Game<StdRng, S>,
    term: TermManager,
    view: BoardView,
}

impl SnakeApp<FileScoreStore> {
    pub fn from_options(options: &Options) -> Result<Self> {
        let store = match &options.score_file {
            Some(path) => FileScoreStore::new(path),
            None => FileScoreStore::in_data_dir()?,
        };
        info!(path = %store.path().display(), "high score store");

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let grid = Grid::new(options.grid_size);
        let mut game = Game::new(grid, rng, store).context("could not set up the board")?;
        if options.reset_high_score {
            game.clear_high_score();
        }

        SnakeApp::new(game)
    }
}

impl<S: ScoreStore> SnakeApp<S> {
    pub fn new(game: Game<StdRng, S>) -> Result<Self> {
        let term = TermManager::new().context("could not read the terminal size")?;
        let view = BoardView::fit(game.grid(), term.get_terminal_size()).ok_or_else(|| {
            let (w, h) = BoardView::required_size(game.grid());
            anyhow!("the terminal must be at least {}x{} to fit the board", w, h)
        })?;

        Ok(SnakeApp { game, term, view })
    }

    /// Runs until the player quits. The terminal is restored on every exit path.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("could not set up the terminal")?;
        let res = self.play();
        self.term.restore().context("could not restore the terminal")?;
        res
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        self.start_round()?;

        loop {
            let timeout = self.game.ticker().time_until_due(Instant::now()).unwrap_or(IDLE_POLL);

            for key_ev in self.term.read_key_events(timeout)? {
                match Command::from_key_event(&key_ev) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Pause) => self.toggle_pause()?,
                    Some(Command::Steer(dir)) => self.game.steer(dir),
                    None => {}
                }
            }

            let outcome = match self.game.update(Instant::now()) {
                Some(outcome) => outcome,
                None => continue,
            };

            if outcome.ends_round() {
                if !self.game_over(outcome)? {
                    return Ok(());
                }
                self.start_round()?;
            } else {
                self.view.draw(&mut self.term, self.game.state())?;
            }
        }
    }

    fn start_round(&mut self) -> Result<()> {
        self.game.reset(Instant::now())?;
        self.term.clear()?;
        self.view.draw_frame(&mut self.term)?;
        self.view.draw(&mut self.term, self.game.state())?;
        Ok(())
    }

    /// Returns `false` if the player chose to quit.
    fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ];

        self.term.show_message(lines)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(Command::from_key_event(&key) != Some(Command::Quit))
    }

    /// Shows the final score and waits for a key. Returns `false` if the
    /// player chose to quit.
    fn game_over(&mut self, outcome: Outcome) -> Result<bool> {
        let headline = match outcome {
            Outcome::Crashed(collision) => collision.to_string(),
            _ => "No room left, you win!".to_string(),
        };
        let score = format!("Your score is {}", self.game.state().score);

        self.view.draw_dead(&mut self.term, self.game.state())?;
        self.term.show_message(&[
            "Game over!",
            headline.as_str(),
            score.as_str(),
            "",
            "Press any key to play again,",
            "or q to quit.",
        ])?;

        let key = self.term.read_key_blocking()?;
        Ok(Command::from_key_event(&key) != Some(Command::Quit))
    }

    fn toggle_pause(&mut self) -> Result<()> {
        self.game.toggle_pause(Instant::now());

        if self.game.phase() == Phase::Paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.term.hide_message()?;
        }
        Ok(())
    }
}
