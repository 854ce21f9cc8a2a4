use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::INITIAL_TICK_INTERVAL;
use crate::error::PlacementError;
use crate::grid::Grid;
use crate::input;
use crate::placement::place_food;
use crate::rules::{self, Outcome};
use crate::snake::{Direction, Snake};
use crate::store::ScoreStore;
use crate::ticker::Ticker;
use crate::Cell;

/// Everything a round is played with. The high score and the tick interval
/// carry over from one round to the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub obstacles: HashSet<Cell>,
    /// Direction applied on the last tick, `None` until the first move
    pub heading: Option<Direction>,
    /// Accepted turn waiting for the next tick
    pub pending: Option<Direction>,
    pub score: u32,
    pub high_score: u32,
    pub interval: Duration,
}

impl GameState {
    pub fn new<R: Rng>(grid: &Grid, high_score: u32, rng: &mut R) -> Result<Self, PlacementError> {
        let snake = Snake::new(grid.center());
        let obstacles = HashSet::new();
        let food = place_food(grid, &snake, &obstacles, rng)?;

        Ok(GameState {
            snake,
            food,
            obstacles,
            heading: None,
            pending: None,
            score: 0,
            high_score,
            interval: INITIAL_TICK_INTERVAL,
        })
    }

    /// Starts a fresh round in place.
    pub fn restart<R: Rng>(&mut self, grid: &Grid, rng: &mut R) -> Result<(), PlacementError> {
        self.snake = Snake::new(grid.center());
        self.obstacles.clear();
        self.heading = None;
        self.pending = None;
        self.score = 0;
        self.food = place_food(grid, &self.snake, &self.obstacles, rng)?;
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Owns the game state, the tick schedule and the high-score store.
pub struct Game<R: Rng, S: ScoreStore> {
    grid: Grid,
    state: GameState,
    phase: Phase,
    ticker: Ticker,
    saved_high_score: u32,
    rng: R,
    store: S,
}

impl<R: Rng, S: ScoreStore> Game<R, S> {
    pub fn new(grid: Grid, mut rng: R, store: S) -> Result<Self, PlacementError> {
        let high_score = store.load_high_score();
        let state = GameState::new(&grid, high_score, &mut rng)?;
        let ticker = Ticker::new(state.interval);

        Ok(Game {
            grid,
            state,
            phase: Phase::Idle,
            ticker,
            saved_high_score: high_score,
            rng,
            store,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Starts a new round and arms the tick schedule at the current interval.
    pub fn reset(&mut self, now: Instant) -> Result<(), PlacementError> {
        self.state.restart(&self.grid, &mut self.rng)?;
        self.phase = Phase::Running;
        self.ticker.reschedule(self.state.interval, now);
        info!(food = ?self.state.food, interval_ms = self.state.interval.as_millis() as u64, "round started");
        Ok(())
    }

    /// Runs a tick if one is due.
    pub fn update(&mut self, now: Instant) -> Option<Outcome> {
        if self.phase == Phase::Running && self.ticker.poll(now) {
            Some(self.tick(now))
        } else {
            None
        }
    }

    /// Advances the game by one tick. A crash or a full board cancels the
    /// schedule and moves to [`Phase::GameOver`]; the caller reports the
    /// final score and calls [`Game::reset`] to play again.
    pub fn tick(&mut self, now: Instant) -> Outcome {
        if self.phase != Phase::Running {
            return Outcome::Idle;
        }

        let outcome = rules::step(&mut self.state, &self.grid, &mut self.rng);
        self.persist_high_score();

        match outcome {
            Outcome::Ate { sped_up, .. } => {
                debug!(score = self.state.score, food = ?self.state.food, "food eaten");
                if sped_up {
                    info!(interval_ms = self.state.interval.as_millis() as u64, "speeding up");
                    self.ticker.reschedule(self.state.interval, now);
                }
            }
            Outcome::Crashed(collision) => {
                info!(score = self.state.score, %collision, "game over");
                self.end_round();
            }
            Outcome::BoardFull => {
                info!(score = self.state.score, "board full");
                self.end_round();
            }
            Outcome::Idle | Outcome::Moved => {}
        }

        outcome
    }

    /// Queues a turn for the next tick. Reversals and turns while not
    /// running are ignored.
    pub fn steer(&mut self, direction: Direction) {
        if self.phase == Phase::Running && input::accepts(direction, self.state.heading) {
            self.state.pending = Some(direction);
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.phase {
            Phase::Running => {
                self.ticker.cancel();
                self.phase = Phase::Paused;
                info!("paused");
            }
            Phase::Paused => {
                self.ticker.reschedule(self.state.interval, now);
                self.phase = Phase::Running;
                info!("resumed");
            }
            Phase::Idle | Phase::GameOver => {}
        }
    }

    /// Forgets the high score, in memory and in the store.
    pub fn clear_high_score(&mut self) {
        self.state.high_score = 0;
        self.saved_high_score = 0;
        if let Err(err) = self.store.save_high_score(0) {
            warn!(%err, "could not clear high score");
        }
    }

    fn end_round(&mut self) {
        self.ticker.cancel();
        self.phase = Phase::GameOver;
    }

    fn persist_high_score(&mut self) {
        if self.state.high_score <= self.saved_high_score {
            return;
        }

        match self.store.save_high_score(self.state.high_score) {
            Ok(()) => {
                info!(high_score = self.state.high_score, "new high score");
                self.saved_high_score = self.state.high_score;
            }
            Err(err) => warn!(%err, "could not save high score"),
        }
    }
}
