//! One tick of game rules: collisions, eating, scoring and the speed ramp.
use std::fmt;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::config::{FOOD_POINTS, MIN_TICK_INTERVAL, SPEEDUP_EVERY, TICK_INTERVAL_STEP};
use crate::game::GameState;
use crate::grid::Grid;
use crate::placement::{place_food, place_obstacle};
use crate::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
    Obstacle,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Collision::Wall => "Hit the wall",
            Collision::Body => "Bit your own tail",
            Collision::Obstacle => "Hit an obstacle",
        };
        f.write_str(s)
    }
}

/// What a single tick did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No direction chosen yet, the snake stays put
    Idle,
    Moved,
    Ate { new_high_score: bool, sped_up: bool },
    Crashed(Collision),
    /// The snake ate and there is nowhere left to put food
    BoardFull,
}

impl Outcome {
    pub fn ends_round(&self) -> bool {
        matches!(self, Outcome::Crashed(_) | Outcome::BoardFull)
    }
}

/// Applies the pending direction and advances the game by one tick.
///
/// Collisions are checked in order wall, body, obstacle. The body check runs
/// against the whole current snake, including the tail cell that would be
/// vacated this tick. A crash leaves the snake, food, obstacles and score
/// untouched, though a pending turn has already become the heading.
pub fn step<R: Rng>(state: &mut GameState, grid: &Grid, rng: &mut R) -> Outcome {
    if let Some(dir) = state.pending.take() {
        state.heading = Some(dir);
    }

    let direction = match state.heading {
        Some(dir) => dir,
        None => return Outcome::Idle,
    };

    let new_head = state.snake.next_head(direction);

    if let Some(collision) = collision_at(state, grid, new_head) {
        return Outcome::Crashed(collision);
    }

    if new_head != state.food {
        state.snake.advance(new_head, false);
        return Outcome::Moved;
    }

    state.snake.advance(new_head, true);
    state.score += FOOD_POINTS;

    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
    }

    state.food = match place_food(grid, &state.snake, &state.obstacles, rng) {
        Ok(cell) => cell,
        Err(err) => {
            debug!(%err, "no room for food");
            return Outcome::BoardFull;
        }
    };

    let interval = sped_up(state.interval, state.score);
    let sped_up = interval != state.interval;
    state.interval = interval;

    match place_obstacle(grid, &state.snake, state.food, &state.obstacles, rng) {
        Ok(cell) => {
            state.obstacles.insert(cell);
        }
        Err(err) => debug!(%err, "skipping obstacle"),
    }

    Outcome::Ate { new_high_score, sped_up }
}

pub fn collision_at(state: &GameState, grid: &Grid, cell: Cell) -> Option<Collision> {
    if !grid.in_bounds(cell) {
        Some(Collision::Wall)
    } else if state.snake.contains(cell) {
        Some(Collision::Body)
    } else if state.obstacles.contains(&cell) {
        Some(Collision::Obstacle)
    } else {
        None
    }
}

/// Tick interval after the score changed to `score`: one step faster on every
/// multiple of [`SPEEDUP_EVERY`], never below [`MIN_TICK_INTERVAL`].
pub fn sped_up(interval: Duration, score: u32) -> Duration {
    if score % SPEEDUP_EVERY == 0 && interval > MIN_TICK_INTERVAL {
        interval.saturating_sub(TICK_INTERVAL_STEP).max(MIN_TICK_INTERVAL)
    } else {
        interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INITIAL_TICK_INTERVAL;
    use crate::snake::{Direction, Snake};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn state_with(snake: &[Cell], heading: Direction, food: Cell) -> GameState {
        GameState {
            snake: Snake::from_cells(snake.iter().copied()).unwrap(),
            food,
            obstacles: HashSet::new(),
            heading: Some(heading),
            pending: None,
            score: 0,
            high_score: 0,
            interval: INITIAL_TICK_INTERVAL,
        }
    }

    #[test]
    fn idle_until_a_direction_is_chosen() {
        let grid = Grid::new(20);
        let mut state = state_with(&[(10, 10)], Direction::Up, (5, 5));
        state.heading = None;
        let before = state.clone();

        assert_eq!(step(&mut state, &grid, &mut StdRng::seed_from_u64(0)), Outcome::Idle);
        assert_eq!(state, before);
    }

    #[test]
    fn pending_direction_is_applied_first() {
        let grid = Grid::new(20);
        let mut state = state_with(&[(10, 10)], Direction::Right, (5, 5));
        state.pending = Some(Direction::Up);

        assert_eq!(step(&mut state, &grid, &mut StdRng::seed_from_u64(0)), Outcome::Moved);
        assert_eq!(state.snake.head(), (10, 9));
        assert_eq!(state.heading, Some(Direction::Up));
        assert_eq!(state.pending, None);
    }

    #[test]
    fn moving_into_the_current_tail_is_a_crash() {
        let grid = Grid::new(20);
        // A 2x2 loop: the head would step onto the tail cell it is about to vacate
        let mut state = state_with(&[(10, 10), (11, 10), (11, 11), (10, 11)], Direction::Down, (1, 1));

        assert_eq!(
            step(&mut state, &grid, &mut StdRng::seed_from_u64(0)),
            Outcome::Crashed(Collision::Body)
        );
    }

    #[test]
    fn obstacle_crash_leaves_state_untouched() {
        let grid = Grid::new(20);
        let mut state = state_with(&[(10, 10)], Direction::Left, (1, 1));
        state.obstacles.insert((9, 10));
        let before = state.clone();

        assert_eq!(
            step(&mut state, &grid, &mut StdRng::seed_from_u64(0)),
            Outcome::Crashed(Collision::Obstacle)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn crash_still_consumes_the_pending_turn() {
        let grid = Grid::new(20);
        let mut state = state_with(&[(10, 1)], Direction::Right, (5, 5));
        state.pending = Some(Direction::Up);
        let snake = state.snake.clone();

        assert_eq!(
            step(&mut state, &grid, &mut StdRng::seed_from_u64(0)),
            Outcome::Crashed(Collision::Wall)
        );
        assert_eq!(state.snake, snake);
        assert_eq!(state.heading, Some(Direction::Up));
        assert_eq!(state.pending, None);
    }

    #[test]
    fn wall_is_checked_before_obstacles() {
        let grid = Grid::new(20);
        let state = state_with(&[(20, 3)], Direction::Right, (1, 1));
        assert_eq!(collision_at(&state, &grid, (21, 3)), Some(Collision::Wall));
    }

    #[test]
    fn eating_grows_scores_and_adds_an_obstacle() {
        let grid = Grid::new(20);
        let mut state = state_with(&[(10, 10)], Direction::Right, (11, 10));
        let mut rng = StdRng::seed_from_u64(42);

        let outcome = step(&mut state, &grid, &mut rng);

        assert_eq!(outcome, Outcome::Ate { new_high_score: true, sped_up: false });
        assert_eq!(state.snake.cells().collect::<Vec<_>>(), vec![(11, 10), (10, 10)]);
        assert_eq!(state.score, 10);
        assert_eq!(state.high_score, 10);
        assert_eq!(state.obstacles.len(), 1);
        assert!(!state.snake.contains(state.food));
        assert!(!state.obstacles.contains(&state.food));
    }

    #[test]
    fn high_score_only_moves_when_beaten() {
        let grid = Grid::new(20);
        let mut state = state_with(&[(10, 10)], Direction::Right, (11, 10));
        state.high_score = 40;

        let outcome = step(&mut state, &grid, &mut StdRng::seed_from_u64(9));
        assert_eq!(outcome, Outcome::Ate { new_high_score: false, sped_up: false });
        assert_eq!(state.high_score, 40);
    }

    #[test]
    fn fifth_food_speeds_up() {
        let grid = Grid::new(20);
        let mut state = state_with(&[(10, 10)], Direction::Right, (11, 10));
        state.score = 40;

        let outcome = step(&mut state, &grid, &mut StdRng::seed_from_u64(5));
        assert_eq!(outcome, Outcome::Ate { new_high_score: true, sped_up: true });
        assert_eq!(state.interval, Duration::from_millis(90));
    }

    #[test]
    fn eating_the_last_free_cell_fills_the_board() {
        let grid = Grid::new(2);
        let mut state = state_with(&[(1, 1), (1, 2), (2, 2)], Direction::Right, (2, 1));

        assert_eq!(step(&mut state, &grid, &mut StdRng::seed_from_u64(0)), Outcome::BoardFull);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 10);
        assert_eq!(state.high_score, 10);
    }

    #[test]
    fn obstacle_is_skipped_when_no_cell_is_left() {
        let grid = Grid::new(2);
        let mut state = state_with(&[(1, 1), (1, 2)], Direction::Right, (2, 1));

        let outcome = step(&mut state, &grid, &mut StdRng::seed_from_u64(0));

        assert_eq!(outcome, Outcome::Ate { new_high_score: true, sped_up: false });
        assert_eq!(state.snake.cells().collect::<Vec<_>>(), vec![(2, 1), (1, 1), (1, 2)]);
        assert_eq!(state.food, (2, 2));
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn speed_ramp_steps_and_floors() {
        let ms = Duration::from_millis;
        assert_eq!(sped_up(ms(100), 40), ms(100));
        assert_eq!(sped_up(ms(100), 50), ms(90));
        assert_eq!(sped_up(ms(60), 300), ms(50));
        assert_eq!(sped_up(ms(50), 350), ms(50));
        assert_eq!(sped_up(ms(55), 100), ms(50));
    }
}
