//! Draws the board, the status line and the game-over screen onto a [`TermManager`].
use std::io;

use crate::game::GameState;
use crate::grid::Grid;
use crate::snake::Direction;
use crate::term::TermManager;
use crate::{Cell, Coords, TermInt};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_GLYPH: [char; 2] = ['(', ')'];
const OBSTACLE_CHAR: char = '▒';
const DEAD_SNAKE_CHAR: char = 'X';

/// Terminal columns per grid cell, since characters are taller than wide
const CELL_WIDTH: TermInt = 2;

/// Where the board sits on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    top_left: Coords,
    grid_size: TermInt,
}

impl BoardView {
    /// Centers the board (borders and status line included) on a terminal of
    /// `term_size`. `None` if it does not fit.
    pub fn fit(grid: &Grid, term_size: Coords) -> Option<Self> {
        let grid_size = grid.size() as TermInt;
        let (width, height) = Self::frame_size(grid_size);
        let total_height = height + 1;

        if term_size.0 < width || term_size.1 < total_height {
            return None;
        }

        let top_left = ((term_size.0 - width) / 2, (term_size.1 - total_height) / 2);
        Some(BoardView { top_left, grid_size })
    }

    /// Terminal size needed to show a grid of `grid_size` cells.
    pub fn required_size(grid: &Grid) -> Coords {
        let (width, height) = Self::frame_size(grid.size() as TermInt);
        (width, height + 1)
    }

    fn frame_size(grid_size: TermInt) -> Coords {
        (grid_size * CELL_WIDTH + 2, grid_size + 2)
    }

    /// Screen position of the left half of `cell`.
    pub fn screen_pos(&self, cell: Cell) -> Coords {
        let (left, top) = self.top_left;
        let x = left + 1 + (cell.0 as TermInt - 1) * CELL_WIDTH;
        let y = top + cell.1 as TermInt;
        (x, y)
    }

    pub fn draw_frame(&self, term: &mut TermManager) -> io::Result<()> {
        term.draw_borders(self.top_left, Self::frame_size(self.grid_size))
    }

    /// Redraws every cell and the status line. Only changed characters reach
    /// the terminal.
    pub fn draw(&self, term: &mut TermManager, state: &GameState) -> io::Result<()> {
        self.draw_cells(term, state, false)
    }

    /// Like [`BoardView::draw`], with the snake crossed out.
    pub fn draw_dead(&self, term: &mut TermManager, state: &GameState) -> io::Result<()> {
        self.draw_cells(term, state, true)
    }

    fn draw_cells(&self, term: &mut TermManager, state: &GameState, dead: bool) -> io::Result<()> {
        let size = self.grid_size as i16;
        for y in 1..=size {
            for x in 1..=size {
                let glyph = glyph_at(state, (x, y), dead);
                let (sx, sy) = self.screen_pos((x, y));
                term.print_at((sx, sy), glyph[0])?;
                term.print_at((sx + 1, sy), glyph[1])?;
            }
        }

        let (width, height) = Self::frame_size(self.grid_size);
        let status = format!("{:<width$}", status_line(state), width = width as usize);
        term.print_str_at((self.top_left.0, self.top_left.1 + height), &status)?;
        term.flush()
    }
}

/// The two characters shown for `cell`.
pub fn glyph_at(state: &GameState, cell: Cell, dead: bool) -> [char; 2] {
    if state.snake.contains(cell) {
        if dead {
            [DEAD_SNAKE_CHAR; 2]
        } else if state.snake.head() == cell {
            [head_char(state.heading); 2]
        } else {
            [SNAKE_BODY_CHAR; 2]
        }
    } else if state.food == cell {
        FOOD_GLYPH
    } else if state.obstacles.contains(&cell) {
        [OBSTACLE_CHAR; 2]
    } else {
        [' '; 2]
    }
}

pub fn head_char(heading: Option<Direction>) -> char {
    match heading {
        Some(Direction::Up) => '^',
        Some(Direction::Down) => 'v',
        Some(Direction::Left) => '<',
        Some(Direction::Right) => '>',
        None => '@',
    }
}

pub fn status_line(state: &GameState) -> String {
    format!(
        "Score: {} | High Score: {} | {} ms",
        state.score,
        state.high_score,
        state.interval.as_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Snake;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_state() -> GameState {
        let grid = Grid::new(20);
        let mut state = GameState::new(&grid, 30, &mut StdRng::seed_from_u64(0)).unwrap();
        state.snake = Snake::from_cells([(10, 10), (9, 10)]).unwrap();
        state.food = (3, 4);
        state.obstacles.insert((5, 5));
        state.heading = Some(Direction::Right);
        state
    }

    #[test]
    fn board_is_centered() {
        let grid = Grid::new(20);
        assert_eq!(BoardView::required_size(&grid), (42, 23));

        let view = BoardView::fit(&grid, (82, 33)).unwrap();
        assert_eq!(view.top_left, (20, 5));
        assert_eq!(view.screen_pos((1, 1)), (21, 6));
        assert_eq!(view.screen_pos((20, 20)), (59, 25));
    }

    #[test]
    fn small_terminals_are_refused() {
        let grid = Grid::new(20);
        assert_eq!(BoardView::fit(&grid, (41, 40)), None);
        assert_eq!(BoardView::fit(&grid, (80, 22)), None);
        assert!(BoardView::fit(&grid, (42, 23)).is_some());
    }

    #[test]
    fn glyphs() {
        let state = sample_state();
        assert_eq!(glyph_at(&state, (10, 10), false), ['>', '>']);
        assert_eq!(glyph_at(&state, (9, 10), false), [SNAKE_BODY_CHAR; 2]);
        assert_eq!(glyph_at(&state, (9, 10), true), [DEAD_SNAKE_CHAR; 2]);
        assert_eq!(glyph_at(&state, (3, 4), false), FOOD_GLYPH);
        assert_eq!(glyph_at(&state, (5, 5), false), [OBSTACLE_CHAR; 2]);
        assert_eq!(glyph_at(&state, (1, 1), false), [' ', ' ']);
    }

    #[test]
    fn status_shows_both_scores() {
        let mut state = sample_state();
        state.score = 20;
        assert_eq!(status_line(&state), "Score: 20 | High Score: 30 | 100 ms");
    }
}
