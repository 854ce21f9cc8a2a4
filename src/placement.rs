//! Random placement of food and obstacles on free cells.
//!
//! A bounded number of uniform draws over the whole grid is tried first; if
//! they all land on occupied cells the free cells are enumerated and one is
//! chosen among them, so a crowded grid still terminates and a full one
//! reports [`PlacementError::GridFull`].
use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::error::PlacementError;
use crate::grid::Grid;
use crate::snake::Snake;
use crate::Cell;

pub fn place_food<R: Rng>(
    grid: &Grid,
    snake: &Snake,
    obstacles: &HashSet<Cell>,
    rng: &mut R,
) -> Result<Cell, PlacementError> {
    place(grid, rng, |cell| snake.contains(cell) || obstacles.contains(&cell))
}

pub fn place_obstacle<R: Rng>(
    grid: &Grid,
    snake: &Snake,
    food: Cell,
    obstacles: &HashSet<Cell>,
    rng: &mut R,
) -> Result<Cell, PlacementError> {
    place(grid, rng, |cell| {
        cell == food || snake.contains(cell) || obstacles.contains(&cell)
    })
}

fn place<R, F>(grid: &Grid, rng: &mut R, occupied: F) -> Result<Cell, PlacementError>
where
    R: Rng,
    F: Fn(Cell) -> bool,
{
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let cell = (rng.gen_range(1..=grid.size()), rng.gen_range(1..=grid.size()));
        if !occupied(cell) {
            return Ok(cell);
        }
    }

    grid.cells()
        .filter(|&cell| !occupied(cell))
        .choose(rng)
        .ok_or(PlacementError::GridFull(grid.size()))
}
