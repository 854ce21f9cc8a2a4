//! Grid snake with growing obstacles and a score-driven speed ramp.
//!
//! The game logic (`grid`, `placement`, `snake`, `rules`, `ticker`, `game`,
//! `input`) never touches the terminal; `render`, `term` and `store` are the
//! adapters the front-end loop in `app` wires around it.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod placement;
pub mod render;
pub mod rules;
pub mod snake;
pub mod store;
pub mod term;
pub mod ticker;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// A grid coordinate, 1-indexed on both axes.
pub type Cell = (i16, i16);
