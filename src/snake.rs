use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step on the grid. y grows downwards.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Left | Right)
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Head-first body of the snake. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        Snake { body: VecDeque::from(vec![head]) }
    }

    /// Builds a snake from its cells, head first. Returns `None` for an empty body.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Snake { body })
        }
    }

    pub fn head(&self) -> Cell {
        // The body always holds at least the head
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn next_head(&self, direction: Direction) -> Cell {
        let (x, y) = self.head();
        let (dx, dy) = direction.delta();
        (x + dx, y + dy)
    }

    /// Pushes `new_head` and, unless the snake `grew`, drops the tail.
    /// Returns the vacated tail cell, if any.
    pub fn advance(&mut self, new_head: Cell, grew: bool) -> Option<Cell> {
        self.body.push_front(new_head);

        if grew {
            None
        } else {
            self.body.pop_back()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_head_follows_direction() {
        let snake = Snake::new((10, 10));
        assert_eq!(snake.next_head(Up), (10, 9));
        assert_eq!(snake.next_head(Down), (10, 11));
        assert_eq!(snake.next_head(Left), (9, 10));
        assert_eq!(snake.next_head(Right), (11, 10));
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::from_cells([(10, 10), (9, 10), (8, 10)]).unwrap();
        let tail = snake.advance((11, 10), false);
        assert_eq!(tail, Some((8, 10)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.cells().collect::<Vec<_>>(), vec![(11, 10), (10, 10), (9, 10)]);
    }

    #[test]
    fn advance_with_growth_keeps_tail() {
        let mut snake = Snake::new((10, 10));
        assert_eq!(snake.advance((11, 10), true), None);
        assert_eq!(snake.cells().collect::<Vec<_>>(), vec![(11, 10), (10, 10)]);
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(Snake::from_cells(Vec::new()).is_none());
    }

    #[test]
    fn opposites() {
        for dir in [Up, Down, Left, Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().is_horizontal(), dir.is_horizontal());
        }
    }
}
