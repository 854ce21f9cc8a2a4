use crate::Cell;

/// Square playing field of `size` x `size` cells, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: i16,
}

impl Grid {
    pub fn new(size: i16) -> Self {
        Grid { size }
    }

    pub fn size(&self) -> i16 {
        self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        (1..=self.size).contains(&cell.0) && (1..=self.size).contains(&cell.1)
    }

    /// Where a fresh snake starts. (10, 10) on the default 20x20 grid.
    pub fn center(&self) -> Cell {
        let mid = (self.size / 2).max(1);
        (mid, mid)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (1..=size).flat_map(move |y| (1..=size).map(move |x| (x, y)))
    }
}
