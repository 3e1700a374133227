//! Row/column arithmetic for a `rows x cols` node grid.
//!
//! Node `(row, col)` lives at linear index `row * cols + col`.

use super::adjacency::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridIndex {
    rows: usize,
    cols: usize,
}

impl GridIndex {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Linear index of `(row, col)`. Out-of-range input is a caller bug.
    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline(always)]
    pub fn row(&self, index: usize) -> usize {
        index / self.cols
    }

    #[inline(always)]
    pub fn col(&self, index: usize) -> usize {
        index % self.cols
    }

    #[inline]
    pub fn try_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.node_count()
    }

    /// Node one step away from `index` in `direction`, if it is on the grid.
    #[inline]
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let (dr, dc) = direction.offset();
        let row = self.row(index).checked_add_signed(dr)?;
        let col = self.col(index).checked_add_signed(dc)?;
        self.try_index(row, col)
    }

    /// Direction leading from `a` to `b` when they are 8-neighbours.
    pub fn direction_between(&self, a: usize, b: usize) -> Option<Direction> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        let dr = self.row(b) as isize - self.row(a) as isize;
        let dc = self.col(b) as isize - self.col(a) as isize;
        Direction::ALL
            .into_iter()
            .find(|direction| direction.offset() == (dr, dc))
    }
}
