//! Bit-encoded adjacency for an 8-connected node grid.
//!
//! Bits 0..=7 record the edges right, down-right, down, down-left, left,
//! up-left, up and up-right (clockwise from east). Bit 8 marks a node as
//! anchored, which the step kernel must leave in place.

use std::fmt;

/// The eight compass directions, numbered by their mask bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Right = 0,
    DownRight = 1,
    Down = 2,
    DownLeft = 3,
    Left = 4,
    UpLeft = 5,
    Up = 6,
    UpRight = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
    ];

    /// Half of the directions; walking these from every node visits each edge once.
    pub const FORWARD: [Direction; 4] = [
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
    ];

    #[inline(always)]
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// The direction pointing back along the same edge.
    #[inline(always)]
    pub fn mirror(self) -> Direction {
        Self::ALL[(self as usize + 4) % 8]
    }

    /// `(row, col)` step; rows grow downward.
    #[inline(always)]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::Left => (0, -1),
            Direction::UpLeft => (-1, -1),
            Direction::Up => (-1, 0),
            Direction::UpRight => (-1, 1),
        }
    }

    #[inline(always)]
    pub fn is_diagonal(self) -> bool {
        (self as u8) % 2 == 1
    }
}

pub const ANCHOR_BIT: u32 = 1 << 8;
const EDGE_BITS: u32 = 0xff;

/// Neighbour set plus anchor flag of a single node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct NeighborMask(pub u32);

impl NeighborMask {
    pub const EMPTY: NeighborMask = NeighborMask(0);

    #[inline(always)]
    pub fn bits(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub fn has(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline(always)]
    pub fn has_right(self) -> bool {
        self.has(Direction::Right)
    }

    #[inline(always)]
    pub fn has_down_right(self) -> bool {
        self.has(Direction::DownRight)
    }

    #[inline(always)]
    pub fn has_down(self) -> bool {
        self.has(Direction::Down)
    }

    #[inline(always)]
    pub fn has_down_left(self) -> bool {
        self.has(Direction::DownLeft)
    }

    #[inline(always)]
    pub fn has_left(self) -> bool {
        self.has(Direction::Left)
    }

    #[inline(always)]
    pub fn has_up_left(self) -> bool {
        self.has(Direction::UpLeft)
    }

    #[inline(always)]
    pub fn has_up(self) -> bool {
        self.has(Direction::Up)
    }

    #[inline(always)]
    pub fn has_up_right(self) -> bool {
        self.has(Direction::UpRight)
    }

    #[inline(always)]
    pub fn is_anchored(self) -> bool {
        self.0 & ANCHOR_BIT != 0
    }

    #[inline(always)]
    pub fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    #[inline(always)]
    pub fn without(self, direction: Direction) -> Self {
        Self(self.0 & !direction.bit())
    }

    #[inline(always)]
    pub fn anchored(self) -> Self {
        Self(self.0 | ANCHOR_BIT)
    }

    /// Number of edges still attached to the node.
    #[inline]
    pub fn edge_count(self) -> u32 {
        (self.0 & EDGE_BITS).count_ones()
    }
}

impl fmt::Debug for NeighborMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NeighborMask({:#011b})", self.0)
    }
}

/// Decides which nodes are pinned when a cloth is (re)initialized.
#[derive(Clone, Copy, Debug, Default)]
pub enum AnchorPolicy {
    /// Every node of row 0
    #[default]
    TopRow,
    /// Only `(0, 0)` and `(0, cols - 1)`
    TopCorners,
    Unanchored,
    /// Called as `f(row, col, rows, cols)`
    Custom(fn(usize, usize, usize, usize) -> bool),
}

impl AnchorPolicy {
    #[inline]
    pub fn is_anchored(&self, row: usize, col: usize, rows: usize, cols: usize) -> bool {
        match self {
            AnchorPolicy::TopRow => row == 0,
            AnchorPolicy::TopCorners => row == 0 && (col == 0 || col + 1 == cols),
            AnchorPolicy::Unanchored => false,
            AnchorPolicy::Custom(policy) => policy(row, col, rows, cols),
        }
    }
}

/// Full neighbour mask of a node on an untorn grid.
pub fn derive_mask(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
    policy: &AnchorPolicy,
) -> NeighborMask {
    let mut mask = NeighborMask::EMPTY;
    for direction in Direction::ALL {
        let (dr, dc) = direction.offset();
        let in_rows = row
            .checked_add_signed(dr)
            .is_some_and(|neighbor_row| neighbor_row < rows);
        let in_cols = col
            .checked_add_signed(dc)
            .is_some_and(|neighbor_col| neighbor_col < cols);
        if in_rows && in_cols {
            mask = mask.with(direction);
        }
    }

    if policy.is_anchored(row, col, rows, cols) {
        mask = mask.anchored();
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_is_an_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.mirror().mirror(), direction);
            let (dr, dc) = direction.offset();
            assert_eq!(direction.mirror().offset(), (-dr, -dc));
        }
    }

    #[test]
    fn interior_node_has_all_edges() {
        let mask = derive_mask(1, 1, 3, 3, &AnchorPolicy::TopRow);
        assert_eq!(mask.bits(), 0xff);
        assert_eq!(mask.edge_count(), 8);
        assert!(!mask.is_anchored());
    }

    #[test]
    fn top_left_corner_matches_bit_layout() {
        let mask = derive_mask(0, 0, 3, 3, &AnchorPolicy::TopRow);
        // right, down-right, down + anchor
        assert_eq!(mask.bits(), 0b1_0000_0111);
    }

    #[test]
    fn top_corners_policy_skips_middle_of_row() {
        let policy = AnchorPolicy::TopCorners;
        assert!(derive_mask(0, 0, 4, 4, &policy).is_anchored());
        assert!(!derive_mask(0, 1, 4, 4, &policy).is_anchored());
        assert!(derive_mask(0, 3, 4, 4, &policy).is_anchored());
    }

    #[test]
    fn custom_policy_is_consulted() {
        let policy = AnchorPolicy::Custom(|row, _, rows, _| row + 1 == rows);
        assert!(derive_mask(2, 1, 3, 3, &policy).is_anchored());
        assert!(!derive_mask(0, 1, 3, 3, &policy).is_anchored());
    }

    #[test]
    fn single_node_grid_has_no_edges() {
        let mask = derive_mask(0, 0, 1, 1, &AnchorPolicy::Unanchored);
        assert_eq!(mask, NeighborMask::EMPTY);
    }
}
