//! Per-node cloth buffers.
//!
//! Nodes are stored as parallel arrays (current/previous position, current/previous
//! velocity, neighbour mask) so they can be handed to a data-parallel step kernel
//! without repacking.

use bevy::prelude::*;
use rand::Rng;

use crate::error::{ClothError, ClothResult};
use crate::math::{Real, Vector, zero_vector};

use super::adjacency::{AnchorPolicy, Direction, NeighborMask, derive_mask};
use super::grid_index::GridIndex;

/// Where the nodes start out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLayout {
    pub origin: Vector,
    pub row_spacing: Real,
    pub col_spacing: Real,
    pub z_jitter: Real,
}

impl NodeLayout {
    /// Position of `(row, col)` before jitter.
    #[inline]
    pub fn rest_position(&self, row: usize, col: usize) -> Vector {
        self.origin
            + Vector::new(
                col as Real * self.col_spacing,
                -(row as Real) * self.row_spacing,
                0.0,
            )
    }

    /// Spacing and jitter must be finite and non-negative, the origin finite.
    pub fn validate(&self) -> ClothResult<()> {
        if !self.origin.is_finite() {
            let value = [self.origin.x, self.origin.y, self.origin.z]
                .into_iter()
                .find(|v| !v.is_finite())
                .unwrap_or(Real::NAN);
            return Err(ClothError::InvalidParameter {
                name: "origin",
                value,
            });
        }

        let non_negative = [
            ("row_spacing", self.row_spacing),
            ("col_spacing", self.col_spacing),
            ("z_jitter", self.z_jitter),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ClothError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Mutable view over all node buffers, split so a kernel can read some while writing others.
pub struct NodeBuffers<'a> {
    pub positions: &'a mut [Vector],
    pub prev_positions: &'a mut [Vector],
    pub velocities: &'a mut [Vector],
    pub prev_velocities: &'a mut [Vector],
    pub masks: &'a [NeighborMask],
    pub grid: GridIndex,
}

#[derive(Clone)]
pub struct ClothState {
    grid: GridIndex,
    anchor_policy: AnchorPolicy,
    positions: Vec<Vector>,
    prev_positions: Vec<Vector>,
    velocities: Vec<Vector>,
    prev_velocities: Vec<Vector>,
    masks: Vec<NeighborMask>,
}

impl ClothState {
    /// Build a fresh, untorn cloth.
    pub fn new<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        layout: &NodeLayout,
        anchor_policy: AnchorPolicy,
        rng: &mut R,
    ) -> ClothResult<Self> {
        if rows < 1 || cols < 1 {
            return Err(ClothError::InvalidDimensions { rows, cols });
        }
        layout.validate()?;

        let grid = GridIndex::new(rows, cols);
        let node_count = grid.node_count();
        let mut positions = Vec::with_capacity(node_count);
        let mut masks = Vec::with_capacity(node_count);

        for index in 0..node_count {
            let (row, col) = (grid.row(index), grid.col(index));
            let jitter = if layout.z_jitter > 0.0 {
                rng.random_range(-layout.z_jitter..=layout.z_jitter)
            } else {
                0.0
            };
            positions.push(layout.rest_position(row, col) + Vector::new(0.0, 0.0, jitter));
            masks.push(derive_mask(row, col, rows, cols, &anchor_policy));
        }

        debug!(
            "cloth initialized: {}x{} nodes, anchor policy {:?}",
            rows, cols, anchor_policy
        );

        Ok(Self {
            grid,
            anchor_policy,
            prev_positions: positions.clone(),
            positions,
            velocities: vec![zero_vector(); node_count],
            prev_velocities: vec![zero_vector(); node_count],
            masks,
        })
    }

    /// Hard reset: every buffer is rebuilt, torn edges are restored.
    ///
    /// On error `self` is left as it was.
    pub fn reinitialize<R: Rng + ?Sized>(
        &mut self,
        layout: &NodeLayout,
        rng: &mut R,
    ) -> ClothResult<()> {
        *self = Self::new(
            self.grid.rows(),
            self.grid.cols(),
            layout,
            self.anchor_policy,
            rng,
        )?;
        Ok(())
    }

    pub fn grid(&self) -> GridIndex {
        self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn node_count(&self) -> usize {
        self.grid.node_count()
    }

    pub fn anchor_policy(&self) -> AnchorPolicy {
        self.anchor_policy
    }

    pub fn positions(&self) -> &[Vector] {
        &self.positions
    }

    pub fn prev_positions(&self) -> &[Vector] {
        &self.prev_positions
    }

    pub fn velocities(&self) -> &[Vector] {
        &self.velocities
    }

    pub fn prev_velocities(&self) -> &[Vector] {
        &self.prev_velocities
    }

    pub fn masks(&self) -> &[NeighborMask] {
        &self.masks
    }

    pub fn mask(&self, index: usize) -> NeighborMask {
        self.masks[index]
    }

    pub fn position(&self, index: usize) -> Vector {
        self.positions[index]
    }

    pub(crate) fn masks_mut(&mut self) -> &mut [NeighborMask] {
        &mut self.masks
    }

    /// Split borrow handed to the step kernel; masks stay read-only.
    pub fn buffers_mut(&mut self) -> NodeBuffers<'_> {
        NodeBuffers {
            positions: &mut self.positions,
            prev_positions: &mut self.prev_positions,
            velocities: &mut self.velocities,
            prev_velocities: &mut self.prev_velocities,
            masks: &self.masks,
            grid: self.grid,
        }
    }

    /// Every present spring exactly once, as `(from, to, direction)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Direction)> + '_ {
        (0..self.node_count()).flat_map(move |index| {
            let mask = self.masks[index];
            Direction::FORWARD.into_iter().filter_map(move |direction| {
                if !mask.has(direction) {
                    return None;
                }
                self.grid
                    .neighbor(index, direction)
                    .map(|other| (index, other, direction))
            })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
