//! Renderable surface rebuilt from node positions and adjacency.
//!
//! Every node is emitted twice: a front copy at `k` and a back copy at
//! `k + node_count` with the negated normal. Each triangle is written once per
//! side with opposite winding, so the cloth shows from both sides without
//! relying on back-face culling settings.

use bevy::prelude::*;

use crate::core::ClothState;
use crate::math::{Point2, Real, Vector, inv_exact, unit_cross};

#[derive(Resource, Clone, Debug, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<Vector>,
    pub normals: Vec<Vector>,
    pub uvs: Vec<Point2>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn from_state(state: &ClothState) -> Self {
        let mut mesh = Self::default();
        mesh.rebuild(state);
        mesh
    }

    /// Number of triangles emitted per side.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 6
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Refill every buffer from `state`, reusing existing allocations.
    pub fn rebuild(&mut self, state: &ClothState) {
        let grid = state.grid();
        let node_count = grid.node_count();
        let cols = grid.cols();
        let positions = state.positions();
        let masks = state.masks();

        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();

        self.positions.reserve(2 * node_count);
        self.normals.reserve(2 * node_count);
        self.uvs.reserve(2 * node_count);

        self.positions.extend_from_slice(positions);
        self.positions.extend_from_slice(positions);

        // Texture mapping expects u = col / (rows - 1) and v = -row / (cols - 1).
        let inv_rows = inv_exact(grid.rows() as Real - 1.0);
        let inv_cols = inv_exact(grid.cols() as Real - 1.0);

        let back = node_count as u32;
        for i in 0..node_count {
            let mask = masks[i];
            let p = positions[i];
            let mut lower_right = Vector::ZERO;
            let mut upper_left = Vector::ZERO;
            let mut corner = Vector::ZERO;

            if mask.has_right() && mask.has_down() {
                let (a, b, c) = (i as u32, (i + 1) as u32, (i + cols) as u32);
                self.indices.extend_from_slice(&[a, b, c]);
                self.indices
                    .extend_from_slice(&[a + back, c + back, b + back]);
                lower_right = unit_cross(positions[i + cols] - p, positions[i + 1] - p);
            }

            if mask.has_up() && mask.has_left() {
                let (a, b, c) = (i as u32, (i - 1) as u32, (i - cols) as u32);
                self.indices.extend_from_slice(&[a, b, c]);
                self.indices
                    .extend_from_slice(&[a + back, c + back, b + back]);
                upper_left = unit_cross(positions[i - cols] - p, positions[i - 1] - p);
            }

            // Corners covered by a neighbour's triangle only feed the shading normal.
            if mask.has_right() && mask.has_up() {
                corner = unit_cross(positions[i + 1] - p, positions[i - cols] - p);
            }
            if mask.has_left() && mask.has_down() {
                corner = unit_cross(positions[i - 1] - p, positions[i + cols] - p);
            }

            self.normals
                .push(-(lower_right + upper_left + corner).normalize_or_zero());
            self.uvs.push(Point2::new(
                grid.col(i) as Real * inv_rows,
                -(grid.row(i) as Real) * inv_cols,
            ));
        }

        for i in 0..node_count {
            let normal = self.normals[i];
            let uv = self.uvs[i];
            self.normals.push(-normal);
            self.uvs.push(uv);
        }
    }
}
