//! CPU mass-spring kernel.
//!
//! Jacobi-style update: the entering state is snapshotted into the `prev_*`
//! buffers first, then every node integrates in parallel reading only that
//! snapshot, so the result does not depend on iteration order.

use rayon::prelude::*;

use crate::core::{Direction, GridIndex, NeighborMask, NodeBuffers};
use crate::error::ClothResult;
use crate::math::{Real, Vector};

use super::kernel::{KernelParams, NodeStepKernel, SphereObstacle};

const SQRT_2: Real = std::f32::consts::SQRT_2;

#[derive(Clone, Copy, Debug, Default)]
pub struct SpringKernel;

impl SpringKernel {
    pub fn new() -> Self {
        Self
    }
}

#[inline]
fn node_acceleration(
    index: usize,
    mask: NeighborMask,
    prev_positions: &[Vector],
    prev_velocities: &[Vector],
    grid: GridIndex,
    params: &KernelParams,
) -> Vector {
    let position = prev_positions[index];
    let velocity = prev_velocities[index];
    let mut acc = Vector::new(0.0, -params.gravity, 0.0);

    for direction in Direction::ALL {
        if !mask.has(direction) {
            continue;
        }
        let Some(other) = grid.neighbor(index, direction) else {
            continue;
        };

        let rest = if direction.is_diagonal() {
            params.rest_length * SQRT_2
        } else {
            params.rest_length
        };
        let stretch = position - prev_positions[other];
        acc -= params.spring_stiffness * (stretch - rest * stretch.normalize_or_zero());
        acc -= params.structural_drag * (velocity - prev_velocities[other]);
    }

    acc -= params.aerodynamic_drag * (velocity - params.wind);
    acc
}

/// Push a node out of the sphere and damp the normal part of its relative velocity.
#[inline]
fn resolve_obstacle(
    position: &mut Vector,
    velocity: &mut Vector,
    obstacle: &SphereObstacle,
    params: &KernelParams,
) {
    let offset = *position - obstacle.center;
    let reach = obstacle.radius + params.node_radius;
    let distance = offset.length();
    if distance >= reach || distance <= Real::EPSILON {
        return;
    }

    let normal = offset / distance;
    *position = obstacle.center + normal * reach;

    let relative = *velocity - obstacle.velocity;
    let approach = relative.dot(normal);
    if approach < 0.0 {
        let restitution = 1.0 - params.absorption;
        *velocity -= (1.0 + restitution) * approach * normal;
    }
}

impl NodeStepKernel for SpringKernel {
    fn step(&mut self, buffers: NodeBuffers<'_>, params: &KernelParams) -> ClothResult<()> {
        let NodeBuffers {
            positions,
            prev_positions,
            velocities,
            prev_velocities,
            masks,
            grid,
        } = buffers;

        prev_positions.copy_from_slice(positions);
        prev_velocities.copy_from_slice(velocities);

        let prev_positions: &[Vector] = prev_positions;
        let prev_velocities: &[Vector] = prev_velocities;
        let dt = params.dt;

        positions
            .par_iter_mut()
            .zip(velocities.par_iter_mut())
            .enumerate()
            .for_each(|(index, (position, velocity))| {
                let mask = masks[index];
                if mask.is_anchored() {
                    return;
                }

                let acc =
                    node_acceleration(index, mask, prev_positions, prev_velocities, grid, params);
                *velocity = prev_velocities[index] + acc * dt;
                *position = prev_positions[index] + *velocity * dt;

                if let Some(obstacle) = &params.obstacle {
                    resolve_obstacle(position, velocity, obstacle, params);
                }
            });

        Ok(())
    }

    fn name(&self) -> &str {
        "cpu-spring"
    }
}
