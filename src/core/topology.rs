//! Runtime edge removal ("tearing").
//!
//! Edges are only ever removed, and always from both endpoints at once.

use bevy::prelude::*;

use crate::error::{ClothError, ClothResult};

use super::cloth_state::ClothState;

/// Remove the spring between `a` and `b`.
///
/// Returns `Ok(true)` if an edge was removed and `Ok(false)` if it was already
/// gone. Fails without touching any mask if either index is off the grid or
/// the nodes are not 8-neighbours.
pub fn tear_edge(state: &mut ClothState, a: usize, b: usize) -> ClothResult<bool> {
    let grid = state.grid();
    let count = grid.node_count();
    for index in [a, b] {
        if !grid.contains(index) {
            return Err(ClothError::NodeOutOfBounds { index, count });
        }
    }

    let direction = grid
        .direction_between(a, b)
        .ok_or(ClothError::NotAdjacent { a, b })?;

    let masks = state.masks_mut();
    let forward = masks[a].has(direction);
    let backward = masks[b].has(direction.mirror());
    if !forward && !backward {
        return Ok(false);
    }

    masks[a] = masks[a].without(direction);
    masks[b] = masks[b].without(direction.mirror());
    debug!("tore edge {} -> {} ({:?})", a, b, direction);
    Ok(true)
}

/// Remove every edge attached to `index`, leaving the node isolated.
pub fn detach_node(state: &mut ClothState, index: usize) -> ClothResult<usize> {
    let grid = state.grid();
    if !grid.contains(index) {
        return Err(ClothError::NodeOutOfBounds {
            index,
            count: grid.node_count(),
        });
    }

    let mut removed = 0;
    for direction in super::adjacency::Direction::ALL {
        if let Some(other) = grid.neighbor(index, direction) {
            if tear_edge(state, index, other)? {
                removed += 1;
            }
        }
    }
    Ok(removed)
}
