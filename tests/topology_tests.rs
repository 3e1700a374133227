use clothtear::core::{AnchorPolicy, ClothState, Direction, NodeLayout, detach_node, tear_edge};
use clothtear::ClothError;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn build(rows: usize, cols: usize) -> ClothState {
    let layout = NodeLayout {
        origin: bevy::math::Vec3::ZERO,
        row_spacing: 1.0,
        col_spacing: 1.0,
        z_jitter: 0.0,
    };
    let mut rng = StdRng::seed_from_u64(9);
    ClothState::new(rows, cols, &layout, AnchorPolicy::TopRow, &mut rng).unwrap()
}

fn assert_symmetric(state: &ClothState) {
    let grid = state.grid();
    for index in 0..state.node_count() {
        for direction in Direction::ALL {
            if let Some(other) = grid.neighbor(index, direction) {
                assert_eq!(
                    state.mask(index).has(direction),
                    state.mask(other).has(direction.mirror()),
                    "asymmetric edge {} -> {} ({:?})",
                    index,
                    other,
                    direction,
                );
            }
        }
    }
}

#[test]
fn tearing_right_edge_clears_both_sides() {
    let mut state = build(3, 3);
    assert_eq!(tear_edge(&mut state, 0, 1), Ok(true));
    assert!(!state.mask(0).has_right());
    assert!(!state.mask(1).has_left());
    assert!(state.mask(0).has_down());
    assert_symmetric(&state);
}

#[test]
fn tear_is_order_independent() {
    let mut state = build(3, 3);
    // (1, 1) -> (0, 0) is the up-left edge of the center node.
    assert_eq!(tear_edge(&mut state, 4, 0), Ok(true));
    assert!(!state.mask(4).has_up_left());
    assert!(!state.mask(0).has_down_right());
    assert_eq!(tear_edge(&mut state, 0, 4), Ok(false));
}

#[test]
fn second_tear_changes_nothing() {
    let mut state = build(3, 3);
    tear_edge(&mut state, 3, 7).unwrap();
    let before: Vec<u32> = state.masks().iter().map(|mask| mask.bits()).collect();
    assert_eq!(tear_edge(&mut state, 3, 7), Ok(false));
    let after: Vec<u32> = state.masks().iter().map(|mask| mask.bits()).collect();
    assert_eq!(before, after);
}

#[test]
fn non_adjacent_pair_is_rejected_without_mutation() {
    let mut state = build(3, 3);
    let before = state.masks().to_vec();

    assert_eq!(
        tear_edge(&mut state, 0, 2),
        Err(ClothError::NotAdjacent { a: 0, b: 2 })
    );
    // 2 and 3 are consecutive indices but sit on different rows at opposite edges.
    assert_eq!(
        tear_edge(&mut state, 2, 3),
        Err(ClothError::NotAdjacent { a: 2, b: 3 })
    );
    assert_eq!(
        tear_edge(&mut state, 4, 4),
        Err(ClothError::NotAdjacent { a: 4, b: 4 })
    );
    assert_eq!(state.masks(), before.as_slice());
}

#[test]
fn out_of_range_pair_is_rejected() {
    let mut state = build(3, 3);
    assert_eq!(
        tear_edge(&mut state, 8, 9),
        Err(ClothError::NodeOutOfBounds { index: 9, count: 9 })
    );
}

#[test]
fn symmetry_survives_a_sequence_of_tears() {
    let mut state = build(5, 6);
    let grid = state.grid();
    let pairs = [
        (grid.index(1, 1), grid.index(1, 2)),
        (grid.index(2, 3), grid.index(3, 2)),
        (grid.index(4, 5), grid.index(3, 5)),
        (grid.index(0, 0), grid.index(1, 1)),
        (grid.index(2, 2), grid.index(1, 1)),
        (grid.index(1, 2), grid.index(1, 1)),
    ];
    for (a, b) in pairs {
        tear_edge(&mut state, a, b).unwrap();
        assert_symmetric(&state);
    }
    assert_eq!(state.edge_count(), 5 * 5 + 4 * 6 + 2 * 4 * 5 - 5);
}

#[test]
fn detached_node_keeps_no_edges() {
    let mut state = build(3, 3);
    assert_eq!(detach_node(&mut state, 4), Ok(8));
    assert_eq!(state.mask(4).edge_count(), 0);
    assert_symmetric(&state);
    assert_eq!(detach_node(&mut state, 4), Ok(0));
}

#[test]
fn reinitialize_restores_torn_edges() {
    let mut state = build(3, 3);
    let full = state.masks().to_vec();
    tear_edge(&mut state, 0, 1).unwrap();
    tear_edge(&mut state, 4, 8).unwrap();

    let layout = NodeLayout {
        origin: bevy::math::Vec3::ZERO,
        row_spacing: 1.0,
        col_spacing: 1.0,
        z_jitter: 0.0,
    };
    let mut rng = StdRng::seed_from_u64(1);
    state.reinitialize(&layout, &mut rng).unwrap();
    assert_eq!(state.masks(), full.as_slice());
    assert_eq!(state.positions(), state.prev_positions());
}
