pub mod adjacency;
pub mod cloth_state;
pub mod grid_index;
pub mod topology;

pub use adjacency::{ANCHOR_BIT, AnchorPolicy, Direction, NeighborMask, derive_mask};
pub use cloth_state::{ClothState, NodeBuffers, NodeLayout};
pub use grid_index::GridIndex;
pub use topology::{detach_node, tear_edge};
