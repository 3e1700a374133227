//! Error types for cloth construction, topology edits and stepping.

use std::fmt;

/// Errors that can occur while building or mutating a cloth.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid must have at least one row and one column.
    InvalidDimensions { rows: usize, cols: usize },
    /// A frame needs at least one substep.
    InvalidPasses(u32),
    /// A physical parameter is out of its valid range.
    InvalidParameter { name: &'static str, value: f32 },
    /// Node index is outside the grid.
    NodeOutOfBounds { index: usize, count: usize },
    /// The two nodes are not grid neighbours in any of the 8 directions.
    NotAdjacent { a: usize, b: usize },
    /// The step kernel reported a failure.
    Kernel(String),
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidDimensions { rows, cols } => {
                write!(f, "cloth grid must be at least 1x1 (got {}x{})", rows, cols)
            }
            ClothError::InvalidPasses(passes) => {
                write!(f, "substep count must be at least 1 (got {})", passes)
            }
            ClothError::InvalidParameter { name, value } => {
                write!(f, "parameter `{}` has invalid value {}", name, value)
            }
            ClothError::NodeOutOfBounds { index, count } => {
                write!(f, "node index {} out of bounds (count: {})", index, count)
            }
            ClothError::NotAdjacent { a, b } => {
                write!(f, "nodes {} and {} are not grid neighbours", a, b)
            }
            ClothError::Kernel(message) => write!(f, "step kernel failed: {}", message),
        }
    }
}

impl std::error::Error for ClothError {}

pub type ClothResult<T> = Result<T, ClothError>;
