use std::error;
use std::fmt;

/// Configuration errors, reported when a grid or generator is constructed and before any
/// cell is touched.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// Grids need at least one cell along each axis.
    InvalidSize(usize),
    /// The cell count does not fit the grid's `u32` cell indices.
    GridTooLarge(usize),
    /// Kruskal's packed edges reserve the top two bits of a `u32` for the axis, so the
    /// largest cell index must fit in the remaining 30 bits.
    PackedEdgeOverflow(usize),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidSize(size) => write!(f, "invalid grid size {}, must be at least 1", size),
            MazeError::GridTooLarge(size) => {
                write!(f, "grid size {} has too many cells to index", size)
            }
            MazeError::PackedEdgeOverflow(size) => {
                write!(f,
                       "grid size {} is too large for packed edges, at most 2^30 cells are supported",
                       size)
            }
        }
    }
}

impl error::Error for MazeError {}
