use crate::errors::MazeError;
use crate::generators::Algorithm;
use crate::grid::Grid;

/// What to build: an edge length, an algorithm, and whether the construction is shown step
/// by step.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Settings {
    pub size: usize,
    pub animate: bool,
    pub algorithm: Algorithm,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            size: 25,
            animate: false,
            algorithm: Algorithm::RecursiveBacktracking,
        }
    }
}

impl Settings {
    /// Reject a size the chosen algorithm cannot handle, before any grid is allocated.
    pub fn validate(&self) -> Result<(), MazeError> {
        self.algorithm.check_size(self.size)
    }

    /// An empty grid ready for the configured algorithm.
    pub fn empty_grid(&self) -> Result<Grid, MazeError> {
        self.validate()?;
        Grid::new(self.size)
    }
}
