use log::{debug, trace};
use rand::Rng;

use crate::cells::{Cartesian3DCoordinate, Direction};
use crate::generators::Generator;
use crate::grid::Grid;
use crate::random;

/// Randomized depth first search.
///
/// Carves a passage from the cursor to a random unvisited neighbour and moves there, a cell
/// being unvisited while its mask is all zero. When the cursor is boxed in the path is
/// unwound until a cell with an unvisited neighbour turns up. Produces long winding corridors
/// with few dead ends.
///
/// The direction order is reshuffled on every attempt so no axis is favoured.
pub struct RecursiveBacktracking<'a, R: Rng> {
    grid: &'a mut Grid,
    rng: R,
    directions: [Direction; 6],
    cursor: Cartesian3DCoordinate,
    stack: Vec<Cartesian3DCoordinate>,
}

impl<'a, R: Rng> RecursiveBacktracking<'a, R> {
    /// Starts from a uniformly random cell.
    pub fn new(grid: &'a mut Grid, mut rng: R) -> RecursiveBacktracking<'a, R> {
        let cursor = grid.random_cell(&mut rng);
        debug!("recursive backtracking: size {}, starting at {}", grid.size(), cursor);

        RecursiveBacktracking {
            grid,
            rng,
            directions: Direction::ALL,
            cursor,
            stack: vec![cursor],
        }
    }

    /// The cell most recently carved into, or backtracked to.
    #[inline]
    pub fn cursor(&self) -> Cartesian3DCoordinate {
        self.cursor
    }

    /// The current path from the start cell to the cursor.
    #[inline]
    pub fn stack(&self) -> &[Cartesian3DCoordinate] {
        &self.stack
    }

    /// Connect `from` to one of its unvisited neighbours, returning that neighbour.
    fn carve_from(&mut self, from: Cartesian3DCoordinate) -> Option<Cartesian3DCoordinate> {
        random::shuffle(&mut self.rng, &mut self.directions);
        let directions = self.directions;

        for &dir in directions.iter() {
            if let Some(next) = self.grid.neighbour_at_direction(from, dir) {
                let j = self.grid.index(next);
                if self.grid.mask_at(j) == 0 {
                    let i = self.grid.index(from);
                    self.grid.connect(i, j, dir);
                    trace!("carved {} -> {}", from, next);
                    return Some(next);
                }
            }
        }
        None
    }
}

impl<'a, R: Rng> Generator for RecursiveBacktracking<'a, R> {
    fn step(&mut self) -> bool {
        while let Some(&top) = self.stack.last() {
            self.cursor = top;
            if let Some(next) = self.carve_from(top) {
                self.cursor = next;
                self.stack.push(next);
                return true;
            }

            // Dead end, the cell stays off the stack for good.
            let _ = self.stack.pop();
            if self.stack.is_empty() {
                debug!("recursive backtracking: finished with {} links",
                       self.grid.links_count());
            }
        }
        false
    }

    fn grid(&self) -> &Grid {
        &*self.grid
    }
}
