use log::{debug, trace};
use rand::Rng;

use crate::cells::{Cartesian3DCoordinate, Direction};
use crate::generators::Generator;
use crate::grid::Grid;
use crate::random;

/// Scratch flag for cells already joined to the tree.
const IN_TREE: u8 = 1 << 6;
/// Scratch flag for cells waiting in the frontier.
const IN_FRONTIER: u8 = 1 << 7;

/// Randomized Prim's algorithm.
///
/// Grows a single tree from a random root. Each step takes a uniformly random cell from the
/// frontier, joins it to one of its neighbours already in the tree, and pushes its untouched
/// neighbours onto the frontier. The result has many short dead ends radiating out from the
/// root.
///
/// Membership of the tree and the frontier is tracked in the scratch bits of each cell mask,
/// which are cleared again once the frontier runs dry.
pub struct Prim<'a, R: Rng> {
    grid: &'a mut Grid,
    rng: R,
    directions: [Direction; 6],
    frontier: Vec<Cartesian3DCoordinate>,
    finished: bool,
}

impl<'a, R: Rng> Prim<'a, R> {
    pub fn new(grid: &'a mut Grid, mut rng: R) -> Prim<'a, R> {
        let root = grid.random_cell(&mut rng);
        let root_index = grid.index(root);
        *grid.mask_at_mut(root_index) |= IN_TREE;

        let mut prim = Prim {
            grid,
            rng,
            directions: Direction::ALL,
            frontier: Vec::new(),
            finished: false,
        };
        prim.expand(root);
        debug!("prim: size {}, root {}, initial frontier {}",
               prim.grid.size(),
               root,
               prim.frontier.len());
        prim
    }

    /// Cells adjacent to the tree that have not joined it yet.
    #[inline]
    pub fn frontier(&self) -> &[Cartesian3DCoordinate] {
        &self.frontier
    }

    /// Push every untouched neighbour of `coord` onto the frontier, at most once each.
    fn expand(&mut self, coord: Cartesian3DCoordinate) {
        for &dir in Direction::ALL.iter() {
            if let Some(neighbour) = self.grid.neighbour_at_direction(coord, dir) {
                let j = self.grid.index(neighbour);
                let mask = self.grid.mask_at_mut(j);
                if *mask == 0 {
                    *mask = IN_FRONTIER;
                    self.frontier.push(neighbour);
                }
            }
        }
    }

    /// Join a frontier cell to a random neighbour already in the tree.
    fn attach(&mut self, coord: Cartesian3DCoordinate) {
        random::shuffle(&mut self.rng, &mut self.directions);
        let directions = self.directions;
        let i = self.grid.index(coord);

        for &dir in directions.iter() {
            if let Some(neighbour) = self.grid.neighbour_at_direction(coord, dir) {
                let j = self.grid.index(neighbour);
                if self.grid.mask_at(j) & IN_TREE != 0 {
                    self.grid.connect(i, j, dir);
                    trace!("attached {} to {}", coord, neighbour);
                    break;
                }
            }
        }

        let mask = self.grid.mask_at_mut(i);
        *mask = (*mask & !IN_FRONTIER) | IN_TREE;
    }

    fn finish(&mut self) {
        if !self.finished {
            self.grid.clear_scratch();
            self.finished = true;
            debug!("prim: finished with {} links", self.grid.links_count());
        }
    }
}

impl<'a, R: Rng> Generator for Prim<'a, R> {
    fn step(&mut self) -> bool {
        if self.frontier.is_empty() {
            self.finish();
            return false;
        }

        let pick = random::random_int(&mut self.rng, self.frontier.len());
        let coord = self.frontier.swap_remove(pick);
        self.attach(coord);
        self.expand(coord);

        if self.frontier.is_empty() {
            self.finish();
            false
        } else {
            true
        }
    }

    fn grid(&self) -> &Grid {
        &*self.grid
    }
}
