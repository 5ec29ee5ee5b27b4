use std::fmt;

use log::{debug, trace};
use rand::Rng;

use crate::cells::Axis;
use crate::disjoint_set::DisjointSet;
use crate::errors::MazeError;
use crate::generators::Generator;
use crate::grid::Grid;
use crate::random;

const INDEX_BITS: u32 = 30;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// A candidate passage from a cell to its positive neighbour along one axis, packed into a
/// `u32` as `(axis << 30) | cell index`.
#[derive(Hash, Eq, PartialEq, Copy, Clone)]
pub struct PackedEdge(u32);

impl PackedEdge {
    /// `index` must fit in 30 bits, which `check_packing` guarantees for any grid a
    /// `Kruskal` accepts.
    #[inline]
    pub fn new(index: usize, axis: Axis) -> PackedEdge {
        debug_assert!(index <= INDEX_MASK as usize);
        PackedEdge(((axis.index() as u32) << INDEX_BITS) | index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self.0 >> INDEX_BITS {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }
}

impl fmt::Debug for PackedEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PackedEdge :: index: {:?}, axis: {:?}", self.index(), self.axis())
    }
}

/// Fail unless every cell index of a grid of this size fits a packed edge.
pub fn check_packing(size: usize) -> Result<(), MazeError> {
    if size == 0 {
        return Err(MazeError::InvalidSize(size));
    }
    match size.checked_pow(3) {
        Some(cells) if cells - 1 <= INDEX_MASK as usize => Ok(()),
        _ => Err(MazeError::PackedEdgeOverflow(size)),
    }
}

/// Number of candidate passages in a grid, `size² * (size - 1)` along each of the 3 axes.
pub fn candidate_edges_count(size: usize) -> usize {
    3 * size * size * (size - 1)
}

/// Randomized Kruskal's algorithm.
///
/// Every candidate passage is listed once and the whole list shuffled up front. Steps then
/// take passages off the end of the list, dropping any whose cells are already connected,
/// and open the first one that joins two separate regions. The regions are tracked in a
/// disjoint set so a cycle can never form.
pub struct Kruskal<'a> {
    grid: &'a mut Grid,
    sets: DisjointSet,
    edges: Vec<PackedEdge>,
    finished: bool,
}

impl<'a> Kruskal<'a> {
    /// Fails before touching the grid if its cells cannot be packed into edges.
    pub fn new<R: Rng>(grid: &'a mut Grid, mut rng: R) -> Result<Kruskal<'a>, MazeError> {
        let size = grid.size();
        check_packing(size)?;

        let mut edges = Vec::with_capacity(candidate_edges_count(size));
        let mut i = 0;
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    if x + 1 < size {
                        edges.push(PackedEdge::new(i, Axis::X));
                    }
                    if y + 1 < size {
                        edges.push(PackedEdge::new(i, Axis::Y));
                    }
                    if z + 1 < size {
                        edges.push(PackedEdge::new(i, Axis::Z));
                    }
                    i += 1;
                }
            }
        }
        random::shuffle(&mut rng, &mut edges);
        debug!("kruskal: size {}, {} candidate edges", size, edges.len());

        Ok(Kruskal {
            sets: DisjointSet::new(grid.elements()),
            grid,
            edges,
            finished: false,
        })
    }

    /// Which cells are already joined by passages.
    #[inline]
    pub fn sets(&self) -> &DisjointSet {
        &self.sets
    }

    /// Candidates not yet considered, the next one at the end.
    #[inline]
    pub fn remaining_edges(&self) -> &[PackedEdge] {
        &self.edges
    }
}

impl<'a> Generator for Kruskal<'a> {
    fn step(&mut self) -> bool {
        while let Some(edge) = self.edges.pop() {
            let i = edge.index();
            let axis = edge.axis();
            let j = self.grid.positive_neighbour_index(i, axis);
            if self.sets.union(i, j) {
                self.grid.connect(i, j, axis.positive());
                trace!("opened {:?}", edge);
                break;
            }
        }

        let more = !self.edges.is_empty();
        if !more && !self.finished {
            self.finished = true;
            debug!("kruskal: finished with {} links, {} sets",
                   self.grid.links_count(),
                   self.sets.sets_count());
        }
        more
    }

    fn grid(&self) -> &Grid {
        &*self.grid
    }
}
