use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Axis, Cartesian3DCoordinate, Direction, CONNECTION_MASK, SCRATCH_MASK};
use crate::errors::MazeError;
use crate::random;
use crate::units::{EdgesCount, NodesCount};

pub type CoordinateSmallVec = SmallVec<[Cartesian3DCoordinate; 6]>;

/// A cubic lattice of `size³` cells, each holding a byte of neighbour flags.
///
/// Cell `(x, y, z)` lives at index `x + size * y + size² * z`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    strides: [usize; 3],
    cells: Vec<u8>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: size: {:?}, links: {:?}/{:?}",
               self.size, self.links_count(), self.connectors())
    }
}

impl Grid {
    /// An empty grid, no passages anywhere.
    pub fn new(size: usize) -> Result<Grid, MazeError> {
        if size == 0 {
            return Err(MazeError::InvalidSize(size));
        }
        let cells_count = size.checked_pow(3).ok_or(MazeError::GridTooLarge(size))?;
        if cells_count - 1 > u32::MAX as usize {
            return Err(MazeError::GridTooLarge(size));
        }

        Ok(Grid {
            size,
            strides: [1, size, size * size],
            cells: vec![0; cells_count],
        })
    }

    /// Edge length of the cube.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn strides(&self) -> [usize; 3] {
        self.strides
    }

    /// Number of cells.
    #[inline]
    pub fn elements(&self) -> usize {
        self.cells.len()
    }

    /// Number of passages in a finished maze.
    #[inline]
    pub fn connectors(&self) -> usize {
        self.cells.len() - 1
    }

    /// Lattice extent along one axis when cells and the connector slots between them are
    /// laid out together, as a renderer does.
    #[inline]
    pub fn dimensions(&self) -> usize {
        2 * self.size - 1
    }

    /// Capacity hint for a graph of this grid once it is a finished maze.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.elements()), EdgesCount(self.connectors()))
    }

    /// Linear index of a coordinate. Plain arithmetic, no bounds are checked.
    #[inline]
    pub fn index(&self, coord: Cartesian3DCoordinate) -> usize {
        coord.x as usize + self.strides[1] * coord.y as usize + self.strides[2] * coord.z as usize
    }

    /// Inverse of `index` for indices in `0..elements()`.
    #[inline]
    pub fn coordinate(&self, index: usize) -> Cartesian3DCoordinate {
        let x = index % self.size;
        let y = (index / self.size) % self.size;
        let z = index / self.strides[2];
        Cartesian3DCoordinate::new(x as u32, y as u32, z as u32)
    }

    /// Is any component of the coordinate outside `[0, size)`?
    #[inline]
    pub fn out_of_bounds(&self, coord: Cartesian3DCoordinate) -> bool {
        let n = self.size;
        coord.x as usize >= n || coord.y as usize >= n || coord.z as usize >= n
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian3DCoordinate) -> bool {
        !self.out_of_bounds(coord)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.elements().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian3DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(self.index(coord))
        } else {
            None
        }
    }

    /// The full mask of a cell.
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, coord: Cartesian3DCoordinate) -> u8 {
        self.cells[self.checked_index(coord)]
    }

    /// Overwrite the full mask of a cell. Nothing is done to the neighbours, keeping passages
    /// recorded on both sides is up to the caller.
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn set(&mut self, coord: Cartesian3DCoordinate, mask: u8) {
        let index = self.checked_index(coord);
        self.cells[index] = mask;
    }

    /// Every cell mask in index order, for renderers polling the grid.
    #[inline]
    pub fn masks(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub(crate) fn mask_at(&self, index: usize) -> u8 {
        self.cells[index]
    }

    #[inline]
    pub(crate) fn mask_at_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.cells[index]
    }

    /// Open a passage from cell index `a` in `direction` to its neighbour index `b`.
    #[inline]
    pub(crate) fn connect(&mut self, a: usize, b: usize, direction: Direction) {
        self.cells[a] |= direction.bit();
        self.cells[b] |= direction.opposite().bit();
    }

    /// Index of the positive neighbour along `axis`, the caller guarantees it exists.
    #[inline]
    pub(crate) fn positive_neighbour_index(&self, index: usize, axis: Axis) -> usize {
        index + self.strides[axis.index()]
    }

    /// Link a cell to its neighbour in the given direction, recording the passage on both.
    /// Returns the neighbour's coordinate.
    pub fn link(&mut self,
                coord: Cartesian3DCoordinate,
                direction: Direction)
                -> Result<Cartesian3DCoordinate, CellLinkError> {
        let neighbour = self.neighbour_at_direction(coord, direction)
            .ok_or(CellLinkError::InvalidGridCoordinate)?;
        if self.out_of_bounds(coord) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let (a, b) = (self.index(coord), self.index(neighbour));
        self.connect(a, b, direction);
        Ok(neighbour)
    }

    /// Remove the passage from a cell in the given direction, if there is one.
    /// Returns true if an unlink occurred.
    pub fn unlink(&mut self, coord: Cartesian3DCoordinate, direction: Direction) -> bool {
        if !self.is_neighbour_linked(coord, direction) {
            return false;
        }
        if let Some(neighbour) = self.neighbour_at_direction(coord, direction) {
            let (a, b) = (self.index(coord), self.index(neighbour));
            self.cells[a] &= !direction.bit();
            self.cells[b] &= !direction.opposite().bit();
            true
        } else {
            false
        }
    }

    /// Is there a passage leaving the cell in the given direction to a cell on the grid?
    pub fn is_neighbour_linked(&self, coord: Cartesian3DCoordinate, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() &&
        self.is_valid_coordinate(coord) &&
        self.cells[self.index(coord)] & direction.bit() != 0
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian3DCoordinate, b: Cartesian3DCoordinate) -> bool {
        Direction::ALL
            .iter()
            .any(|&dir| a.offset(dir) == Some(b) && self.is_neighbour_linked(a, dir))
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian3DCoordinate,
                                  direction: Direction)
                                  -> Option<Cartesian3DCoordinate> {
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Cells adjacent along an axis, whether or not a passage joins them.
    pub fn neighbours(&self, coord: Cartesian3DCoordinate) -> CoordinateSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// Cells joined to a particular cell by a passage. None for an invalid coordinate.
    pub fn links(&self, coord: Cartesian3DCoordinate) -> Option<CoordinateSmallVec> {
        if self.out_of_bounds(coord) {
            return None;
        }
        let linked_cells = Direction::ALL
            .iter()
            .filter(|&&dir| self.is_neighbour_linked(coord, dir))
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect();
        Some(linked_cells)
    }

    /// Number of open passages, each counted once.
    pub fn links_count(&self) -> usize {
        let flags: u32 = self.cells
            .iter()
            .map(|mask| (mask & CONNECTION_MASK).count_ones())
            .sum();
        flags as usize / 2
    }

    #[inline]
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cartesian3DCoordinate {
        let n = self.size;
        Cartesian3DCoordinate::new(random::random_int(rng, n) as u32,
                                   random::random_int(rng, n) as u32,
                                   random::random_int(rng, n) as u32)
    }

    /// Drop any generator bookkeeping bits, leaving only passages.
    pub fn clear_scratch(&mut self) {
        for mask in self.cells.iter_mut() {
            *mask &= !SCRATCH_MASK;
        }
    }

    /// All coordinates in index order.
    #[inline]
    pub fn iter(&self) -> CellIter<'_> {
        CellIter {
            grid: self,
            current_cell_number: 0,
        }
    }

    /// Every open passage once, as (lower cell, higher cell) pairs.
    pub fn iter_links(&self) -> LinksIter<'_> {
        LinksIter {
            grid: self,
            index: 0,
            axis: 0,
        }
    }

    /// The maze as an undirected graph, node weights are the cell coordinates and node
    /// indices match the grid's cell indices.
    pub fn to_graph(&self) -> UnGraph<Cartesian3DCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            let _ = graph.add_edge(NodeIndex::new(self.index(a)), NodeIndex::new(self.index(b)), ());
        }
        graph
    }

    fn checked_index(&self, coord: Cartesian3DCoordinate) -> usize {
        assert!(self.is_valid_coordinate(coord),
                "coordinate {} is outside a grid of size {}",
                coord,
                self.size);
        self.index(coord)
    }
}

#[derive(Clone, Debug)]
pub struct CellIter<'a> {
    grid: &'a Grid,
    current_cell_number: usize,
}

impl<'a> Iterator for CellIter<'a> {
    type Item = Cartesian3DCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.grid.elements() {
            let coord = self.grid.coordinate(self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.elements() - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl<'a> ExactSizeIterator for CellIter<'a> {} // default impl using size_hint()

#[derive(Clone, Debug)]
pub struct LinksIter<'a> {
    grid: &'a Grid,
    index: usize,
    axis: usize,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (Cartesian3DCoordinate, Cartesian3DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        // Only the positive flags are visited, each passage is recorded on both ends.
        while self.index < self.grid.elements() {
            let (index, axis_index) = (self.index, self.axis);
            self.axis += 1;
            if self.axis == Axis::ALL.len() {
                self.axis = 0;
                self.index += 1;
            }

            let axis = Axis::ALL[axis_index];
            if self.grid.mask_at(index) & axis.positive().bit() != 0 {
                let src = self.grid.coordinate(index);
                let dst = self.grid.coordinate(self.grid.positive_neighbour_index(index, axis));
                return Some((src, dst));
            }
        }
        None
    }
}

impl fmt::Display for Grid {
    /// One box drawn layer per z slice, rows running down the y axis. Cell bodies mark the
    /// passages leaving the layer: `U` towards +z, `D` towards -z.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const OPEN_LR_3: &str = "   ";
        const WALL_UD: &str = "|";
        const OPEN_UD: &str = " ";

        let n = self.size as u32;
        for z in 0..n {
            writeln!(f, "z = {}", z)?;

            let mut top_boundary = String::from(CORNER);
            for _ in 0..n {
                top_boundary.push_str(WALL_LR_3);
                top_boundary.push_str(CORNER);
            }
            writeln!(f, "{}", top_boundary)?;

            for y in 0..n {
                // Each cell uses the southern wall of the cell above as its own northern wall.
                let mut row_middle_section_render = String::from(WALL_UD);
                let mut row_bottom_section_render = String::from(CORNER);

                for x in 0..n {
                    let cell_coord = Cartesian3DCoordinate::new(x, y, z);
                    let up = self.is_neighbour_linked(cell_coord, Direction::PositiveZ);
                    let down = self.is_neighbour_linked(cell_coord, Direction::NegativeZ);
                    let body = match (up, down) {
                        (true, true) => "U D",
                        (true, false) => " U ",
                        (false, true) => " D ",
                        (false, false) => "   ",
                    };
                    row_middle_section_render.push_str(body);
                    row_middle_section_render.push_str(
                        if self.is_neighbour_linked(cell_coord, Direction::PositiveX) {
                            OPEN_UD
                        } else {
                            WALL_UD
                        });

                    row_bottom_section_render.push_str(
                        if self.is_neighbour_linked(cell_coord, Direction::PositiveY) {
                            OPEN_LR_3
                        } else {
                            WALL_LR_3
                        });
                    row_bottom_section_render.push_str(CORNER);
                }

                writeln!(f, "{}", row_middle_section_render)?;
                writeln!(f, "{}", row_bottom_section_render)?;
            }
        }
        Ok(())
    }
}
