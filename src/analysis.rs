//! Self checks over a grid's passages, for callers that want to confirm a finished maze.

use bit_set::BitSet;
use petgraph::algo::{connected_components, is_cyclic_undirected};

use crate::cells::Direction;
use crate::grid::Grid;

/// Every passage flag has a neighbour on the grid carrying the opposite flag.
pub fn has_symmetric_links(grid: &Grid) -> bool {
    grid.iter().all(|coord| {
        let mask = grid.get(coord);
        Direction::ALL.iter().filter(|dir| mask & dir.bit() != 0).all(|&dir| {
            grid.neighbour_at_direction(coord, dir)
                .map_or(false, |neighbour| grid.get(neighbour) & dir.opposite().bit() != 0)
        })
    })
}

/// Number of regions of cells mutually reachable through passages.
pub fn count_components(grid: &Grid) -> usize {
    let mut visited = BitSet::with_capacity(grid.elements());
    let mut components = 0;

    for start in 0..grid.elements() {
        if visited.contains(start) {
            continue;
        }
        components += 1;
        let _ = visited.insert(start);
        let mut frontier = vec![start];
        while let Some(index) = frontier.pop() {
            let links = grid.links(grid.coordinate(index)).unwrap_or_default();
            for link in links.iter() {
                let link_index = grid.index(*link);
                if visited.insert(link_index) {
                    frontier.push(link_index);
                }
            }
        }
    }
    components
}

/// Does the grid hold a perfect maze: one connected region with no cycles.
pub fn is_spanning_tree(grid: &Grid) -> bool {
    let graph = grid.to_graph();
    graph.edge_count() == grid.connectors() && connected_components(&graph) == 1 &&
    !is_cyclic_undirected(&graph)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::{Cartesian3DCoordinate, POSITIVE_X};

    fn gc(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(x, y, z)
    }

    #[test]
    fn empty_grid_is_all_islands() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(count_components(&grid), 27);
        assert!(has_symmetric_links(&grid));
        assert!(!is_spanning_tree(&grid));
        assert!(is_spanning_tree(&Grid::new(1).unwrap()));
    }

    #[test]
    fn one_sided_flags_are_asymmetric() {
        let mut grid = Grid::new(2).unwrap();
        grid.set(gc(0, 0, 0), POSITIVE_X);
        assert!(!has_symmetric_links(&grid));

        let mut grid = Grid::new(2).unwrap();
        grid.set(gc(1, 0, 0), POSITIVE_X);
        assert!(!has_symmetric_links(&grid));
    }

    #[test]
    fn loops_are_not_trees() {
        let mut grid = Grid::new(2).unwrap();
        // A square in the z = 0 layer plus three spokes up, leaving (0, 1, 1) cut off.
        grid.link(gc(0, 0, 0), Direction::PositiveX).unwrap();
        grid.link(gc(1, 0, 0), Direction::PositiveY).unwrap();
        grid.link(gc(1, 1, 0), Direction::NegativeX).unwrap();
        grid.link(gc(0, 1, 0), Direction::NegativeY).unwrap();
        grid.link(gc(0, 0, 0), Direction::PositiveZ).unwrap();
        grid.link(gc(1, 0, 0), Direction::PositiveZ).unwrap();
        grid.link(gc(1, 1, 0), Direction::PositiveZ).unwrap();
        assert_eq!(grid.links_count(), 7);
        assert_eq!(count_components(&grid), 2);
        assert!(has_symmetric_links(&grid));
        assert!(!is_spanning_tree(&grid));
    }

    #[test]
    fn a_snake_is_a_tree() {
        let mut grid = Grid::new(2).unwrap();
        grid.link(gc(0, 0, 0), Direction::PositiveX).unwrap();
        grid.link(gc(1, 0, 0), Direction::PositiveY).unwrap();
        grid.link(gc(1, 1, 0), Direction::NegativeX).unwrap();
        grid.link(gc(0, 1, 0), Direction::PositiveZ).unwrap();
        grid.link(gc(0, 1, 1), Direction::PositiveX).unwrap();
        grid.link(gc(1, 1, 1), Direction::NegativeY).unwrap();
        grid.link(gc(1, 0, 1), Direction::NegativeX).unwrap();
        assert_eq!(count_components(&grid), 1);
        assert!(is_spanning_tree(&grid));
    }
}
