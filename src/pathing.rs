use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::cells::Cartesian3DCoordinate;
use crate::grid::Grid;

/// Breadth first distances, in passages, from one start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian3DCoordinate,
    distances: FnvHashMap<Cartesian3DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// None if the start is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: Cartesian3DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = FnvHashMap::with_capacity_and_hasher(grid.elements(), Default::default());
        distances.insert(start_coordinate, 0);

        // Unweighted passages: the first time a cell is reached is along a shortest route, so
        // the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in links.iter() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian3DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian3DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Cells at the maximum distance, in coordinate order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian3DCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cartesian3DCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a
/// linked cell one passage closer. None if the end point was never reached.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Cartesian3DCoordinate)
                     -> Option<Vec<Cartesian3DCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = grid.links(current_coord)?
            .iter()
            .cloned()
            .find(|coord| {
                distances_from_start.distance_from_start_to(*coord) == Some(current_distance - 1)
            })?;
        current_coord = closer;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// The longest route through the maze, found by sweeping out from a corner to the furthest
/// cell and then again from there.
///
/// Exact on a perfect maze. On a grid with disconnected regions it only looks at the region
/// holding the origin.
pub fn longest_path(grid: &Grid) -> Option<Vec<Cartesian3DCoordinate>> {
    let origin = Cartesian3DCoordinate::new(0, 0, 0);
    let first_distances = Distances::new(grid, origin)?;

    // The start of the longest path is just the point furthest away from an arbitrary initial point
    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::Direction;
    use crate::generators::{self, Algorithm};
    use crate::random::rng_from_seed;

    static OUT_OF_GRID_COORDINATE: Cartesian3DCoordinate = Cartesian3DCoordinate {
        x: u32::MAX,
        y: u32::MAX,
        z: u32::MAX,
    };

    fn gc(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(x, y, z)
    }

    /// The 2x2x2 cube threaded as one corridor.
    fn snake() -> Grid {
        let mut g = Grid::new(2).unwrap();
        g.link(gc(0, 0, 0), Direction::PositiveX).unwrap();
        g.link(gc(1, 0, 0), Direction::PositiveY).unwrap();
        g.link(gc(1, 1, 0), Direction::NegativeX).unwrap();
        g.link(gc(0, 1, 0), Direction::PositiveZ).unwrap();
        g.link(gc(0, 1, 1), Direction::PositiveX).unwrap();
        g.link(gc(1, 1, 1), Direction::NegativeY).unwrap();
        g.link(gc(1, 0, 1), Direction::NegativeX).unwrap();
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = Grid::new(3).unwrap();
        assert!(Distances::new(&g, OUT_OF_GRID_COORDINATE).is_none());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = Grid::new(2).unwrap();
        let start_coordinate = gc(0, 0, 0);
        let distances = Distances::new(&g, start_coordinate).unwrap();
        assert_eq!(distances.start(), start_coordinate);
        assert_eq!(distances.reachable_count(), 1);
        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord == start_coordinate {
                assert_eq!(d, Some(0));
            } else {
                assert!(d.is_none());
            }
        }
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn distances_along_a_corridor() {
        let g = snake();
        let distances = Distances::new(&g, gc(0, 0, 0)).unwrap();
        assert_eq!(distances.distance_from_start_to(gc(1, 0, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1, 1)), Some(4));
        assert_eq!(distances.distance_from_start_to(gc(0, 0, 1)), Some(7));
        assert_eq!(distances.max(), 7);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(0, 0, 1)]);
    }

    #[test]
    fn shortest_path_follows_passages() {
        let g = snake();
        let distances = Distances::new(&g, gc(1, 1, 0)).unwrap();
        let path = shortest_path(&g, &distances, gc(1, 1, 1)).unwrap();
        assert_eq!(path, vec![gc(1, 1, 0), gc(0, 1, 0), gc(0, 1, 1), gc(1, 1, 1)]);

        let unlinked = Grid::new(2).unwrap();
        let distances = Distances::new(&unlinked, gc(0, 0, 0)).unwrap();
        assert_eq!(shortest_path(&unlinked, &distances, gc(1, 1, 1)), None);
        assert_eq!(shortest_path(&unlinked, &distances, gc(0, 0, 0)), Some(vec![gc(0, 0, 0)]));
    }

    #[test]
    fn longest_path_spans_the_corridor() {
        let path = longest_path(&snake()).unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path.first(), Some(&gc(0, 0, 1)));
        assert_eq!(path.last(), Some(&gc(0, 0, 0)));
    }

    #[test]
    fn longest_path_is_at_least_as_long_as_any_route_from_the_origin() {
        let mut g = Grid::new(4).unwrap();
        Algorithm::Prim.generator(&mut g, rng_from_seed(Some(2))).unwrap().build();
        let path = longest_path(&g).unwrap();
        let from_origin = Distances::new(&g, gc(0, 0, 0)).unwrap();
        assert!(path.len() as u32 - 1 >= from_origin.max());
        for pair in path.windows(2) {
            assert!(g.is_linked(pair[0], pair[1]));
        }
    }

    #[test]
    fn every_cell_is_reachable_in_a_finished_maze() {
        let mut g = Grid::new(3).unwrap();
        generators::recursive_backtracking(&mut g, rng_from_seed(Some(44)));
        let distances = Distances::new(&g, gc(1, 1, 1)).unwrap();
        assert_eq!(distances.reachable_count(), 27);
    }
}
