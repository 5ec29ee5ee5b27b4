//! Step-wise perfect maze generation.
//!
//! Each algorithm is a [`Generator`] bound to a [`Grid`]: every call to `step` opens at most
//! one passage, so a caller can animate the construction or just `build` it in one go. The
//! grid only holds a spanning tree once `step` has returned false.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::errors::MazeError;
use crate::grid::Grid;

pub mod kruskal;
pub mod prim;
pub mod recursive_backtracking;

pub use self::kruskal::{Kruskal, PackedEdge};
pub use self::prim::Prim;
pub use self::recursive_backtracking::RecursiveBacktracking;

/// An incremental maze construction over one grid.
pub trait Generator {
    /// Do one unit of work, opening at most one passage.
    ///
    /// Returns false once the maze is complete, and keeps returning false without touching
    /// the grid on any later call.
    fn step(&mut self) -> bool;

    /// Run to completion.
    fn build(&mut self) {
        while self.step() {}
    }

    /// The grid being carved, possibly mid construction.
    fn grid(&self) -> &Grid;
}

/// The generation algorithms on offer.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Algorithm {
    RecursiveBacktracking,
    Prim,
    Kruskal,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::RecursiveBacktracking,
                                     Algorithm::Prim,
                                     Algorithm::Kruskal];

    /// Would this algorithm accept a grid of the given size?
    pub fn check_size(self, size: usize) -> Result<(), MazeError> {
        if size == 0 {
            return Err(MazeError::InvalidSize(size));
        }
        match self {
            Algorithm::Kruskal => kruskal::check_packing(size),
            Algorithm::RecursiveBacktracking | Algorithm::Prim => Ok(()),
        }
    }

    /// Bind a new generator of this kind to `grid`.
    pub fn generator<'a, R>(self,
                            grid: &'a mut Grid,
                            rng: R)
                            -> Result<Box<dyn Generator + 'a>, MazeError>
        where R: Rng + 'a
    {
        Ok(match self {
            Algorithm::RecursiveBacktracking => Box::new(RecursiveBacktracking::new(grid, rng)),
            Algorithm::Prim => Box::new(Prim::new(grid, rng)),
            Algorithm::Kruskal => Box::new(Kruskal::new(grid, rng)?),
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Algorithm::RecursiveBacktracking => "Recursive backtracking",
            Algorithm::Prim => "Prim's algorithm",
            Algorithm::Kruskal => "Kruskal's algorithm",
        };
        f.write_str(name)
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown maze generation algorithm '{}'", self.0)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Algorithm, ParseAlgorithmError> {
        match s.to_ascii_lowercase().as_str() {
            "recursive-backtracking" | "recursive_backtracking" | "recursivebacktracking" |
            "backtracking" => Ok(Algorithm::RecursiveBacktracking),
            "prim" => Ok(Algorithm::Prim),
            "kruskal" => Ok(Algorithm::Kruskal),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Carve a complete maze with the randomized depth first backtracker.
pub fn recursive_backtracking<R: Rng>(grid: &mut Grid, rng: R) {
    RecursiveBacktracking::new(grid, rng).build();
}

/// Carve a complete maze with randomized Prim's algorithm.
pub fn prim<R: Rng>(grid: &mut Grid, rng: R) {
    Prim::new(grid, rng).build();
}

/// Carve a complete maze with randomized Kruskal's algorithm.
pub fn kruskal<R: Rng>(grid: &mut Grid, rng: R) -> Result<(), MazeError> {
    Kruskal::new(grid, rng)?.build();
    Ok(())
}

/// Run a generator to completion, calling `on_frame` with the grid and its passage count
/// each time a step opens a passage.
///
/// The final step may open a passage while reporting completion, so that one is reported too.
/// Returns the number of passages in the finished maze.
pub fn animate<G, F>(generator: &mut G, mut on_frame: F) -> usize
    where G: Generator + ?Sized,
          F: FnMut(&Grid, usize)
{
    let mut passages = generator.grid().links_count();
    loop {
        let more = generator.step();
        let now = generator.grid().links_count();
        if now != passages {
            passages = now;
            on_frame(generator.grid(), passages);
        }
        if !more {
            return passages;
        }
    }
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::analysis;
    use crate::random::rng_from_seed;

    fn built(algorithm: Algorithm, size: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        algorithm.generator(&mut grid, rng_from_seed(Some(seed)))
                 .unwrap()
                 .build();
        grid
    }

    #[test]
    fn parse_algorithm_names() {
        assert_eq!("prim".parse(), Ok(Algorithm::Prim));
        assert_eq!("Kruskal".parse(), Ok(Algorithm::Kruskal));
        assert_eq!("backtracking".parse(), Ok(Algorithm::RecursiveBacktracking));
        assert_eq!("recursive-backtracking".parse(), Ok(Algorithm::RecursiveBacktracking));
        assert!("wilson".parse::<Algorithm>().is_err());
    }

    #[test]
    fn display_names() {
        assert_eq!(Algorithm::Prim.to_string(), "Prim's algorithm");
        assert_eq!(Algorithm::RecursiveBacktracking.to_string(), "Recursive backtracking");
    }

    #[test]
    fn size_checks() {
        for algorithm in Algorithm::ALL.iter() {
            assert_eq!(algorithm.check_size(0), Err(MazeError::InvalidSize(0)));
            assert_eq!(algorithm.check_size(1024), Ok(()));
        }
        assert_eq!(Algorithm::Kruskal.check_size(1025),
                   Err(MazeError::PackedEdgeOverflow(1025)));
        assert_eq!(Algorithm::Prim.check_size(1025), Ok(()));
    }

    #[test]
    fn single_cell_has_nothing_to_do() {
        for algorithm in Algorithm::ALL.iter() {
            let mut grid = Grid::new(1).unwrap();
            {
                let mut generator = algorithm.generator(&mut grid, rng_from_seed(Some(1))).unwrap();
                assert!(!generator.step());
                assert!(!generator.step());
            }
            assert_eq!(grid.links_count(), 0);
            assert_eq!(grid.masks(), &[0u8]);
        }
    }

    #[test]
    fn two_by_two_by_two_is_a_tree() {
        for algorithm in Algorithm::ALL.iter() {
            for seed in 0..20 {
                let grid = built(*algorithm, 2, seed);
                assert_eq!(grid.links_count(), 7);
                assert!(analysis::is_spanning_tree(&grid));
            }
        }
    }

    #[test]
    fn steps_add_one_passage_at_a_time() {
        for algorithm in Algorithm::ALL.iter() {
            let mut grid = Grid::new(4).unwrap();
            let mut generator = algorithm.generator(&mut grid, rng_from_seed(Some(3))).unwrap();
            let mut links = 0;
            while generator.step() {
                let now = generator.grid().links_count();
                assert!(now == links || now == links + 1);
                links = now;
            }
            assert_eq!(generator.grid().links_count(), 63);
        }
    }

    #[test]
    fn animation_reports_every_passage() {
        for algorithm in Algorithm::ALL.iter() {
            for seed in 0..10 {
                let mut grid = Grid::new(2).unwrap();
                let mut generator = algorithm.generator(&mut grid, rng_from_seed(Some(seed))).unwrap();
                let mut frames = vec![];
                let total = animate(generator.as_mut(), |grid, passages| {
                    assert_eq!(grid.links_count(), passages);
                    frames.push(passages);
                });
                assert_eq!(total, 7);
                assert_eq!(frames, (1..8).collect::<Vec<usize>>());
            }
        }
    }

    #[test]
    fn animating_a_single_cell_shows_nothing() {
        let mut grid = Grid::new(1).unwrap();
        let mut generator = Algorithm::Prim.generator(&mut grid, rng_from_seed(Some(2))).unwrap();
        let mut frames = 0;
        assert_eq!(animate(generator.as_mut(), |_, _| frames += 1), 0);
        assert_eq!(frames, 0);
    }

    #[test]
    fn one_call_helpers() {
        let mut grid = Grid::new(3).unwrap();
        recursive_backtracking(&mut grid, rng_from_seed(Some(8)));
        assert!(analysis::is_spanning_tree(&grid));

        let mut grid = Grid::new(3).unwrap();
        prim(&mut grid, rng_from_seed(Some(8)));
        assert!(analysis::is_spanning_tree(&grid));

        let mut grid = Grid::new(3).unwrap();
        kruskal(&mut grid, rng_from_seed(Some(8))).unwrap();
        assert!(analysis::is_spanning_tree(&grid));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        for algorithm in Algorithm::ALL.iter() {
            assert_eq!(built(*algorithm, 4, 21), built(*algorithm, 4, 21));
        }
    }

    #[test]
    fn quickcheck_every_algorithm_builds_a_perfect_maze() {
        fn p(size: u8, seed: u64) -> TestResult {
            let size = (size % 6) as usize + 1;
            for algorithm in Algorithm::ALL.iter() {
                let grid = built(*algorithm, size, seed);
                if grid.links_count() != grid.connectors() ||
                   !analysis::has_symmetric_links(&grid) ||
                   !analysis::is_spanning_tree(&grid) ||
                   grid.masks().iter().any(|&m| m & crate::cells::SCRATCH_MASK != 0) {
                    return TestResult::failed();
                }
            }
            TestResult::passed()
        }
        quickcheck(p as fn(u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_finished_generators_stay_finished() {
        fn p(size: u8, seed: u64, extra_steps: u8) -> bool {
            let size = (size % 5) as usize + 1;
            Algorithm::ALL.iter().all(|algorithm| {
                let mut grid = Grid::new(size).unwrap();
                let mut generator = algorithm.generator(&mut grid, rng_from_seed(Some(seed))).unwrap();
                generator.build();
                let finished = generator.grid().clone();
                (0..extra_steps).all(|_| !generator.step()) && *generator.grid() == finished
            })
        }
        quickcheck(p as fn(u8, u64, u8) -> bool);
    }
}
