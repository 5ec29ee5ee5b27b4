//! **maze3d** generates perfect mazes over cubic 3D grids.
//!
//! A [`grid::Grid`] holds one byte of neighbour flags per cell. A generator from
//! [`generators`] is bound to an empty grid and either stepped one passage at a time, so the
//! construction can be animated, or built in one call. Finished grids are spanning trees:
//! every cell reachable from every other by exactly one route.

pub mod analysis;
pub mod cells;
pub mod disjoint_set;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod random;
pub mod settings;
pub mod units;
