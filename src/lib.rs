//! Maze route search.
//!
//! A maze grid is turned into a [`CellIndex`] of walkable cells whose
//! neighbors are the orthogonally adjacent cells. [`PathSearchEngine`] runs an
//! iterative depth-first or breadth-first search over it, expanding
//! neighbors in the order picked by a [`NeighborOrdering`], and
//! [`reconstruct`] turns the resulting [`ParentRecord`] into a [`Route`].

pub mod algorithms;
pub mod batch;
pub mod cell;
pub mod config;
pub mod error;
pub mod graph;
pub mod grid;
pub mod statistics;

pub use algorithms::common::SearchMethod;
pub use algorithms::ordering::NeighborOrdering;
pub use algorithms::route::{find_route, reconstruct, Route};
pub use algorithms::search::{ParentRecord, PathSearchEngine};
pub use cell::{Cell, CellId};
pub use error::{Result, SearchError};
pub use graph::CellIndex;
pub use grid::{Label, Maze, Position};
