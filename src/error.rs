use crate::cell::CellId;
use thiserror::Error;

/// Everything that can go wrong while loading a maze or searching it.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid path search method ({0}). Choose dfs or bfs")]
    InvalidPathSearchMethod(String),

    #[error("Invalid neighbor sorting method ({0}). Choose manhattan, random, or none")]
    InvalidSortingMethod(String),

    #[error("Cell {0} not found in the cell index")]
    NotFound(CellId),

    #[error("No path found from {start} to {end}")]
    NoPathFound { start: CellId, end: CellId },

    #[error("Parent record does not lead from {end} back to the origin")]
    IncompletePath { end: CellId },

    #[error("Invalid maze: {0}")]
    InvalidMaze(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to start search workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SearchError {
    /// True for the expected "these two cells are not connected" outcomes,
    /// false for malformed input and I/O failures.
    pub fn is_no_route(&self) -> bool {
        matches!(
            self,
            SearchError::NoPathFound { .. } | SearchError::IncompletePath { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_route_is_distinguished_from_fatal_errors() {
        assert!(SearchError::NoPathFound { start: 0, end: 5 }.is_no_route());
        assert!(SearchError::IncompletePath { end: 5 }.is_no_route());
        assert!(!SearchError::NotFound(3).is_no_route());
        assert!(!SearchError::InvalidPathSearchMethod("xfs".into()).is_no_route());
        assert!(!SearchError::InvalidSortingMethod("bogus".into()).is_no_route());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = SearchError::InvalidPathSearchMethod("xfs".into());
        assert_eq!(err.to_string(), "Invalid path search method (xfs). Choose dfs or bfs");
        assert_eq!(SearchError::NotFound(42).to_string(), "Cell 42 not found in the cell index");
    }
}
