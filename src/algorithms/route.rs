use crate::algorithms::common::SearchMethod;
use crate::algorithms::ordering::NeighborOrdering;
use crate::algorithms::search::{ParentRecord, PathSearchEngine};
use crate::cell::CellId;
use crate::error::{Result, SearchError};
use crate::graph::CellIndex;
use crate::grid::Position;
use rand::Rng;

/// Cells connecting origin and destination, stored destination first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    cells: Vec<CellId>,
}

impl Route {
    pub fn destination(&self) -> CellId {
        self.cells[0]
    }

    pub fn origin(&self) -> CellId {
        self.cells[self.cells.len() - 1]
    }

    /// Destination to origin.
    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().copied()
    }

    pub fn as_slice(&self) -> &[CellId] {
        &self.cells
    }

    /// Origin to destination.
    pub fn forward(&self) -> Vec<CellId> {
        self.cells.iter().rev().copied().collect()
    }

    /// Number of cells on the route, both endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves between adjacent cells.
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains(&id)
    }

    pub fn positions(&self, index: &CellIndex) -> Result<Vec<Position>> {
        self.iter()
            .map(|id| index.get(id).map(|cell| cell.location))
            .collect()
    }

    /// True if every consecutive pair of cells is adjacent.
    pub fn is_connected(&self, index: &CellIndex) -> Result<bool> {
        for pair in self.cells.windows(2) {
            if !index.are_adjacent(pair[0], pair[1])? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Walks the parent record from `end` back to `start`.
///
/// # Errors
///
/// `IncompletePath` if `end` was never discovered or its parent chain does
/// not end at `start`.
pub fn reconstruct(parents: &ParentRecord, start: CellId, end: CellId) -> Result<Route> {
    let mut cells = vec![end];
    let mut current = end;
    loop {
        match parents.parent_of(current) {
            None => return Err(SearchError::IncompletePath { end }),
            Some(None) => break,
            Some(Some(parent)) => {
                // A tree never needs more hops than it has entries.
                if cells.len() > parents.len() {
                    return Err(SearchError::IncompletePath { end });
                }
                cells.push(parent);
                current = parent;
            }
        }
    }

    if current != start {
        return Err(SearchError::IncompletePath { end });
    }
    Ok(Route { cells })
}

/// Searches and reconstructs in one go.
pub fn find_route<R: Rng + ?Sized>(
    engine: &PathSearchEngine<'_>,
    start: CellId,
    end: CellId,
    method: SearchMethod,
    ordering: NeighborOrdering,
    rng: &mut R,
) -> Result<(Route, ParentRecord)> {
    let parents = engine.search(start, end, method, ordering, rng)?;
    let route = reconstruct(&parents, start, end)?;
    Ok((route, parents))
}
