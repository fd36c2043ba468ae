use crate::algorithms::common::{Frontier, Queue, SearchMethod, Stack};
use crate::algorithms::ordering::NeighborOrdering;
use crate::cell::CellId;
use crate::error::{Result, SearchError};
use crate::graph::CellIndex;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

/// Maps every discovered cell to the cell that discovered it. The origin
/// maps to `None`. A cell is recorded only on first discovery, so the
/// record is a tree rooted at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRecord {
    origin: CellId,
    parents: FxHashMap<CellId, Option<CellId>>,
    discovered: Vec<CellId>,
}

impl ParentRecord {
    pub fn new(origin: CellId) -> Self {
        let mut parents = FxHashMap::default();
        parents.insert(origin, None);
        ParentRecord {
            origin,
            parents,
            discovered: vec![origin],
        }
    }

    /// Records `parent` as the discoverer of `child`. Returns false and
    /// leaves the record untouched if `child` was already discovered.
    pub fn insert(&mut self, child: CellId, parent: CellId) -> bool {
        if self.parents.contains_key(&child) {
            return false;
        }
        self.parents.insert(child, Some(parent));
        self.discovered.push(child);
        true
    }

    /// `None` if `id` was never discovered, `Some(None)` for the origin.
    pub fn parent_of(&self, id: CellId) -> Option<Option<CellId>> {
        self.parents.get(&id).copied()
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.parents.contains_key(&id)
    }

    pub fn origin(&self) -> CellId {
        self.origin
    }

    /// Cells in the order they were discovered, origin first.
    pub fn discovered(&self) -> &[CellId] {
        &self.discovered
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Iterative DFS/BFS over a shared cell index.
#[derive(Debug, Clone, Copy)]
pub struct PathSearchEngine<'a> {
    index: &'a CellIndex,
}

impl<'a> PathSearchEngine<'a> {
    pub fn new(index: &'a CellIndex) -> Self {
        PathSearchEngine { index }
    }

    pub fn index(&self) -> &'a CellIndex {
        self.index
    }

    /// Searches from `start` until `end` is taken off the frontier.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, `NoPathFound` when the frontier runs
    /// empty before `end` is reached.
    pub fn search<R: Rng + ?Sized>(
        &self,
        start: CellId,
        end: CellId,
        method: SearchMethod,
        ordering: NeighborOrdering,
        rng: &mut R,
    ) -> Result<ParentRecord> {
        log::debug!(
            "{} search from {} to {} ({} ordering)",
            method,
            start,
            end,
            ordering
        );
        match method {
            SearchMethod::Dfs => self.run(Stack::default(), start, end, method, ordering, rng),
            SearchMethod::Bfs => self.run(Queue::default(), start, end, method, ordering, rng),
        }
    }

    /// Same as [`search`](Self::search) with the method and ordering given
    /// by name, as they appear in configuration.
    pub fn search_named<R: Rng + ?Sized>(
        &self,
        start: CellId,
        end: CellId,
        method: &str,
        ordering: &str,
        rng: &mut R,
    ) -> Result<ParentRecord> {
        let method: SearchMethod = method.parse()?;
        let ordering: NeighborOrdering = ordering.parse()?;
        self.search(start, end, method, ordering, rng)
    }

    fn run<F: Frontier, R: Rng + ?Sized>(
        &self,
        mut frontier: F,
        start: CellId,
        end: CellId,
        method: SearchMethod,
        ordering: NeighborOrdering,
        rng: &mut R,
    ) -> Result<ParentRecord> {
        self.index.get(start)?;
        let destination = self.index.get(end)?;

        let mut explored = FxHashSet::default();
        explored.insert(start);
        frontier.push(start);
        let mut parents = ParentRecord::new(start);
        let mut expanded = 0usize;

        while let Some(current) = frontier.take() {
            if current == end {
                log::debug!(
                    "reached {} after expanding {} cells ({} discovered)",
                    end,
                    expanded,
                    parents.len()
                );
                return Ok(parents);
            }

            let neighbors = self.index.neighbors(current)?;
            let ordered = ordering.arrange(neighbors, self.index, destination, method, rng)?;
            log::trace!("expanding {} -> {:?}", current, ordered);

            for neighbor in ordered {
                if explored.insert(neighbor) {
                    frontier.push(neighbor);
                    parents.insert(neighbor, current);
                }
            }
            expanded += 1;
        }

        log::debug!("frontier exhausted after {} cells, {} unreachable", expanded, end);
        Err(SearchError::NoPathFound { start, end })
    }
}
