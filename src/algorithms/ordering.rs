use crate::algorithms::common::SearchMethod;
use crate::cell::{Cell, CellId};
use crate::error::{Result, SearchError};
use crate::graph::CellIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// How a cell's neighbors are arranged before they are pushed onto the
/// frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NeighborOrdering {
    /// Cell index declaration order.
    None,
    /// Nearest to the destination is expanded first. DFS pushes farthest
    /// first so the nearest ends on top of the stack; BFS enqueues nearest
    /// first.
    #[default]
    Manhattan,
    /// Uniform shuffle drawn from the caller's random source.
    Random,
}

impl NeighborOrdering {
    pub fn name(&self) -> &'static str {
        match self {
            NeighborOrdering::None => "none",
            NeighborOrdering::Manhattan => "manhattan",
            NeighborOrdering::Random => "random",
        }
    }

    pub fn is_deterministic(&self) -> bool {
        !matches!(self, NeighborOrdering::Random)
    }

    /// Returns the expansion sequence for `neighbors`. Ties keep their
    /// input order.
    pub fn arrange<R: Rng + ?Sized>(
        &self,
        neighbors: &[CellId],
        index: &CellIndex,
        destination: &Cell,
        method: SearchMethod,
        rng: &mut R,
    ) -> Result<Vec<CellId>> {
        match self {
            NeighborOrdering::None => Ok(neighbors.to_vec()),
            NeighborOrdering::Manhattan => {
                let mut keyed = neighbors
                    .iter()
                    .map(|&id| Ok((index.get(id)?.distance_to(destination), id)))
                    .collect::<Result<Vec<_>>>()?;
                match method {
                    SearchMethod::Dfs => keyed.sort_by_key(|&(distance, _)| Reverse(distance)),
                    SearchMethod::Bfs => keyed.sort_by_key(|&(distance, _)| distance),
                }
                Ok(keyed.into_iter().map(|(_, id)| id).collect())
            }
            NeighborOrdering::Random => {
                let mut shuffled = neighbors.to_vec();
                shuffled.shuffle(rng);
                Ok(shuffled)
            }
        }
    }
}

impl FromStr for NeighborOrdering {
    type Err = SearchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(NeighborOrdering::None),
            "manhattan" => Ok(NeighborOrdering::Manhattan),
            "random" => Ok(NeighborOrdering::Random),
            other => Err(SearchError::InvalidSortingMethod(other.to_string())),
        }
    }
}

impl fmt::Display for NeighborOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
