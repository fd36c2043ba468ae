use crate::algorithms::common::SearchMethod;
use crate::algorithms::ordering::NeighborOrdering;
use crate::algorithms::route::Route;
use crate::algorithms::search::ParentRecord;
use crate::cell::CellId;
use crate::error::Result;
use crate::graph::CellIndex;
use pathfinding::prelude::bfs;
use std::fmt;

/// Number of moves on a true shortest route, `None` if the cells are not
/// connected.
pub fn shortest_steps(index: &CellIndex, start: CellId, end: CellId) -> Result<Option<usize>> {
    index.get(start)?;
    index.get(end)?;
    // Every id reaching the successor closure is `start` (checked above) or
    // came out of the index's own adjacency lists, so the lookup never misses.
    let path = bfs(
        &start,
        |&id| index.neighbors(id).map(<[CellId]>::to_vec).unwrap_or_default(),
        |&id| id == end,
    );
    Ok(path.map(|cells| cells.len() - 1))
}

#[derive(Debug, Clone)]
pub struct Statistics {
    pub method: SearchMethod,
    pub ordering: NeighborOrdering,
    pub route_steps: usize,
    pub cells_discovered: usize,
    pub optimal_steps: usize,
    pub route_efficiency: f64,
}

impl Statistics {
    pub fn new(
        index: &CellIndex,
        route: &Route,
        parents: &ParentRecord,
        method: SearchMethod,
        ordering: NeighborOrdering,
    ) -> Result<Self> {
        let optimal_steps =
            shortest_steps(index, route.origin(), route.destination())?.unwrap_or_default();
        let mut stats = Statistics {
            method,
            ordering,
            route_steps: route.steps(),
            cells_discovered: parents.len(),
            optimal_steps,
            route_efficiency: 0.0,
        };
        stats.calculate_efficiency();
        Ok(stats)
    }

    /// Route moves per optimal move; 1.0 means the route is a shortest one.
    pub fn calculate_efficiency(&mut self) {
        if self.route_steps > 0 && self.optimal_steps > 0 {
            self.route_efficiency = self.route_steps as f64 / self.optimal_steps as f64;
        } else {
            self.route_efficiency = 1.0;
        }
    }

    pub fn is_shortest(&self) -> bool {
        self.route_steps == self.optimal_steps
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Method: {} ({} ordering)", self.method, self.ordering)?;
        writeln!(f, "Route Steps: {}", self.route_steps)?;
        writeln!(f, "Optimal Steps: {}", self.optimal_steps)?;
        writeln!(f, "Cells Discovered: {}", self.cells_discovered)?;
        writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        if !self.is_shortest() {
            writeln!(
                f,
                "Note: {} extra moves over the shortest route",
                self.route_steps.saturating_sub(self.optimal_steps)
            )?;
        }
        Ok(())
    }
}
