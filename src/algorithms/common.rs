use crate::cell::CellId;
use crate::error::SearchError;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Traversal strategy; decides which end of the frontier is taken next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMethod {
    Dfs,
    Bfs,
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 2] = [SearchMethod::Bfs, SearchMethod::Dfs];

    pub fn name(&self) -> &'static str {
        match self {
            SearchMethod::Dfs => "dfs",
            SearchMethod::Bfs => "bfs",
        }
    }
}

impl FromStr for SearchMethod {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dfs" => Ok(SearchMethod::Dfs),
            "bfs" => Ok(SearchMethod::Bfs),
            other => Err(SearchError::InvalidPathSearchMethod(other.to_string())),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Working set of discovered but not yet expanded cells.
pub trait Frontier {
    fn push(&mut self, id: CellId);

    /// Removes the next cell to expand.
    fn take(&mut self) -> Option<CellId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last in, first out.
#[derive(Debug, Default)]
pub struct Stack(Vec<CellId>);

impl Frontier for Stack {
    fn push(&mut self, id: CellId) {
        self.0.push(id);
    }

    fn take(&mut self) -> Option<CellId> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// First in, first out.
#[derive(Debug, Default)]
pub struct Queue(VecDeque<CellId>);

impl Frontier for Queue {
    fn push(&mut self, id: CellId) {
        self.0.push_back(id);
    }

    fn take(&mut self) -> Option<CellId> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
