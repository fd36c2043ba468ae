use crate::cell::{Cell, CellId};
use crate::error::{Result, SearchError};
use crate::grid::{Maze, Position};
use rustc_hash::FxHashMap;

/// Owns every walkable cell of one maze together with the derived
/// adjacency. Read-only once built, so it can be shared between searches.
#[derive(Debug, Clone)]
pub struct CellIndex {
    cells: Vec<Cell>,
    by_id: FxHashMap<CellId, usize>,
    by_location: FxHashMap<Position, usize>,
}

impl CellIndex {
    /// Derives the neighbor list of every cell. Two cells are neighbors iff
    /// their Manhattan distance is exactly 1; neighbor lists keep the order
    /// in which the cells were given.
    ///
    /// Candidates come from a location lookup instead of a pairwise scan,
    /// the resulting relation is the same.
    pub fn build(cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let cells: Vec<Cell> = cells.into_iter().collect();
        let mut by_id = FxHashMap::default();
        let mut by_location = FxHashMap::default();

        for (slot, cell) in cells.iter().enumerate() {
            if by_id.insert(cell.id, slot).is_some() {
                return Err(SearchError::InvalidMaze(format!("duplicate cell id {}", cell.id)));
            }
            if by_location.insert(cell.location, slot).is_some() {
                return Err(SearchError::InvalidMaze(format!(
                    "two cells share location {}",
                    cell.location
                )));
            }
        }

        let mut index = CellIndex {
            cells,
            by_id,
            by_location,
        };
        index.link();
        log::debug!("built cell index with {} cells", index.len());
        Ok(index)
    }

    /// Ids and locations coming from a `Maze` are unique by construction.
    pub fn from_maze(maze: &Maze) -> Self {
        let cells = maze.cells();
        let by_id = cells.iter().enumerate().map(|(slot, c)| (c.id, slot)).collect();
        let by_location = cells
            .iter()
            .enumerate()
            .map(|(slot, c)| (c.location, slot))
            .collect();
        let mut index = CellIndex {
            cells,
            by_id,
            by_location,
        };
        index.link();
        index
    }

    fn link(&mut self) {
        let neighbor_lists: Vec<Vec<CellId>> = self
            .cells
            .iter()
            .map(|cell| {
                let mut slots: Vec<usize> = orthogonal(cell.location)
                    .filter_map(|pos| self.by_location.get(&pos).copied())
                    .collect();
                slots.sort_unstable();
                slots.into_iter().map(|slot| self.cells[slot].id).collect()
            })
            .collect();
        for (cell, neighbors) in self.cells.iter_mut().zip(neighbor_lists) {
            cell.set_neighbors(neighbors);
        }
    }

    pub fn get(&self, id: CellId) -> Result<&Cell> {
        self.by_id
            .get(&id)
            .map(|&slot| &self.cells[slot])
            .ok_or(SearchError::NotFound(id))
    }

    pub fn neighbors(&self, id: CellId) -> Result<&[CellId]> {
        self.get(id).map(Cell::neighbors)
    }

    pub fn at(&self, pos: Position) -> Option<&Cell> {
        self.by_location.get(&pos).map(|&slot| &self.cells[slot])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn are_adjacent(&self, a: CellId, b: CellId) -> Result<bool> {
        Ok(self.get(a)?.is_adjacent_to(self.get(b)?))
    }
}

fn orthogonal(pos: Position) -> impl Iterator<Item = Position> {
    [(-1, 0), (0, -1), (0, 1), (1, 0)]
        .into_iter()
        .filter_map(move |(dr, dc): (isize, isize)| {
            let row = pos.row.checked_add_signed(dr)?;
            let col = pos.col.checked_add_signed(dc)?;
            Some(Position::new(row, col))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(rows: usize, cols: usize) -> Vec<Cell> {
        (0..rows * cols)
            .map(|id| Cell::new(id, Position::new(id / cols, id % cols)))
            .collect()
    }

    /// Reference derivation: filter the whole cell list with `is_adjacent_to`.
    fn pairwise_neighbors(cells: &[Cell]) -> Vec<Vec<CellId>> {
        cells
            .iter()
            .map(|cell| {
                cells
                    .iter()
                    .filter(|other| cell.is_adjacent_to(other))
                    .map(|other| other.id)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn neighbors_match_pairwise_scan() {
        let maze = Maze::parse("ST,a,#,b\nc,#,d,e\nf,g,h,FN\n", false).unwrap();
        let cells = maze.cells();
        let expected = pairwise_neighbors(&cells);
        let index = CellIndex::build(cells).unwrap();
        for (cell, want) in index.iter().zip(expected) {
            assert_eq!(cell.neighbors(), want.as_slice(), "cell {}", cell.id);
        }
    }

    #[test]
    fn neighbors_follow_declaration_order() {
        let mut cells = open_grid(3, 3);
        cells.reverse();
        let expected = pairwise_neighbors(&cells);
        let index = CellIndex::build(cells).unwrap();
        assert_eq!(index.neighbors(4).unwrap(), &[7, 5, 3, 1]);
        for (cell, want) in index.iter().zip(expected) {
            assert_eq!(cell.neighbors(), want.as_slice());
        }
    }

    #[test]
    fn adjacency_is_symmetric_without_self_loops() {
        let index = CellIndex::build(open_grid(4, 5)).unwrap();
        for cell in index.iter() {
            assert!(!cell.neighbors().contains(&cell.id));
            for &n in cell.neighbors() {
                assert!(index.neighbors(n).unwrap().contains(&cell.id));
            }
        }
    }

    #[test]
    fn from_maze_agrees_with_build() {
        let maze = Maze::parse("ST,a,#\n#,b,c\nd,e,FN\n", false).unwrap();
        let built = CellIndex::build(maze.cells()).unwrap();
        let linked = CellIndex::from_maze(&maze);
        for (a, b) in built.iter().zip(linked.iter()) {
            assert_eq!(a, b);
        }
        assert_eq!(linked.neighbors(2).unwrap(), &[1, 3, 5]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let index = CellIndex::build(open_grid(2, 2)).unwrap();
        assert!(matches!(index.get(9), Err(SearchError::NotFound(9))));
        assert_eq!(index.get(3).unwrap().location, Position::new(1, 1));
        assert_eq!(index.at(Position::new(0, 1)).map(|c| c.id), Some(1));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let cells = vec![
            Cell::new(0, Position::new(0, 0)),
            Cell::new(0, Position::new(0, 1)),
        ];
        assert!(matches!(CellIndex::build(cells), Err(SearchError::InvalidMaze(_))));
    }
}
