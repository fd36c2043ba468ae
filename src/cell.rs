use crate::grid::Position;

/// Identifier assigned by the maze loader, row-major over non-wall cells.
pub type CellId = usize;

/// A single walkable position of the maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: CellId,
    pub location: Position,
    neighbors: Vec<CellId>,
}

impl Cell {
    pub fn new(id: CellId, location: Position) -> Self {
        Cell {
            id,
            location,
            neighbors: Vec::new(),
        }
    }

    /// Manhattan distance between the two cells' locations.
    pub fn distance_to(&self, other: &Cell) -> usize {
        if self.id == other.id {
            return 0;
        }
        self.location.manhattan(&other.location)
    }

    pub fn is_adjacent_to(&self, other: &Cell) -> bool {
        self.distance_to(other) == 1
    }

    /// Neighbor ids in the order the cell index declared them.
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<CellId>) {
        self.neighbors = neighbors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(id: CellId, row: usize, col: usize) -> Cell {
        Cell::new(id, Position { row, col })
    }

    #[test]
    fn distance_is_manhattan() {
        let a = cell(0, 0, 0);
        let b = cell(1, 2, 3);
        assert_eq!(a.distance_to(&b), 5);
        assert_eq!(b.distance_to(&a), 5);
    }

    #[test]
    fn same_id_has_zero_distance() {
        let a = cell(4, 1, 1);
        assert_eq!(a.distance_to(&a.clone()), 0);
        assert!(!a.is_adjacent_to(&a.clone()));
    }

    #[test]
    fn only_orthogonal_steps_are_adjacent() {
        let center = cell(0, 1, 1);
        assert!(center.is_adjacent_to(&cell(1, 0, 1)));
        assert!(center.is_adjacent_to(&cell(2, 1, 2)));
        assert!(!center.is_adjacent_to(&cell(3, 2, 2)));
        assert!(!center.is_adjacent_to(&cell(4, 1, 3)));
    }
}
