use crate::algorithms::route::Route;
use crate::cell::{Cell, CellId};
use crate::error::{Result, SearchError};
use crate::graph::CellIndex;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;
use std::fs;
use std::path::Path;

pub const WALL: &str = "#";
pub const START: &str = "ST";
pub const FINISH: &str = "FN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Wall,
    Start,
    Finish,
    Open(String),
}

impl Label {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            WALL => Label::Wall,
            START => Label::Start,
            FINISH => Label::Finish,
            other => Label::Open(other.to_string()),
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Label::Wall)
    }
}

/// A rectangular grid of labels, as handed over by the loader.
#[derive(Debug, Clone)]
pub struct Maze {
    pub rows: usize,
    pub cols: usize,
    pub labels: Vec<Vec<Label>>,
    pub start: Option<Position>,
    pub goal: Option<Position>,
}

impl Maze {
    pub fn from_labels(labels: Vec<Vec<Label>>) -> Result<Self> {
        let rows = labels.len();
        let cols = labels.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(SearchError::InvalidMaze("maze has no cells".to_string()));
        }

        let mut start = None;
        let mut goal = None;
        for (row, line) in labels.iter().enumerate() {
            if line.len() != cols {
                return Err(SearchError::InvalidMaze(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.len(),
                    cols
                )));
            }
            for (col, label) in line.iter().enumerate() {
                let slot = match label {
                    Label::Start => &mut start,
                    Label::Finish => &mut goal,
                    _ => continue,
                };
                if slot.is_some() {
                    return Err(SearchError::InvalidMaze(format!(
                        "duplicate {} marker at {}",
                        if *label == Label::Start { START } else { FINISH },
                        Position::new(row, col)
                    )));
                }
                *slot = Some(Position::new(row, col));
            }
        }

        Ok(Maze {
            rows,
            cols,
            labels,
            start,
            goal,
        })
    }

    /// Parses comma separated rows. With `skip_header` the first row and the
    /// first column (spreadsheet row/column captions) are dropped.
    pub fn parse(text: &str, skip_header: bool) -> Result<Self> {
        let mut labels: Vec<Vec<Label>> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split(',').map(Label::parse).collect())
            .collect();

        if skip_header {
            if !labels.is_empty() {
                labels.remove(0);
            }
            for row in labels.iter_mut() {
                if !row.is_empty() {
                    row.remove(0);
                }
            }
        }

        Self::from_labels(labels)
    }

    pub fn load(path: impl AsRef<Path>, skip_header: bool) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, skip_header)
    }

    /// Random open maze with scattered walls. The origin is placed in the
    /// top-left quadrant and the destination in the bottom-right one.
    pub fn generate<R: Rng + ?Sized>(size: usize, num_walls: usize, rng: &mut R) -> Result<Self> {
        if size < 2 {
            return Err(SearchError::InvalidMaze(format!(
                "grid size {} is too small",
                size
            )));
        }

        let mut labels = vec![vec![Label::Open(String::new()); size]; size];

        let start = Position::new(rng.gen_range(0..size / 2), rng.gen_range(0..size / 2));
        let goal = Position::new(rng.gen_range(size / 2..size), rng.gen_range(size / 2..size));
        labels[start.row][start.col] = Label::Start;
        labels[goal.row][goal.col] = Label::Finish;

        // Place walls randomly, never on the origin or destination
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < num_walls && attempts < num_walls * 3 {
            let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if pos != start && pos != goal && !labels[pos.row][pos.col].is_wall() {
                labels[pos.row][pos.col] = Label::Wall;
                walls_placed += 1;
            }
            attempts += 1;
        }

        Ok(Maze {
            rows: size,
            cols: size,
            labels,
            start: Some(start),
            goal: Some(goal),
        })
    }

    pub fn label(&self, pos: Position) -> Option<&Label> {
        self.labels.get(pos.row).and_then(|row| row.get(pos.col))
    }

    /// Walkable cells with ids assigned in row-major scan order from 0.
    pub fn cells(&self) -> Vec<Cell> {
        self.walkable_positions()
            .enumerate()
            .map(|(id, pos)| Cell::new(id, pos))
            .collect()
    }

    pub fn walkable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.labels.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, label)| !label.is_wall())
                .map(move |(col, _)| Position::new(row, col))
        })
    }

    /// The grid with every walkable cell replaced by its id.
    pub fn labeled(&self) -> Vec<Vec<String>> {
        let mut next_id: CellId = 0;
        self.labels
            .iter()
            .map(|line| {
                line.iter()
                    .map(|label| {
                        if label.is_wall() {
                            WALL.to_string()
                        } else {
                            let id = next_id;
                            next_id += 1;
                            id.to_string()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Text rendering of the maze. Route cells are `*`, the route's origin
    /// and destination `S` and `E`.
    pub fn render(&self, index: &CellIndex, route: Option<&Route>) -> Result<String> {
        let marks = RouteMarks::new(index, route)?;
        Ok(MazeView { maze: self, marks: &marks }.to_string())
    }

    pub fn print_grid(&self, index: &CellIndex, route: Option<&Route>) -> Result<()> {
        println!("Legend: S=Start, E=End, *=Route, #=Wall, .=Open");
        print!("{}", self.render(index, route)?);
        println!();
        Ok(())
    }

    /// The labeled grid as CSV, with route cells suffixed by `*`.
    pub fn route_csv(&self, index: &CellIndex, route: &Route) -> Result<String> {
        let marks = RouteMarks::new(index, Some(route))?;
        let rows: Vec<String> = self
            .labeled()
            .into_iter()
            .enumerate()
            .map(|(row, line)| {
                line.into_iter()
                    .enumerate()
                    .map(|(col, value)| {
                        if marks.on_route.contains(&Position::new(row, col)) {
                            format!("{}*", value)
                        } else {
                            value
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        Ok(rows.into_iter().map(|row| row + "\n").collect())
    }

    pub fn export_route(
        &self,
        path: impl AsRef<Path>,
        index: &CellIndex,
        route: &Route,
    ) -> Result<()> {
        fs::write(path, self.route_csv(index, route)?)?;
        Ok(())
    }
}

struct MazeView<'a> {
    maze: &'a Maze,
    marks: &'a RouteMarks,
}

impl fmt::Display for MazeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Column numbers header
        write!(f, "    ")?;
        for col in 0..self.maze.cols {
            write!(f, "{:2}", col % 10)?;
        }
        writeln!(f)?;

        for (row, line) in self.maze.labels.iter().enumerate() {
            write!(f, "{:3} ", row)?;
            for (col, label) in line.iter().enumerate() {
                let pos = Position::new(row, col);
                let glyph = if label.is_wall() {
                    '#'
                } else if Some(pos) == self.marks.origin {
                    'S'
                } else if Some(pos) == self.marks.destination {
                    'E'
                } else if self.marks.on_route.contains(&pos) {
                    '*'
                } else {
                    '.'
                };
                write!(f, " {}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct RouteMarks {
    on_route: FxHashSet<Position>,
    origin: Option<Position>,
    destination: Option<Position>,
}

impl RouteMarks {
    fn new(index: &CellIndex, route: Option<&Route>) -> Result<Self> {
        let Some(route) = route else {
            return Ok(RouteMarks {
                on_route: FxHashSet::default(),
                origin: None,
                destination: None,
            });
        };
        let on_route = route
            .iter()
            .map(|id| index.get(id).map(|cell| cell.location))
            .collect::<Result<FxHashSet<_>>>()?;
        Ok(RouteMarks {
            on_route,
            origin: Some(index.get(route.origin())?.location),
            destination: Some(index.get(route.destination())?.location),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SMALL: &str = "ST,a,#\n#,b,c\nd,e,FN\n";

    #[test]
    fn parse_assigns_row_major_ids_over_walkable_cells() {
        let maze = Maze::parse(SMALL, false).unwrap();
        assert_eq!((maze.rows, maze.cols), (3, 3));
        assert_eq!(maze.start, Some(Position::new(0, 0)));
        assert_eq!(maze.goal, Some(Position::new(2, 2)));

        let cells = maze.cells();
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[2].location, Position::new(1, 1));
        assert_eq!(cells[6].location, Position::new(2, 2));
        assert_eq!(
            maze.labeled(),
            vec![
                vec!["0", "1", "#"],
                vec!["#", "2", "3"],
                vec!["4", "5", "6"],
            ]
        );
    }

    #[test]
    fn header_row_and_column_are_skipped() {
        let text = "Row,A,B\n0,ST,#\n1,x,FN\n";
        let maze = Maze::parse(text, true).unwrap();
        assert_eq!((maze.rows, maze.cols), (2, 2));
        assert_eq!(maze.start, Some(Position::new(0, 0)));
        assert_eq!(maze.goal, Some(Position::new(1, 1)));
    }

    #[test]
    fn ragged_and_empty_grids_are_rejected() {
        assert!(matches!(
            Maze::parse("a,b\nc\n", false),
            Err(SearchError::InvalidMaze(_))
        ));
        assert!(matches!(Maze::parse("\n\n", false), Err(SearchError::InvalidMaze(_))));
        assert!(matches!(
            Maze::parse("ST,ST\na,b\n", false),
            Err(SearchError::InvalidMaze(_))
        ));
    }

    #[test]
    fn generated_maze_keeps_endpoints_open() {
        let mut rng = StdRng::seed_from_u64(7);
        let maze = Maze::generate(12, 40, &mut rng).unwrap();
        let start = maze.start.unwrap();
        let goal = maze.goal.unwrap();
        assert_eq!(maze.label(start), Some(&Label::Start));
        assert_eq!(maze.label(goal), Some(&Label::Finish));
        assert!(start.row < 6 && start.col < 6);
        assert!(goal.row >= 6 && goal.col >= 6);
        let walls = maze.labels.iter().flatten().filter(|l| l.is_wall()).count();
        assert!(walls <= 40);
    }

    #[test]
    fn render_without_route_shows_walls_and_open_cells() {
        let maze = Maze::parse(SMALL, false).unwrap();
        let index = CellIndex::from_maze(&maze);
        let rendered = maze.render(&index, None).unwrap();
        let rows: Vec<&str> = rendered.lines().skip(1).collect();
        assert_eq!(rows[0], "  0  . . #");
        assert_eq!(rows[1], "  1  # . .");
    }

    #[test]
    fn route_is_marked_in_render_and_csv() {
        use crate::algorithms::common::SearchMethod;
        use crate::algorithms::ordering::NeighborOrdering;
        use crate::algorithms::route::find_route;
        use crate::algorithms::search::PathSearchEngine;

        let maze = Maze::parse(SMALL, false).unwrap();
        let index = CellIndex::from_maze(&maze);
        let engine = PathSearchEngine::new(&index);
        let mut rng = StdRng::seed_from_u64(1);
        let (route, _) =
            find_route(&engine, 0, 6, SearchMethod::Bfs, NeighborOrdering::None, &mut rng).unwrap();
        assert_eq!(route.as_slice(), &[6, 3, 2, 1, 0]);

        let rendered = maze.render(&index, Some(&route)).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "     0 1 2");
        assert_eq!(&lines[1..], &["  0  S * #", "  1  # * *", "  2  . . E"]);

        assert_eq!(
            maze.route_csv(&index, &route).unwrap(),
            "0*,1*,#\n#,2*,3*\n4,5,6*\n"
        );
    }
}
