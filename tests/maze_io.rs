use maze_search::batch::{self, BatchRunner, Query};
use maze_search::{
    find_route, CellIndex, Maze, NeighborOrdering, PathSearchEngine, SearchError, SearchMethod,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::tempdir;

#[test]
fn loaded_maze_route_is_exported_with_marks() {
    let dir = tempdir().unwrap();
    let maze_path = dir.path().join("maze.csv");
    fs::write(&maze_path, "Row,A,B,C\n0,ST,a,b\n1,c,d,e\n2,f,g,FN\n").unwrap();

    let maze = Maze::load(&maze_path, true).unwrap();
    let index = CellIndex::from_maze(&maze);
    let start = index.at(maze.start.unwrap()).unwrap().id;
    let end = index.at(maze.goal.unwrap()).unwrap().id;
    assert_eq!((start, end), (0, 8));

    let engine = PathSearchEngine::new(&index);
    let mut rng = StdRng::seed_from_u64(0);
    let (route, _) = find_route(
        &engine,
        start,
        end,
        SearchMethod::Bfs,
        NeighborOrdering::None,
        &mut rng,
    )
    .unwrap();

    let route_path = dir.path().join("route.csv");
    maze.export_route(&route_path, &index, &route).unwrap();
    let exported = fs::read_to_string(&route_path).unwrap();
    assert_eq!(exported, "0*,1*,2*\n3,4,5*\n6,7,8*\n");

    let rendered = maze.render(&index, Some(&route)).unwrap();
    let rows: Vec<&str> = rendered.lines().skip(1).collect();
    assert_eq!(rows, vec!["  0  S * *", "  1  . . *", "  2  . . E"]);
}

#[test]
fn missing_maze_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = Maze::load(dir.path().join("does_not_exist.csv"), false).unwrap_err();
    assert!(matches!(err, SearchError::Io(_)));
    assert!(!err.is_no_route());
}

#[test]
fn batch_report_has_one_row_per_query() {
    let maze = Maze::parse("ST,a,#,x\nb,c,#,FN\n", false).unwrap();
    let index = CellIndex::from_maze(&maze);
    let queries = [
        Query { start: 0, end: 4, method: SearchMethod::Dfs },
        Query { start: 0, end: 5, method: SearchMethod::Bfs },
    ];
    let results = BatchRunner::new(&index, NeighborOrdering::Manhattan, 1)
        .with_threads(2)
        .run(&queries)
        .unwrap();

    let dir = tempdir().unwrap();
    let report = dir.path().join("report.csv");
    batch::write_csv(&report, &results).unwrap();
    let text = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("query_id,method,ordering,start,end,success"));
    assert!(lines[1].starts_with("0,dfs,manhattan,0,4,true,2,2,"));
    assert!(lines[2].starts_with("1,bfs,manhattan,0,5,false,,,,,"));
    assert!(lines[2].ends_with("\"No path found from 0 to 5\""));
}
