use clap::Parser;

use maze_search::batch::{self, BatchRunner, Query};
use maze_search::config::Config;
use maze_search::{CellId, CellIndex, Maze, Result, SearchMethod};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    env_logger::init();
    let config = Config::parse();

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let methods = config.methods()?;
    let ordering = config.ordering()?;

    let maze = match &config.maze {
        Some(path) => Maze::load(path, config.skip_header)?,
        None => Maze::generate(config.grid_size, config.num_walls, &mut rng)?,
    };
    let index = CellIndex::from_maze(&maze);

    if !config.quiet {
        println!("Maze: {}x{}, {} walkable cells", maze.rows, maze.cols, index.len());
        println!("Neighbor ordering: {}", ordering);
        println!();
    }

    let queries = match (config.start, config.end) {
        (Some(start), Some(end)) => pair_queries(start, end, &methods),
        (None, None) if config.num_queries == 1 => match marked_endpoints(&maze, &index) {
            Some((start, end)) => pair_queries(start, end, &methods),
            None => BatchRunner::random_queries(&index, 1, &methods, &mut rng),
        },
        _ => BatchRunner::random_queries(&index, config.num_queries, &methods, &mut rng),
    };

    let runner = BatchRunner::new(&index, ordering, rng.gen()).with_threads(config.threads);
    let results = runner.run(&queries)?;

    for result in &results {
        let query = result.query;
        match &result.outcome {
            Ok((route, stats)) => {
                if !config.quiet {
                    println!(
                        "{}. {} path found for {} to {}",
                        result.query_id + 1,
                        query.method,
                        query.start,
                        query.end
                    );
                    println!("{}", stats);
                }
                if !config.no_visualization {
                    maze.print_grid(&index, Some(route))?;
                }
            }
            Err(e) if e.is_no_route() => println!(
                "{}. {} found no route from {} to {}",
                result.query_id + 1,
                query.method,
                query.start,
                query.end
            ),
            Err(e) => eprintln!("{}. {} search failed: {}", result.query_id + 1, query.method, e),
        }
    }

    if let Some(path) = &config.output_file {
        batch::write_csv(path, &results)?;
        println!("Results saved to: {}", path.display());
    }

    if let Some(path) = &config.route_file {
        match results.iter().find_map(|r| r.route()) {
            Some(route) => {
                maze.export_route(path, &index, route)?;
                println!("Route saved to: {}", path.display());
            }
            None => println!("No route to save."),
        }
    }

    if !config.quiet {
        batch::print_summary(&results);
    }
    Ok(())
}

fn pair_queries(start: CellId, end: CellId, methods: &[SearchMethod]) -> Vec<Query> {
    methods
        .iter()
        .map(|&method| Query { start, end, method })
        .collect()
}

/// Ids of the `ST` and `FN` cells, if the maze marks both.
fn marked_endpoints(maze: &Maze, index: &CellIndex) -> Option<(CellId, CellId)> {
    let start = index.at(maze.start?)?.id;
    let end = index.at(maze.goal?)?.id;
    Some((start, end))
}
