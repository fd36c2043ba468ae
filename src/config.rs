use crate::algorithms::common::SearchMethod;
use crate::algorithms::ordering::NeighborOrdering;
use crate::cell::CellId;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Maze file with comma separated labels; a random maze is generated when omitted
    #[arg(long)]
    pub maze: Option<PathBuf>,

    /// Drop the first row and column of the maze file
    #[arg(long, default_value_t = false)]
    pub skip_header: bool,

    #[arg(long, default_value_t = 20)]
    pub grid_size: usize,

    #[arg(long, default_value_t = 50)]
    pub num_walls: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    /// dfs, bfs or all
    #[arg(long, default_value = "all")]
    pub method: String,

    /// manhattan, random or none
    #[arg(long, default_value = "manhattan")]
    pub neighbor_sort: String,

    #[arg(long, requires = "end")]
    pub start: Option<CellId>,

    #[arg(long, requires = "start")]
    pub end: Option<CellId>,

    /// Random start/end pairs to search when no explicit pair is given
    #[arg(long, default_value_t = 1)]
    pub num_queries: usize,

    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    /// CSV report with one row per search
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// CSV copy of the maze with the first route found marked
    #[arg(long)]
    pub route_file: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn methods(&self) -> Result<Vec<SearchMethod>> {
        if self.method == "all" {
            return Ok(SearchMethod::ALL.to_vec());
        }
        Ok(vec![self.method.parse()?])
    }

    pub fn ordering(&self) -> Result<NeighborOrdering> {
        self.neighbor_sort.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn defaults_run_both_methods_with_manhattan_ordering() {
        let config = Config::parse_from(["maze_search"]);
        assert_eq!(config.methods().unwrap(), vec![SearchMethod::Bfs, SearchMethod::Dfs]);
        assert_eq!(config.ordering().unwrap(), NeighborOrdering::Manhattan);
        assert_eq!(config.num_queries, 1);
    }

    #[test]
    fn names_are_validated_through_the_search_errors() {
        let config = Config::parse_from(["maze_search", "--method", "xfs", "--neighbor-sort", "bogus"]);
        assert!(matches!(config.methods(), Err(SearchError::InvalidPathSearchMethod(_))));
        assert!(matches!(config.ordering(), Err(SearchError::InvalidSortingMethod(_))));
    }

    #[test]
    fn explicit_endpoints_are_parsed() {
        let config = Config::parse_from([
            "maze_search",
            "--method",
            "dfs",
            "--start",
            "3",
            "--end",
            "17",
        ]);
        assert_eq!(config.methods().unwrap(), vec![SearchMethod::Dfs]);
        assert_eq!((config.start, config.end), (Some(3), Some(17)));
    }

    #[test]
    fn endpoints_must_be_given_together() {
        assert!(Config::try_parse_from(["maze_search", "--start", "3"]).is_err());
        assert!(Config::try_parse_from(["maze_search", "--end", "8"]).is_err());
        assert!(Config::try_parse_from(["maze_search", "--start", "3", "--end", "8"]).is_ok());
    }
}
