use crate::algorithms::common::SearchMethod;
use crate::algorithms::ordering::NeighborOrdering;
use crate::algorithms::route::{find_route, Route};
use crate::algorithms::search::PathSearchEngine;
use crate::cell::CellId;
use crate::error::Result;
use crate::graph::CellIndex;
use crate::statistics::Statistics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub start: CellId,
    pub end: CellId,
    pub method: SearchMethod,
}

#[derive(Debug)]
pub struct BatchResult {
    pub query_id: usize,
    pub query: Query,
    pub ordering: NeighborOrdering,
    pub outcome: Result<(Route, Statistics)>,
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn route(&self) -> Option<&Route> {
        self.outcome.as_ref().ok().map(|(route, _)| route)
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Runs many independent searches against one shared cell index on a
/// rayon pool.
pub struct BatchRunner<'a> {
    index: &'a CellIndex,
    ordering: NeighborOrdering,
    seed: u64,
    threads: usize,
}

impl<'a> BatchRunner<'a> {
    pub fn new(index: &'a CellIndex, ordering: NeighborOrdering, seed: u64) -> Self {
        BatchRunner {
            index,
            ordering,
            seed,
            threads: 1,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Random start/end pairs, every pair searched with each method. Starts
    /// are drawn from the lower ids and ends from the upper ids so that the
    /// two tend to lie far apart.
    pub fn random_queries<R: Rng + ?Sized>(
        index: &CellIndex,
        count: usize,
        methods: &[SearchMethod],
        rng: &mut R,
    ) -> Vec<Query> {
        let cells = index.len();
        if cells == 0 {
            return Vec::new();
        }
        let start_limit = (cells * 7 / 10).max(1);
        let end_floor = (cells * 4 / 5).min(cells - 1);

        let pairs: Vec<(CellId, CellId)> = (0..count)
            .map(|_| (rng.gen_range(0..start_limit), rng.gen_range(end_floor..cells)))
            .collect();

        methods
            .iter()
            .flat_map(|&method| {
                pairs
                    .iter()
                    .map(move |&(start, end)| Query { start, end, method })
            })
            .collect()
    }

    /// Results come back in query order. Each query gets its own random
    /// source derived from the runner seed, so results do not depend on
    /// how queries are spread across threads.
    pub fn run(&self, queries: &[Query]) -> Result<Vec<BatchResult>> {
        log::info!(
            "running {} queries on {} threads ({} ordering)",
            queries.len(),
            self.threads,
            self.ordering
        );
        let pool = ThreadPoolBuilder::new().num_threads(self.threads).build()?;
        Ok(pool.install(|| {
            queries
                .par_iter()
                .enumerate()
                .map(|(query_id, &query)| self.run_query(query_id, query))
                .collect()
        }))
    }

    fn run_query(&self, query_id: usize, query: Query) -> BatchResult {
        let started = Instant::now();
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(query_id as u64));
        let engine = PathSearchEngine::new(self.index);

        let outcome = find_route(
            &engine,
            query.start,
            query.end,
            query.method,
            self.ordering,
            &mut rng,
        )
        .and_then(|(route, parents)| {
            let stats = Statistics::new(self.index, &route, &parents, query.method, self.ordering)?;
            Ok((route, stats))
        });

        match &outcome {
            Err(e) if e.is_no_route() => {
                log::info!("query {}: no route from {} to {}", query_id, query.start, query.end)
            }
            Err(e) => log::warn!("query {} failed: {}", query_id, e),
            Ok((route, _)) => log::debug!("query {}: route of {} steps", query_id, route.steps()),
        }

        BatchResult {
            query_id,
            query,
            ordering: self.ordering,
            outcome,
            elapsed: started.elapsed(),
        }
    }
}

pub fn write_csv(path: impl AsRef<Path>, results: &[BatchResult]) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(
        file,
        "query_id,method,ordering,start,end,success,route_steps,optimal_steps,cells_discovered,route_efficiency,elapsed_us,error"
    )?;

    for result in results {
        let Query { start, end, method } = result.query;
        match &result.outcome {
            Ok((_, stats)) => writeln!(
                file,
                "{},{},{},{},{},true,{},{},{},{:.6},{},",
                result.query_id,
                method,
                result.ordering,
                start,
                end,
                stats.route_steps,
                stats.optimal_steps,
                stats.cells_discovered,
                stats.route_efficiency,
                result.elapsed.as_micros()
            )?,
            Err(e) => writeln!(
                file,
                "{},{},{},{},{},false,,,,,{},\"{}\"",
                result.query_id,
                method,
                result.ordering,
                start,
                end,
                result.elapsed.as_micros(),
                e.to_string().replace('"', "'")
            )?,
        }
    }

    file.flush()?;
    log::info!("wrote {} results", results.len());
    Ok(())
}

/// Per-method success counts, errors grouped apart from "no route".
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MethodSummary {
    pub total: usize,
    pub successful: usize,
    pub no_route: usize,
    pub failed: usize,
    pub average_steps: f64,
    pub average_efficiency: f64,
    pub average_discovered: f64,
}

pub fn summarize(results: &[BatchResult]) -> HashMap<SearchMethod, MethodSummary> {
    let mut groups: HashMap<SearchMethod, Vec<&BatchResult>> = HashMap::new();
    for result in results {
        groups.entry(result.query.method).or_default().push(result);
    }

    groups
        .into_iter()
        .map(|(method, results)| {
            let stats: Vec<&Statistics> = results
                .iter()
                .filter_map(|r| r.outcome.as_ref().ok().map(|(_, s)| s))
                .collect();
            let no_route = results
                .iter()
                .filter(|r| matches!(&r.outcome, Err(e) if e.is_no_route()))
                .count();
            let summary = MethodSummary {
                total: results.len(),
                successful: stats.len(),
                no_route,
                failed: results.len() - stats.len() - no_route,
                average_steps: mean(&stats, |s| s.route_steps as f64),
                average_efficiency: mean(&stats, |s| s.route_efficiency),
                average_discovered: mean(&stats, |s| s.cells_discovered as f64),
            };
            (method, summary)
        })
        .collect()
}

fn mean(stats: &[&Statistics], f: impl Fn(&Statistics) -> f64) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }
    stats.iter().map(|&s| f(s)).sum::<f64>() / stats.len() as f64
}

pub fn print_summary(results: &[BatchResult]) {
    if results.is_empty() {
        println!("No results to summarize.");
        return;
    }

    println!("\n=== SEARCH SUMMARY ===");
    let mut summaries: Vec<_> = summarize(results).into_iter().collect();
    summaries.sort_by_key(|(method, _)| method.name());

    for (method, summary) in summaries {
        println!("\n{} Results:", method.name().to_uppercase());
        let success_rate = (summary.successful as f64 / summary.total as f64) * 100.0;
        println!(
            "  Routes found: {}/{} ({:.1}%)",
            summary.successful, summary.total, success_rate
        );
        if summary.no_route > 0 {
            println!("  No route: {}", summary.no_route);
        }
        if summary.failed > 0 {
            println!("  Failed: {}", summary.failed);
        }
        if summary.successful > 0 {
            println!("  Average route steps: {:.1}", summary.average_steps);
            println!("  Average efficiency: {:.3}", summary.average_efficiency);
            println!("  Average cells discovered: {:.1}", summary.average_discovered);
        }
    }
}
