//! Sweeps tree size against average insert/find/erase latency and writes one
//! CSV file per engine under `results/`.
//!
//! This is not a `criterion` benchmark group — the contract here is a fixed
//! external sweep (tree size from 10,000 to 1,000,000 in steps of 10,000,
//! 1,000 sampled operations per step) invoked as `tree-benches <engine>`,
//! matching the original profiling driver this workspace grew out of. The
//! `argv[1]` dispatch and the sweep itself live here as an ordinary library so
//! both can carry normal `#[cfg(test)]` coverage; `benches/tree_sweep.rs` is a
//! thin `main()` over [`dispatch`] and [`run`], kept as a `[[bench]]` target
//! with `harness = false` so `cargo bench` still finds it.

use criterion::black_box;
use rand::Rng;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write as _;
use std::path::Path;
use std::time::Instant;
use tree_core::{BenchError, Result};
use trees::{AvlTree, SplayTree, Treap};

/// Average latency, in seconds, over one sweep step.
pub struct ProfileStatistic {
    pub size: usize,
    pub insert_time: f64,
    pub find_time: f64,
    pub erase_time: f64,
}

/// The three operations every engine under benchmark must expose, with the
/// receiver mutability each engine actually needs (`find` is `&mut self` for
/// a splay tree, `&self` everywhere else, so this trait asks for `&mut self`
/// uniformly rather than forcing a shared signature that doesn't fit).
trait Bench {
    fn new_engine() -> Self;
    fn size(&self) -> usize;
    fn bench_insert(&mut self, key: i32);
    fn bench_find(&mut self, key: i32);
    fn bench_erase(&mut self, key: i32);
}

impl Bench for AvlTree<i32> {
    fn new_engine() -> Self {
        AvlTree::new()
    }
    fn size(&self) -> usize {
        self.len()
    }
    fn bench_insert(&mut self, key: i32) {
        black_box(self.insert(key));
    }
    fn bench_find(&mut self, key: i32) {
        black_box(self.find(&key));
    }
    fn bench_erase(&mut self, key: i32) {
        self.erase(&key);
    }
}

impl Bench for SplayTree<i32> {
    fn new_engine() -> Self {
        SplayTree::new()
    }
    fn size(&self) -> usize {
        self.len()
    }
    fn bench_insert(&mut self, key: i32) {
        black_box(self.insert(key));
    }
    fn bench_find(&mut self, key: i32) {
        black_box(self.find(&key));
    }
    fn bench_erase(&mut self, key: i32) {
        self.erase(&key);
    }
}

impl Bench for Treap<i32> {
    fn new_engine() -> Self {
        Treap::new()
    }
    fn size(&self) -> usize {
        self.len()
    }
    fn bench_insert(&mut self, key: i32) {
        black_box(self.insert(key));
    }
    fn bench_find(&mut self, key: i32) {
        black_box(self.find(&key));
    }
    fn bench_erase(&mut self, key: i32) {
        self.erase(&key);
    }
}

impl Bench for BTreeSet<i32> {
    fn new_engine() -> Self {
        BTreeSet::new()
    }
    fn size(&self) -> usize {
        self.len()
    }
    fn bench_insert(&mut self, key: i32) {
        black_box(self.insert(key));
    }
    fn bench_find(&mut self, key: i32) {
        black_box(self.contains(&key));
    }
    fn bench_erase(&mut self, key: i32) {
        self.remove(&key);
    }
}

fn profile<T: Bench>(
    size_start: usize,
    size_end: usize,
    size_step: usize,
    operations_per_step: usize,
) -> Vec<ProfileStatistic> {
    let mut rng = rand::thread_rng();
    let mut tree = T::new_engine();
    let mut results = Vec::new();

    let mut size = size_start;
    while size < size_end {
        while tree.size() != size {
            tree.bench_insert(rng.gen());
        }

        let mut total_insert_time = 0.0;
        let mut total_find_time = 0.0;
        let mut total_erase_time = 0.0;

        for _ in 0..operations_per_step {
            let key: i32 = rng.gen();

            let start = Instant::now();
            tree.bench_insert(key);
            total_insert_time += start.elapsed().as_secs_f64();

            let start = Instant::now();
            tree.bench_find(key);
            total_find_time += start.elapsed().as_secs_f64();

            let start = Instant::now();
            tree.bench_erase(key);
            total_erase_time += start.elapsed().as_secs_f64();
        }

        let n = operations_per_step as f64;
        results.push(ProfileStatistic {
            size,
            insert_time: total_insert_time / n,
            find_time: total_find_time / n,
            erase_time: total_erase_time / n,
        });

        size += size_step;
    }

    results
}

fn write_csv(path: &Path, rows: &[ProfileStatistic]) -> Result<()> {
    let mut file = File::create(path).map_err(|source| BenchError::OpenCsv {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(file, "tree_size,insert_time,find_time,erase_time").map_err(|source| BenchError::WriteCsv {
        path: path.to_path_buf(),
        source,
    })?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{}",
            row.size, row.insert_time, row.find_time, row.erase_time
        )
        .map_err(|source| BenchError::WriteCsv {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

const SIZE_START: usize = 10_000;
const SIZE_END: usize = 1_000_000;
const SIZE_STEP: usize = 10_000;
const OPERATIONS_PER_STEP: usize = 1_000;

fn profile_avl(results_dir: &Path) -> Result<()> {
    let rows = profile::<AvlTree<i32>>(SIZE_START, SIZE_END, SIZE_STEP, OPERATIONS_PER_STEP);
    write_csv(&results_dir.join("avl.csv"), &rows)
}

fn profile_splay(results_dir: &Path) -> Result<()> {
    let rows = profile::<SplayTree<i32>>(SIZE_START, SIZE_END, SIZE_STEP, OPERATIONS_PER_STEP);
    write_csv(&results_dir.join("splay.csv"), &rows)
}

fn profile_cartesian(results_dir: &Path) -> Result<()> {
    let rows = profile::<Treap<i32>>(SIZE_START, SIZE_END, SIZE_STEP, OPERATIONS_PER_STEP);
    write_csv(&results_dir.join("cartesian.csv"), &rows)
}

fn profile_rb(results_dir: &Path) -> Result<()> {
    let rows = profile::<BTreeSet<i32>>(SIZE_START, SIZE_END, SIZE_STEP, OPERATIONS_PER_STEP);
    write_csv(&results_dir.join("set.csv"), &rows)
}

/// One of the engines the sweep can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Avl,
    Splay,
    Cartesian,
    Rb,
}

/// The outcome of parsing `argv[1]`, kept separate from actually running the
/// sweep so the dispatch contract can be tested without profiling anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No argument was given at all.
    MissingArgument,
    /// An argument was given but doesn't name a known engine.
    UnknownTree,
    /// Run the sweep for these engines, in order.
    Run(Vec<Engine>),
}

/// Parses `argv[1]` the same way the original profiling driver's `argc`/
/// `argv[1]` dispatch does: one positional argument, five outcomes.
pub fn dispatch(what_tree: Option<&str>) -> Dispatch {
    match what_tree {
        None => Dispatch::MissingArgument,
        Some("avl") => Dispatch::Run(vec![Engine::Avl]),
        Some("splay") => Dispatch::Run(vec![Engine::Splay]),
        Some("cartesian") => Dispatch::Run(vec![Engine::Cartesian]),
        Some("rb") => Dispatch::Run(vec![Engine::Rb]),
        Some("all") => Dispatch::Run(vec![Engine::Avl, Engine::Splay, Engine::Cartesian, Engine::Rb]),
        Some(_) => Dispatch::UnknownTree,
    }
}

/// Runs the sweep for each engine in turn, writing its CSV under
/// `results_dir`, stopping at the first failure.
pub fn run(engines: &[Engine], results_dir: &Path) -> Result<()> {
    for engine in engines {
        match engine {
            Engine::Avl => profile_avl(results_dir),
            Engine::Splay => profile_splay(results_dir),
            Engine::Cartesian => profile_cartesian(results_dir),
            Engine::Rb => profile_rb(results_dir),
        }?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_is_rejected() {
        assert_eq!(dispatch(None), Dispatch::MissingArgument);
    }

    #[test]
    fn unknown_tree_is_rejected() {
        assert_eq!(dispatch(Some("quadtree")), Dispatch::UnknownTree);
    }

    #[test]
    fn each_known_engine_dispatches_to_itself() {
        assert_eq!(dispatch(Some("avl")), Dispatch::Run(vec![Engine::Avl]));
        assert_eq!(dispatch(Some("splay")), Dispatch::Run(vec![Engine::Splay]));
        assert_eq!(dispatch(Some("cartesian")), Dispatch::Run(vec![Engine::Cartesian]));
        assert_eq!(dispatch(Some("rb")), Dispatch::Run(vec![Engine::Rb]));
    }

    #[test]
    fn all_dispatches_to_every_engine_in_order() {
        assert_eq!(
            dispatch(Some("all")),
            Dispatch::Run(vec![Engine::Avl, Engine::Splay, Engine::Cartesian, Engine::Rb])
        );
    }

    #[test]
    fn tiny_sweep_range_produces_one_row_per_step() {
        let rows = profile::<AvlTree<i32>>(0, 30, 10, 5);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].size, 0);
        assert_eq!(rows[1].size, 10);
        assert_eq!(rows[2].size, 20);
    }
}
