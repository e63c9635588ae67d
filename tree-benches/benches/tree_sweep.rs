//! Thin `argv[1]` entry point over `tree_benches::{dispatch, run}`. The
//! dispatch contract and the sweep itself carry their own test coverage in
//! `src/lib.rs`; `criterion` still gates this binary's `[[bench]] harness =
//! false` wiring so `cargo bench` finds it.

use std::fs;
use std::path::Path;
use tree_benches::{dispatch, Dispatch};
use tree_core::BenchError;

fn main() {
    let mut args = std::env::args();
    args.next(); // argv[0]
    let what_tree = args.next();

    let engines = match dispatch(what_tree.as_deref()) {
        Dispatch::MissingArgument => {
            eprintln!("wrong parameters");
            std::process::exit(1);
        }
        Dispatch::UnknownTree => {
            println!("wrong tree");
            return;
        }
        Dispatch::Run(engines) => engines,
    };

    let results_dir = Path::new("results");
    if let Err(source) = fs::create_dir_all(results_dir) {
        let err = BenchError::CreateResultsDir {
            path: results_dir.to_path_buf(),
            source,
        };
        eprintln!("{err}");
        std::process::exit(1);
    }

    if let Err(err) = tree_benches::run(&engines, results_dir) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
