//! The gsopt command line interface.

use clap::{crate_version, Parser};

use crate::json::JsonError;
use crate::schedule::ScheduleError;

pub mod opt;
pub mod reduce;
pub mod schedule;

/// CLI arguments.
#[derive(Parser, Debug)]
#[clap(version = crate_version!(), long_about = None)]
#[clap(about = "Graph-state reduction and scheduling for measurement-based quantum computation")]
pub enum Cli {
    /// Remove Pauli, isolated and fusable nodes from a graph state.
    Reduce(reduce::ReduceArgs),
    /// Compute a measurement order and its register size.
    Schedule(schedule::ScheduleArgs),
    /// Search the local-complementation orbit for a cheaper graph state.
    Opt(opt::OptArgs),
}

/// Error type for the CLI.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum CliError {
    /// Error reading or writing files.
    #[display("IO error: {_0}")]
    IO(std::io::Error),
    /// Error reading a graph-state document.
    #[display("Error reading graph state: {_0}")]
    Json(JsonError),
    /// The dependencies of the graph state are cyclic.
    #[display("Error scheduling graph state: {_0}")]
    Schedule(ScheduleError),
    /// Error encoding a report.
    #[display("Error writing report: {_0}")]
    Report(serde_json::Error),
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self {
            Cli::Reduce(args) => args.run(),
            Cli::Schedule(args) => args.run(),
            Cli::Opt(args) => args.run(),
        }
    }
}

/// Writes `s` to `out`, or prints it if no file is given.
fn emit(s: &str, out: Option<&std::path::Path>) -> Result<(), CliError> {
    match out {
        Some(path) => std::fs::write(path, s)?,
        None => println!("{s}"),
    }
    Ok(())
}
