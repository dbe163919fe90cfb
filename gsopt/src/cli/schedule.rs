//! The `schedule` CLI subcommand.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use crate::json::{read_graph_state, NodeName};
use crate::simplify;

use super::{emit, CliError};

/// Schedule the measurements of a graph state.
#[derive(Parser, Debug)]
pub struct ScheduleArgs {
    /// Graph-state json file to schedule.
    input: PathBuf,

    /// Reduce the graph state to a fixed point before scheduling.
    #[arg(long)]
    reduce: bool,
}

#[derive(Serialize, Debug)]
struct ScheduleReport {
    order: Vec<NodeName>,
    register_size: usize,
}

impl ScheduleArgs {
    /// Run the `schedule` command using the provided arguments.
    pub fn run(self) -> Result<(), CliError> {
        let (mut g, names) = read_graph_state(&self.input)?;
        if self.reduce {
            simplify::clifford_simp(&mut g);
        }
        let s = g.schedule()?;
        let report = ScheduleReport {
            order: s.order.iter().map(|&v| names.name(v)).collect(),
            register_size: s.register_size,
        };
        emit(&serde_json::to_string_pretty(&report)?, None)
    }
}
