//! The `reduce` CLI subcommand.

use clap::Parser;
use std::path::PathBuf;

use crate::json::{encode_graph_state, read_graph_state};
use crate::simplify;

use super::{emit, CliError};

/// Reduce a graph state.
#[derive(Parser, Debug)]
pub struct ReduceArgs {
    /// Graph-state json file to reduce.
    input: PathBuf,

    /// Output to a file instead of printing the result.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Repeat the reduction until nothing changes, instead of a single
    /// round.
    #[arg(long)]
    fixed_point: bool,
}

impl ReduceArgs {
    /// Run the `reduce` command using the provided arguments.
    pub fn run(self) -> Result<(), CliError> {
        let (mut g, names) = read_graph_state(&self.input)?;
        let before = g.num_nodes();
        if self.fixed_point {
            simplify::clifford_simp(&mut g);
        } else {
            simplify::eliminate_clifford(&mut g);
        }
        log::info!("reduced {} nodes to {}", before, g.num_nodes());
        let json = encode_graph_state(&g, &names)?;
        emit(&json, self.out.as_deref())
    }
}
