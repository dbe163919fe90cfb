//! The `opt` CLI subcommand.

use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::json::{read_graph_state, write_graph_state, NodeName};
use crate::optimize::{
    CandidatePolicy, Metrics, Objective, OrbitOptimizer, OrbitOptions, Trace, Traversal,
};

use super::{emit, CliError};

/// Run the orbit optimizer.
#[derive(Parser, Debug)]
pub struct OptArgs {
    /// Graph-state json file to optimize.
    input: PathBuf,

    /// Write the optimized graph state to a file.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Objective to minimize: edges, max-degree, degree-norm or
    /// register-size.
    #[arg(long, default_value = "edges")]
    objective: Objective,

    /// Maximum number of graphs to score.
    #[arg(long, default_value_t = 100)]
    budget: usize,

    /// Search breadth-first instead of depth-first.
    #[arg(long)]
    bfs: bool,

    /// Try every node as a pivot, not only those around the nodes of
    /// maximum degree.
    #[arg(long)]
    all: bool,

    /// Expand the non-improving candidates most expensive first.
    #[arg(long)]
    reverse: bool,

    /// Score candidates in parallel.
    #[arg(long)]
    parallel: bool,

    /// Write a json trace of every scored graph to a file.
    #[arg(long)]
    trace: Option<PathBuf>,
}

#[derive(Serialize, Debug)]
struct OptReport {
    objective: Objective,
    initial: Metrics,
    best: Metrics,
    pivots: Vec<NodeName>,
    visits: usize,
    exhausted: bool,
}

impl OptArgs {
    fn options(&self) -> OrbitOptions {
        OrbitOptions {
            max_visits: self.budget,
            traversal: match self.bfs {
                true => Traversal::BreadthFirst,
                false => Traversal::DepthFirst,
            },
            candidates: match self.all {
                true => CandidatePolicy::All,
                false => CandidatePolicy::Boundary,
            },
            guide: self.objective,
            reverse: self.reverse,
            parallel: self.parallel,
        }
    }

    /// Run the `opt` command using the provided arguments.
    pub fn run(self) -> Result<(), CliError> {
        let (mut g, names) = read_graph_state(&self.input)?;
        let optimizer = OrbitOptimizer::new(self.options());
        let mut trace = Trace::new();
        let result = optimizer.run_observed(&mut g, &mut trace)?;

        if let Some(path) = &self.trace {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &trace.report(g.num_nodes()))?;
        }

        let report = OptReport {
            objective: self.objective,
            initial: result.visits[0].metrics,
            best: result.best(self.objective).metrics,
            pivots: result
                .pivot_chain(self.objective)
                .into_iter()
                .map(|v| names.name(v))
                .collect(),
            visits: result.visits.len(),
            exhausted: result.exhausted,
        };

        if let Some(path) = &self.out {
            result.replay(&mut g, self.objective);
            write_graph_state(&g, &names, path)?;
        }
        emit(&serde_json::to_string_pretty(&report)?, None)
    }
}
