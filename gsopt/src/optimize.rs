// gsopt - graph-state reduction and scheduling for measurement-based
//         quantum computation
// Copyright (C) 2021 - Aleks Kissinger
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded search of the local-complementation orbit.
//!
//! Every graph reachable by a chain of local complementations describes the
//! same computation. The search walks this orbit from a given graph state,
//! scores every graph it meets under all [Objective]s, and remembers how to
//! reach the best one for each.
//!
//! Exploration is best-first within a depth- or breadth-first skeleton:
//! at each expanded graph, candidates that lower the guiding objective are
//! tried first, cheapest first. Graphs isomorphic to one already expanded
//! are scored but not expanded again.

pub mod objective;
pub mod trace;

pub use objective::{Metrics, Objective, ParseObjectiveError};
pub use trace::{Trace, TraceObserver, TraceReport};

use std::collections::VecDeque;

use rayon::prelude::*;
use serde::Serialize;

use crate::basis::Dir;
use crate::dependency::DependencyTable;
use crate::geometry::{Geometry, V};
use crate::graph_state::ReducedGraph;
use crate::isomorphism::IsoRegistry;
use crate::schedule::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    #[default]
    DepthFirst,
    BreadthFirst,
}

/// Which pivots are tried at each expanded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidatePolicy {
    /// The neighbours of the nodes of maximum degree.
    #[default]
    Boundary,
    /// Every node.
    All,
}

/// Configuration options for the orbit search.
#[derive(Copy, Clone, Debug)]
pub struct OrbitOptions {
    /// The maximum number of candidate graphs to score. The starting graph
    /// is not counted.
    ///
    /// Defaults to `100`.
    pub max_visits: usize,
    /// Defaults to [Traversal::DepthFirst].
    pub traversal: Traversal,
    /// Defaults to [CandidatePolicy::Boundary].
    pub candidates: CandidatePolicy,
    /// The objective that orders candidates for expansion.
    ///
    /// Defaults to [Objective::EdgeCount].
    pub guide: Objective,
    /// Expand the non-improving candidates most expensive first.
    ///
    /// Defaults to `false`.
    pub reverse: bool,
    /// Score the candidates of each graph in parallel.
    ///
    /// Defaults to `false`.
    pub parallel: bool,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            max_visits: 100,
            traversal: Traversal::DepthFirst,
            candidates: CandidatePolicy::Boundary,
            guide: Objective::EdgeCount,
            reverse: false,
            parallel: false,
        }
    }
}

/// One scored graph. The root has neither parent nor pivot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub parent: Option<usize>,
    pub pivot: Option<V>,
    pub depth: usize,
    pub metrics: Metrics,
}

#[derive(Debug, Clone)]
pub struct OrbitResult {
    /// All scored graphs, the starting graph first.
    pub visits: Vec<Visit>,
    best: [usize; 4],
    /// Whether the search stopped on its budget rather than running out of
    /// graphs to expand.
    pub exhausted: bool,
}

impl OrbitResult {
    pub fn best_index(&self, objective: Objective) -> usize {
        self.best[objective.index()]
    }

    pub fn best(&self, objective: Objective) -> &Visit {
        &self.visits[self.best_index(objective)]
    }

    /// Pivots leading from the root to visit `index`, in application order.
    pub fn pivot_chain_to(&self, index: usize) -> Vec<V> {
        let mut chain = Vec::new();
        let mut i = index;
        while let Visit {
            parent: Some(parent),
            pivot: Some(pivot),
            ..
        } = &self.visits[i]
        {
            chain.push(*pivot);
            i = *parent;
        }
        chain.reverse();
        chain
    }

    pub fn pivot_chain(&self, objective: Objective) -> Vec<V> {
        self.pivot_chain_to(self.best_index(objective))
    }

    /// Turns `g`, which must be the graph the search started from, into the
    /// best graph found for `objective`.
    pub fn replay(&self, g: &mut ReducedGraph, objective: Objective) {
        self.replay_to(g, self.best_index(objective));
    }

    /// Turns `g`, which must be the graph the search started from, into the
    /// graph of visit `index`.
    pub fn replay_to(&self, g: &mut ReducedGraph, index: usize) {
        for p in self.pivot_chain_to(index) {
            g.local_complement(p, Dir::Plus);
        }
    }

    /// A trace of this result, as a [Trace] observer would have seen it.
    pub fn trace_report(&self, node_count: usize) -> TraceReport {
        let mut trace = Trace::new();
        {
            let mut recorder = Recorder::new(&mut trace, usize::MAX);
            for v in &self.visits {
                recorder.record(v.clone());
            }
        }
        trace.report(node_count)
    }
}

/// Appends visits and keeps track of the best one per objective.
struct Recorder<'o> {
    visits: Vec<Visit>,
    best: [usize; 4],
    max_visits: usize,
    observer: &'o mut dyn TraceObserver,
}

impl<'o> Recorder<'o> {
    fn new(observer: &'o mut dyn TraceObserver, max_visits: usize) -> Self {
        Recorder {
            visits: Vec::new(),
            best: [0; 4],
            max_visits,
            observer,
        }
    }

    fn record(&mut self, visit: Visit) -> usize {
        let index = self.visits.len();
        self.observer.on_visit(index, &visit);
        for o in Objective::ALL {
            let value = visit.metrics.get(o);
            if index == 0 || value < self.visits[self.best[o.index()]].metrics.get(o) {
                self.best[o.index()] = index;
                self.observer.on_improvement(o, index);
                if index > 0 {
                    log::debug!("visit {index}: new best {o} {value}");
                }
            }
        }
        self.visits.push(visit);
        index
    }

    /// Visits left in the budget.
    fn remaining(&self) -> usize {
        self.max_visits
            .saturating_sub(self.visits.len().saturating_sub(1))
    }
}

/// A depth-first frame: the pivot that produced this graph and the children
/// still to expand.
struct Frame {
    pivot: Option<V>,
    children: std::vec::IntoIter<(usize, V)>,
}

struct Search<'a, 'o> {
    options: &'a OrbitOptions,
    deps: DependencyTable,
    recorder: Recorder<'o>,
    registry: IsoRegistry,
    exhausted: bool,
}

impl Search<'_, '_> {
    fn candidates(&self, geometry: &Geometry) -> Vec<V> {
        match self.options.candidates {
            CandidatePolicy::All => geometry.node_vec(),
            CandidatePolicy::Boundary => {
                let (max_nodes, _) = geometry.max_degree_nodes();
                let mut c: Vec<V> = geometry.boundary_nodes(&max_nodes).into_iter().collect();
                c.sort_unstable();
                c
            }
        }
    }

    fn score(&self, geometry: &Geometry, candidates: &[V]) -> Result<Vec<Metrics>, ScheduleError> {
        let deps = &self.deps;
        if self.options.parallel {
            candidates
                .par_iter()
                .map(|&p| {
                    let mut h = geometry.clone();
                    h.local_complement(p);
                    Metrics::measure(&h, deps)
                })
                .collect()
        } else {
            let mut h = geometry.clone();
            candidates
                .iter()
                .map(|&p| {
                    h.local_complement(p);
                    let m = Metrics::measure(&h, deps);
                    h.local_complement(p);
                    m
                })
                .collect()
        }
    }

    /// Scores the candidates of the graph recorded as `visit` and returns
    /// them, as `(visit, pivot)` pairs, in the order they should be
    /// expanded.
    fn expand(&mut self, geometry: &Geometry, visit: usize) -> Result<Vec<(usize, V)>, ScheduleError> {
        let guide = self.options.guide;
        let current = self.recorder.visits[visit].metrics.get(guide);
        let depth = self.recorder.visits[visit].depth + 1;
        self.recorder.observer.on_expand(visit, geometry);

        let mut candidates = self.candidates(geometry);
        let remaining = self.recorder.remaining();
        if candidates.len() > remaining {
            candidates.truncate(remaining);
            self.exhausted = true;
        }
        let metrics = self.score(geometry, &candidates)?;

        let scored = candidates
            .into_iter()
            .zip(metrics)
            .map(|(p, metrics)| {
                let child = self.recorder.record(Visit {
                    parent: Some(visit),
                    pivot: Some(p),
                    depth,
                    metrics,
                });
                (metrics.get(guide), child, p)
            })
            .collect();
        Ok(expansion_order(scored, current, self.options.reverse))
    }

    fn depth_first(&mut self, g: &mut ReducedGraph) -> Result<(), ScheduleError> {
        let children = self.expand(g.geometry(), 0)?;
        let mut stack = vec![Frame {
            pivot: None,
            children: children.into_iter(),
        }];
        let result = self.descend(g, &mut stack);
        while let Some(frame) = stack.pop() {
            if let Some(p) = frame.pivot {
                g.local_complement(p, Dir::Minus);
            }
        }
        result
    }

    /// Runs the depth-first search until the stack is empty or the budget
    /// is spent. `g` always holds the graph of the top frame.
    fn descend(&mut self, g: &mut ReducedGraph, stack: &mut Vec<Frame>) -> Result<(), ScheduleError> {
        while let Some(frame) = stack.last_mut() {
            let Some((child, p)) = frame.children.next() else {
                let pivot = frame.pivot;
                stack.pop();
                if let Some(p) = pivot {
                    g.local_complement(p, Dir::Minus);
                }
                continue;
            };

            g.local_complement(p, Dir::Plus);
            if !self.registry.insert(g.geometry()) {
                g.local_complement(p, Dir::Minus);
                continue;
            }
            if self.recorder.remaining() == 0 {
                self.exhausted = true;
                g.local_complement(p, Dir::Minus);
                return Ok(());
            }
            stack.push(Frame {
                pivot: Some(p),
                children: Vec::new().into_iter(),
            });
            let children = self.expand(g.geometry(), child)?;
            if let Some(top) = stack.last_mut() {
                top.children = children.into_iter();
            }
        }
        Ok(())
    }

    fn breadth_first(&mut self, g: &ReducedGraph) -> Result<(), ScheduleError> {
        let mut queue = VecDeque::from([(0, g.clone())]);
        while let Some((visit, h)) = queue.pop_front() {
            if self.recorder.remaining() == 0 {
                self.exhausted = true;
                break;
            }
            for (child, p) in self.expand(h.geometry(), visit)? {
                let mut next = h.clone();
                next.local_complement(p, Dir::Plus);
                if self.registry.insert(next.geometry()) {
                    queue.push_back((child, next));
                }
            }
        }
        Ok(())
    }
}

/// Candidates that beat `current` come first, cheapest first; the rest
/// follow cheapest first, or most expensive first if `reverse`. Ties keep
/// their incoming order.
fn expansion_order(scored: Vec<(f64, usize, V)>, current: f64, reverse: bool) -> Vec<(usize, V)> {
    let (mut better, mut rest): (Vec<_>, Vec<_>) = scored.into_iter().partition(|c| c.0 < current);
    better.sort_by(|a, b| a.0.total_cmp(&b.0));
    if reverse {
        rest.sort_by(|a, b| b.0.total_cmp(&a.0));
    } else {
        rest.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    better
        .into_iter()
        .chain(rest)
        .map(|(_, child, p)| (child, p))
        .collect()
}

/// Searches the local-complementation orbit of a graph state.
#[derive(Clone, Debug, Default)]
pub struct OrbitOptimizer {
    options: OrbitOptions,
}

impl OrbitOptimizer {
    pub fn new(options: OrbitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OrbitOptions {
        &self.options
    }

    /// Searches the orbit of `g`. On return `g` is exactly as it was passed
    /// in; use [OrbitResult::replay] to move it to a result.
    ///
    /// Fails only if the dependencies of `g` are cyclic, in which case no
    /// graph of the orbit can be scheduled.
    pub fn run(&self, g: &mut ReducedGraph) -> Result<OrbitResult, ScheduleError> {
        self.run_observed(g, &mut ())
    }

    /// As [OrbitOptimizer::run], reporting every visit to `observer`.
    pub fn run_observed(
        &self,
        g: &mut ReducedGraph,
        observer: &mut dyn TraceObserver,
    ) -> Result<OrbitResult, ScheduleError> {
        let deps = g.dependencies().clone();
        let root = Metrics::measure(g.geometry(), &deps)?;
        log::info!(
            "orbit search from {} nodes, {} edges, register size {}",
            g.num_nodes(),
            root.edge_count,
            root.register_size
        );

        let mut search = Search {
            options: &self.options,
            deps,
            recorder: Recorder::new(observer, self.options.max_visits),
            registry: IsoRegistry::new(),
            exhausted: false,
        };
        search.recorder.record(Visit {
            parent: None,
            pivot: None,
            depth: 0,
            metrics: root,
        });
        search.registry.insert(g.geometry());

        match self.options.traversal {
            Traversal::DepthFirst => search.depth_first(g)?,
            Traversal::BreadthFirst => search.breadth_first(g)?,
        }

        let result = OrbitResult {
            visits: search.recorder.visits,
            best: search.recorder.best,
            exhausted: search.exhausted,
        };
        let budget_str = match result.exhausted {
            true => " (budget exhausted)",
            false => "",
        };
        log::info!(
            "orbit search finished{budget_str}: {} visits, {} distinct graphs expanded",
            result.visits.len(),
            search.registry.len()
        );
        for o in Objective::ALL {
            log::info!("best {}: {} at visit {}", o, result.best(o).metrics.get(o), result.best_index(o));
        }
        Ok(result)
    }
}
