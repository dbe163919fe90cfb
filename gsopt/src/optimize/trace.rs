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

//! Observation of an orbit search as it runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::objective::{Metrics, Objective};
use super::Visit;
use crate::geometry::{Geometry, V};

/// Receives the events of an orbit search.
pub trait TraceObserver {
    /// Called once per recorded visit, the root included, in index order.
    fn on_visit(&mut self, index: usize, visit: &Visit);

    /// Called when visit `index` becomes the best one seen for `objective`.
    fn on_improvement(&mut self, _objective: Objective, _index: usize) {}

    /// Called when the graph of visit `index` is expanded, before its
    /// candidates are scored. Graphs isomorphic to an earlier expanded one
    /// are never expanded.
    fn on_expand(&mut self, _index: usize, _geometry: &Geometry) {}
}

impl TraceObserver for () {
    fn on_visit(&mut self, _index: usize, _visit: &Visit) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub index: usize,
    pub depth: usize,
    pub parent: Option<usize>,
    pub pivot: Option<V>,
    #[serde(flatten)]
    pub metrics: Metrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    pub index: usize,
    pub value: f64,
}

/// Serializable summary of a search: one record per visit and the best
/// visit for each objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    pub node_count: usize,
    pub visits: Vec<TraceRecord>,
    pub best: BTreeMap<Objective, BestRecord>,
}

/// A [TraceObserver] that keeps everything it sees.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    records: Vec<TraceRecord>,
    best: BTreeMap<Objective, usize>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Index of the last improvement seen for `objective`.
    pub fn best(&self, objective: Objective) -> Option<usize> {
        self.best.get(&objective).copied()
    }

    pub fn report(&self, node_count: usize) -> TraceReport {
        let best = self
            .best
            .iter()
            .map(|(&o, &index)| {
                let value = self.records[index].metrics.get(o);
                (o, BestRecord { index, value })
            })
            .collect();
        TraceReport {
            node_count,
            visits: self.records.clone(),
            best,
        }
    }
}

impl TraceObserver for Trace {
    fn on_visit(&mut self, index: usize, visit: &Visit) {
        self.records.push(TraceRecord {
            index,
            depth: visit.depth,
            parent: visit.parent,
            pivot: visit.pivot,
            metrics: visit.metrics,
        });
    }

    fn on_improvement(&mut self, objective: Objective, index: usize) {
        self.best.insert(objective, index);
    }
}
