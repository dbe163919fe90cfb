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

//! Generators for graph states, for tests and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::basis::{Basis, BasisTable, Plane};
use crate::dependency::DependencyTable;
use crate::geometry::Geometry;
use crate::graph_state::ReducedGraph;
use crate::phase::Phase;

/// A path `0 - 1 - ... - n-1` measured in the XY plane at the given angles.
/// Nodes without an angle are outputs.
pub fn linear_chain(angles: &[Option<Phase>]) -> ReducedGraph {
    let n = angles.len();
    let geometry = Geometry::from_edges(n, (1..n).map(|i| (i - 1, i)));
    let mut bases = BasisTable::new();
    let mut outputs = Vec::new();
    for (v, a) in angles.iter().enumerate() {
        match a {
            Some(a) => bases.insert(v, Basis::xy(*a)),
            None => {
                bases.insert(v, Basis::Unmeasured);
                outputs.push(v);
            }
        }
    }
    ReducedGraph::new(geometry, bases, DependencyTable::new(), outputs)
        .unwrap_or_else(|e| panic!("chain construction is always consistent: {e}"))
}

/// Builds random graph states: an Erdős–Rényi geometry, random measurement
/// bases and random forward dependencies.
///
/// The last `outputs` nodes are outputs. Dependencies only point from
/// smaller to larger labels, so they are always acyclic.
pub struct RandomGraphStateBuilder {
    pub rng: StdRng,
    pub nodes: usize,
    pub edge_prob: f64,
    pub pauli_prob: f64,
    pub outputs: usize,
    pub dependency_prob: f64,
}

impl Default for RandomGraphStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomGraphStateBuilder {
    pub fn new() -> RandomGraphStateBuilder {
        RandomGraphStateBuilder {
            rng: StdRng::from_os_rng(),
            nodes: 10,
            edge_prob: 0.3,
            pauli_prob: 0.5,
            outputs: 1,
            dependency_prob: 0.0,
        }
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
    pub fn nodes(&mut self, nodes: usize) -> &mut Self {
        self.nodes = nodes;
        self
    }
    pub fn edge_prob(&mut self, p: f64) -> &mut Self {
        self.edge_prob = p;
        self
    }
    pub fn pauli_prob(&mut self, p: f64) -> &mut Self {
        self.pauli_prob = p;
        self
    }
    pub fn outputs(&mut self, outputs: usize) -> &mut Self {
        self.outputs = outputs;
        self
    }
    pub fn dependency_prob(&mut self, p: f64) -> &mut Self {
        self.dependency_prob = p;
        self
    }

    fn random_basis(&mut self) -> Basis {
        let plane = match self.rng.random_range(0..3) {
            0 => Plane::XY,
            1 => Plane::YZ,
            _ => Plane::ZX,
        };
        let phase = if self.rng.random_bool(self.pauli_prob) {
            Phase::quarter(self.rng.random_range(0..4))
        } else {
            // odd multiples of pi/8 are never Pauli
            let k: i64 = self.rng.random_range(0..8);
            Phase::from((2 * k + 1, 8))
        };
        Basis::Measured { plane, phase }
    }

    pub fn build(&mut self) -> ReducedGraph {
        let n = self.nodes;
        let first_output = n.saturating_sub(self.outputs);
        let mut geometry = Geometry::with_nodes(n);
        let mut deps = DependencyTable::new();
        let mut bases = BasisTable::new();

        for i in 0..n {
            for j in 0..i {
                if self.rng.random_bool(self.edge_prob) {
                    geometry.add_edge(j, i);
                }
                if self.dependency_prob > 0.0 && self.rng.random_bool(self.dependency_prob) {
                    deps.add_dependency(j, i);
                }
            }
            let b = if i >= first_output {
                Basis::Unmeasured
            } else {
                self.random_basis()
            };
            bases.insert(i, b);
        }

        ReducedGraph::new(geometry, bases, deps, first_output..n)
            .unwrap_or_else(|e| panic!("random construction is always consistent: {e}"))
    }
}
