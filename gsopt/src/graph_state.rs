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

//! A graph state together with its measurement pattern.

use rustc_hash::FxHashSet;

use crate::basis::{Axis, Basis, BasisTable, Dir, Plane};
use crate::dependency::DependencyTable;
use crate::geometry::{Geometry, V};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphStateError {
    #[error("node {0} has no measurement basis")]
    MissingBasis(V),
    #[error("a basis is given for {0}, which is not a node of the graph")]
    UnknownBasisNode(V),
    #[error("output {0} is not a node of the graph")]
    UnknownOutput(V),
    #[error("dependency {0} -> {1} refers to a node outside the graph")]
    UnknownDependency(V, V),
}

/// The entanglement graph, the measurement bases, the feed-forward
/// dependencies and the output set of a measurement pattern.
///
/// Nodes are removed from all layers at once, when they are measured out,
/// pruned or fused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReducedGraph {
    geometry: Geometry,
    bases: BasisTable,
    deps: DependencyTable,
    outputs: FxHashSet<V>,
}

impl ReducedGraph {
    /// Assembles a graph state, checking that every layer talks about the
    /// same nodes.
    pub fn new(
        geometry: Geometry,
        bases: BasisTable,
        deps: DependencyTable,
        outputs: impl IntoIterator<Item = V>,
    ) -> Result<ReducedGraph, GraphStateError> {
        for v in geometry.nodes() {
            if !bases.contains(v) {
                return Err(GraphStateError::MissingBasis(v));
            }
        }
        if let Some((v, _)) = bases.iter().find(|&(v, _)| !geometry.contains_node(v)) {
            return Err(GraphStateError::UnknownBasisNode(v));
        }
        let outputs: FxHashSet<V> = outputs.into_iter().collect();
        if let Some(&v) = outputs.iter().find(|&&v| !geometry.contains_node(v)) {
            return Err(GraphStateError::UnknownOutput(v));
        }
        if let Some((s, t)) = deps
            .edges()
            .into_iter()
            .find(|&(s, t)| !geometry.contains_node(s) || !geometry.contains_node(t))
        {
            return Err(GraphStateError::UnknownDependency(s, t));
        }
        if let Some(v) = deps.nodes().into_iter().find(|&v| !geometry.contains_node(v)) {
            return Err(GraphStateError::UnknownDependency(v, v));
        }
        Ok(ReducedGraph {
            geometry,
            bases,
            deps,
            outputs,
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn bases(&self) -> &BasisTable {
        &self.bases
    }

    pub fn dependencies(&self) -> &DependencyTable {
        &self.deps
    }

    pub fn outputs(&self) -> &FxHashSet<V> {
        &self.outputs
    }

    pub fn is_output(&self, v: V) -> bool {
        self.outputs.contains(&v)
    }

    pub fn contains_node(&self, v: V) -> bool {
        self.geometry.contains_node(v)
    }

    pub fn num_nodes(&self) -> usize {
        self.geometry.num_nodes()
    }

    /// Nodes in ascending order.
    pub fn node_vec(&self) -> Vec<V> {
        self.geometry.node_vec()
    }

    pub fn num_edges(&self) -> usize {
        self.geometry.num_edges()
    }

    pub fn basis(&self, v: V) -> Basis {
        self.bases.get(v)
    }

    /// Mutable access to the bases, e.g. to apply rotations from outside.
    pub fn bases_mut(&mut self) -> &mut BasisTable {
        &mut self.bases
    }

    /// Removes `v` from every layer.
    pub fn remove_node(&mut self, v: V) {
        self.geometry.remove_node(v);
        self.bases.cutoff(v);
        self.deps.cutoff(v);
        self.outputs.remove(&v);
    }

    /// Local complementation about `v`.
    ///
    /// The pivot receives a quarter turn about X in direction `dir`, and each
    /// of its neighbours a quarter turn about Z in direction `-dir`, on both
    /// the basis and the correction tracker. Applying it again with `-dir`
    /// restores every layer.
    pub fn local_complement(&mut self, v: V, dir: Dir) {
        let nhd = self.geometry.neighbor_vec(v);
        self.geometry.local_complement(v);
        self.bases.rotate_sqrt_x(v, dir);
        self.deps.rotate_sqrt_x(v, dir);
        for w in nhd {
            self.bases.rotate_sqrt_z(w, -dir);
            self.deps.rotate_sqrt_z(w, -dir);
        }
    }

    /// Measures `v` out if it is a non-output Pauli node. Returns whether it
    /// was removed.
    pub fn measure(&mut self, v: V) -> bool {
        self.measure_with_pivot(v, None)
    }

    /// As [ReducedGraph::measure], with an explicit neighbour to use as
    /// temporary pivot for an X measurement. Without one, the smallest
    /// neighbour is used.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` is not a neighbour of `v`.
    pub fn measure_with_pivot(&mut self, v: V, pivot: Option<V>) -> bool {
        if self.is_output(v) {
            return false;
        }
        let Some(s) = self.bases.get(v).pauli_axis() else {
            return false;
        };
        match s.axis {
            Axis::Z => {
                let nhd = self.geometry.neighbor_vec(v);
                self.remove_node(v);
                if s.negative {
                    for w in nhd {
                        self.bases.flip(w, Axis::Z);
                    }
                }
                log::debug!("measured {v} in {s}");
                true
            }
            Axis::Y => {
                self.local_complement(v, Dir::Plus);
                self.measure_with_pivot(v, None)
            }
            Axis::X => {
                let b = match pivot {
                    Some(b) => {
                        assert!(self.geometry.connected(v, b), "pivot {b} is not a neighbour of {v}");
                        b
                    }
                    None => match self.geometry.first_neighbor(v) {
                        Some(b) => b,
                        // isolated: X and Z measurements coincide
                        None => {
                            self.remove_node(v);
                            log::debug!("measured isolated {v} in {s}");
                            return true;
                        }
                    },
                };
                self.local_complement(b, Dir::Minus);
                let removed = self.measure_with_pivot(v, None);
                self.local_complement(b, Dir::Plus);
                removed
            }
        }
    }

    /// Renders the graph state in graphviz format. Nodes are coloured by
    /// measurement plane and dependencies drawn as dashed arrows.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("graph {\n");
        for v in self.geometry.nodes() {
            let b = self.bases.get(v);
            let colour = match b.plane() {
                Some(Plane::XY) => "green",
                Some(Plane::YZ) => "red",
                Some(Plane::ZX) => "blue",
                None => "black",
            };
            let label = if self.is_output(v) {
                format!("{v}:o")
            } else {
                format!("{v}:{b}")
            };
            dot += &format!("  {v} [color={colour}, label=\"{label}\"]\n");
        }
        dot += "\n";
        for (s, t) in self.geometry.edges() {
            dot += &format!("  {s} -- {t}\n");
        }
        for (s, t) in self.deps.edges() {
            dot += &format!("  {s} -- {t} [style=dashed, dir=forward]\n");
        }
        dot += "}\n";
        dot
    }
}
