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

use crate::geometry::V;
use crate::graph_state::ReducedGraph;
use crate::rules::*;

/// Apply the given rule once at every node that matches the check
/// function, visiting the nodes present when the sweep starts in
/// ascending order.
///
/// The rule may delete the current node and change edges elsewhere;
/// nodes deleted before their turn are skipped.
pub fn vertex_sweep(
    g: &mut ReducedGraph,
    check: fn(&ReducedGraph, V) -> bool,
    rule: fn(&mut ReducedGraph, V),
) -> bool {
    let mut got_match = false;
    for v in g.node_vec() {
        if g.contains_node(v) && check(g, v) {
            rule(g, v);
            got_match = true;
        }
    }
    got_match
}

/// Measure out every non-output Pauli node, visiting each node once.
pub fn eliminate_pauli(g: &mut ReducedGraph) -> bool {
    vertex_sweep(g, check_measure_pauli, measure_pauli_unchecked)
}

/// Remove every non-output node without neighbours.
pub fn eliminate_disconnected(g: &mut ReducedGraph) -> bool {
    vertex_sweep(g, check_remove_isolated, remove_isolated_unchecked)
}

/// Fold every YZ leaf hanging off an XY node into that node.
pub fn fuse_nodes(g: &mut ReducedGraph) -> bool {
    vertex_sweep(g, check_fuse_leaf, fuse_leaf_unchecked)
}

/// One round of Pauli elimination, pruning and fusion.
pub fn eliminate_clifford(g: &mut ReducedGraph) -> bool {
    let numv = g.num_nodes();
    let mut m = eliminate_pauli(g);
    m = eliminate_disconnected(g) || m;
    m = fuse_nodes(g) || m;
    log::debug!(
        "clifford round: {} -> {} nodes, {} edges",
        numv,
        g.num_nodes(),
        g.num_edges()
    );
    m
}

/// Repeat [eliminate_clifford] until it finds nothing more to do.
///
/// Fusion can turn a neighbour into a Pauli node, which a single round
/// leaves behind.
pub fn clifford_simp(g: &mut ReducedGraph) -> bool {
    let mut got_match = false;
    let mut rounds = 0;
    while eliminate_clifford(g) {
        got_match = true;
        rounds += 1;
    }
    log::info!(
        "clifford_simp: {} rounds, {} nodes, {} edges left",
        rounds,
        g.num_nodes(),
        g.num_edges()
    );
    got_match
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{Basis, BasisTable};
    use crate::dependency::DependencyTable;
    use crate::generate::{linear_chain, RandomGraphStateBuilder};
    use crate::geometry::Geometry;
    use crate::phase::Phase;
    use num::Zero;

    #[test]
    fn wire_keeps_one_measurable_node() {
        // non-Pauli, Pauli, output
        let mut g = linear_chain(&[Some(Phase::from((1, 4))), Some(Phase::one_half() * 2), None]);
        assert!(eliminate_pauli(&mut g));
        assert_eq!(g.node_vec(), vec![0, 2]);
        assert_eq!(g.basis(0), Basis::yz((1, 4)));
        assert!(g.geometry().connected(0, 2));
        assert!(g.is_output(2));
    }

    #[test]
    fn x_pair_vanishes() {
        let mut g = linear_chain(&[Some(Phase::zero()), Some(Phase::zero())]);
        eliminate_pauli(&mut g);
        eliminate_disconnected(&mut g);
        assert_eq!(g.num_nodes(), 0);
    }

    #[test]
    fn pauli_elimination_reaches_a_fixed_point() {
        let mut g = RandomGraphStateBuilder::new()
            .seed(1337)
            .nodes(30)
            .edge_prob(0.2)
            .pauli_prob(1.0)
            .outputs(3)
            .build();
        while eliminate_pauli(&mut g) {}
        for v in g.node_vec() {
            assert!(g.is_output(v) || !g.bases().is_pauli(v), "Pauli node {v} left");
        }
        assert_eq!(g.num_nodes(), 3);
    }

    #[test]
    fn disconnected_outputs_stay() {
        let mut bases = BasisTable::new();
        bases.insert(0, Basis::xy((1, 4)));
        bases.insert(1, Basis::Unmeasured);
        bases.insert(2, Basis::yz((1, 8)));
        bases.insert(3, Basis::xy((1, 8)));
        let geometry = Geometry::from_edges(4, [(2, 3)]);
        let mut g = ReducedGraph::new(geometry, bases, DependencyTable::new(), [1]).unwrap();
        assert!(eliminate_disconnected(&mut g));
        assert_eq!(g.node_vec(), vec![1, 2, 3]);
        assert!(!eliminate_disconnected(&mut g));
    }

    /// leaf 0 (YZ pi/4) - centre 1 (XY pi/4) - output 2
    fn fusable_chain() -> ReducedGraph {
        let geometry = Geometry::from_edges(3, [(0, 1), (1, 2)]);
        let mut bases = BasisTable::new();
        bases.insert(0, Basis::yz((1, 4)));
        bases.insert(1, Basis::xy((1, 4)));
        bases.insert(2, Basis::Unmeasured);
        ReducedGraph::new(geometry, bases, DependencyTable::new(), [2]).unwrap()
    }

    #[test]
    fn one_clifford_round_stops_after_fusion() {
        let mut g = fusable_chain();
        assert!(eliminate_clifford(&mut g));
        // the centre became X after fusion but is not measured this round
        assert_eq!(g.node_vec(), vec![1, 2]);
        assert_eq!(g.basis(1), Basis::xy(0));
        assert!(g.bases().is_pauli(1));
    }

    #[test]
    fn clifford_simp_iterates_to_fixed_point() {
        let mut g = fusable_chain();
        assert!(clifford_simp(&mut g));
        assert_eq!(g.node_vec(), vec![2]);
        assert!(!clifford_simp(&mut g));
    }

    #[test]
    fn clifford_simp_on_random_states() {
        for seed in 0..5 {
            let mut g = RandomGraphStateBuilder::new()
                .seed(seed)
                .nodes(25)
                .edge_prob(0.15)
                .pauli_prob(0.4)
                .outputs(2)
                .dependency_prob(0.1)
                .build();
            clifford_simp(&mut g);
            for v in g.node_vec() {
                assert!(g.is_output(v) || !g.bases().is_pauli(v));
                assert!(g.is_output(v) || !g.geometry().isolated(v));
            }
            assert!(g.dependencies().is_acyclic());
        }
    }
}
