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

//! The undirected entanglement graph underlying a graph state.

use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::mem;

/// Node label: an index into the node arena. Indices are never reused.
pub type V = usize;

pub type VTab<T> = Vec<Option<T>>;

/// A simple undirected graph: no self-loops and no parallel edges.
///
/// Neighbourhoods are kept sorted, so two geometries compare equal exactly
/// when they have the same nodes and the same edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Geometry {
    adj: VTab<Vec<V>>,
    numv: usize,
    nume: usize,
}

impl Geometry {
    pub fn new() -> Geometry {
        Geometry::default()
    }

    /// A geometry with nodes `0..n` and no edges.
    pub fn with_nodes(n: usize) -> Geometry {
        Geometry {
            adj: vec![Some(Vec::new()); n],
            numv: n,
            nume: 0,
        }
    }

    /// A geometry over nodes `0..n` with the given edges.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (V, V)>) -> Geometry {
        let mut g = Geometry::with_nodes(n);
        for (s, t) in edges {
            g.add_edge(s, t);
        }
        g
    }

    /// One past the largest index ever allocated.
    pub fn vindex(&self) -> V {
        self.adj.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.numv
    }

    pub fn num_edges(&self) -> usize {
        self.nume
    }

    pub fn add_node(&mut self) -> V {
        self.numv += 1;
        self.adj.push(Some(Vec::new()));
        self.adj.len() - 1
    }

    pub fn contains_node(&self, v: V) -> bool {
        matches!(self.adj.get(v), Some(Some(_)))
    }

    fn nhd(&self, v: V) -> &Vec<V> {
        match self.adj.get(v) {
            Some(Some(nhd)) => nhd,
            _ => panic!("Node {v} not found"),
        }
    }

    fn nhd_mut(&mut self, v: V) -> &mut Vec<V> {
        match self.adj.get_mut(v) {
            Some(Some(nhd)) => nhd,
            _ => panic!("Node {v} not found"),
        }
    }

    /// Inserts `t` into the neighbourhood of `s`, returning false if it was
    /// already there.
    fn add_half_edge(&mut self, s: V, t: V) -> bool {
        let nhd = self.nhd_mut(s);
        match nhd.binary_search(&t) {
            Ok(_) => false,
            Err(i) => {
                nhd.insert(i, t);
                true
            }
        }
    }

    fn remove_half_edge(&mut self, s: V, t: V) -> bool {
        let nhd = self.nhd_mut(s);
        match nhd.binary_search(&t) {
            Ok(i) => {
                nhd.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// Adds the edge `s -- t`. Returns false if the edge was already present.
    ///
    /// # Panics
    ///
    /// Panics on a self-loop or if either node is missing.
    pub fn add_edge(&mut self, s: V, t: V) -> bool {
        assert_ne!(s, t, "self-loops are not allowed (node {s})");
        assert!(self.contains_node(t), "Node {t} not found");
        if self.add_half_edge(s, t) {
            self.add_half_edge(t, s);
            self.nume += 1;
            true
        } else {
            false
        }
    }

    /// Removes the edge `s -- t`. Returns false if there was no such edge.
    pub fn remove_edge(&mut self, s: V, t: V) -> bool {
        assert!(self.contains_node(t), "Node {t} not found");
        if self.remove_half_edge(s, t) {
            self.remove_half_edge(t, s);
            self.nume -= 1;
            true
        } else {
            false
        }
    }

    /// Adds the edge if it is absent, removes it otherwise.
    pub fn toggle_edge(&mut self, s: V, t: V) {
        if !self.remove_edge(s, t) {
            self.add_edge(s, t);
        }
    }

    pub fn connected(&self, s: V, t: V) -> bool {
        self.nhd(s).binary_search(&t).is_ok()
    }

    /// Neighbours of `v`, in ascending order.
    pub fn neighbors(&self, v: V) -> impl Iterator<Item = V> + '_ {
        self.nhd(v).iter().copied()
    }

    pub fn neighbor_vec(&self, v: V) -> Vec<V> {
        self.nhd(v).clone()
    }

    /// The smallest neighbour of `v`, if any.
    pub fn first_neighbor(&self, v: V) -> Option<V> {
        self.nhd(v).first().copied()
    }

    pub fn degree(&self, v: V) -> usize {
        self.nhd(v).len()
    }

    pub fn isolated(&self, v: V) -> bool {
        self.nhd(v).is_empty()
    }

    /// Removes `v` and all of its incident edges.
    pub fn remove_node(&mut self, v: V) {
        let nhd = self
            .adj
            .get_mut(v)
            .and_then(mem::take)
            .unwrap_or_else(|| panic!("Node {v} not found"));
        self.numv -= 1;
        for w in nhd {
            self.nume -= 1;
            self.remove_half_edge(w, v);
        }
    }

    /// All nodes, in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = V> + '_ {
        self.adj
            .iter()
            .enumerate()
            .filter_map(|(v, nhd)| nhd.as_ref().map(|_| v))
    }

    pub fn node_vec(&self) -> Vec<V> {
        self.nodes().collect()
    }

    /// All edges as `(s, t)` with `s < t`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (V, V)> + '_ {
        self.adj.iter().enumerate().flat_map(|(s, nhd)| {
            nhd.iter()
                .flatten()
                .filter(move |&&t| s < t)
                .map(move |&t| (s, t))
        })
    }

    pub fn edge_vec(&self) -> Vec<(V, V)> {
        self.edges().collect()
    }

    /// Local complementation about `v`: toggles the edge between every pair
    /// of distinct neighbours of `v`. Self-inverse.
    pub fn local_complement(&mut self, v: V) {
        let nhd = self.neighbor_vec(v);
        for (a, b) in nhd.into_iter().tuple_combinations() {
            self.toggle_edge(a, b);
        }
    }

    /// The nodes attaining the maximum degree, with that degree.
    ///
    /// Returns an empty set and degree 0 for an empty graph.
    pub fn max_degree_nodes(&self) -> (FxHashSet<V>, usize) {
        self.max_degree_nodes_in(self.nodes())
    }

    /// As [Geometry::max_degree_nodes], restricted to `subset`. Labels in
    /// `subset` that are not nodes of the graph are ignored.
    pub fn max_degree_nodes_in(&self, subset: impl IntoIterator<Item = V>) -> (FxHashSet<V>, usize) {
        let mut best = FxHashSet::default();
        let mut max = 0;
        for v in subset {
            if !self.contains_node(v) {
                continue;
            }
            let d = self.degree(v);
            if best.is_empty() || d > max {
                best.clear();
                max = d;
            }
            if d == max {
                best.insert(v);
            }
        }
        (best, max)
    }

    pub fn max_degree(&self) -> usize {
        self.nodes().map(|v| self.degree(v)).max().unwrap_or(0)
    }

    /// Union of the neighbourhoods of the given nodes.
    pub fn boundary_nodes<'a>(&self, set: impl IntoIterator<Item = &'a V>) -> FxHashSet<V> {
        set.into_iter().flat_map(|&v| self.neighbors(v)).collect()
    }

    /// Euclidean norm of the degree vector.
    pub fn degree_norm(&self) -> f64 {
        let sq: usize = self.nodes().map(|v| self.degree(v).pow(2)).sum();
        (sq as f64).sqrt()
    }

    /// Sorted degree sequence, a cheap isomorphism invariant.
    pub fn degree_sequence(&self) -> Vec<usize> {
        self.nodes().map(|v| self.degree(v)).sorted_unstable().collect()
    }

    /// Label-independent structural isomorphism.
    pub fn is_isomorphic(&self, other: &Geometry) -> bool {
        crate::isomorphism::is_isomorphic(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn star() -> Geometry {
        Geometry::from_edges(4, [(0, 1), (0, 2), (0, 3)])
    }

    #[test]
    fn counts() {
        let mut g = Geometry::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_edges(), 3);
        assert!(!g.add_edge(1, 0));
        assert_eq!(g.num_edges(), 3);
        g.remove_node(1);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 1);
        assert!(g.isolated(0));
        assert!(!g.contains_node(1));
        assert_eq!(g.node_vec(), vec![0, 2, 3]);
        assert_eq!(g.edge_vec(), vec![(2, 3)]);
    }

    #[test]
    fn indices_are_not_reused() {
        let mut g = Geometry::with_nodes(2);
        g.remove_node(1);
        assert_eq!(g.add_node(), 2);
        assert_eq!(g.vindex(), 3);
    }

    #[test]
    #[should_panic]
    fn self_loop_panics() {
        let mut g = Geometry::with_nodes(1);
        g.add_edge(0, 0);
    }

    #[test]
    fn toggle() {
        let mut g = Geometry::with_nodes(2);
        g.toggle_edge(0, 1);
        assert!(g.connected(1, 0));
        g.toggle_edge(1, 0);
        assert!(!g.connected(0, 1));
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn star_max_degree() {
        let (nodes, deg) = star().max_degree_nodes();
        assert_eq!(nodes, FxHashSet::from_iter([0]));
        assert_eq!(deg, 3);
    }

    #[test]
    fn max_degree_ties_and_subsets() {
        let g = Geometry::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        let (nodes, deg) = g.max_degree_nodes();
        assert_eq!(nodes, FxHashSet::from_iter([1, 2]));
        assert_eq!(deg, 2);

        let (nodes, deg) = g.max_degree_nodes_in([0, 3, 17]);
        assert_eq!(nodes, FxHashSet::from_iter([0, 3]));
        assert_eq!(deg, 1);

        let (nodes, deg) = Geometry::new().max_degree_nodes();
        assert!(nodes.is_empty());
        assert_eq!(deg, 0);
    }

    #[test]
    fn local_complement_of_star_is_complete() {
        let mut g = star();
        g.local_complement(0);
        assert_eq!(g.num_edges(), 6);
        assert_eq!(g.degree(0), 3);
        g.local_complement(0);
        assert_eq!(g, star());
    }

    #[test]
    fn local_complement_leaves_pivot_edges() {
        // triangle 0-1-2 plus pendant 3 on 0
        let mut g = Geometry::from_edges(4, [(0, 1), (1, 2), (0, 2), (0, 3)]);
        g.local_complement(0);
        assert!(!g.connected(1, 2));
        assert!(g.connected(1, 3));
        assert!(g.connected(2, 3));
        assert_eq!(g.neighbor_vec(0), vec![1, 2, 3]);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    fn local_complement_is_involution(#[case] v: V) {
        let h = Geometry::from_edges(6, [(0, 1), (1, 2), (2, 3), (1, 4), (4, 5), (0, 4), (3, 5)]);
        let mut g = h.clone();
        g.local_complement(v);
        g.local_complement(v);
        assert_eq!(g, h);
    }

    #[test]
    fn boundary_and_norm() {
        let g = Geometry::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)]);
        let b = g.boundary_nodes(&[1, 3]);
        assert_eq!(b, FxHashSet::from_iter([0, 2, 4]));
        // degrees 1,2,2,2,1
        assert_abs_diff_eq!(g.degree_norm(), 14f64.sqrt());
        assert_eq!(g.max_degree(), 2);
        assert_eq!(g.degree_sequence(), vec![1, 1, 2, 2, 2]);
    }
}
