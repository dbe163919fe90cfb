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

//! Classical feed-forward dependencies between measurements.
//!
//! A node gets an entry once it depends on another node. The entry holds
//! its predecessors, whose outcomes its final basis depends on, and a
//! correction tracker: the signed axis along which corrections act on it.
//! Trackers start at `+X` and follow the same quarter-turn rules as the
//! measurement bases. Nodes that only feed forward are never corrected and
//! carry no entry.

use itertools::Itertools;
use petgraph::graphmap::DiGraphMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::basis::{Axis, Dir, SignedAxis};
use crate::geometry::V;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyTable {
    deps: FxHashMap<V, FxHashSet<V>>,
    corrections: FxHashMap<V, SignedAxis>,
}

impl DependencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(source, target)` pairs, meaning `target`
    /// depends on the outcome of `source`.
    pub fn from_edges(edges: impl IntoIterator<Item = (V, V)>) -> Self {
        let mut d = Self::new();
        for (s, t) in edges {
            d.add_dependency(s, t);
        }
        d
    }

    /// Gives `v` an entry with no predecessors, if it has none yet.
    pub fn add_node(&mut self, v: V) {
        self.deps.entry(v).or_default();
        self.corrections
            .entry(v)
            .or_insert(SignedAxis::plus(Axis::X));
    }

    /// Records that `target` depends on `source`. Only `target` gains an
    /// entry.
    pub fn add_dependency(&mut self, source: V, target: V) {
        self.add_node(target);
        if let Some(preds) = self.deps.get_mut(&target) {
            preds.insert(source);
        }
    }

    pub fn contains(&self, v: V) -> bool {
        self.deps.contains_key(&v)
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// Nodes with an entry, in ascending order.
    pub fn nodes(&self) -> Vec<V> {
        self.deps.keys().copied().sorted_unstable().collect()
    }

    /// The predecessors of `v`, in ascending order. Empty if `v` has no
    /// entry.
    pub fn predecessors(&self, v: V) -> Vec<V> {
        self.deps
            .get(&v)
            .map(|p| p.iter().copied().sorted_unstable().collect())
            .unwrap_or_default()
    }

    /// The predecessor map.
    pub fn map(&self) -> &FxHashMap<V, FxHashSet<V>> {
        &self.deps
    }

    /// All `(source, target)` pairs, sorted.
    pub fn edges(&self) -> Vec<(V, V)> {
        self.deps
            .iter()
            .flat_map(|(&t, preds)| preds.iter().map(move |&s| (s, t)))
            .sorted_unstable()
            .collect()
    }

    /// Removes `v` from the table and from every predecessor set.
    pub fn cutoff(&mut self, v: V) {
        self.deps.remove(&v);
        self.corrections.remove(&v);
        for preds in self.deps.values_mut() {
            preds.remove(&v);
        }
    }

    pub fn correction(&self, v: V) -> Option<SignedAxis> {
        self.corrections.get(&v).copied()
    }

    /// Overrides the correction tracker of `v`, giving it an entry if needed.
    pub fn set_correction(&mut self, v: V, s: SignedAxis) {
        self.add_node(v);
        self.corrections.insert(v, s);
    }

    /// The axis of the correction tracker of `v`, if it has one.
    pub fn correction_axis(&self, v: V) -> Option<Axis> {
        self.correction(v).map(|s| s.axis)
    }

    pub fn rotate_sqrt_x(&mut self, v: V, dir: Dir) {
        if let Some(s) = self.corrections.get_mut(&v) {
            *s = s.quarter_turn(Axis::X, dir);
        }
    }

    pub fn rotate_sqrt_z(&mut self, v: V, dir: Dir) {
        if let Some(s) = self.corrections.get_mut(&v) {
            *s = s.quarter_turn(Axis::Z, dir);
        }
    }

    /// The dependencies as a directed graph, with edges from source to
    /// target.
    pub fn to_dag(&self) -> DiGraphMap<V, ()> {
        let mut dag = DiGraphMap::new();
        for v in self.nodes() {
            dag.add_node(v);
        }
        for (s, t) in self.edges() {
            dag.add_edge(s, t, ());
        }
        dag
    }

    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.to_dag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_removes_everywhere() {
        let mut d = DependencyTable::from_edges([(0, 1), (0, 2), (1, 2)]);
        assert_eq!(d.predecessors(2), vec![0, 1]);
        d.cutoff(0);
        assert!(!d.contains(0));
        assert_eq!(d.predecessors(1), Vec::<V>::new());
        assert_eq!(d.predecessors(2), vec![1]);
        assert_eq!(d.correction_axis(0), None);
        assert_eq!(d.edges(), vec![(1, 2)]);
    }

    #[test]
    fn trackers_follow_quarter_turns() {
        let mut d = DependencyTable::from_edges([(0, 1)]);
        assert_eq!(d.correction_axis(1), Some(Axis::X));
        // X is fixed by sqrt X
        d.rotate_sqrt_x(1, Dir::Plus);
        assert_eq!(d.correction_axis(1), Some(Axis::X));
        d.rotate_sqrt_z(1, Dir::Minus);
        assert_eq!(d.correction(1), Some(SignedAxis::minus(Axis::Y)));
        d.rotate_sqrt_x(1, Dir::Plus);
        assert_eq!(d.correction(1), Some(SignedAxis::minus(Axis::Z)));
        // nodes without a tracker are ignored
        d.rotate_sqrt_z(7, Dir::Plus);
        assert_eq!(d.correction_axis(7), None);
    }

    #[test]
    fn sources_carry_no_tracker() {
        let d = DependencyTable::from_edges([(0, 1), (1, 2)]);
        assert_eq!(d.nodes(), vec![1, 2]);
        assert!(!d.contains(0));
        assert_eq!(d.correction(0), None);
        assert_eq!(d.correction(1), Some(SignedAxis::plus(Axis::X)));
        assert_eq!(d.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn dag_and_cycles() {
        let d = DependencyTable::from_edges([(0, 1), (1, 2)]);
        let dag = d.to_dag();
        assert_eq!(dag.node_count(), 3);
        assert!(dag.contains_edge(0, 1));
        assert!(!dag.contains_edge(1, 0));
        assert!(d.is_acyclic());

        let cyclic = DependencyTable::from_edges([(0, 1), (1, 2), (2, 0)]);
        assert!(!cyclic.is_acyclic());
    }
}
