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

//! Greedy measurement scheduling.
//!
//! A node is live from the moment it or one of its neighbours is about to
//! be measured until it is measured itself. The scheduler repeatedly picks
//! the measurable node that brings the fewest new nodes to life, and
//! reports the largest number of simultaneously live nodes along the way.

use std::cmp::Reverse;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::dependency::DependencyTable;
use crate::geometry::{Geometry, V};
use crate::graph_state::ReducedGraph;

/// A measurement order and the register size it needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Schedule {
    pub order: Vec<V>,
    pub register_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// No remaining node is measurable.
    #[error("cyclic dependencies among nodes {0:?}")]
    Cyclic(Vec<V>),
}

/// Computes a measurement order for all nodes of `geometry`.
///
/// Among the measurable nodes (all predecessors already measured), the one
/// with the fewest not-yet-live nodes in its closed neighbourhood wins.
/// When several nodes add nothing, the one with the most remaining
/// neighbours goes first. Remaining ties go to the smallest label.
/// Predecessors that are not nodes of `geometry` are ignored.
///
/// # Panics
///
/// Panics if the resulting order violates a dependency, which would be a
/// defect of the scheduler itself.
pub fn schedule(geometry: &Geometry, deps: &DependencyTable) -> Result<Schedule, ScheduleError> {
    let mut g = geometry.clone();
    let mut waiting: FxHashMap<V, FxHashSet<V>> = g
        .nodes()
        .map(|v| {
            let preds = deps
                .predecessors(v)
                .into_iter()
                .filter(|&p| geometry.contains_node(p))
                .collect();
            (v, preds)
        })
        .collect();
    let mut register: FxHashSet<V> = FxHashSet::default();
    let mut order = Vec::with_capacity(g.num_nodes());
    let mut register_size = 0;

    while g.num_nodes() > 0 {
        let mut best: Option<((usize, Reverse<usize>), V, Vec<V>)> = None;
        for v in g.nodes() {
            if !waiting[&v].is_empty() {
                continue;
            }
            let delta: Vec<V> = std::iter::once(v)
                .chain(g.neighbors(v))
                .filter(|w| !register.contains(w))
                .collect();
            let key = if delta.is_empty() {
                (0, Reverse(g.degree(v)))
            } else {
                (delta.len(), Reverse(0))
            };
            if best.as_ref().map_or(true, |(k, _, _)| key < *k) {
                best = Some((key, v, delta));
            }
        }

        let Some((_, v, delta)) = best else {
            let mut stuck: Vec<V> = waiting.keys().copied().collect();
            stuck.sort_unstable();
            return Err(ScheduleError::Cyclic(stuck));
        };

        register_size = register_size.max(register.len() + delta.len());
        register.extend(delta);
        g.remove_node(v);
        register.remove(&v);
        waiting.remove(&v);
        for preds in waiting.values_mut() {
            preds.remove(&v);
        }
        order.push(v);
    }

    check_order(&order, geometry, deps);
    log::debug!("scheduled {} nodes with register size {}", order.len(), register_size);
    Ok(Schedule {
        order,
        register_size,
    })
}

/// Asserts that every node comes after all of its predecessors present in
/// `geometry`.
fn check_order(order: &[V], geometry: &Geometry, deps: &DependencyTable) {
    let position: FxHashMap<V, usize> = order.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    for (i, &v) in order.iter().enumerate() {
        for p in deps.predecessors(v) {
            if geometry.contains_node(p) {
                assert!(
                    position[&p] < i,
                    "measurement order places {v} before its predecessor {p}"
                );
            }
        }
    }
}

impl Schedule {
    /// Replays the order on `geometry` and returns the largest number of
    /// simultaneously live nodes.
    pub fn peak_register(&self, geometry: &Geometry) -> usize {
        let mut g = geometry.clone();
        let mut live: FxHashSet<V> = FxHashSet::default();
        let mut peak = 0;
        for &v in &self.order {
            live.insert(v);
            live.extend(g.neighbors(v));
            peak = peak.max(live.len());
            g.remove_node(v);
            live.remove(&v);
        }
        peak
    }
}

impl ReducedGraph {
    /// Schedules the measurements of this graph state.
    pub fn schedule(&self) -> Result<Schedule, ScheduleError> {
        schedule(self.geometry(), self.dependencies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::RandomGraphStateBuilder;
    use crate::simplify::clifford_simp;
    use rstest::rstest;

    #[test]
    fn path() {
        let g = Geometry::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        let s = schedule(&g, &DependencyTable::new()).unwrap();
        assert_eq!(s.order, vec![0, 1, 2, 3]);
        assert_eq!(s.register_size, 2);
        assert_eq!(s.peak_register(&g), 2);
    }

    #[test]
    fn star_empties_leaves_first() {
        let g = Geometry::from_edges(4, [(0, 1), (0, 2), (0, 3)]);
        let s = schedule(&g, &DependencyTable::new()).unwrap();
        assert_eq!(s.order, vec![1, 2, 3, 0]);
        assert_eq!(s.register_size, 2);
    }

    #[test]
    fn free_nodes_prefer_high_degree() {
        // 0 is adjacent to the path 1 - 2 - 3, which must wait for it
        let g = Geometry::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (2, 3)]);
        let deps = DependencyTable::from_edges([(0, 1), (0, 2), (0, 3)]);
        let s = schedule(&g, &deps).unwrap();
        assert_eq!(s.order, vec![0, 2, 1, 3]);
        assert_eq!(s.register_size, 4);
    }

    #[test]
    fn dependencies_override_the_heuristic() {
        let g = Geometry::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        let deps = DependencyTable::from_edges([(3, 0)]);
        let s = schedule(&g, &deps).unwrap();
        let pos = |v| s.order.iter().position(|&w| w == v).unwrap();
        assert!(pos(3) < pos(0));
    }

    #[test]
    fn absent_predecessors_are_ignored() {
        let g = Geometry::from_edges(2, [(0, 1)]);
        let deps = DependencyTable::from_edges([(7, 0)]);
        let s = schedule(&g, &deps).unwrap();
        assert_eq!(s.order.len(), 2);
    }

    #[test]
    fn cycles_are_reported() {
        let g = Geometry::from_edges(3, [(0, 1), (1, 2)]);
        let deps = DependencyTable::from_edges([(0, 1), (1, 0)]);
        assert_eq!(schedule(&g, &deps), Err(ScheduleError::Cyclic(vec![0, 1])));
    }

    #[test]
    fn empty_graph() {
        let s = schedule(&Geometry::new(), &DependencyTable::new()).unwrap();
        assert_eq!(s, Schedule::default());
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    fn random_orders_are_valid(#[case] seed: u64) {
        let mut g = RandomGraphStateBuilder::new()
            .seed(seed)
            .nodes(40)
            .edge_prob(0.1)
            .outputs(5)
            .dependency_prob(0.05)
            .build();
        clifford_simp(&mut g);
        let s = g.schedule().unwrap();
        assert_eq!(s.order.len(), g.num_nodes());
        let mut seen = FxHashSet::default();
        for &v in &s.order {
            for p in g.dependencies().predecessors(v) {
                assert!(!g.contains_node(p) || seen.contains(&p));
            }
            seen.insert(v);
        }
        assert!(s.peak_register(g.geometry()) <= s.register_size);
    }
}
