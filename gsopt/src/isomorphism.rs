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

//! Structural isomorphism of geometries, used to deduplicate graphs during
//! the orbit search.

use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::FxHashMap;

use crate::geometry::{Geometry, V};

/// Computes the hash of a geometry using the Weisfeiler-Lehman algorithm.
///
/// Every node starts from its degree and is repeatedly rehashed together
/// with the sorted hashes of its neighbours, `num_iterations` times. The
/// result is the hash of the sorted node hashes, so isomorphic geometries
/// always hash equal.
pub fn weisfeiler_lehman_hash(g: &Geometry, num_iterations: usize) -> u64 {
    let mut hashes: FxHashMap<V, u64> = g.nodes().map(|v| (v, g.degree(v) as u64)).collect();

    for _ in 0..num_iterations {
        let mut new_hashes = FxHashMap::default();
        for v in g.nodes() {
            let mut state = DefaultHasher::new();
            state.write_u64(hashes[&v]);
            for h in g.neighbors(v).map(|w| hashes[&w]).sorted_unstable() {
                state.write_u64(h);
            }
            new_hashes.insert(v, state.finish());
        }
        hashes = new_hashes;
    }

    let mut hasher = DefaultHasher::new();
    hasher.write_usize(g.num_nodes());
    hashes
        .into_values()
        .sorted_unstable()
        .for_each(|h| hasher.write_u64(h));
    hasher.finish()
}

/// Converts a geometry to a compact petgraph graph. Node weights carry the
/// original labels.
pub fn to_ungraph(g: &Geometry) -> UnGraph<V, ()> {
    let mut ug = UnGraph::with_capacity(g.num_nodes(), g.num_edges());
    let index: FxHashMap<V, NodeIndex> = g.nodes().map(|v| (v, ug.add_node(v))).collect();
    for (s, t) in g.edges() {
        ug.add_edge(index[&s], index[&t], ());
    }
    ug
}

/// Label-independent isomorphism test.
///
/// Cheap invariants are compared first; the exact check runs VF2.
pub fn is_isomorphic(g0: &Geometry, g1: &Geometry) -> bool {
    if g0.num_nodes() != g1.num_nodes()
        || g0.num_edges() != g1.num_edges()
        || g0.degree_sequence() != g1.degree_sequence()
    {
        return false;
    }
    petgraph::algo::is_isomorphic(&to_ungraph(g0), &to_ungraph(g1))
}

/// The set of geometries seen so far, bucketed by their WL hash.
#[derive(Debug, Clone, Default)]
pub struct IsoRegistry {
    buckets: FxHashMap<u64, Vec<Geometry>>,
    len: usize,
}

impl IsoRegistry {
    const WL_ITERATIONS: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if a geometry isomorphic to `g` has been registered.
    pub fn contains(&self, g: &Geometry) -> bool {
        let h = weisfeiler_lehman_hash(g, Self::WL_ITERATIONS);
        self.buckets
            .get(&h)
            .is_some_and(|b| b.iter().any(|g1| is_isomorphic(g, g1)))
    }

    /// Registers `g`. Returns false, without storing it, if an isomorphic
    /// geometry was already present.
    pub fn insert(&mut self, g: &Geometry) -> bool {
        let h = weisfeiler_lehman_hash(g, Self::WL_ITERATIONS);
        let bucket = self.buckets.entry(h).or_default();
        if bucket.iter().any(|g1| is_isomorphic(g, g1)) {
            return false;
        }
        bucket.push(g.clone());
        self.len += 1;
        true
    }
}
