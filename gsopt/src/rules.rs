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

//! # Single-node reduction rules
//!
//! These rules always come in triples of functions. For a rule X,
//! there is a function `check_X(&g, v) -> bool` which checks
//! whether a rule is applicable at the given node,
//! `X_unchecked(&mut g, v)` applies the rule without doing any
//! checking, and `X(&mut g, v) -> bool` is the composition of the
//! first two.
//!
//! Calling `X_unchecked` where `check_X` fails may leave a pattern that
//! no longer computes the same thing, or panic.

use crate::basis::{Axis, Dir, Plane};
use crate::geometry::V;
use crate::graph_state::ReducedGraph;

/// Define a checked rule that takes 1 node
macro_rules! checked_rule1 {
    ( $check:ident, $unchecked:ident, $name:ident ) => {
        /// A checked implementation of the rule
        ///
        /// See e.g. [fuse_leaf] for an example.
        pub fn $name(g: &mut ReducedGraph, v: V) -> bool {
            if $check(g, v) {
                $unchecked(g, v);
                true
            } else {
                false
            }
        }
    };
}

/// Check [measure_pauli_unchecked] applies
///
/// The node must be present, not an output, and measured at a multiple of
/// π/2.
pub fn check_measure_pauli(g: &ReducedGraph, v: V) -> bool {
    g.contains_node(v) && !g.is_output(v) && g.bases().is_pauli(v)
}

/// Measure a Pauli node out of the pattern
///
/// See [ReducedGraph::measure] for the per-axis treatment.
pub fn measure_pauli_unchecked(g: &mut ReducedGraph, v: V) {
    g.measure(v);
}

checked_rule1!(check_measure_pauli, measure_pauli_unchecked, measure_pauli);

/// Check [remove_isolated_unchecked] applies
///
/// The node must be present, not an output and have no neighbours.
pub fn check_remove_isolated(g: &ReducedGraph, v: V) -> bool {
    g.contains_node(v) && !g.is_output(v) && g.geometry().isolated(v)
}

/// Remove a disconnected node
pub fn remove_isolated_unchecked(g: &mut ReducedGraph, v: V) {
    log::debug!("pruned isolated {v}");
    g.remove_node(v);
}

checked_rule1!(check_remove_isolated, remove_isolated_unchecked, remove_isolated);

/// Check [fuse_leaf_unchecked] applies
///
/// `v` must be a non-output leaf measured in the YZ plane whose only
/// neighbour is measured in the XY plane. Its correction tracker, if any,
/// must lie along Z or Y. A Y tracker is brought to Z by complementing
/// about the leaf.
///
/// ```
/// # use gsopt::basis::{Basis, BasisTable};
/// # use gsopt::dependency::DependencyTable;
/// # use gsopt::geometry::Geometry;
/// # use gsopt::graph_state::ReducedGraph;
/// # use gsopt::rules::check_fuse_leaf;
/// let geometry = Geometry::from_edges(3, [(0, 1), (1, 2)]);
/// let mut bases = BasisTable::new();
/// bases.insert(0, Basis::yz((1, 4)));
/// bases.insert(1, Basis::xy((1, 8)));
/// bases.insert(2, Basis::Unmeasured);
/// let g = ReducedGraph::new(geometry, bases, DependencyTable::new(), [2]).unwrap();
///
/// assert!(check_fuse_leaf(&g, 0));
/// assert!(!check_fuse_leaf(&g, 1));
/// assert!(!check_fuse_leaf(&g, 2));
/// ```
pub fn check_fuse_leaf(g: &ReducedGraph, v: V) -> bool {
    if !g.contains_node(v) || g.is_output(v) || g.geometry().degree(v) != 1 {
        return false;
    }
    let Some(w) = g.geometry().first_neighbor(v) else {
        return false;
    };
    g.bases().plane(v) == Some(Plane::YZ)
        && g.bases().plane(w) == Some(Plane::XY)
        && matches!(
            g.dependencies().correction_axis(v),
            None | Some(Axis::Z) | Some(Axis::Y)
        )
}

/// Fold a YZ leaf into its XY neighbour
///
/// The neighbour's angle is decreased by the leaf's angle and the leaf is
/// removed.
pub fn fuse_leaf_unchecked(g: &mut ReducedGraph, v: V) {
    if g.dependencies().correction_axis(v) == Some(Axis::Y) {
        g.local_complement(v, Dir::Plus);
    }
    let w = g
        .geometry()
        .first_neighbor(v)
        .unwrap_or_else(|| panic!("leaf {v} has no neighbour"));
    if let Some(angle) = g.bases().angle(v) {
        g.bases_mut().add_to_angle(w, -angle);
    }
    log::debug!("fused leaf {v} into {w}");
    g.remove_node(v);
}

checked_rule1!(check_fuse_leaf, fuse_leaf_unchecked, fuse_leaf);
