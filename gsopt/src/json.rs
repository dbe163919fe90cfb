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

//! Json encoding of graph states.
//!
//! ```json
//! {
//!   "nodes": ["a", "b", "c", "o"],
//!   "edges": [["a", "b"], ["b", "c"], ["c", "o"]],
//!   "angles": { "a": "pi/4", "b": 3.141592653589793, "o": null },
//!   "bases": { "c": { "plane": "YZ", "angle": "pi/2" } },
//!   "outputs": ["o"],
//!   "dependencies": [["a", "b"]]
//! }
//! ```
//!
//! Nodes listed under `angles` are measured in the XY plane, or unmeasured
//! if the angle is `null`. Angles are either numbers, in radians, or
//! strings counting half turns such as `"pi/4"`, `"-3pi/4"` or `"1/2"`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::basis::{Axis, Basis, BasisError, BasisTable, ParseAxisError, Plane, SignedAxis};
use crate::dependency::DependencyTable;
use crate::geometry::{Geometry, V};
use crate::graph_state::{GraphStateError, ReducedGraph};
use crate::phase::{ParsePhaseError, Phase};

/// Identifier for an encoded node.
pub type NodeName = String;

#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Phase(#[from] ParsePhaseError),
    #[error("invalid angle {0}")]
    InvalidAngle(f64),
    #[error(transparent)]
    Axis(#[from] ParseAxisError),
    #[error("basis of node '{node}': {source}")]
    Basis {
        node: NodeName,
        #[source]
        source: BasisError,
    },
    #[error(transparent)]
    GraphState(#[from] GraphStateError),
    #[error("unknown node '{0}'")]
    UnknownNode(NodeName),
    #[error("duplicate node '{0}'")]
    DuplicateNode(NodeName),
    #[error("node '{0}' has both an angle and a basis")]
    DuplicateBasis(NodeName),
    #[error("node '{0}' has no angle or basis")]
    MissingBasis(NodeName),
    #[error("edge from node '{0}' to itself")]
    SelfLoop(NodeName),
}

/// Reads a graph state from its json-encoded representation.
pub fn decode_graph_state(s: &str) -> Result<(ReducedGraph, NodeNames), JsonError> {
    let jg: JsonGraphState = serde_json::from_str(s)?;
    jg.to_graph_state()
}

/// Reads a graph state from a json-encoded file.
pub fn read_graph_state(filename: &Path) -> Result<(ReducedGraph, NodeNames), JsonError> {
    let reader = BufReader::new(File::open(filename)?);
    let jg: JsonGraphState = serde_json::from_reader(reader)?;
    jg.to_graph_state()
}

/// Returns the json-encoded representation of a graph state.
pub fn encode_graph_state(g: &ReducedGraph, names: &NodeNames) -> Result<String, JsonError> {
    let jg = JsonGraphState::from_graph_state(g, names);
    Ok(serde_json::to_string_pretty(&jg)?)
}

/// Writes the json-encoded representation of a graph state to a file.
pub fn write_graph_state(g: &ReducedGraph, names: &NodeNames, filename: &Path) -> Result<(), JsonError> {
    let jg = JsonGraphState::from_graph_state(g, names);
    let writer = BufWriter::new(File::create(filename)?);
    serde_json::to_writer_pretty(writer, &jg)?;
    Ok(())
}

/// The names of the nodes of a decoded graph state. Node `v` is the `v`-th
/// entry of the document's node list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeNames {
    names: Vec<NodeName>,
    index: FxHashMap<NodeName, V>,
}

impl NodeNames {
    pub fn new(names: Vec<NodeName>) -> Result<Self, JsonError> {
        let mut index = FxHashMap::default();
        for (v, n) in names.iter().enumerate() {
            if index.insert(n.clone(), v).is_some() {
                return Err(JsonError::DuplicateNode(n.clone()));
            }
        }
        Ok(NodeNames { names, index })
    }

    /// Names nodes `0..n` by their labels.
    pub fn numbered(n: usize) -> Self {
        let names: Vec<NodeName> = (0..n).map(|v| v.to_string()).collect();
        let index = names.iter().cloned().zip(0..).collect();
        NodeNames { names, index }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The name of `v`, or its label for nodes added after decoding.
    pub fn name(&self, v: V) -> NodeName {
        self.names.get(v).cloned().unwrap_or_else(|| v.to_string())
    }

    pub fn lookup(&self, name: &str) -> Result<V, JsonError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| JsonError::UnknownNode(name.to_string()))
    }
}

/// An angle, in radians or as a string counting half turns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum JsonAngle {
    Radians(f64),
    Expr(String),
}

impl JsonAngle {
    pub fn to_phase(&self) -> Result<Phase, JsonError> {
        match self {
            JsonAngle::Radians(r) => Phase::from_radians(*r).ok_or(JsonError::InvalidAngle(*r)),
            JsonAngle::Expr(s) => Ok(s.parse()?),
        }
    }
}

impl From<Phase> for JsonAngle {
    fn from(p: Phase) -> Self {
        JsonAngle::Expr(p.to_string())
    }
}

/// A basis in an arbitrary plane.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
struct JsonBasis {
    #[serde(default)]
    plane: Option<Plane>,
    #[serde(default)]
    angle: Option<JsonAngle>,
}

/// The json-encoded format for graph states.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct JsonGraphState {
    nodes: Vec<NodeName>,
    #[serde(default)]
    edges: Vec<(NodeName, NodeName)>,
    /// XY-plane angles; `null` marks an unmeasured node.
    #[serde(default)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    angles: BTreeMap<NodeName, Option<JsonAngle>>,
    #[serde(default)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    bases: BTreeMap<NodeName, JsonBasis>,
    #[serde(default)]
    outputs: Vec<NodeName>,
    /// `(source, target)` pairs: the basis of `target` depends on the
    /// outcome of `source`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<(NodeName, NodeName)>,
    /// Correction trackers that are not `+X`.
    #[serde(default)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    corrections: BTreeMap<NodeName, String>,
}

impl JsonGraphState {
    pub fn from_graph_state(g: &ReducedGraph, names: &NodeNames) -> Self {
        let mut jg = JsonGraphState::default();
        for v in g.node_vec() {
            let name = names.name(v);
            match g.basis(v) {
                Basis::Unmeasured => {
                    jg.angles.insert(name.clone(), None);
                }
                Basis::Measured {
                    plane: Plane::XY,
                    phase,
                } => {
                    jg.angles.insert(name.clone(), Some(phase.into()));
                }
                Basis::Measured { plane, phase } => {
                    let b = JsonBasis {
                        plane: Some(plane),
                        angle: Some(phase.into()),
                    };
                    jg.bases.insert(name.clone(), b);
                }
            }
            if g.is_output(v) {
                jg.outputs.push(name.clone());
            }
            if let Some(s) = g.dependencies().correction(v) {
                if s != SignedAxis::plus(Axis::X) {
                    jg.corrections.insert(name.clone(), s.to_string());
                }
            }
            jg.nodes.push(name);
        }
        jg.edges = g
            .geometry()
            .edges()
            .map(|(s, t)| (names.name(s), names.name(t)))
            .collect();
        jg.dependencies = g
            .dependencies()
            .edges()
            .into_iter()
            .map(|(s, t)| (names.name(s), names.name(t)))
            .collect();
        jg
    }

    pub fn to_graph_state(&self) -> Result<(ReducedGraph, NodeNames), JsonError> {
        let names = NodeNames::new(self.nodes.clone())?;

        let mut geometry = Geometry::with_nodes(names.len());
        for (s, t) in &self.edges {
            let (vs, vt) = (names.lookup(s)?, names.lookup(t)?);
            if vs == vt {
                return Err(JsonError::SelfLoop(s.clone()));
            }
            geometry.add_edge(vs, vt);
        }

        let mut bases = BasisTable::new();
        for (name, angle) in &self.angles {
            let v = names.lookup(name)?;
            let basis = match angle {
                Some(a) => Basis::xy(a.to_phase()?),
                None => Basis::Unmeasured,
            };
            bases.insert(v, basis);
        }
        for (name, jb) in &self.bases {
            let v = names.lookup(name)?;
            if bases.contains(v) {
                return Err(JsonError::DuplicateBasis(name.clone()));
            }
            let phase = jb.angle.as_ref().map(JsonAngle::to_phase).transpose()?;
            let basis = Basis::new(jb.plane, phase).map_err(|source| JsonError::Basis {
                node: name.clone(),
                source,
            })?;
            bases.insert(v, basis);
        }
        if let Some(v) = (0..names.len()).find(|&v| !bases.contains(v)) {
            return Err(JsonError::MissingBasis(names.name(v)));
        }

        let outputs = self
            .outputs
            .iter()
            .map(|n| names.lookup(n))
            .collect::<Result<Vec<_>, _>>()?;

        let mut deps = DependencyTable::new();
        for (s, t) in &self.dependencies {
            deps.add_dependency(names.lookup(s)?, names.lookup(t)?);
        }
        for (name, s) in &self.corrections {
            deps.set_correction(names.lookup(name)?, s.parse()?);
        }

        let g = ReducedGraph::new(geometry, bases, deps, outputs)?;
        Ok((g, names))
    }
}
