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

//! Costs of a geometry that the orbit search can minimise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dependency::DependencyTable;
use crate::geometry::Geometry;
use crate::schedule::{schedule, ScheduleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    /// Number of edges.
    #[serde(rename = "edges")]
    EdgeCount,
    /// Largest node degree.
    MaxDegree,
    /// Euclidean norm of the degree sequence.
    DegreeNorm,
    /// Register size of the greedy schedule.
    RegisterSize,
}

impl Objective {
    pub const ALL: [Objective; 4] = [
        Objective::EdgeCount,
        Objective::MaxDegree,
        Objective::DegreeNorm,
        Objective::RegisterSize,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Objective::EdgeCount => "edges",
            Objective::MaxDegree => "max-degree",
            Objective::DegreeNorm => "degree-norm",
            Objective::RegisterSize => "register-size",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown objective '{0}', expected one of: edges, max-degree, degree-norm, register-size")]
pub struct ParseObjectiveError(pub String);

impl FromStr for Objective {
    type Err = ParseObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "edges" | "edge-count" => Ok(Objective::EdgeCount),
            "max-degree" => Ok(Objective::MaxDegree),
            "degree-norm" => Ok(Objective::DegreeNorm),
            "register-size" | "register" => Ok(Objective::RegisterSize),
            _ => Err(ParseObjectiveError(s.to_string())),
        }
    }
}

/// All objective values of one geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub edge_count: usize,
    pub max_degree: usize,
    pub degree_norm: f64,
    pub register_size: usize,
}

impl Metrics {
    /// Computes every metric, scheduling `geometry` against `deps` for the
    /// register size.
    pub fn measure(geometry: &Geometry, deps: &DependencyTable) -> Result<Metrics, ScheduleError> {
        Ok(Metrics {
            edge_count: geometry.num_edges(),
            max_degree: geometry.max_degree(),
            degree_norm: geometry.degree_norm(),
            register_size: schedule(geometry, deps)?.register_size,
        })
    }

    pub fn get(&self, objective: Objective) -> f64 {
        match objective {
            Objective::EdgeCount => self.edge_count as f64,
            Objective::MaxDegree => self.max_degree as f64,
            Objective::DegreeNorm => self.degree_norm,
            Objective::RegisterSize => self.register_size as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case("edges", Objective::EdgeCount)]
    #[case("edge_count", Objective::EdgeCount)]
    #[case("Max-Degree", Objective::MaxDegree)]
    #[case("degree-norm", Objective::DegreeNorm)]
    #[case("register-size", Objective::RegisterSize)]
    fn parse(#[case] s: &str, #[case] o: Objective) {
        assert_eq!(s.parse::<Objective>(), Ok(o));
        assert_eq!(o.to_string().parse::<Objective>(), Ok(o));
    }

    #[test]
    fn parse_unknown() {
        assert!("volume".parse::<Objective>().is_err());
    }

    #[test]
    fn star_metrics() {
        let g = Geometry::from_edges(4, [(0, 1), (0, 2), (0, 3)]);
        let m = Metrics::measure(&g, &DependencyTable::new()).unwrap();
        assert_eq!(m.edge_count, 3);
        assert_eq!(m.max_degree, 3);
        assert_abs_diff_eq!(m.degree_norm, 12f64.sqrt(), epsilon = 1e-12);
        assert_eq!(m.register_size, 2);
        assert_abs_diff_eq!(m.get(Objective::DegreeNorm), m.degree_norm);
        assert_abs_diff_eq!(m.get(Objective::MaxDegree), 3.0);
    }
}
