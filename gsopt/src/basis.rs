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

//! Measurement bases and their exact transformation under Clifford
//! rotations.
//!
//! A measured basis is a plane of the Bloch sphere together with an angle
//! in that plane. The Bloch vector for angle θ is `cos θ·u + sin θ·v`, where
//! `(u, v)` is the frame of the plane:
//!
//! | plane | u | v |
//! |-------|---|---|
//! | XY    | X | Y |
//! | YZ    | Z | Y |
//! | ZX    | Z | X |
//!
//! A quarter turn permutes signed axes, so rotating a basis maps its frame
//! to another signed frame, which is then re-expressed in the canonical
//! frame of the plane containing it. Since phases are rational, every such
//! step is exact.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{VTab, V};
use crate::phase::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Successor in the cycle X → Y → Z → X.
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Direction of a quarter turn: `Plus` is +90°, `Minus` is -90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    #[default]
    Plus,
    Minus,
}

impl Neg for Dir {
    type Output = Dir;

    fn neg(self) -> Dir {
        match self {
            Dir::Plus => Dir::Minus,
            Dir::Minus => Dir::Plus,
        }
    }
}

/// A coordinate axis with a sign, e.g. `-Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignedAxis {
    pub axis: Axis,
    pub negative: bool,
}

impl SignedAxis {
    pub fn plus(axis: Axis) -> Self {
        SignedAxis {
            axis,
            negative: false,
        }
    }

    pub fn minus(axis: Axis) -> Self {
        SignedAxis {
            axis,
            negative: true,
        }
    }

    /// `+1` or `-1`.
    pub fn sign(&self) -> i8 {
        if self.negative {
            -1
        } else {
            1
        }
    }

    /// Rotates by a quarter turn about `about`.
    ///
    /// With `b = about.next()` and `c = b.next()`, a `Plus` turn sends
    /// `b → c` and `c → -b`; a `Minus` turn sends `b → -c` and `c → b`.
    pub fn quarter_turn(self, about: Axis, dir: Dir) -> SignedAxis {
        let b = about.next();
        let c = b.next();
        let image = if self.axis == about {
            return self;
        } else if (self.axis == b) == (dir == Dir::Plus) {
            // b under Plus, c under Minus
            SignedAxis::plus(if self.axis == b { c } else { b })
        } else {
            SignedAxis::minus(if self.axis == b { c } else { b })
        };
        if self.negative {
            -image
        } else {
            image
        }
    }

    /// Rotates by a half turn about `about`.
    pub fn half_turn(self, about: Axis) -> SignedAxis {
        if self.axis == about {
            self
        } else {
            -self
        }
    }
}

impl Neg for SignedAxis {
    type Output = SignedAxis;

    fn neg(self) -> SignedAxis {
        SignedAxis {
            axis: self.axis,
            negative: !self.negative,
        }
    }
}

impl fmt::Display for SignedAxis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", if self.negative { '-' } else { '+' }, self.axis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid signed axis '{0}'")]
pub struct ParseAxisError(String);

impl FromStr for SignedAxis {
    type Err = ParseAxisError;

    /// Parses `X`, `+Y`, `-Z` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let (negative, rest) = match t.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, t.strip_prefix('+').unwrap_or(t)),
        };
        let axis = match rest.to_ascii_uppercase().as_str() {
            "X" => Axis::X,
            "Y" => Axis::Y,
            "Z" => Axis::Z,
            _ => return Err(ParseAxisError(s.to_string())),
        };
        Ok(SignedAxis { axis, negative })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plane {
    XY,
    YZ,
    ZX,
}

impl Plane {
    /// The canonical frame `(u, v)` of the plane.
    pub fn frame(self) -> (Axis, Axis) {
        match self {
            Plane::XY => (Axis::X, Axis::Y),
            Plane::YZ => (Axis::Z, Axis::Y),
            Plane::ZX => (Axis::Z, Axis::X),
        }
    }

    /// The axis orthogonal to the plane.
    pub fn normal(self) -> Axis {
        match self {
            Plane::XY => Axis::Z,
            Plane::YZ => Axis::X,
            Plane::ZX => Axis::Y,
        }
    }

    /// The plane spanned by two distinct axes.
    fn spanned_by(a: Axis, b: Axis) -> Plane {
        match (a, b) {
            (Axis::X, Axis::Y) | (Axis::Y, Axis::X) => Plane::XY,
            (Axis::Y, Axis::Z) | (Axis::Z, Axis::Y) => Plane::YZ,
            (Axis::Z, Axis::X) | (Axis::X, Axis::Z) => Plane::ZX,
            _ => unreachable!("a frame always has two distinct axes"),
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Errors raised by basis construction and rotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BasisError {
    /// Only one of plane and angle was given.
    #[error("a measurement basis needs both a plane and an angle")]
    Incomplete,
    /// A non-Clifford rotation about an axis lying in the measurement plane.
    #[error("rotating a {plane} basis by {phase} about {axis} leaves its plane")]
    LeavesPlane { plane: Plane, axis: Axis, phase: Phase },
}

/// The measurement basis of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Basis {
    Measured {
        plane: Plane,
        phase: Phase,
    },
    /// Output nodes, and nodes whose basis is not yet assigned.
    #[default]
    Unmeasured,
}

impl Basis {
    /// Builds a basis from optional parts. Both or neither must be present.
    pub fn new(plane: Option<Plane>, phase: Option<Phase>) -> Result<Basis, BasisError> {
        match (plane, phase) {
            (Some(plane), Some(phase)) => Ok(Basis::Measured { plane, phase }),
            (None, None) => Ok(Basis::Unmeasured),
            _ => Err(BasisError::Incomplete),
        }
    }

    pub fn xy(phase: impl Into<Phase>) -> Basis {
        Basis::Measured {
            plane: Plane::XY,
            phase: phase.into(),
        }
    }

    pub fn yz(phase: impl Into<Phase>) -> Basis {
        Basis::Measured {
            plane: Plane::YZ,
            phase: phase.into(),
        }
    }

    pub fn zx(phase: impl Into<Phase>) -> Basis {
        Basis::Measured {
            plane: Plane::ZX,
            phase: phase.into(),
        }
    }

    /// The basis measuring the given signed Pauli axis.
    pub fn pauli(s: SignedAxis) -> Basis {
        let (plane, k) = match s.axis {
            Axis::X => (Plane::XY, 0),
            Axis::Y => (Plane::XY, 1),
            Axis::Z => (Plane::YZ, 0),
        };
        Basis::Measured {
            plane,
            phase: Phase::quarter(k + if s.negative { 2 } else { 0 }),
        }
    }

    pub fn plane(&self) -> Option<Plane> {
        match self {
            Basis::Measured { plane, .. } => Some(*plane),
            Basis::Unmeasured => None,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            Basis::Measured { phase, .. } => Some(*phase),
            Basis::Unmeasured => None,
        }
    }

    /// The signed Pauli axis measured, if the angle is a multiple of π/2.
    pub fn pauli_axis(&self) -> Option<SignedAxis> {
        let Basis::Measured { plane, phase } = self else {
            return None;
        };
        let k = phase.quarter_turns()?;
        let (u, v) = plane.frame();
        Some(SignedAxis {
            axis: if k % 2 == 0 { u } else { v },
            negative: k >= 2,
        })
    }

    pub fn is_pauli(&self) -> bool {
        self.pauli_axis().is_some()
    }

    /// Applies a signed-axis permutation to the frame and re-expresses the
    /// result in the canonical frame of the target plane.
    fn map_frame(self, f: impl Fn(SignedAxis) -> SignedAxis) -> Basis {
        let Basis::Measured { plane, phase } = self else {
            return self;
        };
        let (u, v) = plane.frame();
        let (u1, v1) = (f(SignedAxis::plus(u)), f(SignedAxis::plus(v)));
        let target = Plane::spanned_by(u1.axis, v1.axis);
        let (a, _) = target.frame();
        let half = Phase::from((1, 2));
        let r = phase;
        let phase = match (u1.axis == a, u1.negative, v1.negative) {
            (true, false, false) => r,
            (true, false, true) => -r,
            (true, true, false) => Phase::new(1) - r,
            (true, true, true) => Phase::new(1) + r,
            (false, false, false) => half - r,
            (false, false, true) => half + r,
            (false, true, false) => r - half,
            (false, true, true) => -half - r,
        };
        Basis::Measured {
            plane: target,
            phase,
        }
    }

    pub fn quarter_turn(self, about: Axis, dir: Dir) -> Basis {
        self.map_frame(|s| s.quarter_turn(about, dir))
    }

    pub fn half_turn(self, about: Axis) -> Basis {
        self.map_frame(|s| s.half_turn(about))
    }

    /// Rotates by `angle` about `axis`.
    ///
    /// Multiples of π/2 are exact frame permutations about any axis. Other
    /// angles are only allowed about the normal of the current plane.
    pub fn rotated(self, angle: Phase, axis: Axis) -> Result<Basis, BasisError> {
        let Basis::Measured { plane, phase } = self else {
            return Ok(self);
        };
        if let Some(k) = angle.quarter_turns() {
            return Ok(match k {
                0 => self,
                1 => self.quarter_turn(axis, Dir::Plus),
                2 => self.half_turn(axis),
                _ => self.quarter_turn(axis, Dir::Minus),
            });
        }
        if axis != plane.normal() {
            return Err(BasisError::LeavesPlane {
                plane,
                axis,
                phase: angle,
            });
        }
        let phase = match plane {
            Plane::YZ => phase - angle,
            Plane::XY | Plane::ZX => phase + angle,
        };
        Ok(Basis::Measured { plane, phase })
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Basis::Measured { plane, phase } => write!(f, "{plane}({phase})"),
            Basis::Unmeasured => write!(f, "-"),
        }
    }
}

/// Measurement bases of all nodes of a graph state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasisTable {
    bases: VTab<Basis>,
}

impl BasisTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, v: V, basis: Basis) {
        if self.bases.len() <= v {
            self.bases.resize(v + 1, None);
        }
        self.bases[v] = Some(basis);
    }

    pub fn contains(&self, v: V) -> bool {
        matches!(self.bases.get(v), Some(Some(_)))
    }

    /// The basis of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` has no entry.
    pub fn get(&self, v: V) -> Basis {
        match self.bases.get(v) {
            Some(Some(b)) => *b,
            _ => panic!("Node {v} has no measurement basis"),
        }
    }

    fn get_mut(&mut self, v: V) -> &mut Basis {
        match self.bases.get_mut(v) {
            Some(Some(b)) => b,
            _ => panic!("Node {v} has no measurement basis"),
        }
    }

    /// Removes the entry of `v`, returning its basis.
    pub fn cutoff(&mut self, v: V) -> Option<Basis> {
        self.bases.get_mut(v).and_then(Option::take)
    }

    pub fn iter(&self) -> impl Iterator<Item = (V, Basis)> + '_ {
        self.bases
            .iter()
            .enumerate()
            .filter_map(|(v, b)| b.map(|b| (v, b)))
    }

    pub fn plane(&self, v: V) -> Option<Plane> {
        self.get(v).plane()
    }

    pub fn angle(&self, v: V) -> Option<Phase> {
        self.get(v).phase()
    }

    pub fn is_pauli(&self, v: V) -> bool {
        self.get(v).is_pauli()
    }

    pub fn pauli_axis(&self, v: V) -> Option<Axis> {
        self.get(v).pauli_axis().map(|s| s.axis)
    }

    /// `+1` or `-1` for Pauli bases.
    pub fn pauli_sign(&self, v: V) -> Option<i8> {
        self.get(v).pauli_axis().map(|s| s.sign())
    }

    /// Rotates the basis of `v` by `angle` about `axis`. Unmeasured nodes
    /// are left alone.
    pub fn rotate(&mut self, v: V, angle: Phase, axis: Axis) -> Result<(), BasisError> {
        let b = self.get_mut(v);
        *b = b.rotated(angle, axis)?;
        Ok(())
    }

    pub fn rotate_sqrt_x(&mut self, v: V, dir: Dir) {
        let b = self.get_mut(v);
        *b = b.quarter_turn(Axis::X, dir);
    }

    pub fn rotate_sqrt_y(&mut self, v: V, dir: Dir) {
        let b = self.get_mut(v);
        *b = b.quarter_turn(Axis::Y, dir);
    }

    pub fn rotate_sqrt_z(&mut self, v: V, dir: Dir) {
        let b = self.get_mut(v);
        *b = b.quarter_turn(Axis::Z, dir);
    }

    /// Hadamard, as √X∘√Z∘√X.
    pub fn rotate_h(&mut self, v: V) {
        self.rotate_sqrt_x(v, Dir::Plus);
        self.rotate_sqrt_z(v, Dir::Plus);
        self.rotate_sqrt_x(v, Dir::Plus);
    }

    /// A π rotation about `axis`.
    pub fn flip(&mut self, v: V, axis: Axis) {
        let b = self.get_mut(v);
        *b = b.half_turn(axis);
    }

    /// Adds `delta` to the angle of `v` within its plane.
    pub fn add_to_angle(&mut self, v: V, delta: Phase) {
        if let Basis::Measured { phase, .. } = self.get_mut(v) {
            *phase += delta;
        }
    }

    /// Number of measured nodes with a non-Pauli angle.
    pub fn non_pauli_count(&self) -> usize {
        self.iter()
            .filter(|(_, b)| b.plane().is_some() && !b.is_pauli())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::{One, Zero};
    use rstest::rstest;

    const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[test]
    fn signed_axis_strings() {
        for a in AXES {
            for s in [SignedAxis::plus(a), SignedAxis::minus(a)] {
                assert_eq!(s.to_string().parse::<SignedAxis>(), Ok(s));
            }
        }
        assert_eq!("z".parse::<SignedAxis>(), Ok(SignedAxis::plus(Axis::Z)));
        assert!("W".parse::<SignedAxis>().is_err());
        assert!("--X".parse::<SignedAxis>().is_err());
    }

    /// The Bloch vector of a Pauli basis as an integer vector.
    fn vector(s: SignedAxis) -> [i8; 3] {
        let mut r = [0; 3];
        r[s.axis as usize] = s.sign();
        r
    }

    #[rstest]
    #[case(Axis::Z, SignedAxis::plus(Axis::X), SignedAxis::plus(Axis::Y))]
    #[case(Axis::Z, SignedAxis::plus(Axis::Y), SignedAxis::minus(Axis::X))]
    #[case(Axis::X, SignedAxis::plus(Axis::Y), SignedAxis::plus(Axis::Z))]
    #[case(Axis::X, SignedAxis::plus(Axis::Z), SignedAxis::minus(Axis::Y))]
    #[case(Axis::Y, SignedAxis::plus(Axis::Z), SignedAxis::plus(Axis::X))]
    #[case(Axis::Y, SignedAxis::minus(Axis::X), SignedAxis::plus(Axis::Z))]
    #[case(Axis::Y, SignedAxis::plus(Axis::Y), SignedAxis::plus(Axis::Y))]
    fn right_handed_quarter_turns(#[case] about: Axis, #[case] s: SignedAxis, #[case] image: SignedAxis) {
        assert_eq!(s.quarter_turn(about, Dir::Plus), image);
        assert_eq!(image.quarter_turn(about, Dir::Minus), s);
    }

    #[test]
    fn two_quarters_make_a_half() {
        for about in AXES {
            for axis in AXES {
                for s in [SignedAxis::plus(axis), SignedAxis::minus(axis)] {
                    let q = s.quarter_turn(about, Dir::Plus).quarter_turn(about, Dir::Plus);
                    assert_eq!(q, s.half_turn(about));
                }
            }
        }
    }

    #[test]
    fn incomplete_bases_are_rejected() {
        assert_eq!(Basis::new(Some(Plane::XY), None), Err(BasisError::Incomplete));
        assert_eq!(Basis::new(None, Some(Phase::zero())), Err(BasisError::Incomplete));
        assert_eq!(Basis::new(None, None), Ok(Basis::Unmeasured));
        assert_eq!(
            Basis::new(Some(Plane::ZX), Some(Phase::one_half())),
            Ok(Basis::zx((1, 2)))
        );
    }

    #[rstest]
    #[case(Basis::xy(0), Some(SignedAxis::plus(Axis::X)))]
    #[case(Basis::xy((1, 2)), Some(SignedAxis::plus(Axis::Y)))]
    #[case(Basis::xy(1), Some(SignedAxis::minus(Axis::X)))]
    #[case(Basis::xy((-1, 2)), Some(SignedAxis::minus(Axis::Y)))]
    #[case(Basis::yz(0), Some(SignedAxis::plus(Axis::Z)))]
    #[case(Basis::yz((1, 2)), Some(SignedAxis::plus(Axis::Y)))]
    #[case(Basis::yz(1), Some(SignedAxis::minus(Axis::Z)))]
    #[case(Basis::zx((1, 2)), Some(SignedAxis::plus(Axis::X)))]
    #[case(Basis::zx((-1, 2)), Some(SignedAxis::minus(Axis::X)))]
    #[case(Basis::xy((1, 4)), None)]
    #[case(Basis::Unmeasured, None)]
    fn pauli_classification(#[case] b: Basis, #[case] expected: Option<SignedAxis>) {
        assert_eq!(b.pauli_axis(), expected);
        assert_eq!(b.is_pauli(), expected.is_some());
    }

    #[test]
    fn pauli_bases_agree_with_the_frame_algebra() {
        // rotating a Pauli basis must agree with rotating its axis
        for about in AXES {
            for axis in AXES {
                for s in [SignedAxis::plus(axis), SignedAxis::minus(axis)] {
                    for dir in [Dir::Plus, Dir::Minus] {
                        let b = Basis::pauli(s).quarter_turn(about, dir);
                        let expected = s.quarter_turn(about, dir);
                        assert_eq!(
                            vector(b.pauli_axis().unwrap()),
                            vector(expected),
                            "{s} about {about} ({dir:?})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn sqrt_z_per_plane() {
        let r = Phase::from((1, 8));
        // XY: shift by a quarter turn
        assert_eq!(Basis::xy(r).quarter_turn(Axis::Z, Dir::Plus), Basis::xy(r + Phase::one_half()));
        assert_eq!(Basis::xy(r).quarter_turn(Axis::Z, Dir::Minus), Basis::xy(r - Phase::one_half()));
        // ZX: moves to YZ, angle held
        assert_eq!(Basis::zx(r).quarter_turn(Axis::Z, Dir::Plus), Basis::yz(r));
        // YZ: moves to ZX, angle reflected
        assert_eq!(Basis::yz(r).quarter_turn(Axis::Z, Dir::Plus), Basis::zx(-r));
    }

    #[test]
    fn sqrt_x_per_plane() {
        let r = Phase::from((1, 8));
        // XY: cos X + sin Y -> cos X + sin Z, i.e. ZX with angle 1/2 - r
        assert_eq!(
            Basis::xy(r).quarter_turn(Axis::X, Dir::Plus),
            Basis::zx(Phase::one_half() - r)
        );
        // YZ is the plane orthogonal to X: angle shifts backwards
        assert_eq!(
            Basis::yz(r).quarter_turn(Axis::X, Dir::Plus),
            Basis::yz(r - Phase::one_half())
        );
    }

    #[rstest]
    #[case(Basis::xy((1, 8)))]
    #[case(Basis::yz((3, 8)))]
    #[case(Basis::zx((-5, 8)))]
    fn opposite_quarter_turns_cancel(#[case] b: Basis) {
        for about in AXES {
            let b1 = b.quarter_turn(about, Dir::Plus).quarter_turn(about, Dir::Minus);
            assert_eq!(b1, b);
            let b2 = b.quarter_turn(about, Dir::Minus).quarter_turn(about, Dir::Plus);
            assert_eq!(b2, b);
        }
    }

    #[rstest]
    #[case(Basis::xy((1, 8)))]
    #[case(Basis::yz((3, 8)))]
    #[case(Basis::zx((-5, 8)))]
    fn four_quarter_turns_are_identity(#[case] b: Basis) {
        for about in AXES {
            let mut b1 = b;
            for _ in 0..4 {
                b1 = b1.quarter_turn(about, Dir::Plus);
            }
            assert_eq!(b1, b);
        }
    }

    #[test]
    fn hadamard_swaps_x_and_z() {
        let mut t = BasisTable::new();
        t.insert(0, Basis::xy(0));
        t.insert(1, Basis::yz((1, 4)));
        t.rotate_h(0);
        t.rotate_h(1);
        assert_eq!(t.pauli_axis(0), Some(Axis::Z));
        assert_eq!(t.pauli_sign(0), Some(1));
        // Z + Y at 45 degrees goes to X - Y
        assert_eq!(t.get(1), Basis::xy((-1, 4)));
    }

    #[test]
    fn rotations_about_the_normal() {
        let mut t = BasisTable::new();
        t.insert(0, Basis::xy((1, 8)));
        t.insert(1, Basis::yz((1, 8)));
        t.insert(2, Basis::zx((1, 8)));
        let a = Phase::from((1, 4));
        t.rotate(0, a, Axis::Z).unwrap();
        t.rotate(1, a, Axis::X).unwrap();
        t.rotate(2, a, Axis::Y).unwrap();
        assert_eq!(t.get(0), Basis::xy((3, 8)));
        assert_eq!(t.get(1), Basis::yz((-1, 8)));
        assert_eq!(t.get(2), Basis::zx((3, 8)));
    }

    #[test]
    fn rotation_out_of_the_plane_fails() {
        let mut t = BasisTable::new();
        t.insert(0, Basis::xy((1, 8)));
        let err = t.rotate(0, Phase::from((1, 4)), Axis::X).unwrap_err();
        assert!(matches!(err, BasisError::LeavesPlane { plane: Plane::XY, .. }));
        assert_eq!(t.get(0), Basis::xy((1, 8)));
        // Clifford angles are fine about any axis
        t.rotate(0, Phase::one(), Axis::X).unwrap();
        assert_eq!(t.get(0), Basis::xy((-1, 8)));
    }

    #[test]
    fn pi_about_z_negates_x_and_y() {
        let mut t = BasisTable::new();
        t.insert(0, Basis::xy(0));
        t.insert(1, Basis::yz((1, 2)));
        t.insert(2, Basis::yz(0));
        for v in 0..3 {
            t.rotate(v, Phase::one(), Axis::Z).unwrap();
        }
        assert_eq!(t.get(0), Basis::xy(1));
        assert_eq!(t.pauli_axis(1), Some(Axis::Y));
        assert_eq!(t.pauli_sign(1), Some(-1));
        assert_eq!(t.get(2), Basis::yz(0));
    }

    #[test]
    fn unmeasured_ignores_rotations() {
        let mut t = BasisTable::new();
        t.insert(3, Basis::Unmeasured);
        t.rotate_sqrt_x(3, Dir::Plus);
        t.rotate(3, Phase::from((1, 3)), Axis::X).unwrap();
        assert_eq!(t.get(3), Basis::Unmeasured);
        assert_eq!(t.plane(3), None);
        assert_eq!(t.angle(3), None);
        assert!(!t.contains(0));
        assert_eq!(t.cutoff(3), Some(Basis::Unmeasured));
        assert!(!t.contains(3));
    }
}
