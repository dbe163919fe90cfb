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

//! Measurement angles encoded as a rational number of half-turns.

use std::f64::consts::PI;
use std::fmt::{self, Display};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num::{FromPrimitive, Integer, One, Rational64, ToPrimitive, Zero};

/// Largest denominator kept when converting a floating point angle.
pub const MAX_DENOM: i64 = 1 << 16;

/// An angle, expressed in half-turns (multiples of π) and encoded as a
/// rational number.
///
/// The phase is always normalized to be in the range (-1,1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Phase {
    r: Rational64,
}

impl Phase {
    /// Creates a new phase.
    ///
    /// Normalizes the phase to be in the range (-1,1].
    pub fn new(r: impl Into<Rational64>) -> Self {
        Self { r: r.into() }.normalize()
    }

    /// Returns the phase as a rational number of half-turns.
    pub fn to_rational(&self) -> Rational64 {
        self.r
    }

    /// Returns the phase as a floating point number of half-turns.
    pub fn to_f64(&self) -> f64 {
        self.r.to_f64().unwrap_or(0.0)
    }

    /// Converts an angle in radians.
    ///
    /// The number of half-turns is rounded to the closest fraction with a
    /// denominator of at most [MAX_DENOM]. Returns `None` for non-finite
    /// input.
    pub fn from_radians(rad: f64) -> Option<Self> {
        if !rad.is_finite() {
            return None;
        }
        // reduce first so the rational approximation stays small
        let turns = (rad / PI).rem_euclid(2.0);
        let r = Rational64::from_f64(turns)?;
        Some(Self::new(limit_denominator(r, MAX_DENOM)))
    }

    /// Returns the angle in radians, in the range [0, 2π).
    pub fn to_radians(&self) -> f64 {
        let rad = self.to_f64() * PI;
        if rad < 0.0 {
            rad + 2.0 * PI
        } else {
            rad
        }
    }

    /// Normalizes the phase to be in the range (-1,1] by adding or subtracting multiples of 2.
    pub fn normalize(&self) -> Phase {
        let denom = *self.r.denom();
        let mut num = *self.r.numer();
        if -denom < num && num <= denom {
            return *self;
        }
        num = num.rem_euclid(2 * denom);
        if num > denom {
            num -= 2 * denom;
        }
        Self {
            r: Rational64::new(num, denom),
        }
    }

    /// Returns `true` if the phase is a multiple of 1/2, i.e. of π/2 radians.
    pub fn is_clifford(&self) -> bool {
        self.r.denom().abs() <= 2
    }

    /// Number of quarter turns in `[0,4)` if the phase is a multiple of 1/2.
    pub fn quarter_turns(&self) -> Option<u8> {
        if !self.is_clifford() {
            return None;
        }
        let k = (self.r * 2).to_integer().rem_euclid(4);
        Some(k as u8)
    }

    /// A quarter turn, π/2 radians.
    pub fn one_half() -> Phase {
        Phase::new(Rational64::new(1, 2))
    }

    /// The phase of `k` quarter turns.
    pub fn quarter(k: i64) -> Phase {
        Phase::new(Rational64::new(k, 2))
    }
}

/// Approximate a fraction by the closest fraction whose denominator is at
/// most `max_denom`, via continued fractions.
///
/// # Panics
///
/// Panics if `max_denom` is less than 1.
pub fn limit_denominator(fraction: Rational64, max_denom: i64) -> Rational64 {
    assert!(max_denom >= 1, "max_denom must be at least 1");
    if *fraction.denom() <= max_denom {
        return fraction;
    }

    let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);
    let (mut n, mut d) = (*fraction.numer(), *fraction.denom());
    loop {
        let a = n.div_floor(&d);
        let q2 = q0 + a * q1;
        if q2 > max_denom {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
        (n, d) = (d, n - a * d);
    }

    let k = (max_denom - q0) / q1;
    let lower = Rational64::new(p0 + k * p1, q0 + k * q1);
    let upper = Rational64::new(p1, q1);
    // compared as floats, exact rational differences can overflow i64
    let x = fraction.to_f64().unwrap_or(0.0);
    let dist = |r: Rational64| (r.to_f64().unwrap_or(0.0) - x).abs();
    if dist(upper) <= dist(lower) {
        upper
    } else {
        lower
    }
}

/// Error returned when a phase expression can not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid phase expression '{expr}'")]
pub struct ParsePhaseError {
    expr: String,
}

impl FromStr for Phase {
    type Err = ParsePhaseError;

    /// Parses expressions such as `pi/4`, `-3pi/4`, `π`, `1/2` or `0.25`.
    ///
    /// The value is always read as a multiple of π, with or without the
    /// `pi` marker.
    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let err = || ParsePhaseError {
            expr: expr.to_string(),
        };
        let s: String = expr
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .filter(|c| !c.is_whitespace() && *c != '*' && *c != 'π')
            .collect();
        let had_pi = s.contains("pi") || expr.contains('π');
        let s = s.replace("pi", "");

        let r = match s.as_str() {
            "" if had_pi => Rational64::one(),
            "-" if had_pi => -Rational64::one(),
            _ if s.contains('.') || s.contains('e') => {
                let f: f64 = s.parse().map_err(|_| err())?;
                let r = Rational64::from_f64(f).ok_or_else(err)?;
                limit_denominator(r, MAX_DENOM)
            }
            _ if s.contains('/') => {
                let (num, den) = s.split_once('/').ok_or_else(err)?;
                let den: i64 = den.parse().map_err(|_| err())?;
                if den == 0 {
                    return Err(err());
                }
                let num: i64 = match num {
                    "" => 1,
                    "-" => -1,
                    _ => num.parse().map_err(|_| err())?,
                };
                Rational64::new(num, den)
            }
            _ => Rational64::from_integer(s.parse().map_err(|_| err())?),
        };
        Ok(Phase::new(r))
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (n, d) = (*self.r.numer(), *self.r.denom());
        match (n, d) {
            (0, _) => write!(f, "0"),
            (1, 1) => write!(f, "pi"),
            (1, _) => write!(f, "pi/{d}"),
            (-1, _) => write!(f, "-pi/{d}"),
            (_, 1) => write!(f, "{n}pi"),
            _ => write!(f, "{n}pi/{d}"),
        }
    }
}

impl From<Rational64> for Phase {
    fn from(r: Rational64) -> Phase {
        Phase::new(r)
    }
}

impl From<Phase> for Rational64 {
    fn from(phase: Phase) -> Rational64 {
        phase.to_rational()
    }
}

impl From<i64> for Phase {
    fn from(i: i64) -> Phase {
        Phase::new(Rational64::from_integer(i))
    }
}

impl From<(i64, i64)> for Phase {
    fn from(i: (i64, i64)) -> Phase {
        let r: Rational64 = i.into();
        Phase::new(r)
    }
}

impl Zero for Phase {
    fn zero() -> Self {
        Phase::new(Rational64::zero())
    }

    fn is_zero(&self) -> bool {
        self.r.is_zero()
    }
}

impl One for Phase {
    fn one() -> Self {
        Phase::new(Rational64::one())
    }

    fn is_one(&self) -> bool {
        self.r.is_one()
    }
}

impl Neg for Phase {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.r)
    }
}

impl Add for Phase {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.r + other.r)
    }
}

impl AddAssign for Phase {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Phase {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.r - other.r)
    }
}

impl SubAssign for Phase {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul for Phase {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(self.r * other.r)
    }
}

impl Mul<i64> for Phase {
    type Output = Self;

    fn mul(self, other: i64) -> Self {
        Self::new(self.r * other)
    }
}

impl MulAssign<i64> for Phase {
    fn mul_assign(&mut self, other: i64) {
        *self = *self * other;
    }
}
