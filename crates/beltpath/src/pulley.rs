//! Pulley model: position, radius and rotation sense.
//!
//! Conventions
//! - `Direction::Cw` is `+1`, `Direction::Ccw` is `-1`. Downstream formulas
//!   multiply by `sign()` instead of branching.
//! - Lengths are unit-agnostic; a belt must use one length unit throughout.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{BeltError, Result};

/// Rotation sense of a pulley, i.e. how the belt turns while wrapped on it.
///
/// Serializes as `"CW"`/`"CCW"`; deserializes from any spelling `FromStr` or
/// `TryFrom<i32>` accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDirection")]
pub enum Direction {
    #[serde(rename = "CW")]
    Cw,
    #[serde(rename = "CCW")]
    Ccw,
}

impl Direction {
    /// `+1.0` for clockwise, `-1.0` for counter-clockwise.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Cw => 1.0,
            Direction::Ccw => -1.0,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Cw => Direction::Ccw,
            Direction::Ccw => Direction::Cw,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Cw => f.write_str("CW"),
            Direction::Ccw => f.write_str("CCW"),
        }
    }
}

impl FromStr for Direction {
    type Err = BeltError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("cw") || t == "1" || t == "+1" => Ok(Direction::Cw),
            t if t.eq_ignore_ascii_case("ccw") || t == "-1" => Ok(Direction::Ccw),
            other => Err(BeltError::invalid(format!(
                "direction must be 1, -1, \"CW\" or \"CCW\", got {other:?}"
            ))),
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = BeltError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Direction::Cw),
            -1 => Ok(Direction::Ccw),
            other => Err(BeltError::invalid(format!(
                "direction must be 1 or -1, got {other}"
            ))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDirection {
    Sign(i32),
    Name(String),
}

impl TryFrom<RawDirection> for Direction {
    type Error = BeltError;

    fn try_from(raw: RawDirection) -> Result<Self> {
        match raw {
            RawDirection::Sign(v) => Direction::try_from(v),
            RawDirection::Name(s) => s.parse(),
        }
    }
}

/// Pitch radius of a toothed pulley with `teeth` teeth on a belt of the given pitch.
#[inline]
pub fn teeth_to_radius(teeth: u32, pitch: f64) -> f64 {
    teeth as f64 * pitch / TAU
}

/// Immutable circular pulley.
///
/// Invariants:
/// - `radius > 0` and finite; centre coordinates finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPulley", into = "RawPulley")]
pub struct Pulley {
    radius: f64,
    center: Vector2<f64>,
    direction: Direction,
}

impl Pulley {
    pub fn new(radius: f64, x: f64, y: f64, direction: Direction) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(BeltError::invalid(format!(
                "pulley radius must be positive and finite, got {radius}"
            )));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(BeltError::invalid(format!(
                "pulley centre must be finite, got ({x}, {y})"
            )));
        }
        Ok(Self {
            radius,
            center: Vector2::new(x, y),
            direction,
        })
    }

    /// Toothed pulley: radius derived from tooth count and belt pitch.
    pub fn toothed(teeth: u32, pitch: f64, x: f64, y: f64, direction: Direction) -> Result<Self> {
        Self::new(teeth_to_radius(teeth, pitch), x, y, direction)
    }

    /// Same pulley relocated to `(x, y)`.
    pub fn moved_to(&self, x: f64, y: f64) -> Result<Self> {
        Self::new(self.radius, x, y, self.direction)
    }

    /// Copy with every length multiplied by `k > 0`.
    pub fn scaled(&self, k: f64) -> Result<Self> {
        Self::new(
            self.radius * k,
            self.center.x * k,
            self.center.y * k,
            self.direction,
        )
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        self.center
    }
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }
    #[inline]
    pub fn sign(&self) -> f64 {
        self.direction.sign()
    }

    /// Point on the circumference at absolute angle `theta`.
    #[inline]
    pub fn point_at(&self, theta: f64) -> Vector2<f64> {
        self.center + Vector2::new(theta.cos(), theta.sin()) * self.radius
    }
}

#[derive(Serialize, Deserialize)]
struct RawPulley {
    radius: f64,
    x: f64,
    y: f64,
    direction: Direction,
}

impl TryFrom<RawPulley> for Pulley {
    type Error = BeltError;
    fn try_from(raw: RawPulley) -> Result<Self> {
        Pulley::new(raw.radius, raw.x, raw.y, raw.direction)
    }
}

impl From<Pulley> for RawPulley {
    fn from(p: Pulley) -> Self {
        RawPulley {
            radius: p.radius,
            x: p.center.x,
            y: p.center.y,
            direction: p.direction,
        }
    }
}
