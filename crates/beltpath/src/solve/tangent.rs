//! Tangent segments between consecutive pulleys.
//!
//! Model
//! - Centre line `A → B` with length `d` and angle `α`.
//! - Belt travel angle `φ = α + s_A · asin(k / d)` with the signed offset
//!   `k = r_B − r_A` (open) or `k = −(r_A + r_B)` (crossed).
//! - Contact angle on an endpoint is `φ + side · s_A · π/2`, `side` read from
//!   `CONTACT_SIDE[kind][role]`. With `s_A = +1` (clockwise) the belt rides on
//!   the left of the travel direction, i.e. the top of a left-to-right span.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::wrap::normalize_angle;
use crate::cfg::SolverCfg;
use crate::error::{BeltError, Result};
use crate::pulley::{Direction, Pulley};

/// Open (external) tangent for equal rotation senses, crossed (internal) otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TangentKind {
    Open,
    Crossed,
}

impl TangentKind {
    #[inline]
    pub fn between(a: Direction, b: Direction) -> Self {
        if a == b {
            TangentKind::Open
        } else {
            TangentKind::Crossed
        }
    }

    /// Signed offset radius `k` (before multiplying by `s_A`).
    #[inline]
    pub fn offset_radius(self, r_from: f64, r_to: f64) -> f64 {
        match self {
            TangentKind::Open => r_to - r_from,
            TangentKind::Crossed => -(r_from + r_to),
        }
    }
}

/// Which end of a segment a contact point belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndpointRole {
    From,
    To,
}

/// Side table: multiplier of `s_A · π/2` added to the travel angle.
/// Rows: `TangentKind` (Open, Crossed); columns: `EndpointRole` (From, To).
/// Open spans touch both pulleys on the same side, crossed spans on opposite sides.
const CONTACT_SIDE: [[f64; 2]; 2] = [[1.0, 1.0], [1.0, -1.0]];

/// Side multiplier for `(kind, role)`.
#[inline]
pub fn contact_side(kind: TangentKind, role: EndpointRole) -> f64 {
    let row = match kind {
        TangentKind::Open => 0,
        TangentKind::Crossed => 1,
    };
    let col = match role {
        EndpointRole::From => 0,
        EndpointRole::To => 1,
    };
    CONTACT_SIDE[row][col]
}

/// Absolute contact angle on an endpoint for a span with travel angle `phi`.
#[inline]
pub fn contact_angle(phi: f64, s_from: f64, kind: TangentKind, role: EndpointRole) -> f64 {
    normalize_angle(phi + contact_side(kind, role) * s_from * FRAC_PI_2)
}

/// Straight belt span from pulley `from` to pulley `to`.
///
/// Invariants:
/// - `start` lies on pulley `from` at `start_angle`, `end` on pulley `to` at `end_angle`.
/// - `length == |end − start|`, and `direction_angle` is the angle of `end − start`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TangentSegment {
    pub from: usize,
    pub to: usize,
    pub tangent_kind: TangentKind,
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
    pub length: f64,
    /// Travel angle of the belt along the span, in `[0, 2π)`.
    pub direction_angle: f64,
    /// Contact angle on the `from` pulley, measured from its centre.
    pub start_angle: f64,
    /// Contact angle on the `to` pulley, measured from its centre.
    pub end_angle: f64,
}

impl TangentSegment {
    /// Unit vector along the belt travel direction.
    #[inline]
    pub fn unit(&self) -> Vector2<f64> {
        Vector2::new(self.direction_angle.cos(), self.direction_angle.sin())
    }
}

/// Solve the tangent span leaving pulley `a` (index `from`) towards `b` (index `to`).
pub fn solve_tangent(
    from: usize,
    a: &Pulley,
    to: usize,
    b: &Pulley,
    cfg: &SolverCfg,
) -> Result<TangentSegment> {
    let delta = b.center() - a.center();
    let d = delta.norm();
    let kind = TangentKind::between(a.direction(), b.direction());
    let k = kind.offset_radius(a.radius(), b.radius());
    let infeasible = |reason: String| BeltError::GeometryInfeasible { from, to, reason };

    // Slack scales with the layout so feasibility is unit-independent.
    let slack = cfg.eps_feas * d.max(a.radius() + b.radius());
    if !d.is_finite() || d <= k.abs() + slack {
        return Err(infeasible(format!(
            "{kind:?} tangent needs centre distance > {:e}, got {d:e}",
            k.abs()
        )));
    }
    if let Some(factor) = cfg.min_spacing {
        let min_d = factor * (a.radius() + b.radius());
        if d < min_d {
            return Err(infeasible(format!(
                "centres {d:e} apart, clearance requires {min_d:e}"
            )));
        }
    }

    let s_a = a.sign();
    let alpha = delta.y.atan2(delta.x);
    let beta = (k / d).asin();
    let phi = normalize_angle(alpha + s_a * beta);
    let start_angle = contact_angle(phi, s_a, kind, EndpointRole::From);
    let end_angle = contact_angle(phi, s_a, kind, EndpointRole::To);
    let length = (d * d - k * k).sqrt();

    tracing::trace!(from, to, ?kind, d, length, phi, "tangent");

    Ok(TangentSegment {
        from,
        to,
        tangent_kind: kind,
        start: a.point_at(start_angle),
        end: b.point_at(end_angle),
        length,
        direction_angle: phi,
        start_angle,
        end_angle,
    })
}
