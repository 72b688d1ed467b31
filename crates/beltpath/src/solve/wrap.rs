//! Wrap arcs: belt contact on each pulley between incoming and outgoing tangents.
//!
//! The wrap is walked in the pulley's own rotation sense from the incoming
//! contact angle to the outgoing one: `wrap = (s · (θ_in − θ_out)) mod 2π`.
//! A wrap of exactly 0 means the belt passes straight through the contact.

use std::f64::consts::TAU;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::pulley::{Direction, Pulley};

/// Reduce an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(theta: f64) -> f64 {
    let r = theta.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Belt contact arc on one pulley.
///
/// Invariants:
/// - `wrap_angle ∈ [0, 2π)` and `arc_length == radius * wrap_angle`.
/// - Walking from `start_angle` by `wrap_angle` in `direction` lands on `end_angle`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WrapArc {
    pub pulley: usize,
    pub center: Vector2<f64>,
    pub radius: f64,
    pub direction: Direction,
    /// Incoming contact angle, `[0, 2π)`.
    pub start_angle: f64,
    /// Outgoing contact angle, `[0, 2π)`.
    pub end_angle: f64,
    pub wrap_angle: f64,
    pub arc_length: f64,
}

impl WrapArc {
    /// Arc between incoming contact `theta_in` and outgoing contact `theta_out`.
    /// Wraps within `eps_angle` of a full turn collapse to 0.
    pub fn between(
        index: usize,
        pulley: &Pulley,
        theta_in: f64,
        theta_out: f64,
        eps_angle: f64,
    ) -> Self {
        let mut wrap = normalize_angle(pulley.sign() * (theta_in - theta_out));
        if wrap > TAU - eps_angle {
            wrap = 0.0;
        }
        Self {
            pulley: index,
            center: pulley.center(),
            radius: pulley.radius(),
            direction: pulley.direction(),
            start_angle: normalize_angle(theta_in),
            end_angle: normalize_angle(theta_out),
            wrap_angle: wrap,
            arc_length: pulley.radius() * wrap,
        }
    }

    /// Zero-length arc at the free end of an open chain.
    pub fn free_end(index: usize, pulley: &Pulley, theta: f64) -> Self {
        Self::between(index, pulley, theta, theta, 0.0)
    }

    #[inline]
    pub fn start_point(&self) -> Vector2<f64> {
        self.point_at(0.0)
    }

    #[inline]
    pub fn end_point(&self) -> Vector2<f64> {
        self.point_at(1.0)
    }

    /// Point at fraction `t ∈ [0, 1]` of the wrap (0 = incoming contact).
    pub fn point_at(&self, t: f64) -> Vector2<f64> {
        let theta = self.start_angle - self.direction.sign() * t * self.wrap_angle;
        self.center + Vector2::new(theta.cos(), theta.sin()) * self.radius
    }

    /// Sample the arc as a polyline with about `resolution` chords per full
    /// circle. Always contains both contact points.
    pub fn polyline(&self, resolution: usize) -> Vec<Vector2<f64>> {
        let chords = ((self.wrap_angle * resolution as f64 / TAU).ceil() as usize).max(1);
        (0..=chords)
            .map(|i| self.point_at(i as f64 / chords as f64))
            .collect()
    }
}
