//! Axle reaction forces under belt tension.
//!
//! Each span pulls pulley `i` towards its neighbour: the outgoing span along
//! its travel direction, the incoming span against it. With a uniform tension
//! `T`, `F = T · (u_in + u_out)`; a free end of an open chain only feels its
//! single span.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{BeltError, Result};
use crate::solve::BeltGeometry;

/// Net belt force on one pulley axle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionForce {
    pub pulley: usize,
    pub force: Vector2<f64>,
    pub magnitude: f64,
    /// `atan2(fy, fx)`, in `(−π, π]`.
    pub angle: f64,
}

impl ReactionForce {
    pub fn new(pulley: usize, force: Vector2<f64>) -> Self {
        Self {
            pulley,
            force,
            magnitude: force.norm(),
            angle: force.y.atan2(force.x),
        }
    }
}

/// Reactions for per-span tensions (`span_tension[k]` is the tension in segment `k`).
pub(crate) fn reactions_from_spans(g: &BeltGeometry, span_tension: &[f64]) -> Vec<ReactionForce> {
    debug_assert_eq!(span_tension.len(), g.segments.len());
    (0..g.pulley_count())
        .map(|i| {
            let mut f = Vector2::zeros();
            if let Some(s) = g.incoming(i) {
                f -= s.unit() * span_tension[s.from];
            }
            if let Some(s) = g.outgoing(i) {
                f += s.unit() * span_tension[s.from];
            }
            ReactionForce::new(i, f)
        })
        .collect()
}

/// Reactions on every pulley for a uniform belt tension `tension > 0`.
pub fn reaction_forces(g: &BeltGeometry, tension: f64) -> Result<Vec<ReactionForce>> {
    if !tension.is_finite() || tension <= 0.0 {
        return Err(BeltError::invalid(format!(
            "belt tension must be positive and finite, got {tension}"
        )));
    }
    let spans = vec![tension; g.segments.len()];
    Ok(reactions_from_spans(g, &spans))
}
