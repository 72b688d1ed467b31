//! Static torque balance and span tension distribution for closed loops.
//!
//! Model
//! - Torques are positive clockwise. Pulley `i` changes the belt tension by
//!   `f_i = s_i · τ_i / r_i` between its incoming and outgoing spans.
//! - One pulley's torque is unknown and solved so that `Σ f_i = 0`.
//! - Relative span tensions follow `t_i = t_{i−1} − f_i` (span `i` leaves
//!   pulley `i`), then shift by a baseline: the slackest span equals a minimum
//!   tension, or a tensioner pulley sees a given mean of its two spans.

use serde::{Deserialize, Serialize};

use crate::cfg::FEAS_EPS;
use crate::error::{BeltError, Result};
use crate::force::{reactions_from_spans, ReactionForce};
use crate::solve::BeltGeometry;

/// How the absolute tension level is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TensionBaseline {
    /// The slackest span carries exactly this tension.
    MinTension(f64),
    /// Mean of the spans entering and leaving `pulley` equals `tension`.
    Tensioner { pulley: usize, tension: f64 },
}

/// External torques on each pulley plus the rule fixing the tension level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Clockwise-positive torque per pulley, in tension × length units.
    /// The entry at `unknown_torque` is ignored and solved for.
    pub torques: Vec<f64>,
    pub unknown_torque: usize,
    pub baseline: TensionBaseline,
}

impl LoadCase {
    /// No external torques; every span carries `tension`.
    pub fn uniform(pulleys: usize, tension: f64) -> Self {
        Self {
            torques: vec![0.0; pulleys],
            unknown_torque: 0,
            baseline: TensionBaseline::MinTension(tension),
        }
    }
}

/// Result of a load distribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadedForces {
    /// Input torques with the unknown entry filled in.
    pub torques: Vec<f64>,
    /// Tension in span `k` (from pulley `k` to `k + 1`).
    pub span_tensions: Vec<f64>,
    pub reactions: Vec<ReactionForce>,
}

fn check_tension(name: &str, t: f64) -> Result<()> {
    if !t.is_finite() || t < 0.0 {
        return Err(BeltError::invalid(format!(
            "{name} tension must be finite and non-negative, got {t}"
        )));
    }
    Ok(())
}

/// Distribute the load case over a solved closed loop.
pub fn distribute(g: &BeltGeometry, case: &LoadCase) -> Result<LoadedForces> {
    let n = g.pulley_count();
    if !g.closed {
        return Err(BeltError::invalid(
            "torque balance needs a closed belt loop",
        ));
    }
    if case.torques.len() != n {
        return Err(BeltError::invalid(format!(
            "expected {n} torques, got {}",
            case.torques.len()
        )));
    }
    if case.unknown_torque >= n {
        return Err(BeltError::invalid(format!(
            "unknown torque index must be below {n}, got {}",
            case.unknown_torque
        )));
    }
    if let Some(bad) = case
        .torques
        .iter()
        .enumerate()
        .find(|&(i, t)| i != case.unknown_torque && !t.is_finite())
    {
        return Err(BeltError::invalid(format!(
            "torque on pulley {} is not finite",
            bad.0
        )));
    }
    match case.baseline {
        TensionBaseline::MinTension(t) => check_tension("minimum", t)?,
        TensionBaseline::Tensioner { pulley, tension } => {
            check_tension("tensioner", tension)?;
            if pulley >= n {
                return Err(BeltError::invalid(format!(
                    "tensioner index must be below {n}, got {pulley}"
                )));
            }
        }
    }

    // Belt force jump across each pulley.
    let jump = |i: usize, torque: f64| g.arcs[i].direction.sign() * torque / g.arcs[i].radius;

    let u = case.unknown_torque;
    let known: f64 = (0..n)
        .filter(|&i| i != u)
        .map(|i| jump(i, case.torques[i]))
        .sum();
    let mut torques = case.torques.clone();
    torques[u] = -g.arcs[u].direction.sign() * g.arcs[u].radius * known;

    let mut spans = vec![0.0; n];
    for i in 1..n {
        spans[i] = spans[i - 1] - jump(i, torques[i]);
    }

    let offset = match case.baseline {
        TensionBaseline::MinTension(t) => t - spans.iter().copied().fold(f64::INFINITY, f64::min),
        TensionBaseline::Tensioner { pulley, tension } => {
            tension - spans[pulley] - jump(pulley, torques[pulley]) / 2.0
        }
    };
    for t in &mut spans {
        *t += offset;
    }

    if let Some((span, &tension)) = spans
        .iter()
        .enumerate()
        .find(|&(_, &t)| t < -FEAS_EPS)
    {
        return Err(BeltError::SlackSpan { span, tension });
    }

    tracing::debug!(
        unknown = u,
        solved_torque = torques[u],
        min_span = spans.iter().copied().fold(f64::INFINITY, f64::min),
        "load distributed"
    );

    let reactions = reactions_from_spans(g, &spans);
    Ok(LoadedForces {
        torques,
        span_tensions: spans,
        reactions,
    })
}
