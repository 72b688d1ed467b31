//! Swing-arm tensioner fitting.
//!
//! A pulley of the belt sits on an arm of fixed length pivoting about a point.
//! `fit_tensioner` bisects the arm angle inside a caller-supplied bracket until
//! the belt reaches a target length (e.g. `pitch × tooth count` of a stock belt).

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::belt::BeltPath;
use crate::error::{BeltError, Result};

/// Pivoting arm carrying a pulley centre at `pivot + length · (cos θ, sin θ)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwingArm {
    pub pivot: Vector2<f64>,
    pub length: f64,
}

impl SwingArm {
    #[inline]
    pub fn position(&self, angle: f64) -> Vector2<f64> {
        self.pivot + Vector2::new(angle.cos(), angle.sin()) * self.length
    }
}

/// Bisection settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitCfg {
    /// Accepted `|length − target|`.
    pub accuracy: f64,
    pub max_iterations: usize,
}

impl Default for FitCfg {
    fn default() -> Self {
        Self {
            accuracy: 1e-6,
            max_iterations: 100,
        }
    }
}

/// Converged arm angle and the resulting belt length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TensionerFit {
    pub angle: f64,
    pub length: f64,
    pub iterations: usize,
}

/// Fit the arm angle of pulley `index` within `bounds` so the belt length hits
/// `target_length`. On success the belt holds the fitted pulley; on failure it
/// holds the last evaluated position.
pub fn fit_tensioner(
    belt: &mut BeltPath,
    index: usize,
    arm: &SwingArm,
    bounds: (f64, f64),
    target_length: f64,
    cfg: &FitCfg,
) -> Result<TensionerFit> {
    if !target_length.is_finite() || target_length <= 0.0 {
        return Err(BeltError::invalid(format!(
            "target length must be positive, got {target_length}"
        )));
    }
    if !arm.length.is_finite() || arm.length <= 0.0 {
        return Err(BeltError::invalid(format!(
            "arm length must be positive, got {}",
            arm.length
        )));
    }
    if !cfg.accuracy.is_finite() || cfg.accuracy <= 0.0 {
        return Err(BeltError::invalid(format!(
            "fit accuracy must be positive, got {}",
            cfg.accuracy
        )));
    }
    let base = *belt.pulley(index).ok_or_else(|| {
        BeltError::invalid(format!(
            "tensioner index must be below {}, got {index}",
            belt.len()
        ))
    })?;

    // Residual (length − target) with the pulley placed at `angle`.
    let mut residual_at = |angle: f64| -> Result<f64> {
        let c = arm.position(angle);
        belt.replace_pulley(index, base.moved_to(c.x, c.y)?)?;
        Ok(belt.compute()? - target_length)
    };

    let (mut lo, mut hi) = bounds;
    let mut r_lo = residual_at(lo)?;
    if r_lo.abs() <= cfg.accuracy {
        return Ok(TensionerFit {
            angle: lo,
            length: target_length + r_lo,
            iterations: 0,
        });
    }
    let r_hi = residual_at(hi)?;
    if r_hi.abs() <= cfg.accuracy {
        return Ok(TensionerFit {
            angle: hi,
            length: target_length + r_hi,
            iterations: 0,
        });
    }
    if r_lo.signum() == r_hi.signum() {
        return Err(BeltError::invalid(format!(
            "target length {target_length} is outside [{}, {}] reachable in the bracket",
            target_length + r_lo.min(r_hi),
            target_length + r_lo.max(r_hi)
        )));
    }

    let mut last = r_hi;
    for iteration in 1..=cfg.max_iterations {
        let mid = 0.5 * (lo + hi);
        let r_mid = residual_at(mid)?;
        tracing::trace!(iteration, angle = mid, residual = r_mid, "tensioner bisection");
        if r_mid.abs() <= cfg.accuracy {
            tracing::debug!(iterations = iteration, angle = mid, "tensioner fitted");
            return Ok(TensionerFit {
                angle: mid,
                length: target_length + r_mid,
                iterations: iteration,
            });
        }
        if r_mid.signum() == r_lo.signum() {
            lo = mid;
            r_lo = r_mid;
        } else {
            hi = mid;
        }
        last = r_mid;
    }
    Err(BeltError::NoConvergence {
        iterations: cfg.max_iterations,
        residual: last,
    })
}
