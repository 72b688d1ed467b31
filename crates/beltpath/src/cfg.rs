//! Solver tolerances and defaults.
//!
//! Policy
//! - Defaults are fixed constants; callers override per belt through
//!   `SolverCfg` rather than per call.

use serde::{Deserialize, Serialize};

/// Absolute slack on span tensions before a span counts as slack.
pub const FEAS_EPS: f64 = 1e-9;
/// Relative tolerance for tangent feasibility, scaled by the pair's size.
pub const TANGENT_EPS: f64 = 1e-12;
/// Wraps this close to a full turn are treated as straight-through (0).
pub const ANGLE_EPS: f64 = 1e-12;
/// Straight segments per full circle when sampling arcs for rendering.
pub const CIRCLE_RESOLUTION: usize = 50;

/// Solver configuration (tolerances and optional clearance rule).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverCfg {
    /// Relative slack on tangent feasibility: `d` must exceed the offset radius
    /// by more than `eps_feas * max(d, r_a + r_b)`.
    pub eps_feas: f64,
    /// Wrap angles within this of 2π collapse to 0.
    pub eps_angle: f64,
    /// Optional clearance factor: centres must be at least
    /// `min_spacing * (r_a + r_b)` apart. `None` only enforces tangent existence.
    pub min_spacing: Option<f64>,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            eps_feas: TANGENT_EPS,
            eps_angle: ANGLE_EPS,
            min_spacing: None,
        }
    }
}

impl SolverCfg {
    /// Physical clearance of 1% beyond touching pulleys, as used for real drives.
    pub fn with_clearance() -> Self {
        Self {
            min_spacing: Some(1.01),
            ..Self::default()
        }
    }
}
