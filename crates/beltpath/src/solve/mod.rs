//! Pure belt geometry pipeline: tangents → wraps → ordered path.
//!
//! Purpose
//! - `solve` turns an ordered pulley list into an immutable `BeltGeometry`.
//!   It holds no state; caching lives on `BeltPath`.
//!
//! Conventions
//! - Pulley `i` connects to pulley `i + 1`; a closed loop also connects the
//!   last pulley back to pulley 0.
//! - Free ends of an open chain get a zero-length arc at their single contact,
//!   so they contribute nothing to the length but keep one arc per pulley.

mod path;
mod tangent;
mod wrap;

pub use path::{hue_for, BeltGeometry, PathElement, PathGeometry};
pub use tangent::{
    contact_angle, contact_side, solve_tangent, EndpointRole, TangentKind, TangentSegment,
};
pub use wrap::{normalize_angle, WrapArc};

use crate::cfg::SolverCfg;
use crate::error::{BeltError, Result};
use crate::pulley::Pulley;

/// Solve the full belt geometry for `pulleys` in order.
///
/// Errors
/// - `InvalidParameter` for fewer than two pulleys.
/// - `GeometryInfeasible` for the first consecutive pair without a tangent.
pub fn solve(pulleys: &[Pulley], closed: bool, cfg: &SolverCfg) -> Result<BeltGeometry> {
    let n = pulleys.len();
    if n < 2 {
        return Err(BeltError::invalid(format!(
            "a belt needs at least two pulleys, got {n}"
        )));
    }
    let spans = if closed { n } else { n - 1 };
    let segments = (0..spans)
        .map(|i| {
            let j = (i + 1) % n;
            solve_tangent(i, &pulleys[i], j, &pulleys[j], cfg)
        })
        .collect::<Result<Vec<_>>>()?;

    let arcs: Vec<WrapArc> = (0..n)
        .map(|i| {
            let incoming = if closed {
                Some(&segments[(i + n - 1) % n])
            } else if i > 0 {
                Some(&segments[i - 1])
            } else {
                None
            };
            let outgoing = segments.get(i);
            let p = &pulleys[i];
            match (incoming, outgoing) {
                (Some(sin), Some(sout)) => {
                    WrapArc::between(i, p, sin.end_angle, sout.start_angle, cfg.eps_angle)
                }
                (Some(sin), None) => WrapArc::free_end(i, p, sin.end_angle),
                (None, Some(sout)) => WrapArc::free_end(i, p, sout.start_angle),
                (None, None) => unreachable!("every pulley touches at least one span"),
            }
        })
        .collect();

    let geometry = BeltGeometry::assemble(closed, arcs, segments);
    debug_assert!(geometry.total_length.is_finite() && geometry.total_length > 0.0);
    tracing::debug!(
        pulleys = n,
        closed,
        total_length = geometry.total_length,
        "belt solved"
    );
    Ok(geometry)
}

#[cfg(test)]
mod tests;
