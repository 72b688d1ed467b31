//! Error taxonomy for belt construction and solving.
//!
//! - `InvalidParameter`: malformed caller input, raised at construction/call time.
//! - `GeometryInfeasible`: pulley placement admits no tangent of the required kind.
//! - `SlackSpan`, `NoConvergence`: load distribution and tensioner fitting failures.

use thiserror::Error;

/// Errors raised by the belt solver. Nothing is recovered silently; callers
/// either get a fully consistent result or one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BeltError {
    /// Malformed input (radius, direction, tension, pulley count, indices).
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    /// The tangent between two consecutive pulleys does not exist.
    #[error("pulleys {from} and {to} admit no tangent: {reason}")]
    GeometryInfeasible {
        from: usize,
        to: usize,
        reason: String,
    },

    /// A span would need negative tension to satisfy the load case.
    #[error("span {span} would carry {tension} tension (a belt cannot push)")]
    SlackSpan { span: usize, tension: f64 },

    /// Iterative fit did not reach the requested accuracy.
    #[error("no convergence after {iterations} iterations (residual {residual})")]
    NoConvergence { iterations: usize, residual: f64 },
}

impl BeltError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BeltError::InvalidParameter {
            reason: reason.into(),
        }
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, BeltError>;
