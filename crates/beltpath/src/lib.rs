//! Belt path geometry around arbitrary 2D pulley layouts.
//!
//! Pipeline
//! - `pulley`: immutable pulleys (radius, centre, rotation sense).
//! - `solve`: tangents between consecutive pulleys, wrap arcs, ordered path
//!   and total length, as one immutable `BeltGeometry`.
//! - `belt`: `BeltPath` owns the route and caches the last solve.
//! - `force`, `load`: axle reactions under uniform or torque-balanced tension.
//! - `tensioner`: fit a swing-arm pulley to a target belt length.
//!
//! Units are the caller's; keep one length unit and one force unit per belt.

pub mod belt;
pub mod cfg;
pub mod error;
pub mod force;
pub mod load;
pub mod pulley;
pub mod solve;
pub mod tensioner;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use belt::BeltPath;
pub use cfg::SolverCfg;
pub use error::{BeltError, Result};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::belt::BeltPath;
    pub use crate::cfg::SolverCfg;
    pub use crate::error::{BeltError, Result};
    pub use crate::force::ReactionForce;
    pub use crate::load::{LoadCase, LoadedForces, TensionBaseline};
    pub use crate::pulley::{teeth_to_radius, Direction, Pulley};
    pub use crate::solve::{
        hue_for, BeltGeometry, PathElement, PathGeometry, TangentKind, TangentSegment, WrapArc,
    };
    pub use crate::tensioner::{fit_tensioner, FitCfg, SwingArm, TensionerFit};
    pub use nalgebra::Vector2 as Vec2;
}
