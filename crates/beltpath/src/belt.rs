//! Belt path: ordered pulleys, open/closed flag, and one cached solve.
//!
//! The cache is keyed by a snapshot of the inputs (pulleys, closed flag,
//! solver config) and reused only while that snapshot is structurally equal
//! to the current inputs. All mutation goes through `&mut self`, so a cached
//! geometry is never rewritten while a reader holds it.

use crate::cfg::SolverCfg;
use crate::error::{BeltError, Result};
use crate::force::{reaction_forces, ReactionForce};
use crate::load::{distribute, LoadCase, LoadedForces};
use crate::pulley::Pulley;
use crate::solve::{solve, BeltGeometry};

#[derive(Clone, Debug)]
struct Cached {
    pulleys: Vec<Pulley>,
    closed: bool,
    cfg: SolverCfg,
    geometry: BeltGeometry,
}

impl Cached {
    fn matches(&self, belt: &BeltPath) -> bool {
        self.closed == belt.closed && self.cfg == belt.cfg && self.pulleys == belt.pulleys
    }
}

/// Ordered belt route over at least two pulleys.
#[derive(Clone, Debug)]
pub struct BeltPath {
    pulleys: Vec<Pulley>,
    closed: bool,
    cfg: SolverCfg,
    cache: Option<Cached>,
}

impl BeltPath {
    pub fn new(pulleys: Vec<Pulley>, closed: bool) -> Result<Self> {
        if pulleys.len() < 2 {
            return Err(BeltError::invalid(format!(
                "a belt needs at least two pulleys, got {}",
                pulleys.len()
            )));
        }
        Ok(Self {
            pulleys,
            closed,
            cfg: SolverCfg::default(),
            cache: None,
        })
    }

    /// Chain with two free ends.
    pub fn open(pulleys: Vec<Pulley>) -> Result<Self> {
        Self::new(pulleys, false)
    }

    /// Endless loop; the last pulley connects back to the first.
    pub fn closed(pulleys: Vec<Pulley>) -> Result<Self> {
        Self::new(pulleys, true)
    }

    pub fn with_cfg(mut self, cfg: SolverCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn pulleys(&self) -> &[Pulley] {
        &self.pulleys
    }
    #[inline]
    pub fn pulley(&self, i: usize) -> Option<&Pulley> {
        self.pulleys.get(i)
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.pulleys.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pulleys.is_empty()
    }
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    #[inline]
    pub fn cfg(&self) -> &SolverCfg {
        &self.cfg
    }

    /// Swap pulley `i` for `pulley`; the next solve sees the new layout.
    pub fn replace_pulley(&mut self, i: usize, pulley: Pulley) -> Result<()> {
        let n = self.pulleys.len();
        let slot = self.pulleys.get_mut(i).ok_or_else(|| {
            BeltError::invalid(format!("pulley index must be below {n}, got {i}"))
        })?;
        *slot = pulley;
        Ok(())
    }

    /// Cached geometry if it still matches the current inputs.
    pub fn cached(&self) -> Option<&BeltGeometry> {
        self.cache
            .as_ref()
            .filter(|c| c.matches(self))
            .map(|c| &c.geometry)
    }

    /// Solved geometry, recomputed only when the inputs changed.
    pub fn geometry(&mut self) -> Result<&BeltGeometry> {
        let cached = match self.cache.take().filter(|c| c.matches(self)) {
            Some(c) => c,
            None => {
                tracing::debug!(pulleys = self.pulleys.len(), "geometry cache miss");
                Cached {
                    geometry: solve(&self.pulleys, self.closed, &self.cfg)?,
                    pulleys: self.pulleys.clone(),
                    closed: self.closed,
                    cfg: self.cfg,
                }
            }
        };
        Ok(&self.cache.insert(cached).geometry)
    }

    /// Total belt length.
    pub fn compute(&mut self) -> Result<f64> {
        Ok(self.geometry()?.total_length)
    }

    /// Axle reactions under a uniform belt tension.
    pub fn reaction_forces(&mut self, tension: f64) -> Result<Vec<ReactionForce>> {
        reaction_forces(self.geometry()?, tension)
    }

    /// Torque-balanced span tensions and axle reactions (closed loops only).
    pub fn loaded_forces(&mut self, case: &LoadCase) -> Result<LoadedForces> {
        distribute(self.geometry()?, case)
    }
}
