//! Ordered belt path and length aggregation.
//!
//! The path alternates arcs and segments: `arc0, seg0, arc1, seg1, …`. A closed
//! loop ends with the segment returning to pulley 0; an open chain ends with the
//! last pulley's (zero-length) arc. Colour indices follow path order.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::tangent::TangentSegment;
use super::wrap::WrapArc;

/// Geometry carried by one path element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathGeometry {
    Arc(WrapArc),
    Segment(TangentSegment),
}

/// One drawable piece of the belt, tagged for a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    pub color_index: usize,
    pub geometry: PathGeometry,
}

impl PathElement {
    pub fn length(&self) -> f64 {
        match &self.geometry {
            PathGeometry::Arc(a) => a.arc_length,
            PathGeometry::Segment(s) => s.length,
        }
    }

    pub fn start_point(&self) -> Vector2<f64> {
        match &self.geometry {
            PathGeometry::Arc(a) => a.start_point(),
            PathGeometry::Segment(s) => s.start,
        }
    }

    pub fn end_point(&self) -> Vector2<f64> {
        match &self.geometry {
            PathGeometry::Arc(a) => a.end_point(),
            PathGeometry::Segment(s) => s.end,
        }
    }
}

/// Evenly spaced hue in `[0, 1)` for `color_index` out of `count` elements.
#[inline]
pub fn hue_for(color_index: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        (color_index % count) as f64 / count as f64
    }
}

/// Immutable result of one solve.
///
/// Invariants:
/// - `arcs.len()` equals the pulley count; `arcs[i].pulley == i`.
/// - `segments.len()` is `n` (closed) or `n − 1` (open); `segments[i].from == i`.
/// - `total_length` is the sum of every element length in `path`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeltGeometry {
    pub closed: bool,
    pub segments: Vec<TangentSegment>,
    pub arcs: Vec<WrapArc>,
    pub path: Vec<PathElement>,
    pub total_length: f64,
}

impl BeltGeometry {
    /// Interleave arcs and segments in path order and sum their lengths.
    pub fn assemble(closed: bool, arcs: Vec<WrapArc>, segments: Vec<TangentSegment>) -> Self {
        let mut path = Vec::with_capacity(arcs.len() + segments.len());
        for (i, arc) in arcs.iter().enumerate() {
            path.push(PathElement {
                color_index: path.len(),
                geometry: PathGeometry::Arc(*arc),
            });
            if let Some(seg) = segments.get(i) {
                path.push(PathElement {
                    color_index: path.len(),
                    geometry: PathGeometry::Segment(*seg),
                });
            }
        }
        // Sum in path order.
        let total_length = path.iter().map(PathElement::length).sum();
        Self {
            closed,
            segments,
            arcs,
            path,
            total_length,
        }
    }

    #[inline]
    pub fn pulley_count(&self) -> usize {
        self.arcs.len()
    }

    /// Sum of straight span lengths.
    pub fn tangent_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Sum of wrap arc lengths.
    pub fn wrap_length(&self) -> f64 {
        self.arcs.iter().map(|a| a.arc_length).sum()
    }

    /// Segment arriving at pulley `i`, if any.
    pub fn incoming(&self, i: usize) -> Option<&TangentSegment> {
        let n = self.pulley_count();
        if i >= n {
            return None;
        }
        if self.closed {
            self.segments.get((i + n - 1) % n)
        } else if i > 0 {
            self.segments.get(i - 1)
        } else {
            None
        }
    }

    /// Segment leaving pulley `i`, if any.
    pub fn outgoing(&self, i: usize) -> Option<&TangentSegment> {
        self.segments.get(i)
    }

    /// Incoming and outgoing contact points on pulley `i` (free ends repeat
    /// their single contact).
    pub fn contact_points(&self, i: usize) -> Option<(Vector2<f64>, Vector2<f64>)> {
        let arc = self.arcs.get(i)?;
        Some((arc.start_point(), arc.end_point()))
    }
}
