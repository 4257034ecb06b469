// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polylines with per-vertex curve intent
//!
//! Member boundaries, void loops and inclusion lines are ordered point chains
//! where each vertex records how the segment arriving at it should be
//! rendered. An arc marker tags intent only; no arc geometry is computed
//! here.

use nalgebra::Point3;

/// How the segment arriving at a vertex is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveKind {
    /// Straight chord.
    #[default]
    Straight,
    /// Arc through the vertex; the renderer decides the actual curve.
    Arc,
}

impl CurveKind {
    /// Map a parsed arc flag to a curve kind.
    #[inline]
    pub fn from_arc_flag(arc: bool) -> Self {
        if arc {
            CurveKind::Arc
        } else {
            CurveKind::Straight
        }
    }
}

/// An ordered point chain with parallel curve kinds, open or closed.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    /// Chain vertices in order.
    pub points: Vec<Point3<f64>>,
    /// Curve kind per vertex, same length as `points`.
    pub kinds: Vec<CurveKind>,
    /// Closed loops connect the last vertex back to the first.
    pub closed: bool,
}

impl Polyline {
    /// Open chain from points and parallel arc flags.
    pub fn open(points: Vec<Point3<f64>>, kinds: Vec<CurveKind>) -> Self {
        debug_assert_eq!(points.len(), kinds.len());
        Self {
            points,
            kinds,
            closed: false,
        }
    }

    /// Closed loop from points and parallel arc flags.
    pub fn closed(points: Vec<Point3<f64>>, kinds: Vec<CurveKind>) -> Self {
        debug_assert_eq!(points.len(), kinds.len());
        Self {
            points,
            kinds,
            closed: true,
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the chain has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if any vertex carries arc intent.
    pub fn has_arcs(&self) -> bool {
        self.kinds.contains(&CurveKind::Arc)
    }

    /// Total chord length of the chain (arcs measured as chords).
    pub fn chord_length(&self) -> f64 {
        let mut length: f64 = self
            .points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum();
        if self.closed && self.points.len() > 2 {
            length += (self.points[0] - self.points[self.points.len() - 1]).norm();
        }
        length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_open_chord_length() {
        let kinds = vec![CurveKind::Straight; 4];
        let chain = Polyline::open(unit_square(), kinds);
        assert!(!chain.closed);
        assert!((chain.chord_length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_closed_chord_length() {
        let kinds = vec![CurveKind::Straight; 4];
        let ring = Polyline::closed(unit_square(), kinds);
        assert!(ring.closed);
        assert!((ring.chord_length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_arc_intent() {
        let kinds = vec![
            CurveKind::Straight,
            CurveKind::from_arc_flag(true),
            CurveKind::Straight,
            CurveKind::Straight,
        ];
        let chain = Polyline::closed(unit_square(), kinds);
        assert!(chain.has_arcs());
        assert_eq!(chain.kinds[1], CurveKind::Arc);
    }
}
