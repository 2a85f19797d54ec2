// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Concrete edge geometry produced by the bundled loader

use super::{EdgeGeometry, GeomType, Point};
use crate::error::SampleError;
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Subdivision levels before a Bézier is declared non-convergent
const MAX_SUBDIVISION_DEPTH: u32 = 24;

/// Upper bound on the chord count of one sampled arc
const MAX_ARC_SEGMENTS: usize = 1 << 20;

/// Tolerance for accepting an arc basis as orthonormal
const BASIS_EPSILON: f64 = 1e-6;

/// Edge geometry
#[derive(Debug, Clone, PartialEq)]
pub enum CurveEdge {
    Line {
        start: Point,
        end: Point,
    },
    /// Circular arc `center + r·(cos t·x_dir + sin t·y_dir)` for t in
    /// `start_angle..end_angle`. A negative sweep runs clockwise.
    Arc {
        center: Point,
        x_dir: Vector3<f64>,
        y_dir: Vector3<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Bezier {
        control_points: Vec<Point>,
    },
}

impl CurveEdge {
    pub fn line(start: Point, end: Point) -> Self {
        Self::Line { start, end }
    }

    /// Arc in the plane of `x_dir`/`y_dir`; the basis is orthonormalized
    pub fn arc(
        center: Point,
        x_dir: Vector3<f64>,
        y_dir: Vector3<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        let x = x_dir.try_normalize(f64::EPSILON).unwrap_or(x_dir);
        let y = (y_dir - x * x.dot(&y_dir))
            .try_normalize(f64::EPSILON)
            .unwrap_or(y_dir);
        Self::Arc {
            center,
            x_dir: x,
            y_dir: y,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Arc parallel to the XY plane
    pub fn arc_xy(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self::arc(
            center,
            Vector3::x(),
            Vector3::y(),
            radius,
            start_angle,
            end_angle,
        )
    }

    pub fn bezier(control_points: Vec<Point>) -> Self {
        Self::Bezier { control_points }
    }

    fn arc_point(center: &Point, x: &Vector3<f64>, y: &Vector3<f64>, radius: f64, t: f64) -> Point {
        center + (x * t.cos() + y * t.sin()) * radius
    }
}

impl EdgeGeometry for CurveEdge {
    fn start_point(&self) -> Point {
        match self {
            Self::Line { start, .. } => *start,
            Self::Arc {
                center,
                x_dir,
                y_dir,
                radius,
                start_angle,
                ..
            } => Self::arc_point(center, x_dir, y_dir, *radius, *start_angle),
            Self::Bezier { control_points } => {
                control_points.first().copied().unwrap_or_else(Point::origin)
            }
        }
    }

    fn end_point(&self) -> Point {
        match self {
            Self::Line { end, .. } => *end,
            Self::Arc {
                center,
                x_dir,
                y_dir,
                radius,
                end_angle,
                ..
            } => Self::arc_point(center, x_dir, y_dir, *radius, *end_angle),
            Self::Bezier { control_points } => {
                control_points.last().copied().unwrap_or_else(Point::origin)
            }
        }
    }

    fn geom_type(&self) -> GeomType {
        match self {
            Self::Line { .. } => GeomType::Line,
            Self::Arc { .. } | Self::Bezier { .. } => GeomType::Curve,
        }
    }

    fn sample(&self, deflection: f64) -> Result<Vec<Point>, SampleError> {
        if !(deflection.is_finite() && deflection > 0.0) {
            return Err(SampleError::BadDeflection(deflection));
        }

        let points = match self {
            Self::Line { start, end } => vec![*start, *end],
            Self::Arc {
                center,
                x_dir,
                y_dir,
                radius,
                start_angle,
                end_angle,
            } => sample_arc(center, x_dir, y_dir, *radius, *start_angle, *end_angle, deflection)?,
            Self::Bezier { control_points } => sample_bezier(control_points, deflection)?,
        };

        if points.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(SampleError::NonFinite);
        }
        Ok(points)
    }
}

fn sample_arc(
    center: &Point,
    x: &Vector3<f64>,
    y: &Vector3<f64>,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    deflection: f64,
) -> Result<Vec<Point>, SampleError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(SampleError::InvalidCurve(format!("arc radius {radius}")));
    }
    if !(start_angle.is_finite() && end_angle.is_finite()) {
        return Err(SampleError::InvalidCurve("non-finite arc angle".to_string()));
    }
    let orthonormal = (x.norm() - 1.0).abs() < BASIS_EPSILON
        && (y.norm() - 1.0).abs() < BASIS_EPSILON
        && x.dot(y).abs() < BASIS_EPSILON;
    if !orthonormal {
        return Err(SampleError::InvalidCurve("degenerate arc plane".to_string()));
    }

    // Sagitta of a chord spanning `step` radians equals the deflection
    let ratio = (1.0 - deflection / radius).clamp(-1.0, 1.0);
    let max_step = (2.0 * ratio.acos()).clamp(f64::EPSILON, PI / 2.0);
    let sweep = end_angle - start_angle;
    let needed = (sweep.abs() / max_step).ceil();
    if needed > MAX_ARC_SEGMENTS as f64 {
        return Err(SampleError::SegmentLimit(MAX_ARC_SEGMENTS));
    }
    let segments = (needed as usize).max(2);

    Ok((0..=segments)
        .map(|i| {
            let t = start_angle + sweep * (i as f64 / segments as f64);
            CurveEdge::arc_point(center, x, y, radius, t)
        })
        .collect())
}

fn sample_bezier(control_points: &[Point], deflection: f64) -> Result<Vec<Point>, SampleError> {
    if control_points.len() < 2 {
        return Err(SampleError::InvalidCurve(format!(
            "bezier needs at least 2 control points, got {}",
            control_points.len()
        )));
    }
    if control_points
        .iter()
        .any(|p| !p.coords.iter().all(|c| c.is_finite()))
    {
        return Err(SampleError::InvalidCurve("non-finite control point".to_string()));
    }

    let mut out = vec![control_points[0]];
    subdivide(control_points, deflection, 0, &mut out)?;
    Ok(out)
}

/// Emit the far end of each flat piece; the near end is already in `out`
fn subdivide(
    ctrl: &[Point],
    deflection: f64,
    depth: u32,
    out: &mut Vec<Point>,
) -> Result<(), SampleError> {
    let first = ctrl[0];
    let last = ctrl[ctrl.len() - 1];
    let flat = ctrl[1..ctrl.len() - 1]
        .iter()
        .all(|p| distance_to_segment(p, &first, &last) <= deflection);

    if flat {
        out.push(last);
        return Ok(());
    }
    if depth >= MAX_SUBDIVISION_DEPTH {
        return Err(SampleError::NotConverged(MAX_SUBDIVISION_DEPTH));
    }

    let (left, right) = split_half(ctrl);
    subdivide(&left, deflection, depth + 1, out)?;
    subdivide(&right, deflection, depth + 1, out)
}

/// De Casteljau split at t = 0.5
fn split_half(ctrl: &[Point]) -> (Vec<Point>, Vec<Point>) {
    let n = ctrl.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    let mut level = ctrl.to_vec();

    left.push(level[0]);
    right.push(level[n - 1]);
    for _ in 1..n {
        level = level
            .windows(2)
            .map(|w| Point::from((w[0].coords + w[1].coords) * 0.5))
            .collect();
        left.push(level[0]);
        right.push(level[level.len() - 1]);
    }
    right.reverse();
    (left, right)
}

fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_sample_is_endpoints() {
        let edge = CurveEdge::line(Point::origin(), Point::new(1.0, 2.0, 3.0));
        assert_eq!(edge.geom_type(), GeomType::Line);
        assert_eq!(
            edge.sample(0.1).unwrap(),
            vec![Point::origin(), Point::new(1.0, 2.0, 3.0)]
        );
    }

    #[test]
    fn test_arc_endpoints_and_deviation() {
        let arc = CurveEdge::arc_xy(Point::origin(), 10.0, 0.0, PI / 2.0);
        assert_relative_eq!(arc.start_point(), Point::new(10.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(arc.end_point(), Point::new(0.0, 10.0, 0.0), epsilon = 1e-12);

        let points = arc.sample(0.1).unwrap();
        assert!(points.len() > 2);
        assert_relative_eq!(points[0], arc.start_point(), epsilon = 1e-12);
        assert_relative_eq!(points[points.len() - 1], arc.end_point(), epsilon = 1e-12);

        // Chord midpoints stay within the deflection of the circle
        for w in points.windows(2) {
            let mid = Point::from((w[0].coords + w[1].coords) * 0.5);
            assert!(10.0 - mid.coords.norm() <= 0.1 + 1e-9);
        }
    }

    #[test]
    fn test_clockwise_arc_runs_backwards() {
        let arc = CurveEdge::arc_xy(Point::origin(), 1.0, PI / 2.0, 0.0);
        let points = arc.sample(0.01).unwrap();
        assert!(points[0].y > points[1].y);
        assert_relative_eq!(points[points.len() - 1], Point::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_arc_fails() {
        let arc = CurveEdge::arc_xy(Point::origin(), 0.0, 0.0, PI);
        assert!(matches!(arc.sample(0.1), Err(SampleError::InvalidCurve(_))));

        let arc = CurveEdge::arc(
            Point::origin(),
            Vector3::x(),
            Vector3::x(),
            1.0,
            0.0,
            PI,
        );
        assert!(arc.sample(0.1).is_err());
    }

    #[test]
    fn test_arc_segment_limit() {
        // Deflection below f64 resolution at this radius
        let arc = CurveEdge::arc_xy(Point::origin(), 1e6, 0.0, PI / 2.0);
        assert_eq!(
            arc.sample(1e-11),
            Err(SampleError::SegmentLimit(MAX_ARC_SEGMENTS))
        );

        let sweep = CurveEdge::arc_xy(Point::origin(), 1.0, 0.0, 1e12);
        assert!(matches!(sweep.sample(0.1), Err(SampleError::SegmentLimit(_))));

        // Large but reasonable arcs are unaffected
        assert!(arc.sample(0.1).unwrap().len() < MAX_ARC_SEGMENTS);
    }

    #[test]
    fn test_bezier_endpoints_and_flatness() {
        let curve = CurveEdge::bezier(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.0, 5.0, 0.0),
            Point::new(5.0, 5.0, 0.0),
            Point::new(5.0, 0.0, 0.0),
        ]);
        let points = curve.sample(0.05).unwrap();
        assert!(points.len() > 4);
        assert_eq!(points[0], Point::origin());
        assert_eq!(points[points.len() - 1], Point::new(5.0, 0.0, 0.0));
        // Monotonic in x for this symmetric hump
        assert!(points.windows(2).all(|w| w[1].x >= w[0].x));
    }

    #[test]
    fn test_straight_bezier_is_two_points() {
        let curve = CurveEdge::bezier(vec![Point::origin(), Point::new(1.0, 1.0, 0.0)]);
        assert_eq!(curve.sample(0.1).unwrap().len(), 2);
    }

    #[test]
    fn test_bezier_failures() {
        let single = CurveEdge::bezier(vec![Point::origin()]);
        assert!(matches!(single.sample(0.1), Err(SampleError::InvalidCurve(_))));

        let nan = CurveEdge::bezier(vec![Point::origin(), Point::new(f64::NAN, 0.0, 0.0)]);
        assert!(nan.sample(0.1).is_err());

        let hump = CurveEdge::bezier(vec![
            Point::origin(),
            Point::new(0.5, 1.0e6, 0.0),
            Point::new(1.0, 0.0, 0.0),
        ]);
        assert_eq!(hump.sample(1e-12), Err(SampleError::NotConverged(MAX_SUBDIVISION_DEPTH)));
    }

    #[test]
    fn test_bad_deflection() {
        let edge = CurveEdge::line(Point::origin(), Point::new(1.0, 0.0, 0.0));
        assert_eq!(edge.sample(0.0), Err(SampleError::BadDeflection(0.0)));
    }
}
