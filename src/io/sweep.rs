// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Pipe sweep code along a hand-picked point path

use crate::error::{Result, WireError};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Consecutive picks closer than this are treated as the same point
const DUPLICATE_PICK_TOLERANCE: f64 = 1e-5;

/// How the path interpolates its points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    Polyline,
    #[default]
    Spline,
}

impl fmt::Display for PathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polyline => write!(f, "polyline"),
            Self::Spline => write!(f, "spline"),
        }
    }
}

impl FromStr for PathMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "polyline" => Ok(Self::Polyline),
            "spline" => Ok(Self::Spline),
            other => Err(format!("unknown path mode '{other}' (expected polyline or spline)")),
        }
    }
}

/// Drop picks that repeat the previous point
pub fn dedup_picks(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        match out.last() {
            Some(last) if (p - last).norm() < DUPLICATE_PICK_TOLERANCE => {}
            _ => out.push(*p),
        }
    }
    out
}

/// Emit code that builds the path and sweeps a circle of `radius` along it,
/// with the profile placed normal to the path at its start.
pub fn format_sweep(points: &[Point], mode: PathMode, radius: f64) -> Result<String> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(WireError::InvalidTolerance {
            name: "radius",
            value: radius,
        });
    }
    let points = dedup_picks(points);
    if points.len() < 2 {
        return Err(WireError::NoGeometryFound);
    }

    let rows: Vec<String> = points
        .iter()
        .map(|p| format!("    ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z))
        .collect();

    Ok(format!(
        "path_points = [\n{rows}\n]\n\
         path = cq.Workplane().{mode}(path_points)\n\
         profile = cq.Wire.makeCircle({radius:.3})\n\
         path_w = path.wire()\n\
         p = path_w.positionAt(0)\n\
         xDir = path_w.tangentAt(0)\n\
         normal = path_w.normalAt(0)\n\
         plane = cq.Plane(origin=p, xDir=xDir, normal=normal)\n\
         profile = profile.move(plane.location)\n\
         sweep = cq.Workplane(profile).sweep(path)\n",
        rows = rows.join(",\n"),
    ))
}
