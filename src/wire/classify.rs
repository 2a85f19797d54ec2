// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Segment classification and curve discretization

use super::report::SkippedEdge;
use crate::error::SampleError;
use crate::geometry::{EdgeGeometry, GeomType, OrientedEdge, Point};

/// One traversed edge reduced to its kind and ordered points
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEdge {
    pub index: usize,
    pub kind: GeomType,
    /// Empty when discretization failed
    pub points: Vec<Point>,
}

/// Classify a single oriented edge.
///
/// Lines are their two endpoints; curves are sampled at `deflection` and
/// must yield at least two points.
pub fn classify<E: EdgeGeometry>(
    edge: &OrientedEdge<'_, E>,
    deflection: f64,
) -> Result<ClassifiedEdge, SampleError> {
    let kind = edge.geom_type();
    let points = match kind {
        GeomType::Line => vec![edge.start(), edge.end()],
        GeomType::Curve => {
            let points = edge.sample(deflection)?;
            if points.len() < 2 {
                return Err(SampleError::InvalidCurve(format!(
                    "sampler returned {} point(s)",
                    points.len()
                )));
            }
            points
        }
    };

    Ok(ClassifiedEdge {
        index: edge.index,
        kind,
        points,
    })
}

/// Classify a whole chain, turning sampling failures into empty edges
pub fn classify_chain<E: EdgeGeometry>(
    chain: &[OrientedEdge<'_, E>],
    deflection: f64,
) -> (Vec<ClassifiedEdge>, Vec<SkippedEdge>) {
    let mut classified = Vec::with_capacity(chain.len());
    let mut skipped = Vec::new();

    for edge in chain {
        match classify(edge, deflection) {
            Ok(c) => classified.push(c),
            Err(err) => {
                tracing::warn!(edge = edge.index, error = %err, "curve discretization failed, skipping edge");
                skipped.push(SkippedEdge {
                    index: edge.index,
                    reason: err.to_string(),
                });
                // Keep the slot so the kind change still splits runs around it
                classified.push(ClassifiedEdge {
                    index: edge.index,
                    kind: edge.geom_type(),
                    points: Vec::new(),
                });
            }
        }
    }

    (classified, skipped)
}
