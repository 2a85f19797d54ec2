// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Edge interface consumed from geometry loaders

use super::Point;
use crate::error::SampleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometric classification of an edge. Every non-line type is a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeomType {
    Line,
    Curve,
}

impl fmt::Display for GeomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "LINE"),
            Self::Curve => write!(f, "CURVE"),
        }
    }
}

/// An unordered, unoriented edge handed over by a loader.
///
/// Implementations must be immutable: orientation is tracked by the caller
/// through [`OrientedEdge`].
pub trait EdgeGeometry {
    fn start_point(&self) -> Point;

    fn end_point(&self) -> Point;

    fn geom_type(&self) -> GeomType;

    /// Points from parametric start to end, within `deflection` of the true curve
    fn sample(&self, deflection: f64) -> Result<Vec<Point>, SampleError>;
}

impl<E: EdgeGeometry + ?Sized> EdgeGeometry for &E {
    fn start_point(&self) -> Point {
        (**self).start_point()
    }

    fn end_point(&self) -> Point {
        (**self).end_point()
    }

    fn geom_type(&self) -> GeomType {
        (**self).geom_type()
    }

    fn sample(&self, deflection: f64) -> Result<Vec<Point>, SampleError> {
        (**self).sample(deflection)
    }
}

/// A borrowed edge with a traversal direction
#[derive(Debug)]
pub struct OrientedEdge<'a, E> {
    pub edge: &'a E,
    /// Position of the edge in the loader's input order
    pub index: usize,
    pub reversed: bool,
}

impl<E> Clone for OrientedEdge<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for OrientedEdge<'_, E> {}

impl<'a, E: EdgeGeometry> OrientedEdge<'a, E> {
    pub fn forward(edge: &'a E, index: usize) -> Self {
        Self {
            edge,
            index,
            reversed: false,
        }
    }

    pub fn backward(edge: &'a E, index: usize) -> Self {
        Self {
            edge,
            index,
            reversed: true,
        }
    }

    pub fn start(&self) -> Point {
        if self.reversed {
            self.edge.end_point()
        } else {
            self.edge.start_point()
        }
    }

    pub fn end(&self) -> Point {
        if self.reversed {
            self.edge.start_point()
        } else {
            self.edge.end_point()
        }
    }

    pub fn geom_type(&self) -> GeomType {
        self.edge.geom_type()
    }

    /// Sample in traversal order
    pub fn sample(&self, deflection: f64) -> Result<Vec<Point>, SampleError> {
        let mut points = self.edge.sample(deflection)?;
        if self.reversed {
            points.reverse();
        }
        Ok(points)
    }
}
