// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - points, edges and curve sampling

mod curve;
mod edge;
mod point;

pub use curve::CurveEdge;
pub use edge::{EdgeGeometry, GeomType, OrientedEdge};
pub use point::{quantize, Point, QuantizedKey, Quantizer};
