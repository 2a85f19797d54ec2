// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point quantization for tolerance-based adjacency

use crate::error::{Result, WireError};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

pub type Point = Point3<f64>;

/// Canonical hashable form of a point after rounding.
///
/// Stores each coordinate as an integer count of `10^-decimals` units, so two
/// points share a key exactly when every coordinate rounds to the same value.
/// Points closer than the precision can still land in different cells when
/// they straddle a rounding boundary.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct QuantizedKey([i64; 3]);

impl QuantizedKey {
    pub fn coords(&self) -> [i64; 3] {
        self.0
    }
}

/// Scaled coordinates at or beyond this magnitude saturate the i64 cast
const KEY_LIMIT: f64 = i64::MAX as f64;

/// Rounds points to a fixed number of decimal places
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    decimals: u32,
    scale: f64,
}

impl Quantizer {
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals,
            scale: 10f64.powi(decimals as i32),
        }
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Quantize a point whose coordinates are known to be in range.
    ///
    /// Out-of-range or NaN coordinates saturate, so distinct points can
    /// collide. Use [`Quantizer::try_quantize`] for loaded geometry.
    pub fn quantize(&self, point: &Point) -> QuantizedKey {
        QuantizedKey([
            (point.x * self.scale).round() as i64,
            (point.y * self.scale).round() as i64,
            (point.z * self.scale).round() as i64,
        ])
    }

    /// Quantize, rejecting coordinates that do not fit an i64 cell index
    pub fn try_quantize(&self, point: &Point) -> Result<QuantizedKey> {
        let mut key = [0i64; 3];
        for (cell, &value) in key.iter_mut().zip(point.coords.iter()) {
            let scaled = (value * self.scale).round();
            if scaled.is_nan() || scaled.abs() >= KEY_LIMIT {
                return Err(WireError::CoordinateOutOfRange {
                    value,
                    decimals: self.decimals,
                });
            }
            *cell = scaled as i64;
        }
        Ok(QuantizedKey(key))
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(4)
    }
}

/// Quantize with the default precision of 4 decimal places
pub fn quantize(point: &Point) -> QuantizedKey {
    Quantizer::default().quantize(point)
}
