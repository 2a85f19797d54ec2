// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for wire reconstruction

use thiserror::Error;

/// Whole-input failures that abort reconstruction
#[derive(Debug, Error)]
pub enum WireError {
    #[error("unsupported format '{extension}' (supported: {supported})")]
    UnsupportedFormat {
        extension: String,
        supported: &'static str,
    },

    #[error("no geometry found")]
    NoGeometryFound,

    #[error("invalid tolerance {name} = {value}: must be finite and positive")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("coordinate {value} does not fit a quantization key at {decimals} decimals")]
    CoordinateOutOfRange { value: f64, decimals: u32 },

    #[error("invalid value '{value}' for {key}")]
    EnvOverride { key: &'static str, value: String },

    #[error("failed to parse edge document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WireError>;

/// Per-edge discretization failure. Never aborts a wire.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("deflection {0} must be finite and positive")]
    BadDeflection(f64),

    #[error("invalid curve parameters: {0}")]
    InvalidCurve(String),

    #[error("subdivision did not converge within {0} levels")]
    NotConverged(u32),

    #[error("sampling needs more than {0} segments")]
    SegmentLimit(usize),

    #[error("sampler produced a non-finite point")]
    NonFinite,
}
