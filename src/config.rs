// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reconstruction tolerances and output settings

use crate::error::{Result, WireError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`WireConfig::load`]
pub const CONFIG_FILE: &str = "wirecode.toml";

/// Tolerances used by every pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Decimal places kept when quantizing endpoints for adjacency
    pub quantize_decimals: u32,
    /// Chordal deviation allowed when sampling curves
    pub deflection: f64,
    /// Maximum gap for two same-kind edges to share a vertex in a run
    pub join_tolerance: f64,
    /// Line segments shorter than this are not emitted
    pub min_segment_length: f64,
    /// Decimal places used when printing coordinates
    pub coordinate_precision: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            quantize_decimals: 4,
            deflection: 0.1,
            join_tolerance: 1e-4,
            min_segment_length: 1e-5,
            coordinate_precision: 3,
        }
    }
}

impl WireConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: WireConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `wirecode.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `WIRECODE_*` overrides looked up through `lookup`.
    ///
    /// A set but unparsable value is an error rather than a silent fallback.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_override(&lookup, "WIRECODE_DEFLECTION")? {
            self.deflection = value;
        }
        if let Some(value) = parse_override(&lookup, "WIRECODE_JOIN_TOLERANCE")? {
            self.join_tolerance = value;
        }
        if let Some(value) = parse_override(&lookup, "WIRECODE_QUANTIZE_DECIMALS")? {
            self.quantize_decimals = value;
        }
        if let Some(value) = parse_override(&lookup, "WIRECODE_PRECISION")? {
            self.coordinate_precision = value;
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Reject tolerances that would make a stage meaningless
    pub fn validate(&self) -> Result<()> {
        check_positive("deflection", self.deflection)?;
        check_positive("join_tolerance", self.join_tolerance)?;
        check_positive("min_segment_length", self.min_segment_length)?;
        // 10^16 already exceeds f64 integer precision
        if self.quantize_decimals > 15 {
            return Err(WireError::InvalidTolerance {
                name: "quantize_decimals",
                value: self.quantize_decimals as f64,
            });
        }
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WireError::InvalidTolerance { name, value })
    }
}

fn parse_override<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(WireError::EnvOverride { key, value }),
    }
}
