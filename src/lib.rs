// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wirecode
//!
//! Rebuilds a single ordered wire from the loose edges of a CAD export and
//! emits it as a compact CadQuery `assembleEdges` block. Endpoints are matched
//! by quantized position, curves are linearized for ordering and re-emitted
//! as splines, and consecutive same-type edges are coalesced into runs.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod reconstruct;
pub mod wire;

pub use config::WireConfig;
pub use error::{Result, SampleError, WireError};
pub use geometry::{CurveEdge, EdgeGeometry, GeomType, Point};
pub use reconstruct::{WireOutput, WireReconstructor};
pub use wire::QualityReport;

use anyhow::Context;
use std::path::Path;

/// Code and per-wire reports for one edge document
#[derive(Debug, Clone)]
pub struct Conversion {
    pub code: String,
    pub reports: Vec<QualityReport>,
}

impl Conversion {
    pub fn is_complete(&self) -> bool {
        self.reports.iter().all(QualityReport::is_complete)
    }
}

/// Convert an edge document with default tolerances
pub fn generate_wire_code(path: impl AsRef<Path>) -> anyhow::Result<String> {
    Ok(convert_file(path, &WireConfig::default())?.code)
}

/// Convert an edge document, keeping the quality reports
pub fn convert_file(path: impl AsRef<Path>, config: &WireConfig) -> anyhow::Result<Conversion> {
    let path = path.as_ref();
    let wires = io::load_wires(path)
        .with_context(|| format!("Failed to load edges from {}", path.display()))?;

    let (code, reports) = WireReconstructor::new(config.clone())
        .reconstruct_all(&wires)
        .with_context(|| format!("Failed to reconstruct wire from {}", path.display()))?;

    Ok(Conversion { code, reports })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_generate_wire_code() -> anyhow::Result<()> {
        let mut file = NamedTempFile::with_suffix(".json")?;
        write!(
            file,
            r#"{{ "edges": [ {{ "type": "line", "start": [0, 0, 0], "end": [2, 0, 0] }} ] }}"#
        )?;

        let code = generate_wire_code(file.path())?;
        assert!(code.contains("cq.Edge.makeLine(cq.Vector(0.000, 0.000, 0.000), cq.Vector(2.000, 0.000, 0.000))"));
        Ok(())
    }

    #[test]
    fn test_unsupported_format_has_context() {
        let err = generate_wire_code("part.stp").unwrap_err();
        assert!(err.to_string().starts_with("Failed to load edges from part.stp"));
        assert!(matches!(
            err.downcast_ref::<WireError>(),
            Some(WireError::UnsupportedFormat { .. })
        ));
    }
}
