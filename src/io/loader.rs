// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Edge document loader

use crate::error::{Result, WireError};
use crate::geometry::{CurveEdge, Point};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_FORMATS: &str = "json";

/// One edge as written in an edge document. Angles are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeDef {
    Line {
        start: [f64; 3],
        end: [f64; 3],
    },
    Arc {
        center: [f64; 3],
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        #[serde(default = "default_x_dir")]
        x_dir: [f64; 3],
        #[serde(default = "default_y_dir")]
        y_dir: [f64; 3],
    },
    Bezier {
        control_points: Vec<[f64; 3]>,
    },
}

fn default_x_dir() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

fn default_y_dir() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

impl From<&EdgeDef> for CurveEdge {
    fn from(def: &EdgeDef) -> Self {
        match def {
            EdgeDef::Line { start, end } => CurveEdge::line(Point::from(*start), Point::from(*end)),
            EdgeDef::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                x_dir,
                y_dir,
            } => CurveEdge::arc(
                Point::from(*center),
                Vector3::from(*x_dir),
                Vector3::from(*y_dir),
                *radius,
                *start_angle,
                *end_angle,
            ),
            EdgeDef::Bezier { control_points } => {
                CurveEdge::bezier(control_points.iter().copied().map(Point::from).collect())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireDef {
    pub edges: Vec<EdgeDef>,
}

/// Joined wires, plus loose edges when the exporter did not join them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDocument {
    pub wires: Vec<WireDef>,
    pub edges: Vec<EdgeDef>,
}

impl EdgeDocument {
    /// Edge groups to reconstruct, one per wire.
    ///
    /// Loose edges are only used when no wire carries any edge; they are then
    /// treated as one wire.
    pub fn into_wires(self) -> Result<Vec<Vec<CurveEdge>>> {
        let wires: Vec<Vec<CurveEdge>> = self
            .wires
            .iter()
            .filter(|w| !w.edges.is_empty())
            .map(|w| w.edges.iter().map(CurveEdge::from).collect())
            .collect();

        if !wires.is_empty() {
            if !self.edges.is_empty() {
                tracing::debug!(loose = self.edges.len(), "ignoring loose edges next to joined wires");
            }
            return Ok(wires);
        }

        if self.edges.is_empty() {
            return Err(WireError::NoGeometryFound);
        }

        tracing::warn!(
            edges = self.edges.len(),
            "no wires in document, assembling loose edges; export a joined wire for reliable results"
        );
        Ok(vec![self.edges.iter().map(CurveEdge::from).collect()])
    }
}

/// Parse an edge document from JSON text
pub fn parse_document(source: &str) -> Result<EdgeDocument> {
    Ok(serde_json::from_str(source)?)
}

/// Load the wires of an edge document, checking the extension first
pub fn load_wires(path: impl AsRef<Path>) -> Result<Vec<Vec<CurveEdge>>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => {
            let source = std::fs::read_to_string(path)?;
            parse_document(&source)?.into_wires()
        }
        _ => Err(WireError::UnsupportedFormat {
            extension,
            supported: SUPPORTED_FORMATS,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{EdgeGeometry, GeomType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOC: &str = r#"{
        "wires": [
            { "edges": [
                { "type": "line", "start": [0, 0, 0], "end": [1, 0, 0] },
                { "type": "arc", "center": [1, 1, 0], "radius": 1.0,
                  "start_angle": -1.5707963267948966, "end_angle": 0.0 }
            ] },
            { "edges": [
                { "type": "bezier", "control_points": [[0, 0, 5], [1, 2, 5], [2, 0, 5]] }
            ] }
        ]
    }"#;

    #[test]
    fn test_parse_wires() {
        let wires = parse_document(DOC).unwrap().into_wires().unwrap();
        assert_eq!(wires.len(), 2);
        assert_eq!(wires[0].len(), 2);
        assert_eq!(wires[0][0].geom_type(), GeomType::Line);
        assert_eq!(wires[0][1].geom_type(), GeomType::Curve);
        assert!((wires[0][1].start_point() - Point::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_loose_edges_fallback() {
        let doc = r#"{ "edges": [ { "type": "line", "start": [0, 0, 0], "end": [0, 0, 1] } ] }"#;
        let wires = parse_document(doc).unwrap().into_wires().unwrap();
        assert_eq!(wires.len(), 1);
        assert_eq!(wires[0].len(), 1);
    }

    #[test]
    fn test_empty_document() {
        let doc = r#"{ "wires": [ { "edges": [] } ] }"#;
        assert!(matches!(
            parse_document(doc).unwrap().into_wires(),
            Err(WireError::NoGeometryFound)
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            parse_document(r#"{ "edges": [ { "type": "helix" } ] }"#),
            Err(WireError::Parse(_))
        ));
    }

    #[test]
    fn test_load_checks_extension() -> anyhow::Result<()> {
        let mut file = NamedTempFile::with_suffix(".json")?;
        write!(file, "{DOC}")?;
        assert_eq!(load_wires(file.path())?.len(), 2);

        let step = NamedTempFile::with_suffix(".STEP")?;
        match load_wires(step.path()) {
            Err(WireError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "step"),
            other => panic!("expected unsupported format, got {other:?}"),
        }
        Ok(())
    }
}
