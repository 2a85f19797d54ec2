// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch conversion of edge documents

use crate::config::WireConfig;
use crate::{convert_file, Conversion};
use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Result of converting one input file
pub struct ConvertResult {
    pub input: PathBuf,
    pub conversion: Result<Conversion>,
    pub duration: Duration,
}

/// Runner for converting many files with shared settings
pub struct Runner {
    config: WireConfig,
}

impl Runner {
    pub fn new(config: WireConfig) -> Self {
        Self { config }
    }

    /// Expand directories into the edge documents they contain, sorted by path
    pub fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for input in inputs {
            if input.is_dir() {
                let mut found: Vec<PathBuf> = WalkDir::new(input)
                    .into_iter()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file() && is_edge_document(entry.path()))
                    .map(|entry| entry.into_path())
                    .collect();
                found.sort();
                files.extend(found);
            } else {
                files.push(input.clone());
            }
        }
        files
    }

    /// Convert one file and time it
    pub fn convert(&self, input: &Path) -> ConvertResult {
        let start = Instant::now();
        let conversion = convert_file(input, &self.config);
        ConvertResult {
            input: input.to_path_buf(),
            conversion,
            duration: start.elapsed(),
        }
    }

    /// Convert files in parallel; results keep the input order
    pub fn convert_all(&self, inputs: &[PathBuf]) -> Vec<ConvertResult> {
        inputs.par_iter().map(|input| self.convert(input)).collect()
    }

    /// Where the code for `input` is written: `output` itself for a single
    /// input, `<output>/<stem>.py` in batch mode
    pub fn output_target(input: &Path, output: &Path, batch: bool) -> PathBuf {
        if !batch {
            return output.to_path_buf();
        }
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "wire".to_string());
        output.join(format!("{}.py", stem))
    }
}

fn is_edge_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const LINE_DOC: &str =
        r#"{ "edges": [ { "type": "line", "start": [0, 0, 0], "end": [1, 0, 0] } ] }"#;

    #[test]
    fn test_collect_and_convert() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("b.json"), LINE_DOC)?;
        fs::write(dir.path().join("a.json"), LINE_DOC)?;
        fs::write(dir.path().join("notes.txt"), "ignored")?;

        let inputs = Runner::collect_inputs(&[dir.path().to_path_buf()]);
        assert_eq!(inputs.len(), 2);
        assert!(inputs[0].ends_with("a.json"));

        let results = Runner::new(WireConfig::default()).convert_all(&inputs);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.conversion.is_ok()));
        assert_eq!(results[1].input, inputs[1]);
        Ok(())
    }

    #[test]
    fn test_output_target() {
        let out = Path::new("build");
        assert_eq!(
            Runner::output_target(Path::new("in/part.json"), out, true),
            PathBuf::from("build/part.py")
        );
        assert_eq!(
            Runner::output_target(Path::new("in/part.json"), Path::new("wire.py"), false),
            PathBuf::from("wire.py")
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = Runner::new(WireConfig::default()).convert(Path::new("missing.json"));
        assert!(result.conversion.is_err());
    }
}
