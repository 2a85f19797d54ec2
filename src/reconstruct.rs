// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end wire reconstruction

use crate::config::WireConfig;
use crate::error::Result;
use crate::geometry::{EdgeGeometry, Quantizer};
use crate::io::CommandList;
use crate::wire::{self, AdjacencyIndex, QualityReport, Run};

/// Result of reconstructing one wire
#[derive(Debug, Clone)]
pub struct WireOutput {
    /// Rendered path-assembly block
    pub code: String,
    pub commands: CommandList,
    pub runs: Vec<Run>,
    pub report: QualityReport,
}

/// Turns an unordered edge collection into an ordered path and its code.
///
/// Holds only configuration; every call builds its own adjacency index, so a
/// shared reconstructor can serve several threads.
#[derive(Debug, Clone, Default)]
pub struct WireReconstructor {
    config: WireConfig,
}

impl WireReconstructor {
    pub fn new(config: WireConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WireConfig {
        &self.config
    }

    /// Run the full pipeline on one wire's edges
    pub fn reconstruct<E: EdgeGeometry>(&self, edges: &[E]) -> Result<WireOutput> {
        self.config.validate()?;

        let quantizer = Quantizer::new(self.config.quantize_decimals);
        let index = AdjacencyIndex::build(edges, &quantizer)?;

        let chain = wire::walk(edges, &index);
        tracing::debug!(
            start = ?chain.start_key.coords(),
            consumed = chain.len(),
            total = edges.len(),
            "walked chain"
        );
        if !chain.is_complete() {
            tracing::warn!(
                dropped = chain.dropped.len(),
                total = edges.len(),
                "edges unreachable from start point were dropped"
            );
        }

        let (classified, skipped) = wire::classify_chain(&chain.edges, self.config.deflection);
        let (runs, disjoint_joins) = wire::encode(&classified, self.config.join_tolerance);
        if disjoint_joins > 0 {
            tracing::warn!(disjoint_joins, "same-type edges merged across a gap");
        }

        let commands = CommandList::from_runs(&runs, self.config.min_segment_length);
        let code = commands.render(self.config.coordinate_precision);
        tracing::debug!(runs = runs.len(), commands = commands.len(), "encoded wire");

        let report = QualityReport {
            edges_attempted: edges.len(),
            edges_consumed: chain.len(),
            edges_dropped: chain.dropped,
            skipped,
            disjoint_joins,
            run_count: runs.len(),
            command_count: commands.len(),
            degenerate_segments: commands.degenerate_segments(),
        };

        Ok(WireOutput {
            code,
            commands,
            runs,
            report,
        })
    }

    /// Reconstruct several wires and join their blocks with a blank line
    pub fn reconstruct_all<E: EdgeGeometry>(
        &self,
        wires: &[Vec<E>],
    ) -> Result<(String, Vec<QualityReport>)> {
        if wires.is_empty() {
            return Err(crate::error::WireError::NoGeometryFound);
        }

        let mut blocks = Vec::with_capacity(wires.len());
        let mut reports = Vec::with_capacity(wires.len());
        for edges in wires {
            let output = self.reconstruct(edges)?;
            blocks.push(output.code);
            reports.push(output.report);
        }

        Ok((blocks.join("\n\n"), reports))
    }
}
