// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Post-hoc quality report for one reconstructed wire

use serde::{Deserialize, Serialize};

/// An edge that contributed no points because sampling failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEdge {
    /// Position in the loader's input order
    pub index: usize,
    pub reason: String,
}

/// What happened to the input edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub edges_attempted: usize,
    pub edges_consumed: usize,
    /// Input indices unreachable from the start node
    pub edges_dropped: Vec<usize>,
    pub skipped: Vec<SkippedEdge>,
    /// Same-kind edges concatenated across a gap wider than the join tolerance
    pub disjoint_joins: usize,
    pub run_count: usize,
    pub command_count: usize,
    /// Line segments filtered for being shorter than the minimum length
    pub degenerate_segments: usize,
}

impl QualityReport {
    /// Every edge was walked and sampled
    pub fn is_complete(&self) -> bool {
        self.edges_dropped.is_empty() && self.skipped.is_empty()
    }

    /// Human-readable warnings, empty for a clean reconstruction
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.edges_dropped.is_empty() {
            warnings.push(format!(
                "{} of {} edges unreachable from the start point (disconnected or branching geometry): {:?}",
                self.edges_dropped.len(),
                self.edges_attempted,
                self.edges_dropped
            ));
        }
        for skipped in &self.skipped {
            warnings.push(format!(
                "edge {} skipped, discretization failed: {}",
                skipped.index, skipped.reason
            ));
        }
        if self.disjoint_joins > 0 {
            warnings.push(format!(
                "{} same-type joins bridge a gap; output may connect segments that are not contiguous",
                self.disjoint_joins
            ));
        }

        warnings
    }
}
