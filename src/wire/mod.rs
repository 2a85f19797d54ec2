// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wire reconstruction stages: adjacency, traversal, classification, runs

pub mod adjacency;
pub mod classify;
pub mod report;
pub mod runs;
pub mod walker;

pub use adjacency::{AdjacencyIndex, Bucket, EdgeKeys};
pub use classify::{classify, classify_chain, ClassifiedEdge};
pub use report::{QualityReport, SkippedEdge};
pub use runs::{encode, Run, RunEncoder};
pub use walker::{walk, Chain};
