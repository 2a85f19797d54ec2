// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Run encoding: coalesce consecutive same-kind edges into point runs

use super::classify::ClassifiedEdge;
use crate::geometry::{GeomType, Point};
use serde::{Deserialize, Serialize};

/// Ordered, deduplicated points of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub kind: GeomType,
    pub points: Vec<Point>,
}

#[derive(Debug, Default)]
enum EncoderState {
    #[default]
    Idle,
    Accumulating { kind: GeomType, points: Vec<Point> },
}

/// Streaming run builder.
///
/// A run is emitted whenever the edge kind changes and once more at
/// [`RunEncoder::finish`]. Same-kind edges are always merged; when their
/// touching points are further apart than the join tolerance the gap is
/// bridged as-is and counted in [`RunEncoder::disjoint_joins`].
#[derive(Debug)]
pub struct RunEncoder {
    state: EncoderState,
    runs: Vec<Run>,
    join_tolerance: f64,
    disjoint_joins: usize,
}

impl RunEncoder {
    pub fn new(join_tolerance: f64) -> Self {
        Self {
            state: EncoderState::Idle,
            runs: Vec::new(),
            join_tolerance,
            disjoint_joins: 0,
        }
    }

    pub fn push(&mut self, kind: GeomType, points: &[Point]) {
        let acc = match &mut self.state {
            EncoderState::Accumulating {
                kind: current,
                points: acc,
            } if *current == kind => acc,
            _ => {
                self.flush();
                self.state = EncoderState::Accumulating {
                    kind,
                    points: points.to_vec(),
                };
                return;
            }
        };

        let gap = match (acc.last(), points.first()) {
            (Some(last), Some(first)) => Some((first - last).norm()),
            _ => None,
        };

        match gap {
            Some(d) if d <= self.join_tolerance => acc.extend_from_slice(&points[1..]),
            Some(_) => {
                self.disjoint_joins += 1;
                acc.extend_from_slice(points);
            }
            _ => acc.extend_from_slice(points),
        }
    }

    fn flush(&mut self) {
        if let EncoderState::Accumulating { kind, mut points } = std::mem::take(&mut self.state) {
            points.dedup();
            if points.len() >= 2 {
                self.runs.push(Run { kind, points });
            }
        }
    }

    /// Same-kind merges that bridged a gap wider than the join tolerance
    pub fn disjoint_joins(&self) -> usize {
        self.disjoint_joins
    }

    pub fn finish(mut self) -> Vec<Run> {
        self.flush();
        self.runs
    }
}

/// Encode classified edges in traversal order.
///
/// Returns the runs and the number of disjoint same-kind joins.
pub fn encode(edges: &[ClassifiedEdge], join_tolerance: f64) -> (Vec<Run>, usize) {
    let mut encoder = RunEncoder::new(join_tolerance);
    for edge in edges {
        encoder.push(edge.kind, &edge.points);
    }
    let joins = encoder.disjoint_joins();
    (encoder.finish(), joins)
}
