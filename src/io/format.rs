// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CadQuery command emission for encoded runs

use crate::geometry::{GeomType, Point};
use crate::wire::Run;

/// One primitive construction command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Line(Point, Point),
    Spline(Vec<Point>),
}

/// Ordered commands for one path-assembly block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    commands: Vec<Command>,
    degenerate_segments: usize,
}

impl CommandList {
    /// Expand runs into commands: one line per consecutive point pair longer
    /// than `min_segment_length`, one spline per curve run.
    pub fn from_runs(runs: &[Run], min_segment_length: f64) -> Self {
        let mut list = Self::default();

        for run in runs {
            if run.points.len() < 2 {
                continue;
            }
            match run.kind {
                GeomType::Line => {
                    for pair in run.points.windows(2) {
                        if (pair[1] - pair[0]).norm() > min_segment_length {
                            list.commands.push(Command::Line(pair[0], pair[1]));
                        } else {
                            list.degenerate_segments += 1;
                        }
                    }
                }
                GeomType::Curve => list.commands.push(Command::Spline(run.points.clone())),
            }
        }

        list
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Line pairs dropped for being too short
    pub fn degenerate_segments(&self) -> usize {
        self.degenerate_segments
    }

    /// Render as a single `assembleEdges` block
    pub fn render(&self, precision: usize) -> String {
        let mut out = String::from("cq.Workplane(cq.Wire.assembleEdges([\n");

        for command in &self.commands {
            match command {
                Command::Line(a, b) => {
                    out.push_str(&format!(
                        "    cq.Edge.makeLine({}, {}),\n",
                        vector(a, precision),
                        vector(b, precision)
                    ));
                }
                Command::Spline(points) => {
                    let list: Vec<String> = points.iter().map(|p| vector(p, precision)).collect();
                    out.push_str(&format!("    cq.Edge.makeSpline([{}]),\n", list.join(", ")));
                }
            }
        }

        out.push_str("]))");
        out
    }
}

fn vector(p: &Point, precision: usize) -> String {
    format!(
        "cq.Vector({:.prec$}, {:.prec$}, {:.prec$})",
        p.x,
        p.y,
        p.z,
        prec = precision
    )
}

/// Format runs with default tolerances
pub fn format_runs(runs: &[Run]) -> String {
    CommandList::from_runs(runs, 1e-5).render(3)
}
