// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Greedy chain traversal over the adjacency index

use super::adjacency::AdjacencyIndex;
use crate::geometry::{EdgeGeometry, OrientedEdge, QuantizedKey};

/// Ordered, oriented traversal result
#[derive(Debug)]
pub struct Chain<'a, E> {
    pub edges: Vec<OrientedEdge<'a, E>>,
    pub start_key: QuantizedKey,
    /// Input indices never reached from the start key
    pub dropped: Vec<usize>,
}

impl<E> Chain<'_, E> {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Where the walk begins: the first degree-1 node, else the first edge's start
pub fn start_key(index: &AdjacencyIndex) -> QuantizedKey {
    index
        .first_open_end()
        .unwrap_or_else(|| index.edge_keys(0).start)
}

/// Walk one connected path from the start key.
///
/// At each node the first unvisited incident edge in input order is taken,
/// flipped if needed so its start sits on the current node. Edges that are
/// not reachable along that single path are reported in [`Chain::dropped`].
///
/// `index` should be built from `edges`. If the lengths differ only the
/// common prefix takes part; longer-index entries are never dereferenced.
pub fn walk<'a, E: EdgeGeometry>(edges: &'a [E], index: &AdjacencyIndex) -> Chain<'a, E> {
    let total = edges.len().min(index.edge_count());
    let mut visited = vec![false; total];
    let mut result = Vec::with_capacity(total);

    if total == 0 {
        return Chain {
            edges: result,
            start_key: QuantizedKey::default(),
            dropped: Vec::new(),
        };
    }

    let start = start_key(index);
    let mut current = start;

    while result.len() < total {
        let Some(&next) = index
            .incident(&current)
            .iter()
            .find(|&&e| e < total && !visited[e])
        else {
            break;
        };

        let keys = index.edge_keys(next);
        if keys.start == current {
            result.push(OrientedEdge::forward(&edges[next], next));
            current = keys.end;
        } else {
            result.push(OrientedEdge::backward(&edges[next], next));
            current = keys.start;
        }
        visited[next] = true;
    }

    let dropped = (0..total).filter(|&i| !visited[i]).collect();

    Chain {
        edges: result,
        start_key: start,
        dropped,
    }
}
