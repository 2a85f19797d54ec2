// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Endpoint adjacency index keyed by quantized point

use crate::error::{Result, WireError};
use crate::geometry::{EdgeGeometry, QuantizedKey, Quantizer};
use ahash::AHashMap;

/// Edges incident at one quantized point, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: QuantizedKey,
    pub edges: Vec<usize>,
}

impl Bucket {
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// Quantized start/end keys of one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeKeys {
    pub start: QuantizedKey,
    pub end: QuantizedKey,
}

impl EdgeKeys {
    pub fn is_closed(&self) -> bool {
        self.start == self.end
    }
}

/// Mapping from quantized endpoint to incident edges.
///
/// Buckets are kept in a vector in first-seen order and the hash map only
/// stores positions into it, so iteration order never depends on hashing.
/// Every edge appears exactly twice across all buckets: once under its start
/// key and once under its end key (twice in one bucket for a closed edge).
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    slots: AHashMap<QuantizedKey, usize>,
    buckets: Vec<Bucket>,
    keys: Vec<EdgeKeys>,
}

impl AdjacencyIndex {
    /// Index every edge under both endpoint keys.
    ///
    /// Fails when an endpoint cannot be quantized without overflow, since a
    /// saturated key would join unrelated edges.
    pub fn build<E: EdgeGeometry>(edges: &[E], quantizer: &Quantizer) -> Result<Self> {
        if edges.is_empty() {
            return Err(WireError::NoGeometryFound);
        }

        let mut index = Self {
            slots: AHashMap::with_capacity(edges.len() + 1),
            buckets: Vec::with_capacity(edges.len() + 1),
            keys: Vec::with_capacity(edges.len()),
        };

        for (i, edge) in edges.iter().enumerate() {
            let keys = EdgeKeys {
                start: quantizer.try_quantize(&edge.start_point())?,
                end: quantizer.try_quantize(&edge.end_point())?,
            };
            index.insert(keys.start, i);
            index.insert(keys.end, i);
            index.keys.push(keys);
        }

        Ok(index)
    }

    fn insert(&mut self, key: QuantizedKey, edge: usize) {
        let slot = *self.slots.entry(key).or_insert_with(|| {
            self.buckets.push(Bucket {
                key,
                edges: Vec::new(),
            });
            self.buckets.len() - 1
        });
        self.buckets[slot].edges.push(edge);
    }

    /// Edges incident at `key`, empty if none
    pub fn incident(&self, key: &QuantizedKey) -> &[usize] {
        self.slots
            .get(key)
            .map(|&slot| self.buckets[slot].edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn edge_keys(&self, edge: usize) -> EdgeKeys {
        self.keys[edge]
    }

    pub fn edge_count(&self) -> usize {
        self.keys.len()
    }

    /// First bucket holding exactly one edge: the free end of an open chain
    pub fn first_open_end(&self) -> Option<QuantizedKey> {
        self.buckets.iter().find(|b| b.degree() == 1).map(|b| b.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{quantize, CurveEdge, Point};

    fn line(a: (f64, f64), b: (f64, f64)) -> CurveEdge {
        CurveEdge::line(Point::new(a.0, a.1, 0.0), Point::new(b.0, b.1, 0.0))
    }

    #[test]
    fn test_empty_input() {
        let edges: Vec<CurveEdge> = Vec::new();
        assert!(matches!(
            AdjacencyIndex::build(&edges, &Quantizer::default()),
            Err(WireError::NoGeometryFound)
        ));
    }

    #[test]
    fn test_every_edge_in_two_slots() {
        let edges = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (1.0, 1.0)),
            line((2.0, 2.0), (2.0, 2.0)),
        ];
        let index = AdjacencyIndex::build(&edges, &Quantizer::default()).unwrap();

        for i in 0..edges.len() {
            let hits: usize = index
                .buckets()
                .iter()
                .map(|b| b.edges.iter().filter(|&&e| e == i).count())
                .sum();
            assert_eq!(hits, 2, "edge {i}");
        }

        let closed = quantize(&Point::new(2.0, 2.0, 0.0));
        assert_eq!(index.incident(&closed), &[2, 2]);
        assert!(index.edge_keys(2).is_closed());
    }

    #[test]
    fn test_near_endpoints_merge() {
        let edges = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.000_01, 0.000_02), (1.0, 1.0)),
        ];
        let index = AdjacencyIndex::build(&edges, &Quantizer::default()).unwrap();
        assert_eq!(index.buckets().len(), 3);
        assert_eq!(index.incident(&quantize(&Point::new(1.0, 0.0, 0.0))), &[0, 1]);
    }

    #[test]
    fn test_buckets_in_insertion_order() {
        let edges = vec![line((5.0, 5.0), (1.0, 0.0)), line((1.0, 0.0), (0.0, 0.0))];
        let index = AdjacencyIndex::build(&edges, &Quantizer::default()).unwrap();
        let keys: Vec<_> = index.buckets().iter().map(|b| b.key).collect();
        assert_eq!(
            keys,
            vec![
                quantize(&Point::new(5.0, 5.0, 0.0)),
                quantize(&Point::new(1.0, 0.0, 0.0)),
                quantize(&Point::origin()),
            ]
        );
        assert_eq!(index.first_open_end(), Some(keys[0]));
    }

    #[test]
    fn test_closed_loop_has_no_open_end() {
        let edges = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (0.0, 1.0)),
            line((0.0, 1.0), (0.0, 0.0)),
        ];
        let index = AdjacencyIndex::build(&edges, &Quantizer::default()).unwrap();
        assert_eq!(index.first_open_end(), None);
        assert!(index.incident(&quantize(&Point::new(9.0, 9.0, 0.0))).is_empty());
    }

    #[test]
    fn test_far_apart_edges_not_merged_by_overflow() {
        let edges = vec![
            line((10_000.0, 0.0), (10_001.0, 0.0)),
            line((20_000.0, 0.0), (20_001.0, 0.0)),
        ];
        assert!(matches!(
            AdjacencyIndex::build(&edges, &Quantizer::new(15)),
            Err(WireError::CoordinateOutOfRange { .. })
        ));

        let index = AdjacencyIndex::build(&edges, &Quantizer::new(9)).unwrap();
        assert_eq!(index.buckets().len(), 4);
    }
}
