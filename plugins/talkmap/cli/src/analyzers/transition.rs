use std::collections::HashMap;

use rayon::prelude::*;
use serde_json::Value;

use crate::analyzers::classifier::EventClassifier;
use crate::parsers::extract_sequence;
use crate::types::{FlowEdge, FlowGraph, StateLabel};

/// Accumulates node identities and edge weights over a batch of sequences.
///
/// Nodes get indices in first-seen order; edges are kept in first-seen order
/// too, so the same ordered input always yields the same graph.
#[derive(Debug, Clone, Default)]
pub struct TransitionAggregator {
    node_index: HashMap<String, usize>,
    nodes: Vec<String>,
    edge_index: HashMap<(usize, usize), usize>,
    edges: Vec<FlowEdge>,
    conversations: usize,
    total_transitions: u64,
}

impl TransitionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, display: String) -> usize {
        if let Some(&idx) = self.node_index.get(&display) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(display.clone());
        self.node_index.insert(display, idx);
        idx
    }

    fn add_weight(&mut self, source: usize, target: usize, weight: u64) {
        match self.edge_index.get(&(source, target)) {
            Some(&pos) => self.edges[pos].weight += weight,
            None => {
                self.edge_index.insert((source, target), self.edges.len());
                self.edges.push(FlowEdge {
                    source,
                    target,
                    weight,
                });
            }
        }
    }

    /// Fold one conversation's label sequence into the batch.
    ///
    /// Every label claims a node, even in a sequence too short to produce a
    /// transition. A sequence of length n adds max(n-1, 0) observations.
    pub fn observe(&mut self, sequence: &[StateLabel]) {
        self.conversations += 1;

        let indices: Vec<usize> = sequence
            .iter()
            .map(|label| self.register(label.display_name()))
            .collect();

        for pair in indices.windows(2) {
            self.add_weight(pair[0], pair[1], 1);
            self.total_transitions += 1;
        }
    }

    /// Merge a partial aggregator built over later input.
    ///
    /// Nodes are reconciled by display string and weights summed, so merging
    /// consecutive partials left to right reproduces the serial result.
    pub fn merge(&mut self, other: TransitionAggregator) {
        let remap: Vec<usize> = other
            .nodes
            .into_iter()
            .map(|display| self.register(display))
            .collect();

        for edge in other.edges {
            self.add_weight(remap[edge.source], remap[edge.target], edge.weight);
        }

        self.conversations += other.conversations;
        self.total_transitions += other.total_transitions;
    }

    pub fn conversation_count(&self) -> usize {
        self.conversations
    }

    pub fn transition_count(&self) -> u64 {
        self.total_transitions
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Emit the graph. A batch without a single transition has nothing to
    /// draw and yields zero nodes and zero edges.
    pub fn finish(self) -> FlowGraph {
        if self.total_transitions == 0 {
            return FlowGraph {
                conversation_count: self.conversations,
                ..FlowGraph::default()
            };
        }

        FlowGraph {
            node_count: self.nodes.len(),
            nodes: self.nodes,
            edges: self.edges,
            conversation_count: self.conversations,
            total_transitions: self.total_transitions,
        }
    }
}

/// Aggregate already-extracted sequences, in order.
pub fn build_flow_graph<I, S>(sequences: I) -> FlowGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<[StateLabel]>,
{
    sequences
        .into_iter()
        .fold(TransitionAggregator::new(), |mut agg, sequence| {
            agg.observe(sequence.as_ref());
            agg
        })
        .finish()
}

/// Extract and aggregate records in parallel.
///
/// Each rayon split folds a contiguous slice into its own aggregator; the
/// partials are merged in slice order, matching [`build_flow_graph`] exactly.
pub fn build_flow_graph_from_records(
    records: &[Value],
    classifier: &dyn EventClassifier,
) -> FlowGraph {
    records
        .par_iter()
        .fold(TransitionAggregator::new, |mut agg, record| {
            agg.observe(&extract_sequence(record, classifier));
            agg
        })
        .reduce(TransitionAggregator::new, |mut left, right| {
            left.merge(right);
            left
        })
        .finish()
}
