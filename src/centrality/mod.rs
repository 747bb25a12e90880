//! Per-node centrality metrics
//!
//! Four independent metrics, each normalized to [0,1] and stored under its
//! name in the node's score map: frequency, TF-IDF, PageRank, betweenness.
//! Which ones run is decided by the configured algorithm selector; `All`
//! runs the lot.
//!
//! Every metric tolerates zero nodes, one node, an edgeless graph, and
//! disconnected components.

mod betweenness;
mod pagerank;

use tracing::debug;

use crate::config::{CentralityAlgorithm, PageRankSettings};
use crate::graph::{ConceptGraph, Metric};

/// Safe division: a zero denominator yields 0 (no contribution) instead of
/// NaN or infinity. Used everywhere a maximum could legitimately be 0.
pub(crate) fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Zero-substitution for denominators that must stay divisible: a node with
/// no outgoing weight is treated as having weight 1, so PageRank keeps its
/// teleport contribution instead of zeroing out.
pub(crate) fn or_one(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

/// Computes the configured centrality metrics over an assembled graph
#[derive(Debug, Clone)]
pub struct CentralityEngine {
    algorithm: CentralityAlgorithm,
    pagerank: PageRankSettings,
}

impl CentralityEngine {
    pub fn new(algorithm: CentralityAlgorithm, pagerank: PageRankSettings) -> Self {
        Self { algorithm, pagerank }
    }

    /// Run the selected metric(s), writing normalized scores into the graph
    pub fn compute(&self, graph: &mut ConceptGraph) {
        if graph.is_empty() {
            return;
        }

        if self.runs(CentralityAlgorithm::Frequency) {
            store(graph, Metric::Frequency, frequency_scores(graph));
        }
        if self.runs(CentralityAlgorithm::Tfidf) {
            store(graph, Metric::Tfidf, tfidf_scores(graph));
        }
        if self.runs(CentralityAlgorithm::Pagerank) {
            let adjacency = graph.adjacency_weighted();
            store(graph, Metric::Pagerank, pagerank::scores(&adjacency, &self.pagerank));
        }
        if self.runs(CentralityAlgorithm::Betweenness) {
            let adjacency = graph.adjacency();
            store(graph, Metric::Betweenness, betweenness::scores(&adjacency));
        }

        debug!(
            algorithm = ?self.algorithm,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Centrality metrics computed"
        );
    }

    fn runs(&self, metric: CentralityAlgorithm) -> bool {
        self.algorithm == CentralityAlgorithm::All || self.algorithm == metric
    }
}

fn store(graph: &mut ConceptGraph, metric: Metric, scores: Vec<f64>) {
    for (index, score) in scores.into_iter().enumerate() {
        graph.set_score(index, metric, score);
    }
}

/// Frequency score: node frequency over the maximum frequency
fn frequency_scores(graph: &ConceptGraph) -> Vec<f64> {
    let max = graph
        .nodes()
        .iter()
        .map(|n| n.frequency)
        .max()
        .unwrap_or(0);
    graph
        .nodes()
        .iter()
        .map(|n| safe_div(f64::from(n.frequency), f64::from(max)))
        .collect()
}

/// TF-IDF score: `frequency * (ln(total_sections / (df + 1)) + 1)`,
/// normalized by the maximum raw value. All zeros when the maximum is 0.
fn tfidf_scores(graph: &ConceptGraph) -> Vec<f64> {
    let total_sections = graph.total_sections as f64;
    let raw: Vec<f64> = graph
        .nodes()
        .iter()
        .map(|n| {
            let idf = (total_sections / f64::from(n.document_frequency + 1)).ln() + 1.0;
            f64::from(n.frequency) * idf
        })
        .collect();

    let max = raw.iter().cloned().fold(0.0f64, f64::max);
    raw.into_iter().map(|value| safe_div(value, max)).collect()
}
