//! Catalogue serialization, the sole interface to downstream consumers
//!
//! Bounds output size with explicit, configurable limits: co-occurring
//! concepts per node (default 10, by shared-section count), edges (default
//! 100, by construction order), and the top-concepts list (default 20).
//! No computation happens here beyond selection and truncation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::{ConceptGraph, ConceptNode, GraphStatistics, Metric};
use crate::ranking::ImportanceTier;

/// One node record in the catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueNode {
    pub term: String,
    pub normalized_term: String,
    pub frequency: u32,
    pub document_frequency: u32,
    pub sections: Vec<String>,

    /// Top co-occurring concepts by shared-section count, bounded
    pub co_occurring_concepts: BTreeMap<String, u32>,

    pub scores: BTreeMap<Metric, f64>,
    pub composite_score: f64,
    pub importance_rank: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance_tier: Option<ImportanceTier>,
}

/// One edge record in the catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueEdge {
    pub source: String,
    pub target: String,
    pub co_occurrence_count: u32,
    pub weight: f64,
}

/// A top-ranked concept summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedConcept {
    pub term: String,
    pub score: f64,
    pub frequency: u32,
    pub rank: u32,
}

/// The ranked concept catalogue handed to the slide-content selector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptCatalogue {
    /// Normalized term -> node record
    pub nodes: BTreeMap<String, CatalogueNode>,

    /// Edge list, truncated to the configured limit in construction order
    pub edges: Vec<CatalogueEdge>,

    pub total_sections: usize,
    pub statistics: GraphStatistics,

    /// Top ranked concepts, best first
    pub top_concepts: Vec<RankedConcept>,
}

/// Turns a ranked graph into the bounded catalogue structure
#[derive(Debug, Clone)]
pub struct CatalogueSerializer {
    pub edge_limit: usize,
    pub cooccurrence_limit: usize,
    pub top_concepts_count: usize,
}

impl CatalogueSerializer {
    pub fn new(edge_limit: usize, cooccurrence_limit: usize, top_concepts_count: usize) -> Self {
        Self {
            edge_limit,
            cooccurrence_limit,
            top_concepts_count,
        }
    }

    /// Serialize a ranked graph into a catalogue
    pub fn serialize(&self, graph: &ConceptGraph) -> ConceptCatalogue {
        let nodes: BTreeMap<String, CatalogueNode> = graph
            .nodes()
            .iter()
            .map(|node| (node.normalized_term.clone(), self.node_record(node)))
            .collect();

        let edges: Vec<CatalogueEdge> = graph
            .edges()
            .iter()
            .take(self.edge_limit)
            .map(|edge| CatalogueEdge {
                source: edge.source.clone(),
                target: edge.target.clone(),
                co_occurrence_count: edge.co_occurrence_count,
                weight: edge.weight,
            })
            .collect();

        let mut ranked: Vec<&ConceptNode> = graph.nodes().iter().collect();
        ranked.sort_by_key(|n| n.importance_rank);
        let top_concepts: Vec<RankedConcept> = ranked
            .iter()
            .take(self.top_concepts_count)
            .map(|node| RankedConcept {
                term: node.term.clone(),
                score: node.composite_score,
                frequency: node.frequency,
                rank: node.importance_rank,
            })
            .collect();

        let mut statistics = graph.statistics.clone();
        statistics.top_concepts_count = top_concepts.len();

        ConceptCatalogue {
            nodes,
            edges,
            total_sections: graph.total_sections,
            statistics,
            top_concepts,
        }
    }

    fn node_record(&self, node: &ConceptNode) -> CatalogueNode {
        // Keep the strongest co-occurrences; ties resolve alphabetically so
        // output stays reproducible
        let mut pairs: Vec<(&String, &u32)> = node.co_occurring_concepts.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let co_occurring_concepts: BTreeMap<String, u32> = pairs
            .into_iter()
            .take(self.cooccurrence_limit)
            .map(|(term, &count)| (term.clone(), count))
            .collect();

        CatalogueNode {
            term: node.term.clone(),
            normalized_term: node.normalized_term.clone(),
            frequency: node.frequency,
            document_frequency: node.document_frequency,
            sections: node.sections.clone(),
            co_occurring_concepts,
            scores: node.scores.clone(),
            composite_score: node.composite_score,
            importance_rank: node.importance_rank,
            importance_tier: node.importance_tier,
        }
    }
}
