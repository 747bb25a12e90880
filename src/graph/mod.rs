//! Concept graph model and assembler
//!
//! One node per distinct concept, one undirected edge per pair of concepts
//! that share at least one section. Node storage preserves discovery order;
//! ranking tie-breaks depend on it, so nodes live in a `Vec` with a key map
//! on the side rather than in an unordered map.
//!
//! Assembly is O(sum of k_i^2) over per-section concept-set sizes k_i:
//! quadratic per section, acceptable for realistic sections of tens of
//! concepts.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::config::TermCountingMode;
use crate::ranking::ImportanceTier;
use crate::terms::SectionConcept;

/// Centrality metric names, used as score-map keys
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Frequency,
    Tfidf,
    Pagerank,
    Betweenness,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Frequency => "frequency",
            Metric::Tfidf => "tfidf",
            Metric::Pagerank => "pagerank",
            Metric::Betweenness => "betweenness",
        }
    }
}

/// A concept and everything known about it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptNode {
    /// Display form, first-seen casing
    pub term: String,

    /// Canonical lowercase form, the node key
    pub normalized_term: String,

    /// Occurrence count; equals `document_frequency` under section-presence
    /// counting, may exceed it under token-occurrence counting
    pub frequency: u32,

    /// Number of distinct sections the concept appears in
    pub document_frequency: u32,

    /// Section ids the concept appears in, in processing order
    pub sections: Vec<String>,

    /// Co-occurring concept key -> shared-section count
    pub co_occurring_concepts: HashMap<String, u32>,

    /// Normalized score in [0,1] per computed metric
    pub scores: BTreeMap<Metric, f64>,

    /// Weighted combination of the metric scores
    pub composite_score: f64,

    /// 1-based dense rank, 1 = most important; 0 until ranked
    pub importance_rank: u32,

    /// Percentile tier assigned by the ranker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance_tier: Option<ImportanceTier>,
}

impl ConceptNode {
    fn new(concept: &SectionConcept) -> Self {
        Self {
            term: concept.display.clone(),
            normalized_term: concept.normalized.clone(),
            frequency: 0,
            document_frequency: 0,
            sections: Vec::new(),
            co_occurring_concepts: HashMap::new(),
            scores: BTreeMap::new(),
            composite_score: 0.0,
            importance_rank: 0,
            importance_tier: None,
        }
    }

    /// Score for a metric, 0 when that metric was not computed
    pub fn score(&self, metric: Metric) -> f64 {
        self.scores.get(&metric).copied().unwrap_or(0.0)
    }
}

/// An undirected co-occurrence edge. The pair is stored canonically with
/// `source <= target` so A-B and B-A never duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptEdge {
    pub source: String,
    pub target: String,

    /// Number of distinct sections where both concepts appear
    pub co_occurrence_count: u32,

    /// Count divided by the global maximum count; 1.0 for at least one edge
    /// whenever any edge exists
    pub weight: f64,

    /// Section ids where the pair co-occurs
    pub sections: Vec<String>,
}

/// Summary statistics over the assembled graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub total_concepts: usize,
    pub total_edges: usize,
    pub total_sections: usize,
    pub avg_concepts_per_section: f64,
    pub avg_connections_per_concept: f64,
    pub top_concepts_count: usize,
}

/// The assembled co-occurrence graph: a single consistent snapshot, built
/// once per extraction request and not mutated after ranking completes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptGraph {
    nodes: Vec<ConceptNode>,
    edges: Vec<ConceptEdge>,
    pub total_sections: usize,
    pub statistics: GraphStatistics,

    #[serde(skip)]
    node_index: HashMap<String, usize>,
    #[serde(skip)]
    edge_index: HashMap<(String, String), usize>,
    #[serde(skip)]
    concept_incidences: usize,
}

impl ConceptGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in discovery order
    pub fn nodes(&self) -> &[ConceptNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [ConceptNode] {
        &mut self.nodes
    }

    /// Edges in construction order
    pub fn edges(&self) -> &[ConceptEdge] {
        &self.edges
    }

    pub fn node(&self, key: &str) -> Option<&ConceptNode> {
        self.node_index.get(key).map(|&i| &self.nodes[i])
    }

    /// Store a metric score on a node by index
    pub fn set_score(&mut self, index: usize, metric: Metric, score: f64) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.scores.insert(metric, score);
        }
    }

    /// Weighted adjacency lists by node index, symmetric
    pub fn adjacency_weighted(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            if let (Some(&a), Some(&b)) = (
                self.node_index.get(&edge.source),
                self.node_index.get(&edge.target),
            ) {
                adjacency[a].push((b, edge.weight));
                adjacency[b].push((a, edge.weight));
            }
        }
        adjacency
    }

    /// Unweighted adjacency lists by node index, symmetric
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        self.adjacency_weighted()
            .into_iter()
            .map(|neighbors| neighbors.into_iter().map(|(i, _)| i).collect())
            .collect()
    }
}

/// Builds a [`ConceptGraph`] from an ordered stream of per-section concept
/// sets.
#[derive(Debug, Default)]
pub struct GraphAssembler {
    graph: ConceptGraph,
    mode: TermCountingMode,
}

impl GraphAssembler {
    pub fn new(mode: TermCountingMode) -> Self {
        Self {
            graph: ConceptGraph::default(),
            mode,
        }
    }

    /// Fold one section's concept set into the graph
    pub fn add_section(&mut self, section_id: &str, concepts: &[SectionConcept]) {
        self.graph.total_sections += 1;
        self.graph.concept_incidences += concepts.len();

        for concept in concepts {
            let index = self.get_or_create_node(concept);
            let node = &mut self.graph.nodes[index];
            node.frequency += match self.mode {
                TermCountingMode::SectionPresence => 1,
                TermCountingMode::TokenOccurrence => concept.occurrences,
            };
            if !node.sections.iter().any(|s| s == section_id) {
                node.sections.push(section_id.to_string());
                node.document_frequency += 1;
            }
        }

        for i in 0..concepts.len() {
            for j in (i + 1)..concepts.len() {
                self.add_cooccurrence(section_id, &concepts[i].normalized, &concepts[j].normalized);
            }
        }
    }

    /// Normalize edge weights and compute statistics, consuming the assembler
    pub fn finish(mut self) -> ConceptGraph {
        let max_count = self
            .graph
            .edges
            .iter()
            .map(|e| e.co_occurrence_count)
            .max()
            .unwrap_or(0);
        if max_count > 0 {
            for edge in &mut self.graph.edges {
                edge.weight = f64::from(edge.co_occurrence_count) / f64::from(max_count);
            }
        }

        let node_count = self.graph.nodes.len();
        let connection_total: usize = self
            .graph
            .nodes
            .iter()
            .map(|n| n.co_occurring_concepts.len())
            .sum();

        self.graph.statistics = GraphStatistics {
            total_concepts: node_count,
            total_edges: self.graph.edges.len(),
            total_sections: self.graph.total_sections,
            avg_concepts_per_section: if self.graph.total_sections > 0 {
                self.graph.concept_incidences as f64 / self.graph.total_sections as f64
            } else {
                0.0
            },
            avg_connections_per_concept: if node_count > 0 {
                connection_total as f64 / node_count as f64
            } else {
                0.0
            },
            top_concepts_count: 0,
        };

        self.graph
    }

    fn get_or_create_node(&mut self, concept: &SectionConcept) -> usize {
        if let Some(&index) = self.graph.node_index.get(&concept.normalized) {
            return index;
        }
        let index = self.graph.nodes.len();
        self.graph
            .node_index
            .insert(concept.normalized.clone(), index);
        self.graph.nodes.push(ConceptNode::new(concept));
        index
    }

    fn add_cooccurrence(&mut self, section_id: &str, a: &str, b: &str) {
        if a == b {
            return;
        }

        for (from, to) in [(a, b), (b, a)] {
            if let Some(&index) = self.graph.node_index.get(from) {
                *self.graph.nodes[index]
                    .co_occurring_concepts
                    .entry(to.to_string())
                    .or_insert(0) += 1;
            }
        }

        let key = if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };

        let edge_pos = match self.graph.edge_index.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = self.graph.edges.len();
                self.graph.edges.push(ConceptEdge {
                    source: key.0.clone(),
                    target: key.1.clone(),
                    co_occurrence_count: 0,
                    weight: 0.0,
                    sections: Vec::new(),
                });
                self.graph.edge_index.insert(key, pos);
                pos
            }
        };

        let edge = &mut self.graph.edges[edge_pos];
        edge.co_occurrence_count += 1;
        if !edge.sections.iter().any(|s| s == section_id) {
            edge.sections.push(section_id.to_string());
        }
    }
}
