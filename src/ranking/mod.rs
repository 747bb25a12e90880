//! Composite scoring, dense ranking, and importance tiers
//!
//! The composite score is the weighted sum of the computed metric scores;
//! metrics that were not computed contribute 0. Ranks are dense 1..N with
//! ties broken by first-discovery order, which node storage preserves, so a
//! stable sort over discovery order is all that is needed.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::config::CentralityWeights;
use crate::graph::{ConceptGraph, Metric};

/// Percentile bucket of the ranked concept list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceTier {
    /// Top 20% of ranked concepts
    High,
    /// 20th to 50th percentile
    Medium,
    /// Remainder
    Low,
}

/// Assigns composite scores, ranks, and tiers on an assembled, scored graph
#[derive(Debug, Clone)]
pub struct CompositeRanker {
    weights: CentralityWeights,
}

impl CompositeRanker {
    pub fn new(weights: CentralityWeights) -> Self {
        Self { weights }
    }

    /// Score and rank every node in place
    pub fn rank(&self, graph: &mut ConceptGraph) {
        let node_count = graph.node_count();
        if node_count == 0 {
            return;
        }

        for node in graph.nodes_mut() {
            node.composite_score = self.weights.frequency * node.score(Metric::Frequency)
                + self.weights.tfidf * node.score(Metric::Tfidf)
                + self.weights.pagerank * node.score(Metric::Pagerank)
                + self.weights.betweenness * node.score(Metric::Betweenness);
        }

        // Stable sort over discovery order gives the documented tie-break
        let mut order: Vec<usize> = (0..node_count).collect();
        let nodes = graph.nodes();
        order.sort_by(|&a, &b| {
            nodes[b]
                .composite_score
                .partial_cmp(&nodes[a].composite_score)
                .unwrap_or(Ordering::Equal)
        });

        let high_cutoff = node_count / 5;
        let medium_cutoff = node_count / 2;

        for (position, &index) in order.iter().enumerate() {
            let node = &mut graph.nodes_mut()[index];
            node.importance_rank = (position + 1) as u32;
            node.importance_tier = Some(if position < high_cutoff {
                ImportanceTier::High
            } else if position < medium_cutoff {
                ImportanceTier::Medium
            } else {
                ImportanceTier::Low
            });
        }

        debug!(concepts = node_count, "Concepts ranked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TermCountingMode;
    use crate::graph::GraphAssembler;
    use crate::terms::SectionConcept;

    fn concepts(terms: &[&str]) -> Vec<SectionConcept> {
        terms
            .iter()
            .map(|t| SectionConcept {
                normalized: t.to_lowercase(),
                display: t.to_string(),
                occurrences: 1,
            })
            .collect()
    }

    fn ranker() -> CompositeRanker {
        CompositeRanker::new(CentralityWeights::default())
    }

    #[test]
    fn test_composite_zero_when_all_scores_zero() {
        // Ranked without any centrality pass: every score map is empty
        let mut assembler = GraphAssembler::new(TermCountingMode::SectionPresence);
        assembler.add_section("s1", &concepts(&["A", "B"]));
        let mut graph = assembler.finish();

        let heavy = CompositeRanker::new(CentralityWeights {
            frequency: 10.0,
            tfidf: 10.0,
            pagerank: 10.0,
            betweenness: 10.0,
        });
        heavy.rank(&mut graph);

        for node in graph.nodes() {
            assert_eq!(node.composite_score, 0.0);
        }
    }

    #[test]
    fn test_ranks_are_dense_and_unique() {
        let mut assembler = GraphAssembler::new(TermCountingMode::SectionPresence);
        assembler.add_section("s1", &concepts(&["A", "B", "C", "D"]));
        let mut graph = assembler.finish();
        ranker().rank(&mut graph);

        let mut ranks: Vec<u32> = graph.nodes().iter().map(|n| n.importance_rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ties_break_by_discovery_order() {
        // All four concepts are structurally identical, so every composite
        // score ties; ranks must follow discovery order
        let mut assembler = GraphAssembler::new(TermCountingMode::SectionPresence);
        assembler.add_section("s1", &concepts(&["D", "A", "C", "B"]));
        let mut graph = assembler.finish();
        ranker().rank(&mut graph);

        assert_eq!(graph.node("d").unwrap().importance_rank, 1);
        assert_eq!(graph.node("a").unwrap().importance_rank, 2);
        assert_eq!(graph.node("c").unwrap().importance_rank, 3);
        assert_eq!(graph.node("b").unwrap().importance_rank, 4);
    }

    #[test]
    fn test_tier_boundaries_for_ten_concepts() {
        let terms: Vec<String> = (0..10).map(|i| format!("term{i:02}")).collect();
        let term_refs: Vec<&str> = terms.iter().map(String::as_str).collect();

        // Give earlier concepts higher frequency so ranks are deterministic
        let mut assembler = GraphAssembler::new(TermCountingMode::SectionPresence);
        for (i, term) in term_refs.iter().enumerate() {
            for s in 0..(10 - i) {
                assembler.add_section(&format!("s{i}-{s}"), &concepts(&[term]));
            }
        }
        let mut graph = assembler.finish();
        let engine = crate::centrality::CentralityEngine::new(
            crate::config::CentralityAlgorithm::All,
            crate::config::PageRankSettings::default(),
        );
        engine.compute(&mut graph);
        ranker().rank(&mut graph);

        let mut by_rank: Vec<&crate::graph::ConceptNode> = graph.nodes().iter().collect();
        by_rank.sort_by_key(|n| n.importance_rank);

        let tiers: Vec<ImportanceTier> =
            by_rank.iter().map(|n| n.importance_tier.unwrap()).collect();
        assert_eq!(&tiers[..2], &[ImportanceTier::High; 2]);
        assert_eq!(&tiers[2..5], &[ImportanceTier::Medium; 3]);
        assert_eq!(&tiers[5..], &[ImportanceTier::Low; 5]);
    }

    #[test]
    fn test_single_concept_lands_in_low_tier() {
        // N=1: N/5 and N/2 are both 0, so the only concept is "low"
        let mut assembler = GraphAssembler::new(TermCountingMode::SectionPresence);
        assembler.add_section("s1", &concepts(&["Solo"]));
        let mut graph = assembler.finish();
        ranker().rank(&mut graph);

        let node = graph.node("solo").unwrap();
        assert_eq!(node.importance_rank, 1);
        assert_eq!(node.importance_tier, Some(ImportanceTier::Low));
    }
}
