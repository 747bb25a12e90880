//! End-to-end pipeline tests over JSON documents

use conceptrank::{
    CentralityAlgorithm, ConceptGraphEngine, Document, EngineConfig, Metric, TermCountingMode,
};
use serde_json::json;

fn section(id: &str, content: &str) -> serde_json::Value {
    json!({
        "id": id,
        "headingText": "",
        "contentBlocks": [ { "content": content } ]
    })
}

fn document(sections: Vec<serde_json::Value>) -> Document {
    Document::from_value(json!({ "chapters": [{ "sections": sections }] })).unwrap()
}

#[test]
fn empty_document_yields_degenerate_catalogue() {
    let doc = Document::from_value(json!({ "chapters": [] })).unwrap();
    let catalogue = ConceptGraphEngine::default().extract(&doc).unwrap();

    assert_eq!(catalogue.total_sections, 0);
    assert!(catalogue.nodes.is_empty());
    assert!(catalogue.edges.is_empty());
    assert!(catalogue.top_concepts.is_empty());
    assert_eq!(catalogue.statistics.total_concepts, 0);
    assert_eq!(catalogue.statistics.total_edges, 0);
    assert_eq!(catalogue.statistics.avg_concepts_per_section, 0.0);
    assert_eq!(catalogue.statistics.avg_connections_per_concept, 0.0);
}

#[test]
fn identical_input_builds_identical_catalogues() {
    let build = || {
        let doc = document(vec![
            section("s1", "networks connect routers switches gateways"),
            section("s2", "routers forward packets between networks"),
            section("s3", "switches bridge segments inside networks"),
        ]);
        ConceptGraphEngine::default().extract(&doc).unwrap()
    };

    let first = build();
    let second = build();

    for (key, node) in &first.nodes {
        let other = &second.nodes[key];
        assert_eq!(node.composite_score, other.composite_score, "score for {key}");
        assert_eq!(node.importance_rank, other.importance_rank, "rank for {key}");
    }
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn single_metric_selector_is_honored() {
    let config = EngineConfig {
        centrality_algorithm: CentralityAlgorithm::Frequency,
        ..EngineConfig::default()
    };
    let doc = document(vec![section("s1", "kernel scheduler threads")]);
    let catalogue = ConceptGraphEngine::new(config).extract(&doc).unwrap();

    for node in catalogue.nodes.values() {
        assert!(node.scores.contains_key(&Metric::Frequency));
        assert!(!node.scores.contains_key(&Metric::Pagerank));
        assert!(!node.scores.contains_key(&Metric::Tfidf));
        assert!(!node.scores.contains_key(&Metric::Betweenness));
        // composite reduces to the frequency term alone
        let expected = 0.2 * node.scores[&Metric::Frequency];
        assert!((node.composite_score - expected).abs() < 1e-12);
    }
}

#[test]
fn counting_mode_splits_frequency_from_document_frequency() {
    let doc = document(vec![section(
        "s1",
        "compiler compiler compiler optimizes bytecode",
    )]);

    let presence = ConceptGraphEngine::default().extract(&doc).unwrap();
    let node = &presence.nodes["compiler"];
    assert_eq!(node.frequency, node.document_frequency);

    let config = EngineConfig {
        counting_mode: TermCountingMode::TokenOccurrence,
        ..EngineConfig::default()
    };
    let occurrence = ConceptGraphEngine::new(config).extract(&doc).unwrap();
    let node = &occurrence.nodes["compiler"];
    assert_eq!(node.frequency, 3);
    assert_eq!(node.document_frequency, 1);
}

#[test]
fn stopword_extension_removes_concepts() {
    let doc = document(vec![section("s1", "chapter summary review")]);

    let plain = ConceptGraphEngine::default().extract(&doc).unwrap();
    assert!(plain.nodes.contains_key("chapter"));

    let config = EngineConfig {
        stopwords_extend: vec!["chapter".to_string()],
        ..EngineConfig::default()
    };
    let filtered = ConceptGraphEngine::new(config).extract(&doc).unwrap();
    assert!(!filtered.nodes.contains_key("chapter"));
    assert!(filtered.nodes.contains_key("summary"));
}

#[test]
fn upstream_key_terms_join_the_graph() {
    let doc = Document::from_value(json!({
        "chapters": [{
            "sections": [{
                "id": "s1",
                "headingText": "Memory",
                "contentBlocks": [ { "content": "allocation strategies differ" } ],
                "extractedConcepts": {
                    "definitions": ["virtual memory"],
                    "keyTerms": ["paging"]
                }
            }]
        }]
    }))
    .unwrap();

    let catalogue = ConceptGraphEngine::default().extract(&doc).unwrap();
    assert!(catalogue.nodes.contains_key("virtual memory"));
    assert!(catalogue.nodes.contains_key("paging"));

    // key terms co-occur with extracted terms from the same section
    let paging = &catalogue.nodes["paging"];
    assert!(paging.co_occurring_concepts.contains_key("allocation"));
}

#[test]
fn malformed_document_fails_before_graph_work() {
    let doc = document(vec![section("", "orphan content here")]);
    let result = ConceptGraphEngine::default().extract(&doc);
    assert!(matches!(
        result,
        Err(conceptrank::ConceptError::InvalidInputStructure { .. })
    ));
}

#[test]
fn edge_weights_cover_the_unit_interval_top() {
    let doc = document(vec![
        section("s1", "alpha beta"),
        section("s2", "alpha beta"),
        section("s3", "alpha gamma"),
    ]);
    let catalogue = ConceptGraphEngine::default().extract(&doc).unwrap();

    let max_weight = catalogue
        .edges
        .iter()
        .map(|e| e.weight)
        .fold(0.0f64, f64::max);
    assert_eq!(max_weight, 1.0);
    assert!(catalogue.edges.iter().all(|e| e.weight > 0.0 && e.weight <= 1.0));
}

#[test]
fn ranked_output_has_dense_unique_ranks() {
    let doc = document(vec![
        section("s1", "tensor gradients backprop"),
        section("s2", "tensor shapes broadcasting"),
        section("s3", "gradients vanish exploding"),
    ]);
    let catalogue = ConceptGraphEngine::default().extract(&doc).unwrap();

    let mut ranks: Vec<u32> = catalogue.nodes.values().map(|n| n.importance_rank).collect();
    ranks.sort_unstable();
    let expected: Vec<u32> = (1..=ranks.len() as u32).collect();
    assert_eq!(ranks, expected);

    // top concepts mirror the best ranks
    assert_eq!(catalogue.top_concepts[0].rank, 1);
    let top_terms: Vec<&str> = catalogue
        .top_concepts
        .iter()
        .map(|c| c.term.as_str())
        .collect();
    assert!(top_terms.contains(&"tensor") || top_terms.contains(&"gradients"));
}
