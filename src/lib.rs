//! conceptrank - concept graph and centrality ranking core
//!
//! Ingests a sectioned document and produces a ranked catalogue of concepts
//! (significant terms and short phrases) so downstream content selection can
//! decide what survives a strict size budget:
//! - Term filtering (stopwords, minimum length) and per-section extraction
//! - Co-occurrence graph assembly over section concept sets
//! - Four centrality metrics: frequency, TF-IDF, PageRank, betweenness
//! - Composite ranking with importance tiers
//! - Bounded catalogue serialization
//!
//! The pipeline is a single-threaded, synchronous batch: one build per
//! extraction request, no I/O after construction, no state retained between
//! builds.

pub mod catalogue;
pub mod centrality;
pub mod config;
pub mod document;
pub mod errors;
pub mod graph;
pub mod ranking;
pub mod terms;

pub use catalogue::{CatalogueSerializer, ConceptCatalogue, RankedConcept};
pub use centrality::CentralityEngine;
pub use config::{CentralityAlgorithm, CentralityWeights, EngineConfig, TermCountingMode};
pub use document::{Document, SectionRecord};
pub use errors::{ConceptError, Result};
pub use graph::{ConceptGraph, GraphAssembler, Metric};
pub use ranking::{CompositeRanker, ImportanceTier};
pub use terms::{TermExtractor, TermFilter};

use tracing::{debug, info};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The full extraction pipeline: filter, extract, assemble, score, rank,
/// serialize. Holds configuration only; every call to [`extract`] builds its
/// own graph, so one engine can serve many requests.
///
/// [`extract`]: ConceptGraphEngine::extract
#[derive(Debug)]
pub struct ConceptGraphEngine {
    config: EngineConfig,
    extractor: TermExtractor,
}

impl ConceptGraphEngine {
    pub fn new(config: EngineConfig) -> Self {
        let extractor = TermExtractor::new(&config);
        Self { config, extractor }
    }

    /// Construct with configuration from a file, falling back to built-in
    /// defaults on any read or parse failure
    pub fn from_config_file(path: &str) -> Self {
        Self::new(EngineConfig::load_or_default(path))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the ranked concept catalogue for one document.
    ///
    /// Structural validation happens first; a malformed document fails here
    /// with one aggregated error before any graph work. A document with zero
    /// extractable concepts is a valid, degenerate result.
    pub fn extract(&self, document: &Document) -> Result<ConceptCatalogue> {
        document.validate()?;
        let sections = document.flatten();
        debug!(sections = sections.len(), "Document flattened");

        let mut assembler = GraphAssembler::new(self.config.counting_mode);
        for section in &sections {
            let concepts = self
                .extractor
                .extract(&section.heading, &section.body, &section.key_terms);
            assembler.add_section(&section.id, &concepts);
        }
        let mut graph = assembler.finish();

        let engine = CentralityEngine::new(
            self.config.centrality_algorithm,
            self.config.pagerank,
        );
        engine.compute(&mut graph);

        CompositeRanker::new(self.config.centrality_weights).rank(&mut graph);

        let catalogue = CatalogueSerializer::new(
            self.config.edge_limit,
            self.config.cooccurrence_limit,
            self.config.top_concepts_count,
        )
        .serialize(&graph);

        info!(
            sections = catalogue.total_sections,
            concepts = catalogue.statistics.total_concepts,
            edges = catalogue.statistics.total_edges,
            top_concepts = catalogue.statistics.top_concepts_count,
            "Concept catalogue built"
        );

        Ok(catalogue)
    }

    /// Build the graph only, without ranking output bounds applied. Exposed
    /// for diagnostics; [`extract`](ConceptGraphEngine::extract) is the
    /// production path.
    pub fn build_graph(&self, document: &Document) -> Result<ConceptGraph> {
        document.validate()?;

        let mut assembler = GraphAssembler::new(self.config.counting_mode);
        for section in &document.flatten() {
            let concepts = self
                .extractor
                .extract(&section.heading, &section.body, &section.key_terms);
            assembler.add_section(&section.id, &concepts);
        }
        Ok(assembler.finish())
    }
}

impl Default for ConceptGraphEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
