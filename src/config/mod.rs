//! Configuration for the concept extraction engine
//!
//! Supports loading configuration from:
//! - Configuration files (config.toml, config.yaml)
//! - Environment variables (prefixed with CONCEPT__)
//! - Default values
//!
//! The engine itself only ever reads configuration once, at construction.
//! Any load or parse failure degrades to the built-in defaults; a strict
//! loader is available for callers that want the failure instead.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{ConceptError, Result};

/// Weights applied to the four centrality metrics when computing the
/// composite score. Not required to sum to 1; callers own sane weights.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CentralityWeights {
    #[serde(default = "default_frequency_weight")]
    pub frequency: f64,

    #[serde(default = "default_tfidf_weight")]
    pub tfidf: f64,

    #[serde(default = "default_pagerank_weight")]
    pub pagerank: f64,

    #[serde(default = "default_betweenness_weight")]
    pub betweenness: f64,
}

impl Default for CentralityWeights {
    fn default() -> Self {
        Self {
            frequency: default_frequency_weight(),
            tfidf: default_tfidf_weight(),
            pagerank: default_pagerank_weight(),
            betweenness: default_betweenness_weight(),
        }
    }
}

/// Which centrality metric(s) to compute.
///
/// `All` computes every metric and combines them. A single-metric selection
/// computes only that metric; the composite then reduces to that metric's
/// weighted score since absent metrics score 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CentralityAlgorithm {
    #[default]
    All,
    Frequency,
    Tfidf,
    Pagerank,
    Betweenness,
}

/// How a concept's `frequency` is counted during extraction.
///
/// Under `SectionPresence` each section contributes at most 1 regardless of
/// in-section repetition, so frequency and document frequency coincide — a
/// section-coverage signal. `TokenOccurrence` counts every in-section
/// occurrence, making frequency a true term count while document frequency
/// still counts sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TermCountingMode {
    #[default]
    SectionPresence,
    TokenOccurrence,
}

/// PageRank iteration parameters
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PageRankSettings {
    /// Damping factor (typically 0.85)
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Fixed iteration count; also the cap when `epsilon` is set
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Optional early exit when the L1 rank delta drops below this value.
    /// `None` keeps the fixed-iteration reproducible baseline.
    #[serde(default)]
    pub epsilon: Option<f64>,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            iterations: default_iterations(),
            epsilon: None,
        }
    }
}

/// Main engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Composite score weights per metric
    #[serde(default)]
    pub centrality_weights: CentralityWeights,

    /// Which metric(s) to compute
    #[serde(default)]
    pub centrality_algorithm: CentralityAlgorithm,

    /// Extra stopwords merged into the built-in baseline (case-insensitive)
    #[serde(default)]
    pub stopwords_extend: Vec<String>,

    /// Minimum term length accepted by the filter
    #[serde(default = "default_min_term_length")]
    pub min_term_length: usize,

    /// Frequency counting mode for extraction
    #[serde(default)]
    pub counting_mode: TermCountingMode,

    /// Number of ranked concepts exposed in the catalogue's top list
    #[serde(default = "default_top_concepts_count")]
    pub top_concepts_count: usize,

    /// Minimum section-count before downstream consumers treat a concept as
    /// notable. The engine computes metrics for all nodes regardless;
    /// filtering by this threshold is a caller responsibility.
    #[serde(default = "default_min_term_frequency")]
    pub min_term_frequency: u32,

    /// Maximum number of edges emitted in the catalogue (construction order)
    #[serde(default = "default_edge_limit")]
    pub edge_limit: usize,

    /// Maximum co-occurring concepts listed per catalogue node
    #[serde(default = "default_cooccurrence_limit")]
    pub cooccurrence_limit: usize,

    /// PageRank parameters
    #[serde(default)]
    pub pagerank: PageRankSettings,
}

// Default value functions
fn default_frequency_weight() -> f64 { 0.2 }
fn default_tfidf_weight() -> f64 { 0.3 }
fn default_pagerank_weight() -> f64 { 0.3 }
fn default_betweenness_weight() -> f64 { 0.2 }
fn default_damping() -> f64 { 0.85 }
fn default_iterations() -> usize { 100 }
fn default_min_term_length() -> usize { 3 }
fn default_top_concepts_count() -> usize { 20 }
fn default_min_term_frequency() -> u32 { 2 }
fn default_edge_limit() -> usize { 100 }
fn default_cooccurrence_limit() -> usize { 10 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            centrality_weights: CentralityWeights::default(),
            centrality_algorithm: CentralityAlgorithm::default(),
            stopwords_extend: Vec::new(),
            min_term_length: default_min_term_length(),
            counting_mode: TermCountingMode::default(),
            top_concepts_count: default_top_concepts_count(),
            min_term_frequency: default_min_term_frequency(),
            edge_limit: default_edge_limit(),
            cooccurrence_limit: default_cooccurrence_limit(),
            pagerank: PageRankSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a specific file, with CONCEPT__ environment overrides.
    /// Fails instead of falling back; use [`EngineConfig::load_or_default`]
    /// for the recovering variant.
    pub fn from_file(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("CONCEPT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConceptError::Configuration {
                message: e.to_string(),
            })?;

        config
            .try_deserialize()
            .map_err(|e| ConceptError::Configuration {
                message: e.to_string(),
            })
    }

    /// Load from a file, falling back to built-in defaults on any read or
    /// parse failure. No error escapes this path.
    pub fn load_or_default(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path, error = %e, "Config load failed, using defaults");
                Self::default()
            }
        }
    }
}
