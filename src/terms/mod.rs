//! Term filtering and per-section concept extraction
//!
//! The filter is a pure predicate: stopword set plus a minimum-length gate.
//! The extractor turns one section's heading and body into the *set* of
//! distinct concept strings (unigrams and adjacent-word bigrams) surviving
//! the filter, plus any upstream-supplied key terms that pass a length check.
//!
//! Returning a set per section is what makes `frequency` equal document
//! frequency under the default counting mode; per-occurrence counts are
//! still reported so the token-occurrence mode can diverge.

mod stopwords;

pub use stopwords::BASELINE;

use regex_lite::Regex;
use std::collections::{HashMap, HashSet};

use crate::config::EngineConfig;

/// Word token pattern: alphanumeric start, then alphanumerics, hyphens,
/// or apostrophes
const TOKEN_PATTERN: &str = r"[A-Za-z0-9][A-Za-z0-9'-]*";

/// Stopword and minimum-length gate for candidate terms
#[derive(Debug, Clone)]
pub struct TermFilter {
    stopwords: HashSet<String>,
    min_length: usize,
}

impl TermFilter {
    /// Build from configuration: baseline stopwords plus `stopwords_extend`
    pub fn new(config: &EngineConfig) -> Self {
        let mut stopwords: HashSet<String> =
            BASELINE.iter().map(|w| w.to_string()).collect();
        for word in &config.stopwords_extend {
            stopwords.insert(word.to_lowercase());
        }
        Self {
            stopwords,
            min_length: config.min_term_length,
        }
    }

    /// Check a single token: not a stopword (case-insensitive), long enough
    pub fn accepts(&self, token: &str) -> bool {
        let lower = token.to_lowercase();
        lower.chars().count() >= self.min_length && !self.stopwords.contains(&lower)
    }

    /// Check a two-token phrase: both constituent words must pass
    pub fn accepts_phrase(&self, first: &str, second: &str) -> bool {
        self.accepts(first) && self.accepts(second)
    }

    /// Number of stopwords in the filter
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

/// One distinct concept observed in a section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionConcept {
    /// Canonical lowercase form (the node key)
    pub normalized: String,

    /// Display form, first casing seen in this section
    pub display: String,

    /// In-section occurrence count (1 for upstream key terms)
    pub occurrences: u32,
}

/// Per-section concept extractor
#[derive(Debug)]
pub struct TermExtractor {
    filter: TermFilter,
    token_re: Regex,
    min_length: usize,
}

impl TermExtractor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            filter: TermFilter::new(config),
            token_re: Regex::new(TOKEN_PATTERN).expect("static token pattern"),
            min_length: config.min_term_length,
        }
    }

    /// Extract the deduplicated concept set for one section.
    ///
    /// Heading and body text contribute unigrams and adjacent-word bigrams;
    /// upstream key terms pass only the length gate (the classifier already
    /// vetted them). Order of first appearance is preserved so discovery
    /// order stays reproducible.
    pub fn extract(&self, heading: &str, body: &str, key_terms: &[String]) -> Vec<SectionConcept> {
        let mut concepts: Vec<SectionConcept> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        let text = if heading.is_empty() {
            body.to_string()
        } else {
            format!("{heading}\n{body}")
        };

        let tokens: Vec<&str> = self.token_re.find_iter(&text).map(|m| m.as_str()).collect();

        for (i, token) in tokens.iter().enumerate() {
            if self.filter.accepts(token) {
                record(&mut concepts, &mut index, token);
            }
            if let Some(next) = tokens.get(i + 1) {
                if self.filter.accepts_phrase(token, next) {
                    let phrase = format!("{token} {next}");
                    record(&mut concepts, &mut index, &phrase);
                }
            }
        }

        for term in key_terms {
            let trimmed = term.trim();
            if trimmed.chars().count() >= self.min_length {
                record_once(&mut concepts, &mut index, trimmed);
            }
        }

        concepts
    }
}

fn record(concepts: &mut Vec<SectionConcept>, index: &mut HashMap<String, usize>, display: &str) {
    let normalized = display.to_lowercase();
    if let Some(&i) = index.get(&normalized) {
        concepts[i].occurrences += 1;
    } else {
        index.insert(normalized.clone(), concepts.len());
        concepts.push(SectionConcept {
            normalized,
            display: display.to_string(),
            occurrences: 1,
        });
    }
}

fn record_once(
    concepts: &mut Vec<SectionConcept>,
    index: &mut HashMap<String, usize>,
    display: &str,
) {
    let normalized = display.to_lowercase();
    if !index.contains_key(&normalized) {
        index.insert(normalized.clone(), concepts.len());
        concepts.push(SectionConcept {
            normalized,
            display: display.to_string(),
            occurrences: 1,
        });
    }
}
