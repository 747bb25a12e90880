//! Input document model
//!
//! The upstream semantic-structure collaborator hands over a nested tree of
//! chapters and sections. Content blocks arrive as one of a small set of
//! shapes; they are modeled as a sum type so extraction pattern-matches
//! exhaustively instead of probing optional keys.
//!
//! The core flattens the tree into a linear list of [`SectionRecord`]s before
//! any graph work, and validates structure at that single ingestion point.

use serde::{Deserialize, Serialize};

use crate::errors::{ConceptError, Result};

/// A block of section content. Variants mirror the shapes the upstream
/// collaborator produces (`content`, `text`, or `items` payloads).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Paragraph { content: String },
    Text { text: String },
    List { items: Vec<String> },
}

impl ContentBlock {
    /// Plain text carried by this block, list items joined by newlines
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::Paragraph { content } => content.clone(),
            ContentBlock::Text { text } => text.clone(),
            ContentBlock::List { items } => items.join("\n"),
        }
    }
}

/// Definitions and key terms pre-identified by an upstream classifier
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedConcepts {
    #[serde(default)]
    pub definitions: Vec<String>,

    #[serde(default)]
    pub key_terms: Vec<String>,
}

/// A section of the document tree. Sections nest recursively through both
/// `sections` and `subsections`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Opaque identifier owned by the upstream extractor
    pub id: String,

    #[serde(default)]
    pub heading_text: String,

    #[serde(default)]
    pub content_blocks: Vec<ContentBlock>,

    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub subsections: Vec<Section>,

    #[serde(default)]
    pub extracted_concepts: Option<ExtractedConcepts>,
}

/// A chapter groups top-level sections
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub sections: Vec<Section>,
}

/// The full input document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Document {
    pub chapters: Vec<Chapter>,
}

/// One flattened section, ready for term extraction
#[derive(Debug, Clone)]
pub struct SectionRecord {
    /// Section identifier
    pub id: String,

    /// Heading text
    pub heading: String,

    /// Body text of all content blocks, in order
    pub body: String,

    /// Upstream-supplied definition and key-term strings, in order
    pub key_terms: Vec<String>,
}

impl Document {
    /// Parse from a JSON value, mapping malformed structure to a single
    /// ingestion error.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConceptError::InvalidInputStructure {
            message: e.to_string(),
        })
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConceptError::InvalidInputStructure {
            message: e.to_string(),
        })
    }

    /// Validate structure, aggregating every problem into one error
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        for (chapter_idx, chapter) in self.chapters.iter().enumerate() {
            for section in &chapter.sections {
                check_section(section, chapter_idx, &mut problems);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConceptError::invalid_input(&problems))
        }
    }

    /// Flatten the chapter/section tree into a linear, depth-first list of
    /// section records. A zero-section document yields an empty list.
    pub fn flatten(&self) -> Vec<SectionRecord> {
        let mut records = Vec::new();
        for chapter in &self.chapters {
            for section in &chapter.sections {
                flatten_section(section, &mut records);
            }
        }
        records
    }
}

fn check_section(section: &Section, chapter_idx: usize, problems: &mut Vec<String>) {
    if section.id.trim().is_empty() {
        problems.push(format!(
            "section with heading {:?} in chapter {} has an empty id",
            section.heading_text, chapter_idx
        ));
    }
    for child in section.sections.iter().chain(section.subsections.iter()) {
        check_section(child, chapter_idx, problems);
    }
}

fn flatten_section(section: &Section, records: &mut Vec<SectionRecord>) {
    let body = section
        .content_blocks
        .iter()
        .map(ContentBlock::plain_text)
        .collect::<Vec<_>>()
        .join("\n");

    let key_terms = section
        .extracted_concepts
        .as_ref()
        .map(|ec| {
            ec.definitions
                .iter()
                .chain(ec.key_terms.iter())
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    records.push(SectionRecord {
        id: section.id.clone(),
        heading: section.heading_text.clone(),
        body,
        key_terms,
    });

    for child in section.sections.iter().chain(section.subsections.iter()) {
        flatten_section(child, records);
    }
}
