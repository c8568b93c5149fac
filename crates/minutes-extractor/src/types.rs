//! Extraction result types

use crate::error::ElementShapeError;
use minutes_domain::ExtractedItem;
use std::fmt;

/// Which path the normalizer took through the model output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// An array was found and parsed (possibly empty)
    Parsed,
    /// The provider envelope had no completion text
    EmptyEnvelope,
    /// No `[ ... ]` span in the output
    NoJsonSpan,
    /// The bracketed span was not valid JSON
    Unparsable,
    /// Valid JSON, but not an array
    NotAnArray,
}

impl fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtractionOutcome::Parsed => "parsed",
            ExtractionOutcome::EmptyEnvelope => "empty_envelope",
            ExtractionOutcome::NoJsonSpan => "no_json_span",
            ExtractionOutcome::Unparsable => "unparsable",
            ExtractionOutcome::NotAnArray => "not_an_array",
        };
        write!(f, "{}", s)
    }
}

/// Metadata about an extraction call
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMetadata {
    /// Provider name
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Wall-clock time including the LLM call
    pub elapsed_ms: u64,

    /// Length of the raw completion in bytes (0 when the envelope was empty)
    pub completion_chars: usize,
}

/// Full result of one extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    /// Items in the order the model returned them
    pub items: Vec<ExtractedItem>,

    /// Which fallback fired, if any
    pub outcome: ExtractionOutcome,

    /// Elements replaced by positional placeholders
    pub shape_errors: Vec<ElementShapeError>,

    /// Call metadata
    pub metadata: ExtractionMetadata,
}

impl ExtractionReport {
    /// Number of items that are placeholders
    pub fn placeholder_count(&self) -> usize {
        self.shape_errors.len()
    }
}
