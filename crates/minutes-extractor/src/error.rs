//! Error types for the Extractor

use minutes_llm::LlmError;
use thiserror::Error;

/// Errors that fail an extraction
///
/// Soft LLM failures never become an `ExtractorError`; they produce an empty
/// result instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// The provider is not usable (usually a missing API key)
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    /// The provider could not be reached or answered with an error status
    #[error("LLM provider error: {0}")]
    Provider(LlmError),
}

impl From<LlmError> for ExtractorError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Configuration(msg) => ExtractorError::Configuration(msg),
            other => ExtractorError::Provider(other),
        }
    }
}

/// Why one element of the model's array could not be used as-is
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElementShapeError {
    /// Element was a string, number, array, ... rather than an object
    #[error("element {position} is not an object (found {found})")]
    NotAnObject {
        /// 1-based position in the array
        position: usize,
        /// JSON type that was found instead
        found: &'static str,
    },

    /// Object had no usable task, description, or title
    #[error("element {position} has no task")]
    MissingTask {
        /// 1-based position in the array
        position: usize,
    },
}
