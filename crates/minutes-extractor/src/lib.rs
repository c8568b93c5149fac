//! Minutes Extractor
//!
//! Turns a meeting transcript into a list of action items using an LLM.
//!
//! # Architecture
//!
//! ```text
//! Transcript → PromptBuilder → LlmProvider → sanitize → parse → Vec<ExtractedItem>
//! ```
//!
//! Model output is treated as untrusted text. Only two failures reach the
//! caller: a missing credential and a provider that could not be reached or
//! answered with an error status. Everything else (odd envelopes, prose
//! instead of JSON, malformed arrays, junk elements) degrades to an empty
//! list or a positional placeholder item.
//!
//! # Example Usage
//!
//! ```no_run
//! use minutes_extractor::{Extractor, ExtractorConfig};
//! use minutes_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"[{"task": "Send report", "owner": "Sam"}]"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let items = extractor.extract("Sam will send the report by Friday.").await?;
//! println!("Found {} action items", items.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod sanitize;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::{ElementShapeError, ExtractorError};
pub use extractor::Extractor;
pub use parser::{parse_action_items, ParsedItems};
pub use prompt::PromptBuilder;
pub use sanitize::sanitize_response;
pub use types::{ExtractionMetadata, ExtractionOutcome, ExtractionReport};
