//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{parse_action_items, ParsedItems};
use crate::prompt::PromptBuilder;
use crate::sanitize::sanitize_response;
use crate::types::{ExtractionMetadata, ExtractionOutcome, ExtractionReport};
use minutes_domain::traits::LlmProvider;
use minutes_domain::ExtractedItem;
use minutes_llm::LlmError;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The Extractor converts a meeting transcript into action items
///
/// Stateless apart from its provider and config; one extraction is one
/// provider call with no retry.
pub struct Extractor<L: LlmProvider> {
    llm_provider: L,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider<Error = LlmError>,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract action items from a transcript
    ///
    /// Fails only when the provider is misconfigured or unreachable, or
    /// returns an error status. Unusable model output yields an empty list.
    pub async fn extract(&self, transcript: &str) -> Result<Vec<ExtractedItem>, ExtractorError> {
        Ok(self.extract_with_report(transcript).await?.items)
    }

    /// Extract action items and report which fallback, if any, fired
    pub async fn extract_with_report(
        &self,
        transcript: &str,
    ) -> Result<ExtractionReport, ExtractorError> {
        let start = Instant::now();

        info!(
            provider = self.llm_provider.name(),
            model = self.llm_provider.model(),
            transcript_chars = transcript.len(),
            "Starting extraction"
        );

        let prompt = PromptBuilder::new(transcript).build();
        debug!("Prompt length: {} chars", prompt.len());

        let (parsed, completion_chars) =
            match self.llm_provider.complete(&prompt, &self.config.params()).await {
                Ok(raw) => {
                    debug!("LLM response length: {} chars", raw.len());
                    let cleaned = sanitize_response(&raw);
                    (parse_action_items(&cleaned), raw.len())
                }
                Err(e) if e.is_soft() => {
                    warn!("Unexpected provider envelope, returning no items: {}", e);
                    (
                        ParsedItems {
                            items: Vec::new(),
                            outcome: ExtractionOutcome::EmptyEnvelope,
                            shape_errors: Vec::new(),
                        },
                        0,
                    )
                }
                Err(e) => {
                    warn!("Extraction failed: {}", e);
                    return Err(e.into());
                }
            };

        let metadata = ExtractionMetadata {
            provider: self.llm_provider.name().to_string(),
            model: self.llm_provider.model().to_string(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            completion_chars,
        };

        info!(
            outcome = %parsed.outcome,
            items = parsed.items.len(),
            placeholders = parsed.shape_errors.len(),
            elapsed_ms = metadata.elapsed_ms,
            "Extraction complete"
        );

        Ok(ExtractionReport {
            items: parsed.items,
            outcome: parsed.outcome,
            shape_errors: parsed.shape_errors,
            metadata,
        })
    }
}
