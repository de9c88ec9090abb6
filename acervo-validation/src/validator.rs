use tracing::{debug, info, warn};

use acervo_core::config::ValidationConfig;
use acervo_core::corpus::ScoredChunk;
use acervo_core::models::CompletenessReport;
use acervo_core::traits::IReasoner;

use crate::parse;
use crate::prompts;

/// Scores generated answers for coverage of the question and drives the
/// bounded retry round. Fail-open throughout: no code path here aborts a
/// request that already has an answer.
pub struct CompletenessValidator<'a> {
    reasoner: &'a dyn IReasoner,
    config: ValidationConfig,
}

impl<'a> CompletenessValidator<'a> {
    pub fn new(reasoner: &'a dyn IReasoner, config: ValidationConfig) -> Self {
        Self { reasoner, config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Score `answer` against `question`. Never errors: capability or
    /// parse failure degrades to the fail-open default.
    pub fn validate(&self, question: &str, answer: &str) -> CompletenessReport {
        let prompt = prompts::validation_prompt(question, answer);
        let raw = match self
            .reasoner
            .complete(&prompt, self.config.temperature, self.config.max_tokens)
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "completeness validation call failed, assuming complete");
                return CompletenessReport::assumed_complete();
            }
        };

        let report = parse::parse_report(&raw, answer, self.config.threshold)
            .unwrap_or_else(CompletenessReport::assumed_complete);

        info!(
            score = report.completeness_score,
            complete = report.is_complete,
            missing = report.missing_aspects.len(),
            "answer validated"
        );
        report
    }

    /// Turn up to `max_retry_queries` missing aspects into direct
    /// question strings for supplementary retrieval.
    pub fn generate_retry_queries(&self, missing_aspects: &[String]) -> Vec<String> {
        missing_aspects
            .iter()
            .take(self.config.max_retry_queries)
            .map(|aspect| {
                let aspect = aspect.trim();
                if aspect.ends_with('?') {
                    aspect.to_string()
                } else {
                    format!("¿Qué se establece sobre {aspect}?")
                }
            })
            .collect()
    }

    /// Merge the original answer with newly retrieved chunks. If no new
    /// chunks arrived, or the merge call fails, the original answer is
    /// returned unchanged — never fabricate.
    pub fn enhance(
        &self,
        question: &str,
        original_answer: &str,
        retry_chunks: &[ScoredChunk],
    ) -> String {
        if retry_chunks.is_empty() {
            debug!("no supplementary chunks, keeping original answer");
            return original_answer.to_string();
        }

        let new_context = retry_chunks
            .iter()
            .map(|c| format!("- {}", c.chunk.text))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = prompts::enhance_prompt(question, original_answer, &new_context);

        match self.reasoner.complete(
            &prompt,
            self.config.temperature,
            self.config.enhance_max_tokens,
        ) {
            Ok(enhanced) if !enhanced.trim().is_empty() => enhanced,
            Ok(_) => original_answer.to_string(),
            Err(e) => {
                warn!(error = %e, "answer enhancement failed, keeping original");
                original_answer.to_string()
            }
        }
    }
}
