//! The retrieval pipeline: the one entry point callers use.

use std::collections::BTreeSet;

use tracing::{info, instrument, warn};

use acervo_core::config::AcervoConfig;
use acervo_core::corpus::ScoredChunk;
use acervo_core::errors::AcervoResult;
use acervo_core::models::{
    CompletenessReport, RetrievalOutcome, SearchFilter, SearchStrategy, ValidationState,
};
use acervo_core::traits::{IEmbedder, IPointStore, IReasoner};
use acervo_lexical::Bm25Scorer;
use acervo_validation::CompletenessValidator;

use crate::hyde::{HydeRetriever, HydeState};
use crate::multihop::MultihopOrchestrator;
use crate::query::{QueryClassifier, SectionIndex};
use crate::search::HybridSearchEngine;

/// Per-request options. Everything defaults to "let the classifier decide".
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Override the strategy-derived result size.
    pub top_k: Option<usize>,
    /// The document the question is known to target; enables section-name
    /// resolution and restricts results to that document.
    pub document_id: Option<String>,
}

/// Result of the post-answer refinement loop.
#[derive(Debug, Clone)]
pub struct RefinedAnswer {
    /// The answer to hand to the caller (enhanced or the original).
    pub answer: String,
    pub state: ValidationState,
    /// The last completeness report produced.
    pub report: CompletenessReport,
    /// Chunks the retry round added beyond the original retrieval.
    pub supplementary: Vec<ScoredChunk>,
}

/// Classify, pick exactly one primary strategy, execute it, apply the
/// one-shot HyDE fallback, and drive the bounded post-answer retry loop.
///
/// All capabilities are injected; the pipeline holds no global state and
/// a single instance serves concurrent callers (`&self` throughout).
pub struct RetrievalPipeline<'a> {
    store: &'a dyn IPointStore,
    embedder: &'a dyn IEmbedder,
    reasoner: &'a dyn IReasoner,
    scorer: Option<&'a Bm25Scorer>,
    section_index: Option<&'a SectionIndex>,
    config: AcervoConfig,
}

impl<'a> RetrievalPipeline<'a> {
    pub fn new(
        store: &'a dyn IPointStore,
        embedder: &'a dyn IEmbedder,
        reasoner: &'a dyn IReasoner,
        scorer: Option<&'a Bm25Scorer>,
        section_index: Option<&'a SectionIndex>,
        config: AcervoConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            reasoner,
            scorer,
            section_index,
            config,
        }
    }

    /// Retrieve context for `question` within `partition`.
    #[instrument(skip(self, options))]
    pub fn run(
        &self,
        question: &str,
        partition: &str,
        options: &RunOptions,
    ) -> AcervoResult<RetrievalOutcome> {
        let mut filter = SearchFilter::new(partition);
        filter.ensure_partition()?;
        if let Some(document_id) = &options.document_id {
            filter = filter.with_document(document_id.clone());
        }

        let classifier = QueryClassifier::new(
            Some(self.reasoner),
            self.section_index,
            self.config.classifier.clone(),
        );
        let analysis = classifier.classify(question, options.document_id.as_deref());
        for (field, value) in &analysis.detected_filters {
            filter = filter.with_structural(*field, value.clone());
        }

        let top_k = options.top_k.unwrap_or_else(|| {
            classifier.retrieval_top_k(&analysis, self.config.search.default_top_k)
        });
        let engine = self.engine();

        info!(
            query_type = ?analysis.query_type,
            strategy = ?analysis.search_strategy,
            top_k,
            "query classified"
        );

        let search_query = analysis.enhanced_query.as_deref().unwrap_or(question);
        let multihop = analysis.requires_multihop && analysis.sub_queries.len() >= 2;

        let (chunks, strategy, sub_query_count, hyde_primary) = if multihop {
            let orchestrator = MultihopOrchestrator::new(&engine, self.config.multihop.clone());
            let chunks =
                orchestrator.retrieve(&analysis.sub_queries, analysis.search_strategy, &filter)?;
            (
                chunks,
                analysis.search_strategy,
                analysis.sub_queries.len(),
                false,
            )
        } else if HydeRetriever::should_use_hyde(&analysis, question) {
            let hyde = HydeRetriever::new(&engine, self.reasoner, self.config.hyde.clone());
            let chunks = hyde.retrieve(question, &filter, top_k)?;
            (chunks, SearchStrategy::Hyde, 1, true)
        } else if analysis.search_strategy == SearchStrategy::Exhaustive {
            let chunks = engine.search_with_context(
                search_query,
                &filter,
                top_k,
                self.config.search.context_window,
            )?;
            (chunks, SearchStrategy::Exhaustive, 1, false)
        } else {
            let chunks = engine.search(search_query, &filter, top_k)?;
            (chunks, analysis.search_strategy, 1, false)
        };

        // One-shot HyDE fallback for every strategy except a HyDE primary,
        // which would only repeat itself.
        let mut fallback_attempted = false;
        let mut fallback_used = false;
        let chunks = if !hyde_primary {
            let hyde = HydeRetriever::new(&engine, self.reasoner, self.config.hyde.clone());
            let (chunks, state) = hyde.fallback(question, &filter, top_k, chunks);
            match state {
                HydeState::FallbackAdopted => {
                    fallback_attempted = true;
                    fallback_used = true;
                }
                HydeState::FallbackRejected => fallback_attempted = true,
                HydeState::Skipped | HydeState::Primary => {}
            }
            chunks
        } else {
            chunks
        };

        if chunks.is_empty() {
            info!("no results after all strategies");
            let mut outcome =
                RetrievalOutcome::empty(strategy, question, analysis.detected_filters.clone());
            outcome.stats.fallback_attempted = fallback_attempted;
            return Ok(outcome);
        }

        let mut outcome = RetrievalOutcome::new(chunks, strategy, sub_query_count);
        outcome.stats.fallback_attempted = fallback_attempted;
        outcome.stats.fallback_used = fallback_used;
        info!(
            chunks = outcome.chunks.len(),
            avg_score = outcome.stats.avg_score,
            fallback_used,
            "retrieval complete"
        );
        Ok(outcome)
    }

    /// Post-answer loop: validate completeness and, when incomplete, run
    /// one bounded supplementary retrieval round and merge. Fail-open:
    /// the worst case is the original answer, unchanged.
    pub fn refine(
        &self,
        question: &str,
        answer: &str,
        partition: &str,
        outcome: &RetrievalOutcome,
    ) -> AcervoResult<RefinedAnswer> {
        let filter = SearchFilter::new(partition);
        filter.ensure_partition()?;

        let validator = CompletenessValidator::new(self.reasoner, self.config.validation.clone());
        let mut report = validator.validate(question, answer);
        if report.is_complete {
            return Ok(RefinedAnswer {
                answer: answer.to_string(),
                state: ValidationState::Complete,
                report,
                supplementary: Vec::new(),
            });
        }

        let engine = self.engine();
        let mut seen: BTreeSet<String> =
            outcome.chunks.iter().map(|c| c.chunk.id.clone()).collect();
        let mut current = answer.to_string();
        let mut supplementary: Vec<ScoredChunk> = Vec::new();
        let mut state = ValidationState::IncompleteExhausted;

        let max_rounds = self.config.validation.max_rounds;
        for round in 0..max_rounds {
            let queries = validator.generate_retry_queries(&report.missing_aspects);
            if queries.is_empty() {
                break;
            }
            let mut fresh: Vec<ScoredChunk> = Vec::new();
            for query in &queries {
                match engine.search(query, &filter, self.config.search.default_top_k) {
                    Ok(chunks) => {
                        for scored in chunks {
                            if seen.insert(scored.chunk.id.clone()) {
                                fresh.push(scored);
                            }
                        }
                    }
                    Err(e) => warn!(query = %query, error = %e, "supplementary retrieval failed"),
                }
            }
            if fresh.is_empty() {
                break;
            }

            current = validator.enhance(question, &current, &fresh);
            supplementary.extend(fresh);
            state = ValidationState::IncompleteRetried;

            // Re-validate only if another round could still run.
            if round + 1 == max_rounds {
                break;
            }
            report = validator.validate(question, &current);
            if report.is_complete {
                break;
            }
        }

        info!(?state, supplementary = supplementary.len(), "refinement done");
        Ok(RefinedAnswer {
            answer: current,
            state,
            report,
            supplementary,
        })
    }

    fn engine(&self) -> HybridSearchEngine<'a> {
        HybridSearchEngine::new(
            self.store,
            self.embedder,
            self.scorer,
            self.config.search.clone(),
        )
    }
}
