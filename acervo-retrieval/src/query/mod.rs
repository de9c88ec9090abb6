//! Query classification: structural pattern detection, reasoning-backed
//! decomposition, and a deterministic heuristic fallback.

mod decomposer;
mod heuristic;
mod structural;

pub use structural::{NamedSection, SectionIndex};

use tracing::{debug, warn};

use acervo_core::config::ClassifierConfig;
use acervo_core::models::{Complexity, QueryAnalysis, QueryType, SearchStrategy};
use acervo_core::traits::IReasoner;

/// Decides how a query should be searched.
///
/// The ladder is strict: structural detection first (regex, cheap,
/// deterministic), then the reasoning-backed decomposer, then the keyword
/// heuristic. A reasoner failure or malformed output drops one rung —
/// classification itself can never fail.
pub struct QueryClassifier<'a> {
    reasoner: Option<&'a dyn IReasoner>,
    section_index: Option<&'a SectionIndex>,
    config: ClassifierConfig,
}

impl<'a> QueryClassifier<'a> {
    pub fn new(
        reasoner: Option<&'a dyn IReasoner>,
        section_index: Option<&'a SectionIndex>,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            reasoner,
            section_index,
            config,
        }
    }

    /// Classify `query`. `document_id` (when the caller knows the target
    /// document) enables section-name resolution.
    pub fn classify(&self, query: &str, document_id: Option<&str>) -> QueryAnalysis {
        let detection = structural::detect(query, self.section_index, document_id);
        if !detection.filters.is_empty() {
            let mut analysis = QueryAnalysis::simple();
            analysis.detected_filters = detection.filters;
            if detection.remainder.chars().count() > self.config.min_remainder_chars {
                // Filters alone would miss the semantic part of the question.
                analysis.query_type = QueryType::Hybrid;
                analysis.complexity = Complexity::Medium;
                analysis.enhanced_query = Some(detection.remainder);
            } else {
                analysis.query_type = QueryType::Structural;
            }
            debug!(?analysis.query_type, filters = analysis.detected_filters.len(), "structural classification");
            return analysis;
        }

        let reasoned = self.reasoner.and_then(|reasoner| {
            let prompt = decomposer::prompt(query);
            match reasoner.complete(
                &prompt,
                self.config.reasoning_temperature,
                self.config.reasoning_max_tokens,
            ) {
                Ok(raw) => decomposer::parse_analysis(&raw),
                Err(e) => {
                    warn!(error = %e, "decomposer call failed, using heuristic classifier");
                    None
                }
            }
        });

        let analysis = reasoned.unwrap_or_else(|| heuristic::classify(query));
        apply_invariants(analysis)
    }

    /// How many chunks the chosen strategy should retrieve: aggregations
    /// sweep wide, simple lookups stay narrow.
    pub fn retrieval_top_k(&self, analysis: &QueryAnalysis, default_top_k: usize) -> usize {
        match analysis.query_type {
            QueryType::Aggregation => self.config.aggregation_top_k,
            QueryType::Comparison => self.config.comparison_top_k,
            QueryType::Structural => self.config.exhaustive_top_k,
            QueryType::Hybrid => self.config.hybrid_top_k,
            QueryType::SimpleSemantic => self.config.semantic_top_k,
            _ if analysis.search_strategy == SearchStrategy::Exhaustive => {
                self.config.exhaustive_top_k
            }
            _ => default_top_k,
        }
    }
}

/// Enforce the classification invariants no matter which rung produced
/// the analysis, then derive the single primary strategy.
fn apply_invariants(mut analysis: QueryAnalysis) -> QueryAnalysis {
    match analysis.query_type {
        QueryType::Comparison | QueryType::Conditional if analysis.sub_queries.len() >= 2 => {
            analysis.requires_multihop = true;
        }
        QueryType::Aggregation => {
            analysis.requires_multihop = false;
        }
        _ => {}
    }
    // Multihop without a decomposition is unexecutable.
    if analysis.sub_queries.len() < 2 {
        analysis.requires_multihop = false;
    }

    analysis.search_strategy = if analysis.requires_multihop {
        match analysis.query_type {
            QueryType::Comparison => SearchStrategy::MultihopComparison,
            QueryType::Conditional => SearchStrategy::MultihopConditional,
            _ => SearchStrategy::Multihop,
        }
    } else if analysis.query_type == QueryType::Aggregation {
        SearchStrategy::Exhaustive
    } else {
        SearchStrategy::Standard
    };
    analysis
}
