//! Hypothetical-document retrieval: generate the passage an ideal answer
//! would live in, search with it, and fuse with the original query.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use acervo_core::config::HydeConfig;
use acervo_core::corpus::ScoredChunk;
use acervo_core::errors::AcervoResult;
use acervo_core::models::{QueryAnalysis, QueryType, SearchFilter};
use acervo_core::traits::IReasoner;

use crate::search::rrf::{self, RankedArm};
use crate::search::HybridSearchEngine;

/// Where one request ended up on the HyDE fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydeState {
    /// Scores were fine (or HyDE was the primary strategy); no fallback ran.
    Skipped,
    /// HyDE was the primary strategy for this query.
    Primary,
    /// The fallback ran but did not improve enough; original results kept.
    FallbackRejected,
    /// The fallback ran and its results replaced the originals.
    FallbackAdopted,
}

/// Register the hypothetical passage should be written in, inferred from
/// the partition the query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRegister {
    Legal,
    Technical,
    Generic,
}

static SECTION_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(art[ií]culo|cap[ií]tulo|secci[oó]n|t[ií]tulo|anexo)\s+\S*\d").expect("static pattern")
});

const ABOUT_SECTION_CUES: &[&str] = &[
    "qué dice",
    "que dice",
    "qué establece",
    "que establece",
    "what does",
];

const DEFINITION_CUES: &[&str] = &[
    "qué es",
    "que es",
    "qué significa",
    "que significa",
    "definición",
    "definicion",
    "define",
    "what is",
];

const PROCEDURAL_CUES: &[&str] = &[
    "cómo",
    "como se",
    "pasos",
    "procedimiento",
    "proceso",
    "how to",
];

const EXPLANATION_CUES: &[&str] = &[
    "explica",
    "explique",
    "describe",
    "explain",
    "por qué",
    "por que",
    "why",
];

pub struct HydeRetriever<'a> {
    engine: &'a HybridSearchEngine<'a>,
    reasoner: &'a dyn IReasoner,
    config: HydeConfig,
}

impl<'a> HydeRetriever<'a> {
    pub fn new(
        engine: &'a HybridSearchEngine<'a>,
        reasoner: &'a dyn IReasoner,
        config: HydeConfig,
    ) -> Self {
        Self {
            engine,
            reasoner,
            config,
        }
    }

    /// The decision table. Exclusions win over inclusions: structural
    /// queries and multihop decompositions never go through HyDE, and an
    /// explicit citation ("artículo 25") wants that exact text — unless
    /// the question is *about* the section ("qué dice el artículo 25").
    pub fn should_use_hyde(analysis: &QueryAnalysis, query: &str) -> bool {
        if analysis.has_structural_filters()
            || analysis.query_type == QueryType::Structural
            || analysis.requires_multihop
        {
            return false;
        }
        let lowered = query.to_lowercase();
        if SECTION_REFERENCE.is_match(&lowered) && !contains_any(&lowered, ABOUT_SECTION_CUES) {
            return false;
        }
        if contains_any(&lowered, DEFINITION_CUES)
            || contains_any(&lowered, PROCEDURAL_CUES)
            || contains_any(&lowered, EXPLANATION_CUES)
        {
            return true;
        }
        analysis.query_type == QueryType::SimpleSemantic
    }

    pub fn infer_register(area: &str) -> DocumentRegister {
        let lowered = area.to_lowercase();
        const LEGAL: &[&str] = &["legal", "normativ", "acuerdo", "decreto", "ley", "regalias", "regalías"];
        const TECHNICAL: &[&str] = &["manual", "técnic", "tecnic", "sistema", "guía", "guia"];
        if LEGAL.iter().any(|m| lowered.contains(m)) {
            DocumentRegister::Legal
        } else if TECHNICAL.iter().any(|m| lowered.contains(m)) {
            DocumentRegister::Technical
        } else {
            DocumentRegister::Generic
        }
    }

    /// Dual search: the generated hypothetical passage and the original
    /// query each get a share of `top_k`, fused with unweighted RRF.
    /// Generation failure degrades to a plain search on the original query.
    pub fn retrieve(
        &self,
        query: &str,
        filter: &SearchFilter,
        top_k: usize,
    ) -> AcervoResult<Vec<ScoredChunk>> {
        let register = Self::infer_register(filter.area());
        let prompt = hypothetical_prompt(query, register);
        let hypothetical = match self
            .reasoner
            .complete(&prompt, self.config.temperature, self.config.max_tokens)
        {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) | Err(_) => {
                warn!("hypothetical generation failed, plain search on the original query");
                return self.engine.search(query, filter, top_k);
            }
        };
        debug!(chars = hypothetical.len(), ?register, "hypothetical passage generated");

        let (hyde_k, original_k) = self.config.split_top_k(top_k);
        let (hyde_result, original_result) = rayon::join(
            || self.engine.search(&hypothetical, filter, hyde_k),
            || self.engine.search(query, filter, original_k),
        );
        let hyde_chunks = hyde_result?;
        let original_chunks = original_result?;

        let arms = [
            RankedArm {
                label: "hyde",
                weight: 1.0,
                ids: hyde_chunks.iter().map(|c| c.chunk.id.clone()).collect(),
            },
            RankedArm {
                label: "original",
                weight: 1.0,
                ids: original_chunks
                    .iter()
                    .map(|c| c.chunk.id.clone())
                    .collect(),
            },
        ];
        let fused = rrf::fuse(&arms, self.engine.config().rrf_k);

        // `score` stays in the raw similarity domain across the merge —
        // arm results may carry RRF-fused values (hybrid mode), and the
        // fallback decision compares raw averages across strategies.
        let mut by_id: BTreeMap<String, (ScoredChunk, Vec<&'static str>)> = BTreeMap::new();
        for (chunks, label) in [(hyde_chunks, "hyde"), (original_chunks, "original")] {
            for scored in chunks {
                by_id
                    .entry(scored.chunk.id.clone())
                    .and_modify(|(existing, labels)| {
                        if scored.score > existing.score {
                            existing.score = scored.score;
                        }
                        labels.push(label);
                    })
                    .or_insert_with(|| {
                        let mut seed = ScoredChunk::seed(scored.chunk.clone(), scored.score);
                        seed.lexical_score = scored.lexical_score;
                        (seed, vec![label])
                    });
            }
        }

        Ok(fused
            .into_iter()
            .take(top_k)
            .filter_map(|(id, fused_score)| {
                let (mut scored, labels) = by_id.remove(&id)?;
                scored.fused_score = Some(fused_score);
                for label in labels {
                    scored.add_provenance(label);
                }
                Some(scored)
            })
            .collect())
    }

    /// One-shot low-score fallback: when the primary strategy's raw
    /// relevance is poor, try HyDE once and keep whichever result set is
    /// clearly better. Never errors — a failing fallback keeps the
    /// original results.
    pub fn fallback(
        &self,
        query: &str,
        filter: &SearchFilter,
        top_k: usize,
        original: Vec<ScoredChunk>,
    ) -> (Vec<ScoredChunk>, HydeState) {
        let original_avg = average_raw_score(&original);
        if original_avg >= self.config.fallback_score_threshold {
            return (original, HydeState::Skipped);
        }
        info!(original_avg, "low-relevance results, attempting HyDE fallback");

        let candidate = match self.retrieve(query, filter, top_k) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(error = %e, "fallback retrieval failed, keeping original results");
                return (original, HydeState::FallbackRejected);
            }
        };
        let candidate_avg = average_raw_score(&candidate);
        let adopt = !candidate.is_empty()
            && improves_enough(
                original_avg,
                candidate_avg,
                self.config.fallback_adoption_margin,
            );
        if adopt {
            info!(original_avg, candidate_avg, "fallback adopted");
            (candidate, HydeState::FallbackAdopted)
        } else {
            info!(original_avg, candidate_avg, "fallback rejected");
            (original, HydeState::FallbackRejected)
        }
    }
}

/// Mean of the *raw* similarity scores. Fused scores are strategy-scaled
/// (RRF magnitudes differ from cosine), so cross-strategy comparisons for
/// the fallback decision use the raw scores only.
pub fn average_raw_score(chunks: &[ScoredChunk]) -> f64 {
    if chunks.is_empty() {
        return 0.0;
    }
    chunks.iter().map(|c| c.score).sum::<f64>() / chunks.len() as f64
}

/// Adoption rule: at least `margin` relative improvement over the original
/// average. Landing exactly on the margin adopts.
fn improves_enough(original_avg: f64, candidate_avg: f64, margin: f64) -> bool {
    candidate_avg >= original_avg * (1.0 + margin)
}

fn contains_any(lowered: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lowered.contains(cue))
}

fn hypothetical_prompt(query: &str, register: DocumentRegister) -> String {
    let style = match register {
        DocumentRegister::Legal => {
            "Escribe en el registro de un documento normativo colombiano: \
             artículos, parágrafos, terminología jurídica."
        }
        DocumentRegister::Technical => {
            "Escribe en el registro de un manual técnico: pasos concretos, \
             terminología de sistemas."
        }
        DocumentRegister::Generic => "Escribe en prosa expositiva neutra.",
    };
    format!(
        "Escribe un pasaje de 2 a 3 oraciones que respondería idealmente la \
         siguiente pregunta, como si fuera un fragmento del documento fuente. \
         {style} No menciones que es hipotético.\n\nPregunta: {query}\n\nPasaje:"
    )
}
