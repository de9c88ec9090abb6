use std::collections::BTreeSet;

use proptest::prelude::*;

use acervo_core::config::{MultihopConfig, SearchConfig};
use acervo_core::models::SearchFilter;
use acervo_retrieval::search::rrf::{fuse, RankedArm};
use acervo_retrieval::HybridSearchEngine;
use test_fixtures::{legal_corpus, FakeEmbedder, FakePointStore};

fn arm_with_target(label: &'static str, weight: f64, rank: usize) -> RankedArm<'static> {
    let mut ids: Vec<String> = (0..rank).map(|i| format!("{label}-filler-{i}")).collect();
    ids.push("target".to_string());
    RankedArm { label, weight, ids }
}

fn score_of(fused: &[(String, f64)], id: &str) -> f64 {
    fused
        .iter()
        .find(|(fused_id, _)| fused_id == id)
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}

proptest! {
    /// A document found by both arms always outscores the same document
    /// found by only one of them, at the same ranks.
    #[test]
    fn rrf_rewards_agreement(
        rank_a in 0usize..50,
        rank_b in 0usize..50,
        k in 1u32..200,
        weight_a in 0.1f64..1.0,
        weight_b in 0.1f64..1.0,
    ) {
        let both = fuse(
            &[
                arm_with_target("a", weight_a, rank_a),
                arm_with_target("b", weight_b, rank_b),
            ],
            k,
        );
        let single = fuse(&[arm_with_target("a", weight_a, rank_a)], k);
        prop_assert!(score_of(&both, "target") > score_of(&single, "target"));
    }

    /// Fused output is ordered by score descending, id ascending on ties.
    #[test]
    fn rrf_output_is_sorted(ids_a in prop::collection::vec(0usize..20, 0..20),
                            ids_b in prop::collection::vec(0usize..20, 0..20)) {
        let dedup = |ids: Vec<usize>| {
            let mut seen = BTreeSet::new();
            ids.into_iter()
                .filter(|id| seen.insert(*id))
                .map(|id| format!("c{id}"))
                .collect::<Vec<_>>()
        };
        let fused = fuse(
            &[
                RankedArm { label: "a", weight: 0.5, ids: dedup(ids_a) },
                RankedArm { label: "b", weight: 0.5, ids: dedup(ids_b) },
            ],
            60,
        );
        for pair in fused.windows(2) {
            prop_assert!(
                pair[0].1 > pair[1].1
                    || (pair[0].1 == pair[1].1 && pair[0].0 < pair[1].0)
            );
        }
    }

    /// The provenance boost never shrinks with more agreeing sub-queries
    /// and never exceeds the many-source ceiling.
    #[test]
    fn provenance_boost_is_monotone_and_bounded(sources in 0usize..12) {
        let config = MultihopConfig::default();
        let boost = config.provenance_boost(sources);
        prop_assert!(boost >= 1.0);
        prop_assert!(boost <= config.many_source_boost);
        prop_assert!(boost <= config.provenance_boost(sources + 1));
    }

    /// Context expansion never leaves the partition, never duplicates a
    /// chunk, and every expansion neighbor stays inside a document that
    /// one of the seed results came from.
    #[test]
    fn expansion_respects_partition_and_documents(
        window in 0usize..4,
        top_k in 1usize..6,
        query_idx in 0usize..4,
    ) {
        let queries = [
            "ajustes de proyectos",
            "sanciones por incumplimiento",
            "requisitos de viabilización",
            "órgano colegiado de administración",
        ];
        let embedder = FakeEmbedder::new();
        let store = FakePointStore::new(legal_corpus(), &embedder);
        let engine = HybridSearchEngine::new(&store, &embedder, None, SearchConfig::default());
        let filter = SearchFilter::new("regalias");

        let chunks = engine
            .search_with_context(queries[query_idx], &filter, top_k, window)
            .unwrap();

        let mut ids = BTreeSet::new();
        let seed_documents: BTreeSet<&str> = chunks
            .iter()
            .filter(|c| c.expansion_offset == 0)
            .map(|c| c.chunk.document_id.as_str())
            .collect();
        for scored in &chunks {
            prop_assert_eq!(scored.chunk.area.as_str(), "regalias");
            prop_assert!(ids.insert(scored.chunk.id.clone()), "duplicate chunk");
            if scored.expansion_offset != 0 {
                prop_assert!(seed_documents.contains(scored.chunk.document_id.as_str()));
            }
        }
    }
}
