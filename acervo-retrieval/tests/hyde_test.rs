use acervo_core::config::{HydeConfig, SearchConfig};
use acervo_core::corpus::ScoredChunk;
use acervo_core::models::SearchFilter;
use acervo_lexical::Bm25Scorer;
use acervo_retrieval::hyde::average_raw_score;
use acervo_retrieval::{HybridSearchEngine, HydeRetriever, HydeState};
use test_fixtures::{legal_corpus, FakeEmbedder, FakePointStore, ScriptedReasoner};

const OCAD_PASSAGE: &str = "El OCAD es el órgano colegiado de administración y decisión \
     encargado de aprobar los proyectos de inversión financiados con regalías.";

fn filter() -> SearchFilter {
    SearchFilter::new("regalias")
}

/// Original results pinned at a given raw score, for fallback decisions.
fn pinned(score: f64) -> Vec<ScoredChunk> {
    legal_corpus()
        .into_iter()
        .take(3)
        .map(|chunk| ScoredChunk::seed(chunk, score))
        .collect()
}

#[test]
fn retrieve_fuses_both_arms_with_provenance() {
    let embedder = FakeEmbedder::new();
    let store = FakePointStore::new(legal_corpus(), &embedder);
    let engine = HybridSearchEngine::new(&store, &embedder, None, SearchConfig::default());
    let reasoner = ScriptedReasoner::new();
    reasoner.push(OCAD_PASSAGE);
    let hyde = HydeRetriever::new(&engine, &reasoner, HydeConfig::default());

    let chunks = hyde.retrieve("¿Qué es un OCAD?", &filter(), 5).unwrap();
    assert_eq!(chunks[0].chunk.id, "a03-c1");
    assert!(chunks[0].provenance.contains(&"hyde".to_string()));
    assert!(chunks[0].provenance.contains(&"original".to_string()));
    assert!(chunks[0].fused_score.is_some());
    assert!(chunks.len() <= 5);
}

#[test]
fn generation_failure_degrades_to_plain_search() {
    let embedder = FakeEmbedder::new();
    let store = FakePointStore::new(legal_corpus(), &embedder);
    let engine = HybridSearchEngine::new(&store, &embedder, None, SearchConfig::default());
    let reasoner = ScriptedReasoner::new(); // empty script: generation fails

    let hyde = HydeRetriever::new(&engine, &reasoner, HydeConfig::default());
    let chunks = hyde.retrieve("¿Qué es un OCAD?", &filter(), 5).unwrap();
    assert!(!chunks.is_empty());
    // Plain search results: nothing was fused, no arm provenance.
    assert!(chunks.iter().all(|c| c.provenance.is_empty()));
}

#[test]
fn fallback_is_skipped_when_scores_are_healthy() {
    let embedder = FakeEmbedder::new();
    let store = FakePointStore::new(legal_corpus(), &embedder);
    let engine = HybridSearchEngine::new(&store, &embedder, None, SearchConfig::default());
    let reasoner = ScriptedReasoner::new();
    let hyde = HydeRetriever::new(&engine, &reasoner, HydeConfig::default());

    let original = pinned(0.5);
    let (chunks, state) = hyde.fallback("¿Qué es un OCAD?", &filter(), 5, original);
    assert_eq!(state, HydeState::Skipped);
    assert_eq!(chunks.len(), 3);
    assert!(reasoner.seen_prompts().is_empty());
}

#[test]
fn fallback_is_adopted_when_it_improves_enough() {
    let embedder = FakeEmbedder::new();
    let store = FakePointStore::new(legal_corpus(), &embedder);
    let engine = HybridSearchEngine::new(&store, &embedder, None, SearchConfig::default());
    let reasoner = ScriptedReasoner::new();
    reasoner.push(OCAD_PASSAGE);
    let hyde = HydeRetriever::new(&engine, &reasoner, HydeConfig::default());

    let original = pinned(0.1);
    let original_avg = average_raw_score(&original);
    let (chunks, state) = hyde.fallback("¿Qué es un OCAD?", &filter(), 3, original);
    assert_eq!(state, HydeState::FallbackAdopted);
    assert!(average_raw_score(&chunks) > original_avg * 1.2);
    assert_eq!(chunks[0].chunk.id, "a03-c1");
}

#[test]
fn fallback_adoption_survives_hybrid_search() {
    let embedder = FakeEmbedder::new();
    let mut scorer = Bm25Scorer::default();
    let texts: Vec<String> = legal_corpus().into_iter().map(|c| c.text).collect();
    scorer.fit(&texts).unwrap();
    let store = FakePointStore::with_sparse(legal_corpus(), &embedder, &scorer);
    let engine =
        HybridSearchEngine::new(&store, &embedder, Some(&scorer), SearchConfig::default());
    let reasoner = ScriptedReasoner::new();
    reasoner.push(OCAD_PASSAGE);
    let hyde = HydeRetriever::new(&engine, &reasoner, HydeConfig::default());

    let original = pinned(0.1);
    let (chunks, state) = hyde.fallback("¿Qué es un OCAD?", &filter(), 3, original);
    // Candidate averages must stay in the raw similarity domain even
    // though both arms were RRF-fused internally, or the adoption
    // comparison against the pinned originals is meaningless.
    assert_eq!(state, HydeState::FallbackAdopted);
    assert_eq!(chunks[0].chunk.id, "a03-c1");
    assert!(average_raw_score(&chunks) > 0.1 * 1.2);
}

#[test]
fn fallback_keeps_original_when_no_better() {
    let embedder = FakeEmbedder::new();
    let store = FakePointStore::new(legal_corpus(), &embedder);
    let engine = HybridSearchEngine::new(&store, &embedder, None, SearchConfig::default());
    let reasoner = ScriptedReasoner::new(); // generation fails, plain search runs

    let hyde = HydeRetriever::new(&engine, &reasoner, HydeConfig::default());
    let original = pinned(0.25);
    let original_ids: Vec<String> = original.iter().map(|c| c.chunk.id.clone()).collect();
    // A query with no overlap with the corpus: the candidate can not win.
    let (chunks, state) = hyde.fallback("zanahoria astronauta violeta", &filter(), 5, original);
    assert_eq!(state, HydeState::FallbackRejected);
    let kept_ids: Vec<String> = chunks.iter().map(|c| c.chunk.id.clone()).collect();
    assert_eq!(kept_ids, original_ids);
}
