use std::collections::BTreeSet;

use tracing::debug;

use acervo_core::config::SearchConfig;
use acervo_core::corpus::{sort_ranked, Chunk, ScoredChunk};
use acervo_core::errors::AcervoResult;
use acervo_core::models::SearchFilter;
use acervo_core::traits::IPointStore;

/// Follow `prev_id`/`next_id` links around each seed, up to `window`
/// steps per direction. Each step away from the seed decays the score
/// by `context_decay`.
///
/// A neighbor that leaves the seed's document or the partition ends the
/// walk in that direction — it is a hard stop, never a skip-and-continue,
/// so a bad link can not leak another document's text into the results.
/// Structural filters apply to seeds only: adjacent chunks are context
/// and join the walk whether or not they carry the filtered tag.
pub(crate) fn expand_context(
    store: &dyn IPointStore,
    filter: &SearchFilter,
    config: &SearchConfig,
    seeds: Vec<ScoredChunk>,
    window: usize,
) -> AcervoResult<Vec<ScoredChunk>> {
    let mut seen: BTreeSet<String> = seeds.iter().map(|s| s.chunk.id.clone()).collect();
    let seed_count = seeds.len();
    let mut out = seeds;

    // Walk only from the original seeds; expansion results are not
    // themselves expanded, so `window` bounds the reach exactly.
    for seed_idx in 0..seed_count {
        let seed = out[seed_idx].clone();
        for direction in [Direction::Prev, Direction::Next] {
            let mut cursor = direction.link(&seed.chunk);
            for step in 1..=window {
                let Some(id) = cursor else { break };
                let Some(neighbor) = store.get_by_id(&id)? else {
                    break;
                };
                if !within_boundary(&neighbor, &seed.chunk, filter) {
                    break;
                }
                cursor = direction.link(&neighbor);
                if seen.insert(neighbor.id.clone()) {
                    let score =
                        seed.effective_score() * config.context_decay.powi(step as i32);
                    out.push(ScoredChunk {
                        chunk: neighbor,
                        score,
                        lexical_score: None,
                        fused_score: None,
                        provenance: seed.provenance.clone(),
                        expansion_offset: direction.offset(step),
                    });
                }
            }
        }
    }

    debug!(total = out.len(), window, "context expansion done");
    sort_ranked(&mut out);
    Ok(out)
}

/// Pull in each seed's structural parent (at `parent_factor`) and up to
/// `max_siblings` siblings (decaying per position). Same boundary rules
/// as context expansion.
pub(crate) fn expand_hierarchy(
    store: &dyn IPointStore,
    filter: &SearchFilter,
    config: &SearchConfig,
    seeds: Vec<ScoredChunk>,
) -> AcervoResult<Vec<ScoredChunk>> {
    let mut seen: BTreeSet<String> = seeds.iter().map(|s| s.chunk.id.clone()).collect();
    let seed_count = seeds.len();
    let mut out = seeds;

    for seed_idx in 0..seed_count {
        let seed = out[seed_idx].clone();
        let Some(parent_id) = seed.chunk.parent_id.clone() else {
            continue;
        };
        let Some(parent) = store.get_by_id(&parent_id)? else {
            continue;
        };
        if !within_boundary(&parent, &seed.chunk, filter) {
            continue;
        }

        if seen.insert(parent.id.clone()) {
            out.push(relative(
                parent.clone(),
                seed.effective_score() * config.parent_factor,
                &seed,
            ));
        }

        let siblings = parent
            .child_ids
            .iter()
            .filter(|id| **id != seed.chunk.id)
            .take(config.max_siblings);
        for (position, sibling_id) in siblings.enumerate() {
            let Some(sibling) = store.get_by_id(sibling_id)? else {
                continue;
            };
            if !within_boundary(&sibling, &seed.chunk, filter) {
                continue;
            }
            if seen.insert(sibling.id.clone()) {
                out.push(relative(
                    sibling,
                    seed.effective_score() * config.sibling_factor(position),
                    &seed,
                ));
            }
        }
    }

    sort_ranked(&mut out);
    Ok(out)
}

/// The expansion boundary: the seed's document, the partition, and the
/// document allow-list. Structural filters never prune expansion results.
fn within_boundary(candidate: &Chunk, seed: &Chunk, filter: &SearchFilter) -> bool {
    candidate.document_id == seed.document_id
        && candidate.area == filter.area()
        && filter.allows_document(&candidate.document_id)
}

fn relative(chunk: Chunk, score: f64, seed: &ScoredChunk) -> ScoredChunk {
    ScoredChunk {
        chunk,
        score,
        lexical_score: None,
        fused_score: None,
        provenance: seed.provenance.clone(),
        expansion_offset: 0,
    }
}

enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn link(&self, chunk: &Chunk) -> Option<String> {
        match self {
            Self::Prev => chunk.prev_id.clone(),
            Self::Next => chunk.next_id.clone(),
        }
    }

    fn offset(&self, step: usize) -> i32 {
        match self {
            Self::Prev => -(step as i32),
            Self::Next => step as i32,
        }
    }
}
