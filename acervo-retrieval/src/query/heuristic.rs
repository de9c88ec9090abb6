use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use acervo_core::models::{Complexity, QueryAnalysis, QueryType};

const COMPARISON_CUES: &[&str] = &[
    "diferencia",
    "compara",
    "comparación",
    "comparacion",
    "versus",
    " vs ",
    "frente a",
];

const CONDITIONAL_CUES: &[&str] = &[
    "si ",
    "en caso de",
    "siempre que",
    "qué pasa si",
    "que pasa si",
    "cuando ",
];

const AGGREGATION_CUES: &[&str] = &[
    "todos los",
    "todas las",
    "lista de",
    "listar",
    "enumera",
    "enumere",
    "cuáles son",
    "cuales son",
];

const PROCEDURAL_CUES: &[&str] = &[
    "cómo",
    "como se",
    "pasos para",
    "procedimiento",
    "trámite",
    "tramite",
    "proceso para",
];

/// "entre X y Y" — the two compared entities.
static BETWEEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)entre\s+(.+?)\s+y\s+(.+?)\s*[?.!]*$").expect("static pattern")
});

/// Keyword-cue classifier. The deterministic last resort when the
/// reasoning capability is down or talks nonsense: never errors, and
/// biases toward the safe single-hop default when unsure.
pub(crate) fn classify(query: &str) -> QueryAnalysis {
    let lowered = query.to_lowercase();
    let mut analysis = QueryAnalysis::simple();

    if contains_any(&lowered, COMPARISON_CUES) {
        analysis.query_type = QueryType::Comparison;
        analysis.complexity = Complexity::Complex;
        analysis.sub_queries = comparison_entities(query);
        analysis.requires_multihop = analysis.sub_queries.len() >= 2;
        debug!(entities = analysis.sub_queries.len(), "heuristic: comparison");
        return analysis;
    }

    if contains_any(&lowered, CONDITIONAL_CUES) {
        analysis.query_type = QueryType::Conditional;
        analysis.sub_queries = conditional_clauses(query);
        if analysis.sub_queries.len() >= 2 {
            analysis.complexity = Complexity::Complex;
            analysis.requires_multihop = true;
        } else {
            analysis.complexity = Complexity::Medium;
            analysis.sub_queries.clear();
        }
        return analysis;
    }

    if contains_any(&lowered, AGGREGATION_CUES) {
        analysis.query_type = QueryType::Aggregation;
        analysis.complexity = Complexity::Medium;
        return analysis;
    }

    if contains_any(&lowered, PROCEDURAL_CUES) {
        analysis.query_type = QueryType::Procedural;
        analysis.complexity = Complexity::Medium;
        return analysis;
    }

    analysis
}

fn contains_any(lowered: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lowered.contains(cue))
}

/// Extract the compared entities, preferring the "entre X y Y" frame.
fn comparison_entities(query: &str) -> Vec<String> {
    if let Some(captures) = BETWEEN.captures(query) {
        return vec![
            strip_article(&captures[1]).to_string(),
            strip_article(&captures[2]).to_string(),
        ];
    }
    // Fall back to a plain " y " split when both halves look substantive.
    if let Some((left, right)) = query.split_once(" y ") {
        let (left, right) = (strip_article(left), strip_article(right));
        if left.split_whitespace().count() >= 2 && right.split_whitespace().count() >= 2 {
            return vec![left.to_string(), right.to_string()];
        }
    }
    Vec::new()
}

/// Split a compound conditional into condition and consequence.
fn conditional_clauses(query: &str) -> Vec<String> {
    for separator in [" entonces ", ", "] {
        if let Some((condition, consequence)) = query.split_once(separator) {
            let condition = condition.trim();
            let consequence = consequence.trim_end_matches(['?', '.', '!']).trim();
            if !condition.is_empty() && !consequence.is_empty() {
                return vec![condition.to_string(), consequence.to_string()];
            }
        }
    }
    Vec::new()
}

fn strip_article(text: &str) -> &str {
    let trimmed = text.trim().trim_end_matches(['?', '.', '!']);
    for article in ["el ", "la ", "los ", "las ", "un ", "una "] {
        if let Some(rest) = trimmed
            .strip_prefix(article)
            .or_else(|| trimmed.strip_prefix(&capitalize(article)))
        {
            return rest.trim();
        }
    }
    trimmed
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_between_two_agreements_decomposes() {
        let analysis =
            classify("¿Cuáles son las diferencias entre el Acuerdo 03/2021 y el Acuerdo 13/2025?");
        assert_eq!(analysis.query_type, QueryType::Comparison);
        assert!(analysis.requires_multihop);
        assert_eq!(
            analysis.sub_queries,
            ["Acuerdo 03/2021", "Acuerdo 13/2025"]
        );
    }

    #[test]
    fn comparison_without_extractable_entities_stays_single_hop() {
        let analysis = classify("compara los regímenes sancionatorios");
        assert_eq!(analysis.query_type, QueryType::Comparison);
        assert!(!analysis.requires_multihop);
        assert!(analysis.sub_queries.is_empty());
    }

    #[test]
    fn compound_conditional_is_multihop() {
        let analysis =
            classify("si el proyecto cambia de alcance, qué aprobación se requiere");
        assert_eq!(analysis.query_type, QueryType::Conditional);
        assert!(analysis.requires_multihop);
        assert_eq!(analysis.sub_queries.len(), 2);
    }

    #[test]
    fn simple_conditional_stays_single_hop() {
        let analysis = classify("qué pasa si hay incumplimiento");
        assert_eq!(analysis.query_type, QueryType::Conditional);
        assert!(!analysis.requires_multihop);
    }

    #[test]
    fn aggregation_is_never_multihop() {
        let analysis = classify("lista de todos los requisitos de viabilización");
        assert_eq!(analysis.query_type, QueryType::Aggregation);
        assert!(!analysis.requires_multihop);
    }

    #[test]
    fn procedural_cue_is_detected() {
        let analysis = classify("cómo se tramita un ajuste de proyecto");
        assert_eq!(analysis.query_type, QueryType::Procedural);
    }

    #[test]
    fn plain_question_defaults_to_simple_semantic() {
        let analysis = classify("¿Qué es un OCAD?");
        assert_eq!(analysis.query_type, QueryType::SimpleSemantic);
        assert_eq!(analysis.complexity, Complexity::Simple);
    }
}
