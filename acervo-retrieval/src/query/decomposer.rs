use serde::Deserialize;
use tracing::debug;

use acervo_core::models::{Complexity, QueryAnalysis, QueryType};

/// Classification prompt: strict JSON, closed vocabulary. The parser
/// rejects anything outside the vocabulary rather than guessing.
pub(crate) fn prompt(query: &str) -> String {
    format!(
        "Clasifica la siguiente consulta sobre documentos normativos y, si requiere \
         combinar información de varias partes, descomponla en sub-consultas.\n\
         \n\
         Consulta: {query}\n\
         \n\
         Responde SOLO con un objeto JSON, sin texto adicional:\n\
         {{\n\
           \"query_type\": \"simple_semantic\" | \"structural\" | \"comparison\" | \
         \"procedural\" | \"conditional\" | \"aggregation\" | \"reasoning\" | \"hybrid\",\n\
           \"complexity\": \"simple\" | \"medium\" | \"complex\",\n\
           \"requires_multihop\": true | false,\n\
           \"sub_queries\": [\"...\"],\n\
           \"reasoning\": \"...\"\n\
         }}\n\
         \n\
         Reglas: una comparación entre dos o más entidades lleva una sub-consulta \
         por entidad; una consulta condicional compuesta lleva una sub-consulta por \
         cláusula; una agregación (\"todos los...\") NO es multihop."
    )
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    query_type: String,
    #[serde(default)]
    complexity: Option<String>,
    #[serde(default)]
    requires_multihop: bool,
    #[serde(default)]
    sub_queries: Vec<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Parse the reasoner's output into an analysis. `None` on anything
/// malformed or outside the vocabulary — the caller falls back to the
/// heuristic classifier, it never guesses here.
pub(crate) fn parse_analysis(raw: &str) -> Option<QueryAnalysis> {
    let candidate = extract_json_object(raw)?;
    let parsed: RawAnalysis = serde_json::from_str(candidate).ok()?;

    let query_type = QueryType::parse(&parsed.query_type)?;
    let complexity = parsed
        .complexity
        .as_deref()
        .and_then(Complexity::parse)
        .unwrap_or(Complexity::Medium);

    let sub_queries: Vec<String> = parsed
        .sub_queries
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    debug!(?query_type, sub_queries = sub_queries.len(), "query decomposed");

    let mut analysis = QueryAnalysis::simple();
    analysis.query_type = query_type;
    analysis.complexity = complexity;
    analysis.requires_multihop = parsed.requires_multihop;
    analysis.sub_queries = sub_queries;
    analysis.reasoning = parsed.reasoning;
    Some(analysis)
}

fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_comparison_parses() {
        let raw = r#"{"query_type": "comparison", "complexity": "complex",
            "requires_multihop": true,
            "sub_queries": ["Acuerdo 03 de 2021", "Acuerdo 13 de 2025"],
            "reasoning": "dos entidades"}"#;
        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.query_type, QueryType::Comparison);
        assert_eq!(analysis.sub_queries.len(), 2);
        assert!(analysis.requires_multihop);
    }

    #[test]
    fn fenced_output_parses() {
        let raw = "```json\n{\"query_type\": \"procedural\"}\n```";
        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.query_type, QueryType::Procedural);
        assert_eq!(analysis.complexity, Complexity::Medium);
    }

    #[test]
    fn unknown_query_type_is_rejected() {
        assert!(parse_analysis(r#"{"query_type": "philosophical"}"#).is_none());
    }

    #[test]
    fn non_json_output_is_rejected() {
        assert!(parse_analysis("this query compares two agreements").is_none());
    }

    #[test]
    fn blank_sub_queries_are_dropped() {
        let raw = r#"{"query_type": "comparison", "sub_queries": ["a", "  ", "b"]}"#;
        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.sub_queries, ["a", "b"]);
    }
}
