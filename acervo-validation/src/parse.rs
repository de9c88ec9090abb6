use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use acervo_core::models::CompletenessReport;

/// Raw JSON shape the validation prompt asks for.
#[derive(Debug, Deserialize)]
struct RawReport {
    completeness_score: f64,
    #[serde(default)]
    missing_aspects: Vec<String>,
    #[serde(default = "default_confidence")]
    confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

/// Phrases an honest empty answer uses. If the answer admits the
/// information was not found, coverage is by definition complete.
const NO_INFORMATION_MARKERS: &[&str] = &[
    "no se encontró",
    "no se encontro",
    "no hay información",
    "no hay informacion",
    "no existe información",
    "no existe informacion",
    "no aparece en los documentos",
    "no information",
    "not found in the",
];

/// Parse ladder: strict JSON → fenced JSON → regex score rescue →
/// honesty heuristic. Never fails; `None` means "use the fail-open default".
pub(crate) fn parse_report(raw: &str, answer: &str, threshold: f64) -> Option<CompletenessReport> {
    if let Some(report) = parse_json(raw, threshold) {
        return Some(report);
    }

    if let Some(score) = rescue_score(raw) {
        debug!(score, "validation JSON malformed, score rescued by regex");
        return Some(report_from_score(score, Vec::new(), threshold));
    }

    if !raw.trim().is_empty() {
        let score = heuristic_score(answer);
        debug!(score, "validation output unusable, heuristic score applied");
        return Some(report_from_score(score, Vec::new(), threshold));
    }

    None
}

fn parse_json(raw: &str, threshold: f64) -> Option<CompletenessReport> {
    let candidate = extract_json_object(raw)?;
    let parsed: RawReport = serde_json::from_str(candidate).ok()?;
    let score = parsed.completeness_score.clamp(0.0, 1.0);
    Some(CompletenessReport {
        is_complete: score >= threshold,
        completeness_score: score,
        missing_aspects: parsed.missing_aspects,
        confidence: parsed.confidence.clamp(0.0, 1.0),
    })
}

/// The first `{ ... }` span in the output, tolerating fenced code blocks
/// and prose around the object.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Regex rescue for the score field when the JSON itself is broken.
fn rescue_score(raw: &str) -> Option<f64> {
    let pattern =
        Regex::new(r#"(?i)"?completeness[_ ]score"?\s*[:=]\s*([01](?:\.\d+)?)"#).ok()?;
    let captures = pattern.captures(raw)?;
    captures[1].parse::<f64>().ok().map(|s| s.clamp(0.0, 1.0))
}

/// Honesty heuristic: an answer that admits nothing was found is complete;
/// anything else gets a conservative passing-by-default score.
pub(crate) fn heuristic_score(answer: &str) -> f64 {
    let lowered = answer.to_lowercase();
    if NO_INFORMATION_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        1.0
    } else {
        0.7
    }
}

fn report_from_score(
    score: f64,
    missing_aspects: Vec<String>,
    threshold: f64,
) -> CompletenessReport {
    CompletenessReport {
        is_complete: score >= threshold,
        completeness_score: score,
        missing_aspects,
        confidence: 0.3,
    }
}
