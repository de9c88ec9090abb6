// Single source of truth for all default values.

// --- Hybrid search ---
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_DENSE_WEIGHT: f64 = 0.5;
pub const DEFAULT_LEXICAL_WEIGHT: f64 = 0.5;
pub const DEFAULT_BIASED_DENSE_WEIGHT: f64 = 0.4;
pub const DEFAULT_BIASED_LEXICAL_WEIGHT: f64 = 0.6;
pub const DEFAULT_HYBRID_ENABLED: bool = true;
pub const DEFAULT_OVERFETCH_FACTOR: usize = 2;
pub const DEFAULT_TOP_K: usize = 20;

// --- Context / hierarchy expansion ---
pub const DEFAULT_CONTEXT_DECAY: f64 = 0.8;
pub const DEFAULT_CONTEXT_WINDOW: usize = 2;
pub const DEFAULT_PARENT_FACTOR: f64 = 0.7;
pub const DEFAULT_FIRST_SIBLING_FACTOR: f64 = 0.6;
pub const DEFAULT_SIBLING_FACTOR_STEP: f64 = 0.1;
pub const DEFAULT_SIBLING_FACTOR_FLOOR: f64 = 0.1;
pub const DEFAULT_MAX_SIBLINGS: usize = 3;

/// Trigger terms that shift RRF weights toward exact lexical matching.
/// Hand-tuned to the corpus language/domain, hence configuration, not code.
pub const DEFAULT_LEXICAL_BIAS_TERMS: &[&str] = &[
    "artículo",
    "articulo",
    "capítulo",
    "capitulo",
    "sección",
    "seccion",
    "anexo",
    "título",
    "titulo",
    "numeral",
    "literal",
    "parágrafo",
    "paragrafo",
    "acuerdo",
    "resolución",
    "resolucion",
    "decreto",
    "ley",
    "costo",
    "valor",
    "monto",
    "tarifa",
    "sanción",
    "sancion",
    "multa",
];

// --- Classifier ---
pub const DEFAULT_MIN_REMAINDER_CHARS: usize = 10;
pub const DEFAULT_CLASSIFIER_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_CLASSIFIER_MAX_TOKENS: usize = 512;
pub const DEFAULT_AGGREGATION_TOP_K: usize = 100;
pub const DEFAULT_COMPARISON_TOP_K: usize = 40;
pub const DEFAULT_EXHAUSTIVE_TOP_K: usize = 50;
pub const DEFAULT_HYBRID_TOP_K: usize = 30;
pub const DEFAULT_SEMANTIC_TOP_K: usize = 10;

// --- Multihop ---
pub const DEFAULT_TOP_K_PER_QUERY: usize = 10;
pub const DEFAULT_MAX_TOTAL_CHUNKS: usize = 50;
pub const DEFAULT_COMPARISON_TOP_K_PER_SIDE: usize = 20;
pub const DEFAULT_CONDITIONAL_TOP_K_PER_QUERY: usize = 15;
pub const DEFAULT_CONDITIONAL_MAX_TOTAL: usize = 40;
pub const DEFAULT_TWO_SOURCE_BOOST: f64 = 1.3;
pub const DEFAULT_MANY_SOURCE_BOOST: f64 = 1.5;

// --- HyDE ---
pub const DEFAULT_HYDE_WEIGHT: f64 = 0.7;
pub const DEFAULT_HYDE_MIN_K: usize = 10;
pub const DEFAULT_ORIGINAL_MIN_K: usize = 5;
pub const DEFAULT_HYDE_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_HYDE_MAX_TOKENS: usize = 256;
pub const DEFAULT_FALLBACK_SCORE_THRESHOLD: f64 = 0.30;
pub const DEFAULT_FALLBACK_ADOPTION_MARGIN: f64 = 0.20;

// --- Validation ---
pub const DEFAULT_COMPLETENESS_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MAX_RETRY_QUERIES: usize = 3;
pub const DEFAULT_MAX_VALIDATION_ROUNDS: usize = 1;
pub const DEFAULT_VALIDATION_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_VALIDATION_MAX_TOKENS: usize = 512;
pub const DEFAULT_ENHANCE_MAX_TOKENS: usize = 1024;
