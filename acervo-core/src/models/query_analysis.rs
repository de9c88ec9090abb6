use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::corpus::StructuralField;

/// The fixed query-type vocabulary the classifier is constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    SimpleSemantic,
    Structural,
    Comparison,
    Procedural,
    Conditional,
    Aggregation,
    Reasoning,
    /// Structural filter plus a non-trivial semantic remainder.
    Hybrid,
}

impl QueryType {
    pub const ALL: [QueryType; 8] = [
        Self::SimpleSemantic,
        Self::Structural,
        Self::Comparison,
        Self::Procedural,
        Self::Conditional,
        Self::Aggregation,
        Self::Reasoning,
        Self::Hybrid,
    ];

    /// Parse from the classifier vocabulary; unknown labels map to `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "simple_semantic" => Some(Self::SimpleSemantic),
            "structural" => Some(Self::Structural),
            "comparison" => Some(Self::Comparison),
            "procedural" => Some(Self::Procedural),
            "conditional" => Some(Self::Conditional),
            "aggregation" => Some(Self::Aggregation),
            "reasoning" => Some(Self::Reasoning),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "simple" => Some(Self::Simple),
            "medium" => Some(Self::Medium),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }
}

/// Exactly one primary strategy is chosen per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Single-hop hybrid search.
    Standard,
    /// Larger top_k with context expansion (single-hop aggregation).
    Exhaustive,
    /// Decomposed sub-queries, fused with provenance boosting.
    Multihop,
    /// Multihop sized so neither side of a comparison is starved.
    MultihopComparison,
    /// Multihop with condition-first sizing.
    MultihopConditional,
    /// Hypothetical-document expansion.
    Hyde,
}

/// Classifier output. Produced once per query; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub query_type: QueryType,
    pub complexity: Complexity,
    pub requires_multihop: bool,
    /// Ordered decomposition; empty for single-hop queries.
    pub sub_queries: Vec<String>,
    pub search_strategy: SearchStrategy,
    /// Structural filters detected in the query (field → number).
    pub detected_filters: BTreeMap<StructuralField, String>,
    /// The query with the structural phrase stripped, when the remainder
    /// is worth searching on its own (hybrid queries).
    pub enhanced_query: Option<String>,
    /// Free-text rationale from the reasoning capability, when available.
    pub reasoning: Option<String>,
}

impl QueryAnalysis {
    /// A plain single-hop semantic analysis; the safe default.
    pub fn simple() -> Self {
        Self {
            query_type: QueryType::SimpleSemantic,
            complexity: Complexity::Simple,
            requires_multihop: false,
            sub_queries: Vec::new(),
            search_strategy: SearchStrategy::Standard,
            detected_filters: BTreeMap::new(),
            enhanced_query: None,
            reasoning: None,
        }
    }

    pub fn has_structural_filters(&self) -> bool {
        !self.detected_filters.is_empty()
    }
}
