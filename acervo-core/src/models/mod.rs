//! Request/response models shared across the retrieval subsystems.

mod completeness;
mod filter;
mod outcome;
mod point;
mod query_analysis;

pub use completeness::{CompletenessReport, ValidationState};
pub use filter::SearchFilter;
pub use outcome::{NoResults, RetrievalOutcome, RetrievalStats};
pub use point::{ScoredPoint, SparseVector};
pub use query_analysis::{Complexity, QueryAnalysis, QueryType, SearchStrategy};
