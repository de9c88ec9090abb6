//! # acervo-validation
//!
//! Post-answer completeness validation. Scores whether a generated answer
//! addresses every aspect of the question, produces bounded follow-up
//! queries for what is missing, and merges supplementary chunks into an
//! enhanced answer.
//!
//! The validator scores honesty/coverage, not verbosity: an answer that
//! truthfully reports "no information found" is complete. Parsing is
//! fail-open — on total failure the answer is assumed complete, because a
//! false negative only spends a retry round.

mod parse;
mod prompts;
mod validator;

pub use validator::CompletenessValidator;
