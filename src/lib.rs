//! Kindred Algo - Compatibility matching engine for the Kindred survey app
//!
//! This library scores candidate pairs across weighted psychological
//! dimensions, applies deal-breaker vetoes, assigns disjoint pairs for one
//! matching round, and generates short justifications for each pairing.
//! Persistence, email, and the trigger endpoint live with the caller.

pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use config::{default_survey, ConfigLoadError, Settings};
pub use core::{
    parse_answers, to_compatibility, ExplicitOrder, OrderingStrategy, RoundMatcher,
    SequentialOrder, ShuffleOrder,
};
pub use models::{
    AnswerValue, DimensionConfig, HardFilterConfig, MatchResult, MatchingConfig, RoundOutcome,
    ScorerKind, SurveyRecord, TraitProfile,
};
