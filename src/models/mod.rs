// Model exports
pub mod config;
pub mod domain;

pub use config::{
    ChoiceHighlight, ConfigValidationError, DimensionConfig, HardFilterConfig, MatchingConfig,
    ReasonConfig, ScaleHighlight, ScorerKind, ScoringItem, TagHighlight,
};
pub use domain::{AnswerValue, MatchResult, RoundOutcome, SurveyRecord, TraitProfile};
