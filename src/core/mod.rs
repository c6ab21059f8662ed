// Core algorithm exports
pub mod answers;
pub mod filters;
pub mod matcher;
pub mod reasons;
pub mod scoring;

pub use answers::{parse_answer, parse_answers};
pub use filters::is_hard_filtered;
pub use matcher::{ExplicitOrder, OrderingStrategy, RoundMatcher, SequentialOrder, ShuffleOrder};
pub use reasons::generate_reasons;
pub use scoring::{
    aggregate_score, choice_similarity, ranking_concordance, scale_similarity, score_dimension,
    score_dimensions, tag_overlap, to_compatibility, DimensionScore,
};
