use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four supported question shapes.
///
/// This is a closed set dispatched by the scoring layer; survey questions
/// outside these shapes are not scoreable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScorerKind {
    /// Bounded numeric slider with a known range
    Scale { min: f64, max: f64 },
    /// Single selected code
    Choice,
    /// Unordered multi-select tag set
    TagSet,
    /// Ordered ranking of selected items
    Ranked,
}

/// One scored question inside a dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringItem {
    pub question_id: String,
    /// Intra-dimension weight; item weights are authored to sum to 1.0
    pub weight: f64,
    #[serde(flatten)]
    pub kind: ScorerKind,
}

/// A named, weighted grouping of survey questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionConfig {
    pub name: String,
    /// Pool weight; dimension weights are authored to sum to 1.0
    pub weight: f64,
    pub items: Vec<ScoringItem>,
}

/// An unconditional pairwise veto on one question's answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardFilterConfig {
    pub question_id: String,
    /// Unordered pairs of answer codes that make two respondents unmatchable
    pub incompatible: Vec<(String, String)>,
}

/// A high-signal single-choice question surfaced in match reasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceHighlight {
    pub question_id: String,
    /// Short human phrase for the question topic (e.g., "where you feel safest")
    pub label: String,
}

/// The multi-select question whose shared tags are surfaced in reasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagHighlight {
    pub question_id: String,
    pub label: String,
}

/// A bounded-scale question surfaced when the pair is closely aligned on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleHighlight {
    pub question_id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
}

/// Reason-generation rules: which questions get called out, and how
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonConfig {
    #[serde(default)]
    pub choice_highlights: Vec<ChoiceHighlight>,
    pub tag_highlight: Option<TagHighlight>,
    #[serde(default)]
    pub scale_highlights: Vec<ScaleHighlight>,
}

/// Complete static matching configuration for one survey
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub dimensions: Vec<DimensionConfig>,
    #[serde(default)]
    pub hard_filters: Vec<HardFilterConfig>,
    pub reasons: ReasonConfig,
}

/// Configuration authoring errors caught at load time
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("no dimensions configured")]
    NoDimensions,
    #[error("dimension weights sum to {0}, expected 1.0")]
    DimensionWeights(f64),
    #[error("dimension '{0}' has no scoring items")]
    EmptyDimension(String),
    #[error("item weights in dimension '{0}' sum to {1}, expected 1.0")]
    ItemWeights(String, f64),
    #[error("scale item '{0}' has an empty range (min {1} >= max {2})")]
    EmptyScaleRange(String, f64, f64),
    #[error("hard filter on '{0}' lists no incompatible pairs")]
    EmptyHardFilter(String),
}

const WEIGHT_TOLERANCE: f64 = 1e-6;

impl MatchingConfig {
    /// Check authored invariants: weights sum to 1.0 at both levels, scale
    /// ranges are non-empty, and every filter actually vetoes something.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.dimensions.is_empty() {
            return Err(ConfigValidationError::NoDimensions);
        }

        let dim_sum: f64 = self.dimensions.iter().map(|d| d.weight).sum();
        if (dim_sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigValidationError::DimensionWeights(dim_sum));
        }

        for dim in &self.dimensions {
            if dim.items.is_empty() {
                return Err(ConfigValidationError::EmptyDimension(dim.name.clone()));
            }

            let item_sum: f64 = dim.items.iter().map(|i| i.weight).sum();
            if (item_sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return Err(ConfigValidationError::ItemWeights(dim.name.clone(), item_sum));
            }

            for item in &dim.items {
                if let ScorerKind::Scale { min, max } = item.kind {
                    if min >= max {
                        return Err(ConfigValidationError::EmptyScaleRange(
                            item.question_id.clone(),
                            min,
                            max,
                        ));
                    }
                }
            }
        }

        for filter in &self.hard_filters {
            if filter.incompatible.is_empty() {
                return Err(ConfigValidationError::EmptyHardFilter(filter.question_id.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> MatchingConfig {
        MatchingConfig {
            dimensions: vec![DimensionConfig {
                name: "values".to_string(),
                weight: 1.0,
                items: vec![ScoringItem {
                    question_id: "q1".to_string(),
                    weight: 1.0,
                    kind: ScorerKind::Choice,
                }],
            }],
            hard_filters: vec![],
            reasons: ReasonConfig {
                choice_highlights: vec![],
                tag_highlight: None,
                scale_highlights: vec![],
            },
        }
    }

    #[test]
    fn test_minimal_config_valid() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn test_bad_dimension_weights() {
        let mut cfg = minimal_config();
        cfg.dimensions[0].weight = 0.5;

        assert!(matches!(
            cfg.validate(),
            Err(ConfigValidationError::DimensionWeights(_))
        ));
    }

    #[test]
    fn test_bad_item_weights() {
        let mut cfg = minimal_config();
        cfg.dimensions[0].items[0].weight = 0.7;

        assert!(matches!(
            cfg.validate(),
            Err(ConfigValidationError::ItemWeights(_, _))
        ));
    }

    #[test]
    fn test_empty_scale_range() {
        let mut cfg = minimal_config();
        cfg.dimensions[0].items[0].kind = ScorerKind::Scale { min: 5.0, max: 5.0 };

        assert!(matches!(
            cfg.validate(),
            Err(ConfigValidationError::EmptyScaleRange(_, _, _))
        ));
    }

    #[test]
    fn test_empty_hard_filter_rejected() {
        let mut cfg = minimal_config();
        cfg.hard_filters.push(HardFilterConfig {
            question_id: "q9".to_string(),
            incompatible: vec![],
        });

        assert!(matches!(
            cfg.validate(),
            Err(ConfigValidationError::EmptyHardFilter(_))
        ));
    }
}
