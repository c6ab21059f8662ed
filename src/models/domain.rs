use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single survey answer, normalized from the raw response blob.
///
/// Untagged so that JSON numbers, strings, and string arrays deserialize
/// directly into the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Bounded numeric slider answer (e.g., a 1-7 agreement scale)
    Scale(f64),
    /// Single selected code from a choice question
    Choice(String),
    /// Multi-select tags or a ranked list, in selection order
    List(Vec<String>),
}

impl AnswerValue {
    /// Numeric value, if this is a scale answer
    pub fn as_scale(&self) -> Option<f64> {
        match self {
            AnswerValue::Scale(v) => Some(*v),
            _ => None,
        }
    }

    /// Selected code, if this is a single-choice answer
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            AnswerValue::Choice(c) => Some(c.as_str()),
            _ => None,
        }
    }

    /// Selected items, if this is a list answer
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// One respondent's survey state, as handed over by the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub answers: HashMap<String, AnswerValue>,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "optedIn", default)]
    pub opted_in: bool,
}

impl SurveyRecord {
    /// A record participates in a round only when the survey is finished
    /// and the respondent has opted in to matching.
    pub fn eligible(&self) -> bool {
        self.completed && self.opted_in
    }
}

/// Per-user supplementary data used by the caller to pre-filter candidates.
///
/// The engine carries this type for the input contract but never interprets
/// it; deal-breaking inside the engine is answer-based only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(rename = "dealBreakers", default)]
    pub deal_breakers: Vec<String>,
}

/// One matched pair for a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "user1Id")]
    pub user1_id: String,
    #[serde(rename = "user2Id")]
    pub user2_id: String,
    /// Clamped display percentage, always within [55, 99]
    pub compatibility: u8,
    /// At most four short justifications, highest-signal first
    pub reasons: Vec<String>,
}

/// Full output of one matching round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalEligible")]
    pub total_eligible: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}
