use crate::models::{AnswerValue, HardFilterConfig};
use std::collections::HashMap;

type Answers = HashMap<String, AnswerValue>;

/// Check whether any configured deal-breaker vetoes this pair.
///
/// Filters are OR'd: one hit is enough to make the pair permanently
/// unmatchable. Incompatible pairs are unordered, so both assignment orders
/// are checked. A vetoed pair is never scored and never surfaced.
pub fn is_hard_filtered(filters: &[HardFilterConfig], a: &Answers, b: &Answers) -> bool {
    filters.iter().any(|filter| filter_vetoes(filter, a, b))
}

#[inline]
fn filter_vetoes(filter: &HardFilterConfig, a: &Answers, b: &Answers) -> bool {
    let ca = a.get(&filter.question_id).and_then(AnswerValue::as_choice);
    let cb = b.get(&filter.question_id).and_then(AnswerValue::as_choice);

    // An unanswered deal-breaker question cannot veto
    let (ca, cb) = match (ca, cb) {
        (Some(ca), Some(cb)) => (ca, cb),
        _ => return false,
    };

    filter
        .incompatible
        .iter()
        .any(|(x, y)| (x == ca && y == cb) || (x == cb && y == ca))
}
