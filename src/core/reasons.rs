use crate::core::scoring::{scale_similarity, DimensionScore};
use crate::models::{AnswerValue, ReasonConfig};
use std::collections::HashMap;

/// Maximum justifications attached to one match
const MAX_REASONS: usize = 4;

/// Scale similarity threshold for calling a question "closely aligned"
const CLOSE_ALIGNMENT: f64 = 0.8;

type Answers = HashMap<String, AnswerValue>;

/// Build up to four short justifications for a pairing, highest-signal first.
///
/// Order of precedence: the strongest dimension, identical answers on the
/// configured high-signal choice questions, shared tags on the configured
/// multi-select, then closely aligned slider questions. If that yields fewer
/// than two reasons, the second-strongest dimension is appended so a match
/// never ships with a single justification when dimension data exists.
pub fn generate_reasons(
    config: &ReasonConfig,
    a: &Answers,
    b: &Answers,
    dimension_scores: &[DimensionScore],
) -> Vec<String> {
    let mut reasons = Vec::with_capacity(MAX_REASONS);

    let ranked = rank_dimensions(dimension_scores);

    if let Some(top) = ranked.first() {
        reasons.push(format!("You are highly aligned on {}", top.name));
    }

    for highlight in &config.choice_highlights {
        if reasons.len() >= MAX_REASONS {
            break;
        }

        let ca = a.get(&highlight.question_id).and_then(AnswerValue::as_choice);
        let cb = b.get(&highlight.question_id).and_then(AnswerValue::as_choice);

        if let (Some(ca), Some(cb)) = (ca, cb) {
            if ca == cb {
                reasons.push(format!("You both chose \"{}\" for {}", ca, highlight.label));
            }
        }
    }

    if reasons.len() < MAX_REASONS {
        if let Some(tag_highlight) = &config.tag_highlight {
            let shared = shared_tags(a, b, &tag_highlight.question_id);
            match shared.as_slice() {
                [] => {}
                [only] => reasons.push(format!(
                    "You share {} like {}",
                    tag_highlight.label, only
                )),
                [first, second, ..] => reasons.push(format!(
                    "You share {} like {} and {}",
                    tag_highlight.label, first, second
                )),
            }
        }
    }

    for highlight in &config.scale_highlights {
        if reasons.len() >= MAX_REASONS {
            break;
        }

        let similarity =
            scale_similarity(a, b, &highlight.question_id, highlight.min, highlight.max);
        if similarity >= CLOSE_ALIGNMENT {
            reasons.push(format!("You are closely aligned on {}", highlight.label));
        }
    }

    if reasons.len() < 2 {
        if let Some(second) = ranked.get(1) {
            reasons.push(format!("You also share common ground on {}", second.name));
        }
    }

    reasons
}

/// Dimensions sorted by score, best first; first-seen wins ties
fn rank_dimensions(scores: &[DimensionScore]) -> Vec<&DimensionScore> {
    let mut ranked: Vec<&DimensionScore> = scores.iter().collect();
    ranked.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Tags both respondents selected, in the first respondent's order
fn shared_tags<'a>(a: &'a Answers, b: &Answers, question_id: &str) -> Vec<&'a str> {
    let tags_b: Vec<&str> = b
        .get(question_id)
        .and_then(AnswerValue::as_list)
        .map(|items| items.iter().map(String::as_str).collect())
        .unwrap_or_default();

    a.get(question_id)
        .and_then(AnswerValue::as_list)
        .map(|items| {
            items
                .iter()
                .map(String::as_str)
                .filter(|tag| tags_b.contains(tag))
                .collect()
        })
        .unwrap_or_default()
}
