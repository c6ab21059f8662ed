use crate::models::{AnswerValue, DimensionConfig, ScorerKind, ScoringItem};
use std::collections::{HashMap, HashSet};

/// Partial credit when both respondents answered a choice question differently
const PARTIAL_CREDIT: f64 = 0.2;

/// Fallback when either side of a choice question is missing or mistyped
const MISSING_CHOICE: f64 = 0.3;

/// Neutral score for two empty tag sets
const NEUTRAL_TAG_OVERLAP: f64 = 0.5;

/// Blend weights for ranking similarity: shared selection counts more than order
const RANKING_OVERLAP_WEIGHT: f64 = 0.6;
const RANKING_ORDER_WEIGHT: f64 = 0.4;

/// Display mapping: raw [0,1] -> percentage [55,99]
const COMPATIBILITY_FLOOR: f64 = 55.0;
const COMPATIBILITY_SPAN: f64 = 45.0;
const COMPATIBILITY_CEILING: f64 = 99.0;

type Answers = HashMap<String, AnswerValue>;

/// Per-dimension score for one candidate pair
#[derive(Debug, Clone)]
pub struct DimensionScore {
    pub name: String,
    pub weight: f64,
    pub score: f64,
}

/// Similarity of two bounded-scale answers (0-1)
///
/// Linear distance over the configured range. A missing or mistyped answer
/// falls back to the scale midpoint, so an unanswered question degrades
/// toward neutral similarity instead of failing the pair.
#[inline]
pub fn scale_similarity(a: &Answers, b: &Answers, question_id: &str, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 {
        return 1.0;
    }

    let midpoint = (min + max) / 2.0;
    let va = scale_value(a, question_id).unwrap_or(midpoint);
    let vb = scale_value(b, question_id).unwrap_or(midpoint);

    1.0 - ((va - vb).abs() / range).min(1.0)
}

#[inline]
fn scale_value(answers: &Answers, question_id: &str) -> Option<f64> {
    answers.get(question_id).and_then(AnswerValue::as_scale)
}

/// Similarity of two single-choice answers (0-1)
///
/// A differing answer is weak evidence of mismatch, not proof, so it earns
/// partial credit rather than zero.
#[inline]
pub fn choice_similarity(a: &Answers, b: &Answers, question_id: &str) -> f64 {
    let ca = a.get(question_id).and_then(AnswerValue::as_choice);
    let cb = b.get(question_id).and_then(AnswerValue::as_choice);

    match (ca, cb) {
        (Some(ca), Some(cb)) if ca == cb => 1.0,
        (Some(_), Some(_)) => PARTIAL_CREDIT,
        _ => MISSING_CHOICE,
    }
}

/// Jaccard overlap of two multi-select tag sets (0-1)
///
/// Two empty selections score neutral, not perfect: mutual non-answering is
/// not evidence of alignment.
#[inline]
pub fn tag_overlap(a: &Answers, b: &Answers, question_id: &str) -> f64 {
    let ta = tag_set(a, question_id);
    let tb = tag_set(b, question_id);

    if ta.is_empty() && tb.is_empty() {
        return NEUTRAL_TAG_OVERLAP;
    }

    let intersection = ta.intersection(&tb).count() as f64;
    let union = ta.union(&tb).count() as f64;

    intersection / union
}

#[inline]
fn tag_set<'a>(answers: &'a Answers, question_id: &str) -> HashSet<&'a str> {
    answers
        .get(question_id)
        .and_then(AnswerValue::as_list)
        .map(|items| items.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Similarity of two ranked lists (0-1)
///
/// Computed over the items both respondents ranked. Blends how much of each
/// list is shared with pairwise order agreement among the shared items, with
/// overlap weighted more heavily than exact order. Disjoint lists score 0.
pub fn ranking_concordance(a: &Answers, b: &Answers, question_id: &str) -> f64 {
    let ra = ranked_positions(a, question_id);
    let rb = ranked_positions(b, question_id);

    let shared: Vec<&str> = ra
        .iter()
        .filter(|(item, _)| rb.contains_key(*item))
        .map(|(item, _)| *item)
        .collect();

    if shared.is_empty() {
        return 0.0;
    }

    let shared_count = shared.len() as f64;
    let overlap_ratio =
        (shared_count / ra.len() as f64 + shared_count / rb.len() as f64) / 2.0;

    // Kendall-style concordance: fraction of shared-item pairs whose relative
    // order agrees between the two rankings. A single shared item has no
    // pairs and counts as fully concordant.
    let mut pairs = 0usize;
    let mut concordant = 0usize;
    for i in 0..shared.len() {
        for j in (i + 1)..shared.len() {
            pairs += 1;
            let a_order = ra[shared[i]] < ra[shared[j]];
            let b_order = rb[shared[i]] < rb[shared[j]];
            if a_order == b_order {
                concordant += 1;
            }
        }
    }

    let order_agreement = if pairs > 0 {
        concordant as f64 / pairs as f64
    } else {
        1.0
    };

    RANKING_OVERLAP_WEIGHT * overlap_ratio + RANKING_ORDER_WEIGHT * order_agreement
}

/// Map each ranked item to its position, keeping the first occurrence
#[inline]
fn ranked_positions<'a>(answers: &'a Answers, question_id: &str) -> HashMap<&'a str, usize> {
    let mut positions = HashMap::new();

    if let Some(items) = answers.get(question_id).and_then(AnswerValue::as_list) {
        for (index, item) in items.iter().enumerate() {
            positions.entry(item.as_str()).or_insert(index);
        }
    }

    positions
}

/// Score one configured item by dispatching on its question shape
#[inline]
pub fn score_item(item: &ScoringItem, a: &Answers, b: &Answers) -> f64 {
    match item.kind {
        ScorerKind::Scale { min, max } => scale_similarity(a, b, &item.question_id, min, max),
        ScorerKind::Choice => choice_similarity(a, b, &item.question_id),
        ScorerKind::TagSet => tag_overlap(a, b, &item.question_id),
        ScorerKind::Ranked => ranking_concordance(a, b, &item.question_id),
    }
}

/// Weighted mean of a dimension's item scores (0-1)
///
/// Item weights are authored to sum to 1.0 within a dimension, so no
/// re-normalization is needed here.
pub fn score_dimension(dim: &DimensionConfig, a: &Answers, b: &Answers) -> f64 {
    dim.items
        .iter()
        .map(|item| score_item(item, a, b) * item.weight)
        .sum()
}

/// Score every configured dimension for one pair
pub fn score_dimensions(dims: &[DimensionConfig], a: &Answers, b: &Answers) -> Vec<DimensionScore> {
    dims.iter()
        .map(|dim| DimensionScore {
            name: dim.name.clone(),
            weight: dim.weight,
            score: score_dimension(dim, a, b),
        })
        .collect()
}

/// Combine dimension scores into the raw pool-level aggregate (0-1)
#[inline]
pub fn aggregate_score(dimension_scores: &[DimensionScore]) -> f64 {
    dimension_scores.iter().map(|d| d.score * d.weight).sum()
}

/// Map a raw aggregate onto the user-facing percentage.
///
/// The floor inflation is a product decision: even a fully mismatched pair
/// reads as majority compatible, and nothing ever displays as 100%.
#[inline]
pub fn to_compatibility(raw: f64) -> u8 {
    let scaled = (raw * COMPATIBILITY_SPAN + COMPATIBILITY_FLOOR).round();
    scaled.clamp(COMPATIBILITY_FLOOR, COMPATIBILITY_CEILING) as u8
}
