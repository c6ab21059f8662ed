use crate::core::{
    filters::is_hard_filtered,
    reasons::generate_reasons,
    scoring::{aggregate_score, score_dimensions, to_compatibility, DimensionScore},
};
use crate::models::{MatchResult, MatchingConfig, RoundOutcome, SurveyRecord};
use chrono::Utc;
use rand::seq::SliceRandom;
use tracing::{debug, info};

/// Visitation order over the eligible pool.
///
/// The production shuffle is the engine's only source of non-determinism;
/// injecting the order lets tests pin exact pairings.
pub trait OrderingStrategy {
    fn arrange(&self, indices: &mut Vec<usize>);
}

/// Fisher-Yates shuffle over the pool (production behavior)
#[derive(Debug, Default)]
pub struct ShuffleOrder;

impl OrderingStrategy for ShuffleOrder {
    fn arrange(&self, indices: &mut Vec<usize>) {
        indices.shuffle(&mut rand::thread_rng());
    }
}

/// Pool order as given; used in tests
#[derive(Debug, Default)]
pub struct SequentialOrder;

impl OrderingStrategy for SequentialOrder {
    fn arrange(&self, _indices: &mut Vec<usize>) {}
}

/// A pinned permutation of the eligible pool; used in tests.
///
/// Must be a permutation of `0..n` for an eligible pool of size `n`;
/// mismatched lengths leave the order untouched.
#[derive(Debug)]
pub struct ExplicitOrder(pub Vec<usize>);

impl OrderingStrategy for ExplicitOrder {
    fn arrange(&self, indices: &mut Vec<usize>) {
        if self.0.len() == indices.len() {
            indices.copy_from_slice(&self.0);
        }
    }
}

/// One round's matching orchestrator.
///
/// Walks a randomized visitation order over the eligible pool and greedily
/// pairs each unmatched respondent with their highest-scoring remaining
/// candidate. This is deliberately not a global maximum-weight matching:
/// earlier picks can consume a later respondent's best partner.
pub struct RoundMatcher {
    config: MatchingConfig,
    ordering: Box<dyn OrderingStrategy>,
}

impl RoundMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self::with_ordering(config, Box::new(ShuffleOrder))
    }

    pub fn with_ordering(config: MatchingConfig, ordering: Box<dyn OrderingStrategy>) -> Self {
        Self { config, ordering }
    }

    /// Score one candidate pair, unless a hard filter vetoes it.
    ///
    /// Returns the raw aggregate alongside the per-dimension breakdown so the
    /// round loop can rank candidates and build reasons without rescoring.
    fn score_pair(
        &self,
        a: &SurveyRecord,
        b: &SurveyRecord,
    ) -> Option<(f64, Vec<DimensionScore>)> {
        if is_hard_filtered(&self.config.hard_filters, &a.answers, &b.answers) {
            debug!(
                user1 = %a.user_id,
                user2 = %b.user_id,
                "pair vetoed by hard filter"
            );
            return None;
        }

        let dimension_scores = score_dimensions(&self.config.dimensions, &a.answers, &b.answers);
        let raw = aggregate_score(&dimension_scores);

        Some((raw, dimension_scores))
    }

    /// Build the full pairing output for one round.
    ///
    /// Respondents with no remaining non-vetoed candidate are skipped
    /// silently; an odd eligible pool always leaves exactly one unmatched.
    pub fn run_round(&self, records: &[SurveyRecord]) -> RoundOutcome {
        let eligible: Vec<&SurveyRecord> = records.iter().filter(|r| r.eligible()).collect();
        let total_eligible = eligible.len();

        let mut order: Vec<usize> = (0..eligible.len()).collect();
        self.ordering.arrange(&mut order);

        let mut matched = vec![false; eligible.len()];
        let mut matches = Vec::new();

        for &current in &order {
            if matched[current] {
                continue;
            }

            // Greedy pick: best remaining candidate, first seen wins ties
            let mut best: Option<(usize, f64, Vec<DimensionScore>)> = None;
            for &candidate in &order {
                if candidate == current || matched[candidate] {
                    continue;
                }

                let Some((raw, dimension_scores)) =
                    self.score_pair(eligible[current], eligible[candidate])
                else {
                    continue;
                };

                if best.as_ref().map_or(true, |(_, top, _)| raw > *top) {
                    best = Some((candidate, raw, dimension_scores));
                }
            }

            let Some((candidate, raw, dimension_scores)) = best else {
                debug!(user = %eligible[current].user_id, "no matchable candidate this round");
                continue;
            };

            let compatibility = to_compatibility(raw);
            let reasons = generate_reasons(
                &self.config.reasons,
                &eligible[current].answers,
                &eligible[candidate].answers,
                &dimension_scores,
            );

            debug!(
                user1 = %eligible[current].user_id,
                user2 = %eligible[candidate].user_id,
                compatibility,
                "pair assigned"
            );

            matched[current] = true;
            matched[candidate] = true;
            matches.push(MatchResult {
                user1_id: eligible[current].user_id.clone(),
                user2_id: eligible[candidate].user_id.clone(),
                compatibility,
                reasons,
            });
        }

        info!(
            total_eligible,
            pairs = matches.len(),
            unmatched = total_eligible - matches.len() * 2,
            "matching round complete"
        );

        RoundOutcome {
            matches,
            total_eligible,
            generated_at: Utc::now(),
        }
    }
}
