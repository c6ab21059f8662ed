// End-to-end round scenarios against the built-in survey configuration

use kindred_algo::core::parse_answers;
use kindred_algo::{
    default_survey, ExplicitOrder, RoundMatcher, SequentialOrder, SurveyRecord, TraitProfile,
};
use serde_json::json;
use std::collections::HashSet;

fn record(id: &str, raw: serde_json::Value) -> SurveyRecord {
    SurveyRecord {
        user_id: id.to_string(),
        answers: parse_answers(raw.as_object().expect("answer blob must be an object")),
        completed: true,
        opted_in: true,
    }
}

/// Answers for every question in the built-in survey
fn full_answers() -> serde_json::Value {
    json!({
        "q_closeness": 6,
        "q_safety": "partner",
        "q_reassurance": 5,
        "q_conflict": "talk",
        "q_cooldown": 3,
        "q_values": ["faith", "honesty", "family"],
        "q_priorities": ["love", "respect", "stability"],
        "q_pace": 4,
        "q_social_energy": 5,
        "q_children": "definitely",
        "q_faith_practice": "weekly",
        "q_finances": 4,
        "q_bride_price": "flexible"
    })
}

fn sequential_matcher() -> RoundMatcher {
    RoundMatcher::with_ordering(default_survey(), Box::new(SequentialOrder))
}

#[test]
fn test_identical_respondents_score_the_ceiling() {
    let pool = vec![record("a", full_answers()), record("b", full_answers())];

    let outcome = sequential_matcher().run_round(&pool);

    assert_eq!(outcome.matches.len(), 1);
    let m = &outcome.matches[0];

    // raw 1.0 -> round(100) clamped to 99
    assert_eq!(m.compatibility, 99);
    assert!(m.reasons.len() >= 2);
    assert!(m.reasons[0].starts_with("You are highly aligned on"));
}

#[test]
fn test_shared_safety_and_conflict_answers_produce_reasons() {
    let pool = vec![record("a", full_answers()), record("b", full_answers())];

    let outcome = sequential_matcher().run_round(&pool);
    let reasons = &outcome.matches[0].reasons;

    assert!(reasons
        .contains(&"You both chose \"partner\" for where you feel safest".to_string()));
}

#[test]
fn test_bride_price_deal_breaker_never_pairs() {
    let mut requires = full_answers();
    requires["q_bride_price"] = json!("required");
    let mut refuses = full_answers();
    refuses["q_bride_price"] = json!("refuses");

    // The vetoed pair have identical answers everywhere else, so they would
    // be each other's top candidate if the filter were ignored.
    let mut distant = full_answers();
    distant["q_closeness"] = json!(1);
    distant["q_pace"] = json!(1);
    distant["q_values"] = json!(["career"]);

    let pool = vec![
        record("requires", requires),
        record("refuses", refuses),
        record("c", distant.clone()),
        record("d", distant),
    ];

    let matcher = RoundMatcher::new(default_survey());
    for _ in 0..1000 {
        let outcome = matcher.run_round(&pool);
        for m in &outcome.matches {
            let pair = (m.user1_id.as_str(), m.user2_id.as_str());
            assert!(
                pair != ("requires", "refuses") && pair != ("refuses", "requires"),
                "hard-filtered pair was emitted"
            );
        }
    }
}

#[test]
fn test_round_output_is_a_valid_matching() {
    let pool: Vec<SurveyRecord> = (0..9)
        .map(|i| {
            let mut raw = full_answers();
            raw["q_pace"] = json!(1 + (i % 7));
            raw["q_closeness"] = json!(1 + ((i * 3) % 7));
            record(&format!("user{}", i), raw)
        })
        .collect();

    let matcher = RoundMatcher::new(default_survey());
    for _ in 0..100 {
        let outcome = matcher.run_round(&pool);

        // Odd pool: exactly one respondent left out
        assert_eq!(outcome.matches.len(), 4);
        assert_eq!(outcome.total_eligible, 9);

        let mut seen = HashSet::new();
        for m in &outcome.matches {
            assert_ne!(m.user1_id, m.user2_id);
            assert!(seen.insert(m.user1_id.clone()), "duplicate {}", m.user1_id);
            assert!(seen.insert(m.user2_id.clone()), "duplicate {}", m.user2_id);
            assert!((55..=99).contains(&m.compatibility));
            assert!(m.reasons.len() <= 4);
        }
    }
}

#[test]
fn test_pinned_order_is_deterministic() {
    let pool: Vec<SurveyRecord> = (0..6)
        .map(|i| {
            let mut raw = full_answers();
            raw["q_pace"] = json!(1 + i);
            record(&format!("user{}", i), raw)
        })
        .collect();

    let matcher =
        RoundMatcher::with_ordering(default_survey(), Box::new(ExplicitOrder(vec![3, 1, 5, 0, 2, 4])));

    let first = matcher.run_round(&pool);
    let second = matcher.run_round(&pool);

    let summary = |outcome: &kindred_algo::RoundOutcome| -> Vec<(String, String, u8)> {
        outcome
            .matches
            .iter()
            .map(|m| (m.user1_id.clone(), m.user2_id.clone(), m.compatibility))
            .collect()
    };

    assert_eq!(summary(&first), summary(&second));
}

#[test]
fn test_singleton_pool_yields_empty_round() {
    let outcome = sequential_matcher().run_round(&[record("only", full_answers())]);

    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.total_eligible, 1);
}

#[test]
fn test_ineligible_records_never_enter_the_round() {
    let mut unfinished = record("unfinished", full_answers());
    unfinished.completed = false;
    let mut opted_out = record("opted_out", full_answers());
    opted_out.opted_in = false;

    let pool = vec![record("a", full_answers()), unfinished, opted_out];
    let outcome = sequential_matcher().run_round(&pool);

    assert_eq!(outcome.total_eligible, 1);
    assert!(outcome.matches.is_empty());
}

#[test]
fn test_trait_profile_wire_shape() {
    // Carried for the caller's pre-filtering; the engine never reads it
    let profile: TraitProfile = serde_json::from_value(json!({
        "userId": "u1",
        "traits": ["patient", "direct"],
        "dealBreakers": ["smoking"]
    }))
    .unwrap();

    assert_eq!(profile.deal_breakers, vec!["smoking"]);
}
