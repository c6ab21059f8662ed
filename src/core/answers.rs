use crate::models::AnswerValue;
use serde_json::Value;
use std::collections::HashMap;

/// Normalize a raw per-user answer blob into a typed question -> answer map.
///
/// Numbers become scale answers, strings become choice codes, and arrays of
/// strings become lists (used for both tag sets and rankings). Anything else
/// is dropped rather than rejected; the scorers have their own fallbacks for
/// missing answers.
pub fn parse_answers(raw: &serde_json::Map<String, Value>) -> HashMap<String, AnswerValue> {
    let mut answers = HashMap::with_capacity(raw.len());

    for (question_id, value) in raw {
        if let Some(answer) = parse_answer(value) {
            answers.insert(question_id.clone(), answer);
        }
    }

    answers
}

/// Convert one raw JSON value into an answer, if it has a scoreable shape
#[inline]
pub fn parse_answer(value: &Value) -> Option<AnswerValue> {
    match value {
        Value::Number(n) => n.as_f64().map(AnswerValue::Scale),
        Value::String(s) => Some(AnswerValue::Choice(s.clone())),
        Value::Array(items) => {
            // Non-string elements are skipped, not fatal
            let strings: Vec<String> = items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            Some(AnswerValue::List(strings))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_scale_answer() {
        let parsed = parse_answer(&json!(4)).unwrap();
        assert_eq!(parsed, AnswerValue::Scale(4.0));
    }

    #[test]
    fn test_parse_choice_answer() {
        let parsed = parse_answer(&json!("partner")).unwrap();
        assert_eq!(parsed, AnswerValue::Choice("partner".to_string()));
    }

    #[test]
    fn test_parse_list_answer_skips_non_strings() {
        let parsed = parse_answer(&json!(["faith", 3, "family"])).unwrap();
        assert_eq!(
            parsed,
            AnswerValue::List(vec!["faith".to_string(), "family".to_string()])
        );
    }

    #[test]
    fn test_unscoreable_shapes_dropped() {
        assert_eq!(parse_answer(&json!(null)), None);
        assert_eq!(parse_answer(&json!(true)), None);
        assert_eq!(parse_answer(&json!({"nested": 1})), None);
    }

    #[test]
    fn test_parse_answers_map() {
        let raw = json!({
            "q_closeness": 5,
            "q_safety": "partner",
            "q_values": ["honesty", "faith"],
            "q_broken": {"oops": true}
        });

        let answers = parse_answers(raw.as_object().unwrap());

        assert_eq!(answers.len(), 3);
        assert_eq!(answers["q_closeness"], AnswerValue::Scale(5.0));
        assert!(!answers.contains_key("q_broken"));
    }
}
