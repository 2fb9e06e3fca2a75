//! Tolerant field extraction from loosely-shaped request payloads.
//!
//! The payload shapes accepted by the backend are not contractually fixed:
//! the same logical field can arrive under several key spellings and as
//! different scalar types. Each extractor walks an ordered candidate key
//! list and coerces the first usable value, so filtering and insert logic
//! never deals with raw payload tolerance rules. Candidate lists live with
//! their callers as declarative slices, making new aliases additive.

use serde_json::Value;

/// Extract a string through an ordered fallback key list.
///
/// Strings are trimmed; an empty-after-trim value is treated as absent and
/// extraction continues with the next candidate. Numbers and booleans are
/// stringified. Nulls, arrays and objects never match.
pub fn string_field(payload: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match payload.get(key) {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            Some(Value::Bool(b)) => return Some(b.to_string()),
            _ => {}
        }
    }
    None
}

/// Extract a finite number through an ordered fallback key list.
///
/// Numeric values pass through directly; strings go through standard
/// textual conversion. A value that does not parse as a finite number is
/// treated as absent, not an error. The result distinguishes "no number"
/// from zero.
pub fn number_field(payload: &Value, keys: &[&str]) -> Option<f64> {
    for key in keys {
        match payload.get(key) {
            Some(Value::Number(n)) => {
                if let Some(f) = n.as_f64() {
                    if f.is_finite() {
                        return Some(f);
                    }
                }
            }
            Some(Value::String(s)) => {
                if let Ok(f) = s.trim().parse::<f64>() {
                    if f.is_finite() {
                        return Some(f);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract a boolean through an ordered fallback key list.
///
/// Unlike the other extractors this always resolves to a concrete value:
/// the first present, non-null candidate decides. A source boolean is
/// returned directly, a string is true iff it case-insensitively equals
/// "true", a number is true iff it equals 1. Any other representation,
/// and the all-candidates-absent case, resolve to false.
pub fn bool_field(payload: &Value, keys: &[&str]) -> bool {
    for key in keys {
        match payload.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::Bool(b)) => return *b,
            Some(Value::String(s)) => return s.trim().eq_ignore_ascii_case("true"),
            Some(Value::Number(n)) => return n.as_f64() == Some(1.0),
            Some(_) => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_field_first_usable_candidate_wins() {
        let payload = json!({ "Text": "hello", "SearchText": "ignored" });
        assert_eq!(
            string_field(&payload, &["Text", "SearchText"]),
            Some("hello".to_string())
        );
    }

    #[test]
    fn test_string_field_falls_through_missing_and_empty() {
        let payload = json!({ "Text": "   ", "SearchText": null, "Term": " contract " });
        assert_eq!(
            string_field(&payload, &["Text", "SearchText", "Term"]),
            Some("contract".to_string())
        );
    }

    #[test]
    fn test_string_field_stringifies_scalars() {
        let payload = json!({ "Amount": 500 });
        assert_eq!(string_field(&payload, &["Amount"]), Some("500".to_string()));

        let payload = json!({ "Required": true });
        assert_eq!(
            string_field(&payload, &["Required"]),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_string_field_skips_containers() {
        let payload = json!({ "Text": ["a"], "Term": {"x": 1} });
        assert_eq!(string_field(&payload, &["Text", "Term"]), None);
    }

    #[test]
    fn test_number_field_direct_and_textual() {
        let payload = json!({ "Amount": 500 });
        assert_eq!(number_field(&payload, &["Amount"]), Some(500.0));

        let payload = json!({ "Amount": "1200.50" });
        assert_eq!(number_field(&payload, &["Amount"]), Some(1200.5));
    }

    #[test]
    fn test_number_field_unparseable_falls_through() {
        let payload = json!({ "Amount": "not-a-number", "Value": "42" });
        assert_eq!(number_field(&payload, &["Amount", "Value"]), Some(42.0));
    }

    #[test]
    fn test_number_field_rejects_non_finite_text() {
        let payload = json!({ "Amount": "NaN" });
        assert_eq!(number_field(&payload, &["Amount"]), None);

        let payload = json!({ "Amount": "inf" });
        assert_eq!(number_field(&payload, &["Amount"]), None);
    }

    #[test]
    fn test_number_field_absent_is_not_zero() {
        let payload = json!({});
        assert_eq!(number_field(&payload, &["Amount"]), None);

        let payload = json!({ "Amount": 0 });
        assert_eq!(number_field(&payload, &["Amount"]), Some(0.0));
    }

    #[test]
    fn test_bool_field_source_boolean() {
        let payload = json!({ "Required": true });
        assert!(bool_field(&payload, &["Required"]));

        let payload = json!({ "Required": false });
        assert!(!bool_field(&payload, &["Required"]));
    }

    #[test]
    fn test_bool_field_string_and_number_coercion() {
        assert!(bool_field(&json!({ "Required": "TRUE" }), &["Required"]));
        assert!(bool_field(&json!({ "Required": "true" }), &["Required"]));
        assert!(!bool_field(&json!({ "Required": "yes" }), &["Required"]));
        assert!(bool_field(&json!({ "Required": 1 }), &["Required"]));
        assert!(!bool_field(&json!({ "Required": 0 }), &["Required"]));
        assert!(!bool_field(&json!({ "Required": 2 }), &["Required"]));
    }

    #[test]
    fn test_bool_field_defaults_false_when_absent() {
        assert!(!bool_field(&json!({}), &["Required", "Mandatory"]));
        assert!(!bool_field(&json!({ "Required": null }), &["Required"]));
    }

    #[test]
    fn test_bool_field_first_present_candidate_decides() {
        // The first present key resolves even to false; later candidates
        // are not consulted.
        let payload = json!({ "Required": false, "Mandatory": true });
        assert!(!bool_field(&payload, &["Required", "Mandatory"]));
    }
}
