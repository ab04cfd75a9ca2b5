//! Declarative body checks, run before a handler touches the store.
//!
//! Each route owns an ordered slice of [`Rule`]s. Every rule that fails adds
//! one [`FieldError`], so a client sees all problems at once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One failed rule, in the shape the bar's frontend already consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
    pub msg: String,
    pub path: String,
    pub location: String,
}

impl FieldError {
    pub fn new(path: &str, value: Value, msg: &str) -> Self {
        Self {
            kind: "field".into(),
            value,
            msg: msg.into(),
            path: path.into(),
            location: "body".into(),
        }
    }
}

pub struct Rule {
    pub field: &'static str,
    pub check: fn(&Value) -> bool,
    pub message: &'static str,
}

/// Request bodies that carry their own rule list.
pub trait RuleSet {
    const RULES: &'static [Rule];
}

/// Absent fields are checked as `null`.
pub fn validate(body: &Value, rules: &[Rule]) -> Vec<FieldError> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = body.get(rule.field).unwrap_or(&Value::Null);
            (!(rule.check)(value)).then(|| FieldError::new(rule.field, value.clone(), rule.message))
        })
        .collect()
}

pub fn is_string(v: &Value) -> bool {
    v.is_string()
}

pub fn is_non_empty_string(v: &Value) -> bool {
    v.as_str().is_some_and(|s| !s.is_empty())
}

/// JSON integers only, within what the `price` column can hold. `8.0` is a
/// float on the wire and is rejected like `"8"`.
pub fn is_non_negative_i32(v: &Value) -> bool {
    v.as_i64()
        .is_some_and(|n| (0..=i64::from(i32::MAX)).contains(&n))
}

pub const ORDER_RULES: &[Rule] = &[
    Rule {
        field: "order",
        check: is_string,
        message: "order must be a string",
    },
    Rule {
        field: "order",
        check: is_non_empty_string,
        message: "order must not be empty",
    },
    Rule {
        field: "price",
        check: is_non_negative_i32,
        message: "price must be an integer >= 0",
    },
];

pub const CREDENTIAL_RULES: &[Rule] = &[
    Rule {
        field: "email",
        check: is_string,
        message: "email must be a string",
    },
    Rule {
        field: "password",
        check: is_string,
        message: "password must be a string",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_order_passes() {
        assert!(validate(&json!({ "order": "Mojito", "price": 8 }), ORDER_RULES).is_empty());
        assert!(validate(&json!({ "order": "Water", "price": 0 }), ORDER_RULES).is_empty());
    }

    #[test]
    fn missing_order_fails_both_order_rules() {
        let errors = validate(&json!({ "price": 8 }), ORDER_RULES);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.path == "order" && e.value.is_null()));
        assert_eq!(errors[0].msg, "order must be a string");
        assert_eq!(errors[1].msg, "order must not be empty");
    }

    #[test]
    fn price_must_be_a_non_negative_integer() {
        for bad in [json!(-1), json!(8.5), json!(8.0), json!("8"), json!(null), json!(3_000_000_000u64)] {
            let errors = validate(&json!({ "order": "Mojito", "price": bad }), ORDER_RULES);
            assert_eq!(errors.len(), 1, "price {bad} should fail");
            assert_eq!(errors[0].path, "price");
            assert_eq!(errors[0].value, bad);
        }
    }

    #[test]
    fn credentials_need_both_strings() {
        assert!(validate(&json!({ "email": "a@x.com", "password": "" }), CREDENTIAL_RULES).is_empty());
        let errors = validate(&json!({ "email": 5 }), CREDENTIAL_RULES);
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["email", "password"]);
    }

    #[test]
    fn field_error_wire_shape() {
        let e = FieldError::new("price", json!(-1), "price must be an integer >= 0");
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            json!({
                "type": "field",
                "value": -1,
                "msg": "price must be an integer >= 0",
                "path": "price",
                "location": "body"
            })
        );
    }
}
