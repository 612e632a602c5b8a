//! Store-neutral filter expressions translated from query parameters

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value;

use super::params::QueryParams;

/// Comparison operators accepted in query shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    /// Parse the shorthand operator name, e.g. `lte`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            _ => None,
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => ordering != Ordering::Less,
        }
    }
}

/// A single filter condition on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Literal equality
    Eq(String),
    /// Set membership over comma-split values
    In(Vec<String>),
    /// Comparison against a single value
    Cmp(Comparison, String),
}

/// Store-neutral description of which documents match a read/update/delete.
///
/// Built immutably from [`QueryParams`]; reserved control keys never appear
/// as filter fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilter {
    conditions: BTreeMap<String, Condition>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate raw query parameters into a filter.
    ///
    /// Never fails: malformed input degrades to literal-equality conditions.
    /// Two encodings of comparison shorthand are accepted: bracket keys
    /// (`age[lt]=5`) and value prefixes (`age=lt:5`). Bracket keys with an
    /// unrecognized operator pass through as equality on the raw key.
    pub fn translate(params: &QueryParams) -> Self {
        let mut filter = Self::new();

        for (key, value) in params.filter_fields() {
            if let Some((field, op)) = parse_bracket_key(key) {
                if let Some(cmp) = Comparison::parse(op) {
                    filter
                        .conditions
                        .insert(field.to_string(), Condition::Cmp(cmp, value.to_string()));
                    continue;
                }
                // unknown nested operator passes through unchanged
                filter
                    .conditions
                    .insert(key.to_string(), Condition::Eq(value.to_string()));
                continue;
            }

            if let Some((op, rest)) = value.split_once(':') {
                if let Some(cmp) = Comparison::parse(op) {
                    filter
                        .conditions
                        .insert(key.to_string(), Condition::Cmp(cmp, rest.to_string()));
                    continue;
                }
            }

            if value.contains(',') {
                let values = value.split(',').map(str::to_string).collect();
                filter
                    .conditions
                    .insert(key.to_string(), Condition::In(values));
                continue;
            }

            filter
                .conditions
                .insert(key.to_string(), Condition::Eq(value.to_string()));
        }

        filter
    }

    /// Add an equality condition, replacing any prior condition on the field.
    pub fn with_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions
            .insert(field.into(), Condition::Eq(value.into()));
        self
    }

    /// Add a comparison condition, replacing any prior condition on the field.
    pub fn with_cmp(
        mut self,
        field: impl Into<String>,
        cmp: Comparison,
        value: impl Into<String>,
    ) -> Self {
        self.conditions
            .insert(field.into(), Condition::Cmp(cmp, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.conditions.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions
            .iter()
            .map(|(field, condition)| (field.as_str(), condition))
    }

    /// Evaluate the filter against a serialized document.
    ///
    /// All conditions must hold; a missing field never matches.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|(field, condition)| {
            let Some(actual) = document.get(field) else {
                return false;
            };

            match condition {
                Condition::Eq(expected) => value_eq(actual, expected),
                Condition::In(values) => values.iter().any(|v| value_eq(actual, v)),
                Condition::Cmp(cmp, expected) => compare_values(actual, expected)
                    .map(|ordering| cmp.accepts(ordering))
                    .unwrap_or(false),
            }
        })
    }
}

fn parse_bracket_key(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let inner = key[open + 1..].strip_suffix(']')?;
    if open == 0 || inner.is_empty() {
        return None;
    }
    Some((&key[..open], inner))
}

/// Equality between a document value and a raw query string.
fn value_eq(actual: &Value, raw: &str) -> bool {
    match actual {
        Value::String(s) => s == raw,
        Value::Number(n) => raw
            .parse::<f64>()
            .map(|parsed| n.as_f64() == Some(parsed))
            .unwrap_or(false),
        Value::Bool(b) => raw.parse::<bool>().map(|parsed| parsed == *b).unwrap_or(false),
        Value::Null => raw == "null",
        _ => false,
    }
}

/// Ordering between a document value and a raw query string.
///
/// Numbers compare numerically; strings compare lexicographically, which
/// orders RFC 3339 timestamps chronologically.
pub(crate) fn compare_values(actual: &Value, raw: &str) -> Option<Ordering> {
    match actual {
        Value::Number(n) => {
            let lhs = n.as_f64()?;
            let rhs = raw.parse::<f64>().ok()?;
            lhs.partial_cmp(&rhs)
        }
        Value::String(s) => Some(s.as_str().cmp(raw)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_reserved_keys_never_appear_in_filter() {
        let filter = QueryFilter::translate(&params(&[
            ("select", "a,b"),
            ("sort", "-created_at"),
            ("page", "3"),
            ("limit", "5"),
            ("team_id", "t-1"),
        ]));

        assert_eq!(filter.len(), 1);
        assert_eq!(
            filter.get("team_id"),
            Some(&Condition::Eq("t-1".to_string()))
        );
    }

    #[test]
    fn test_comma_value_becomes_membership() {
        let filter = QueryFilter::translate(&params(&[("position", "manager,designer")]));

        assert_eq!(
            filter.get("position"),
            Some(&Condition::In(vec![
                "manager".to_string(),
                "designer".to_string()
            ]))
        );
    }

    #[test]
    fn test_bracket_shorthand_rewrites_comparison() {
        let filter = QueryFilter::translate(&params(&[("age[gte]", "5")]));

        assert_eq!(
            filter.get("age"),
            Some(&Condition::Cmp(Comparison::Gte, "5".to_string()))
        );
    }

    #[test]
    fn test_value_shorthand_rewrites_comparison() {
        let filter = QueryFilter::translate(&params(&[("age", "gte:5")]));

        assert_eq!(
            filter.get("age"),
            Some(&Condition::Cmp(Comparison::Gte, "5".to_string()))
        );
    }

    #[test]
    fn test_unknown_bracket_operator_passes_through() {
        let filter = QueryFilter::translate(&params(&[("age[unknown]", "5")]));

        assert_eq!(
            filter.get("age[unknown]"),
            Some(&Condition::Eq("5".to_string()))
        );
    }

    #[test]
    fn test_unknown_value_prefix_is_literal_equality() {
        let filter = QueryFilter::translate(&params(&[("note", "re:hello")]));

        assert_eq!(
            filter.get("note"),
            Some(&Condition::Eq("re:hello".to_string()))
        );
    }

    #[test]
    fn test_matches_equality() {
        let filter = QueryFilter::new().with_eq("team_id", "t-1");

        assert!(filter.matches(&json!({"team_id": "t-1", "name": "x"})));
        assert!(!filter.matches(&json!({"team_id": "t-2"})));
        assert!(!filter.matches(&json!({"name": "x"})));
    }

    #[test]
    fn test_matches_boolean_and_numeric_coercion() {
        let filter = QueryFilter::translate(&params(&[("is_admin", "true")]));
        assert!(filter.matches(&json!({"is_admin": true})));
        assert!(!filter.matches(&json!({"is_admin": false})));

        let filter = QueryFilter::translate(&params(&[("chair_number", "3")]));
        assert!(filter.matches(&json!({"chair_number": 3})));
        assert!(!filter.matches(&json!({"chair_number": 4})));
    }

    #[test]
    fn test_matches_membership() {
        let filter = QueryFilter::translate(&params(&[("position", "manager,designer")]));

        assert!(filter.matches(&json!({"position": "designer"})));
        assert!(!filter.matches(&json!({"position": "engineer"})));
    }

    #[test]
    fn test_matches_numeric_comparison() {
        let filter = QueryFilter::translate(&params(&[("age[lt]", "30")]));

        assert!(filter.matches(&json!({"age": 25})));
        assert!(!filter.matches(&json!({"age": 30})));
        assert!(!filter.matches(&json!({"age": 31})));

        let filter = QueryFilter::translate(&params(&[("age", "lte:30")]));
        assert!(filter.matches(&json!({"age": 30})));
    }

    #[test]
    fn test_matches_timestamp_comparison() {
        let filter = QueryFilter::new().with_cmp("starts_at", Comparison::Gte, "2026-03-01T00:00:00Z");

        assert!(filter.matches(&json!({"starts_at": "2026-03-02T09:00:00Z"})));
        assert!(!filter.matches(&json!({"starts_at": "2026-02-28T09:00:00Z"})));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let filter = QueryFilter::new()
            .with_eq("team_id", "t-1")
            .with_eq("is_admin", "false");

        assert!(filter.matches(&json!({"team_id": "t-1", "is_admin": false})));
        assert!(!filter.matches(&json!({"team_id": "t-1", "is_admin": true})));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = QueryFilter::new();

        assert!(filter.matches(&json!({"anything": 1})));
        assert!(filter.matches(&json!({})));
    }
}
