//! Sort and field-projection directives parsed from `sort`/`select`

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Sort direction; a leading `-` on a field denotes descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordered sequence of `(field, direction)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<(String, SortDirection)>,
}

impl SortSpec {
    /// Parse a comma-separated sort directive; absent yields the default
    /// `created_at` ascending.
    pub fn parse(sort: Option<&str>) -> Self {
        let keys = match sort {
            Some(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty() && *field != "-")
                .map(|field| match field.strip_prefix('-') {
                    Some(name) => (name.to_string(), SortDirection::Descending),
                    None => (field.to_string(), SortDirection::Ascending),
                })
                .collect(),
            _ => vec![("created_at".to_string(), SortDirection::Ascending)],
        };

        Self { keys }
    }

    pub fn keys(&self) -> &[(String, SortDirection)] {
        &self.keys
    }

    /// Compare two serialized documents under this spec.
    ///
    /// Missing fields sort before present ones; ties fall through to the
    /// next key.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for (field, direction) in &self.keys {
            let ordering = compare_fields(a.get(field), b.get(field));
            let ordering = match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_json(a, b),
    }
}

fn compare_json(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Set of fields a read should return; empty means all fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionSpec {
    fields: BTreeSet<String>,
}

impl ProjectionSpec {
    /// Parse a comma-separated `select` directive; absent yields the
    /// unrestricted projection.
    pub fn parse(select: Option<&str>) -> Self {
        let fields = select
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self { fields }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeSet<String> {
        &self.fields
    }

    /// Restrict a serialized document to the selected fields.
    ///
    /// `id` is always retained so responses stay addressable.
    pub fn apply(&self, document: Value) -> Value {
        if self.is_unrestricted() {
            return document;
        }

        let Value::Object(object) = document else {
            return document;
        };

        let projected: Map<String, Value> = object
            .into_iter()
            .filter(|(key, _)| key == "id" || self.fields.contains(key))
            .collect();

        Value::Object(projected)
    }
}
