//! Validated query parameters produced once at the HTTP boundary

use std::collections::BTreeMap;

/// Control keys that drive the read plan rather than the filter, plus
/// feature-specific keys that individual endpoints consume themselves.
pub const RESERVED_KEYS: &[&str] = &[
    "select",
    "sort",
    "page",
    "limit",
    "from",
    "to",
    "include_users_and_chairs",
];

/// Parsed query-string parameters.
///
/// Built once from the raw key/value pairs the HTTP layer parsed and passed
/// by value into the query pipeline. Control keys are captured separately;
/// everything else is a candidate filter field.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    fields: BTreeMap<String, String>,
    select: Option<String>,
    sort: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl QueryParams {
    /// Build from raw query-string pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();

            match key.as_str() {
                "select" => params.select = Some(value),
                "sort" => params.sort = Some(value),
                "page" => params.page = Some(value),
                "limit" => params.limit = Some(value),
                _ => {
                    params.fields.insert(key, value);
                }
            }
        }

        params
    }

    /// Raw value for a key, reserved or not.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "select" => self.select.as_deref(),
            "sort" => self.sort.as_deref(),
            "page" => self.page.as_deref(),
            "limit" => self.limit.as_deref(),
            _ => self.fields.get(key).map(String::as_str),
        }
    }

    /// Key/value pairs eligible to become filter conditions.
    pub fn filter_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn select(&self) -> Option<&str> {
        self.select.as_deref()
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    pub fn limit(&self) -> Option<&str> {
        self.limit.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_keys_are_separated() {
        let params = QueryParams::from_pairs([
            ("select", "email,team_id"),
            ("sort", "-created_at"),
            ("page", "2"),
            ("limit", "10"),
            ("team_id", "t-1"),
        ]);

        assert_eq!(params.select(), Some("email,team_id"));
        assert_eq!(params.sort(), Some("-created_at"));
        assert_eq!(params.page(), Some("2"));
        assert_eq!(params.limit(), Some("10"));

        let fields: Vec<_> = params.filter_fields().collect();
        assert_eq!(fields, vec![("team_id", "t-1")]);
    }

    #[test]
    fn test_feature_exclusions_never_become_filter_fields() {
        let params = QueryParams::from_pairs([
            ("from", "2026-01-01T00:00:00Z"),
            ("to", "2026-01-02T00:00:00Z"),
            ("include_users_and_chairs", "true"),
            ("is_admin", "true"),
        ]);

        let fields: Vec<_> = params.filter_fields().collect();
        assert_eq!(fields, vec![("is_admin", "true")]);

        // still readable for the endpoints that want them
        assert_eq!(params.get("from"), Some("2026-01-01T00:00:00Z"));
    }

    #[test]
    fn test_empty_params() {
        let params = QueryParams::from_pairs(Vec::<(String, String)>::new());

        assert!(params.select().is_none());
        assert!(params.sort().is_none());
        assert_eq!(params.filter_fields().count(), 0);
    }
}
