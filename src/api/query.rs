//! Query-string parameters for list endpoints.
//!
//! Filters arrive as a plain key-value map (status, waste type, free-text
//! search, date range, page). Keys are kept sorted so the same filter set
//! always produces the same parameter sequence regardless of insertion
//! order; percent-encoding is ureq's job when the pairs are attached to a
//! request.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key.
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Set a parameter only when a value is present. Keeps call sites for
    /// optional CLI filters from branching.
    pub fn set_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter pairs in stable (sorted-key) order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_sorted_regardless_of_insertion_order() {
        let a = QueryParams::new().set("status", "pending").set("search", "bottle");
        let b = QueryParams::new().set("search", "bottle").set("status", "pending");

        let a: Vec<_> = a.pairs().collect();
        let b: Vec<_> = b.pairs().collect();
        assert_eq!(a, vec![("search", "bottle"), ("status", "pending")]);
        assert_eq!(a, b);
    }

    #[test]
    fn set_replaces_existing_value() {
        let params = QueryParams::new().set("page", 1).set("page", 2);
        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(pairs, vec![("page", "2")]);
    }

    #[test]
    fn set_opt_skips_missing_values() {
        let params = QueryParams::new()
            .set_opt("status", Some("pending"))
            .set_opt("search", None::<String>);
        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(pairs, vec![("status", "pending")]);
    }

    #[test]
    fn empty_map_reports_empty() {
        assert!(QueryParams::new().is_empty());
        assert!(!QueryParams::new().set("page", 1).is_empty());
    }
}
