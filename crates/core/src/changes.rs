//! Change detection
//!
//! Decides whether a proposed update differs from the stored entity by
//! evaluating a table of named field checks over two snapshots.

use std::fmt::{Debug, Formatter, Result as FmtResult};

/// A named field comparison between two snapshots of the same type.
pub struct FieldCheck<T> {
    name: &'static str,
    equals: fn(&T, &T) -> bool,
}

impl<T> FieldCheck<T> {
    /// Creates a check that reports the field as unchanged when `equals` holds.
    pub const fn new(name: &'static str, equals: fn(&T, &T) -> bool) -> Self {
        Self { name, equals }
    }

    /// Field name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the field is equal in both snapshots.
    #[must_use]
    pub fn matches(&self, existing: &T, incoming: &T) -> bool {
        (self.equals)(existing, incoming)
    }
}

impl<T> Debug for FieldCheck<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FieldCheck")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Whether any checked field differs between `existing` and `incoming`.
#[must_use]
pub fn has_changes<T>(existing: &T, incoming: &T, checks: &[FieldCheck<T>]) -> bool {
    checks.iter().any(|check| !check.matches(existing, incoming))
}

/// Names of the checked fields that differ, in check order.
#[must_use]
pub fn changed_fields<T>(existing: &T, incoming: &T, checks: &[FieldCheck<T>]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|check| !check.matches(existing, incoming))
        .map(FieldCheck::name)
        .collect()
}

/// Text equality ignoring surrounding whitespace and letter case.
#[must_use]
pub fn case_insensitive(existing: &str, incoming: &str) -> bool {
    existing.trim().to_lowercase() == incoming.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Shop {
        code: &'static str,
        name: &'static str,
    }

    type ShopCheck = FieldCheck<Shop>;

    const CHECKS: &[FieldCheck<Shop>] = &[
        ShopCheck::new("code", |a, b| a.code == b.code),
        ShopCheck::new("name", |a, b| case_insensitive(a.name, b.name)),
    ];

    #[test]
    fn no_changes_when_all_fields_match() {
        let existing = Shop {
            code: "SHP",
            name: "Shopee",
        };
        let incoming = Shop {
            code: "SHP",
            name: " shopee ",
        };

        assert!(!has_changes(&existing, &incoming, CHECKS));
        assert!(changed_fields(&existing, &incoming, CHECKS).is_empty());
    }

    #[test]
    fn reports_each_changed_field() {
        let existing = Shop {
            code: "SHP",
            name: "Shopee",
        };
        let incoming = Shop {
            code: "LZD",
            name: "Lazada",
        };

        assert!(has_changes(&existing, &incoming, CHECKS));
        assert_eq!(
            changed_fields(&existing, &incoming, CHECKS),
            vec!["code", "name"]
        );
    }

    #[test]
    fn empty_check_table_never_reports_changes() {
        let existing = Shop {
            code: "A",
            name: "A",
        };
        let incoming = Shop {
            code: "B",
            name: "B",
        };

        assert!(!has_changes(&existing, &incoming, &[]));
    }

    #[test]
    fn field_check_debug_includes_name() {
        let debug = format!("{:?}", CHECKS.first());

        assert!(debug.contains("code"), "debug output should name the field");
    }
}
