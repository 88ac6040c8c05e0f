//! Sort specification compiler.
//!
//! Parses comma-separated sort expressions like `-year,title` into an
//! ordered list of (field, direction) pairs. Field names are validated
//! against a strict identifier charset before any SQL is generated.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Regex for valid sort field names.
///
/// The full field name is validated, not just its first character, so a
/// token like `ye$ar` is rejected outright.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static VALID_SORT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex literal"));

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// One (field, direction) pair of a sort specification.
///
/// Only created through successful parsing; the field always matches the
/// allowed identifier charset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec {
    field: String,
    direction: SortDirection,
}

impl SortSpec {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Parse a raw comma-separated sort expression.
///
/// Tokens are trimmed; empty tokens are skipped. A leading `-` selects
/// descending order on the remainder of the token. Any token whose field
/// name falls outside `[A-Za-z0-9_-]` fails the whole specification with an
/// error naming the offending token.
pub fn parse_sort(raw: &str) -> Result<Vec<SortSpec>, AppError> {
    let mut specs = Vec::new();

    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (field, direction) = match token.strip_prefix('-') {
            Some(rest) => (rest.trim(), SortDirection::Descending),
            None => (token, SortDirection::Ascending),
        };

        if !VALID_SORT_FIELD.is_match(field) {
            return Err(AppError::bad_request(format!(
                "invalid sort parameter: {token}"
            )));
        }

        specs.push(SortSpec {
            field: field.to_string(),
            direction,
        });
    }

    Ok(specs)
}

/// Render compiled sort specs as an ORDER BY-style clause:
/// `"year desc,title asc"`.
pub fn order_by_clause(specs: &[SortSpec]) -> String {
    specs
        .iter()
        .map(|s| format!("{} {}", s.field, s.direction.as_sql()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_token_is_ascending() {
        let specs = parse_sort("title").unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].field(), "title");
        assert_eq!(specs[0].direction(), SortDirection::Ascending);
    }

    #[test]
    fn leading_dash_is_descending() {
        let specs = parse_sort("-year,title").unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].field(), "year");
        assert_eq!(specs[0].direction(), SortDirection::Descending);
        assert_eq!(specs[1].field(), "title");
        assert_eq!(specs[1].direction(), SortDirection::Ascending);
    }

    #[test]
    fn tokens_are_trimmed() {
        let specs = parse_sort("  -year , title ").unwrap();
        assert_eq!(specs[0].field(), "year");
        assert_eq!(specs[1].field(), "title");
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let specs = parse_sort("a,,b").unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].field(), "a");
        assert_eq!(specs[1].field(), "b");
    }

    #[test]
    fn empty_expression_yields_no_sort() {
        assert!(parse_sort("").unwrap().is_empty());
        assert!(parse_sort("  ").unwrap().is_empty());
    }

    #[test]
    fn invalid_token_fails_naming_it() {
        let err = parse_sort("$bad,title").unwrap_err();
        assert!(err.to_string().contains("invalid sort parameter: $bad"));
    }

    #[test]
    fn invalid_character_mid_field_is_rejected() {
        assert!(parse_sort("ye$ar").is_err());
    }

    #[test]
    fn bare_dash_is_rejected() {
        assert!(parse_sort("-").is_err());
    }

    #[test]
    fn underscores_and_hyphens_are_allowed() {
        let specs = parse_sort("album_artist,-sort-title").unwrap();
        assert_eq!(specs[0].field(), "album_artist");
        assert_eq!(specs[1].field(), "sort-title");
    }

    #[test]
    fn renders_order_by_clause_in_input_order() {
        let specs = parse_sort("-year,title").unwrap();
        assert_eq!(order_by_clause(&specs), "year desc,title asc");
    }
}
