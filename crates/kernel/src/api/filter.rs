//! Filter clause compiler.
//!
//! Raw filter tokens arrive as `field:value` strings, one list per operator
//! family. Compilation splits each token on the first colon only (values may
//! contain colons) and produces a single conjunction of typed clauses.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Comparison operator families exposed as `filter[...]` query parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    /// Exact match.
    Equals,
    /// Substring match (LIKE %value%).
    Contains,
    /// Prefix match (LIKE value%).
    StartsWith,
    /// Suffix match (LIKE %value).
    EndsWith,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal.
    GreaterOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal.
    LessOrEqual,
}

impl FilterOperator {
    /// Query parameter name for this operator family.
    pub fn param_name(self) -> &'static str {
        match self {
            FilterOperator::Equals => "filter[equals]",
            FilterOperator::Contains => "filter[contains]",
            FilterOperator::StartsWith => "filter[startsWith]",
            FilterOperator::EndsWith => "filter[endsWith]",
            FilterOperator::GreaterThan => "filter[greaterThan]",
            FilterOperator::GreaterOrEqual => "filter[greaterOrEqual]",
            FilterOperator::LessThan => "filter[lessThan]",
            FilterOperator::LessOrEqual => "filter[lessOrEqual]",
        }
    }
}

/// One predicate restricting a field under a comparison operator.
///
/// Constructed only by [`FilterClause::parse`]; the field is never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterClause {
    /// Parse one raw `field:value` token into a clause.
    ///
    /// The token is split on the first colon, so the value may itself contain
    /// colons. A token with no colon, or with an empty field, is a request
    /// validation error.
    pub fn parse(operator: FilterOperator, raw: &str) -> Result<Self, AppError> {
        let Some((field, value)) = raw.split_once(':') else {
            return Err(AppError::bad_request(format!(
                "malformed filter '{raw}': expected 'field:value'"
            )));
        };

        if field.is_empty() {
            return Err(AppError::bad_request(format!(
                "malformed filter '{raw}': field name is empty"
            )));
        }

        Ok(Self {
            field: field.to_string(),
            operator,
            value: value.to_string(),
        })
    }
}

/// Compile all raw filter lists into one conjunction of clauses.
///
/// Clause order mirrors encounter order: operator families in the order the
/// caller supplies them, list order within a family.
pub fn compile_filters<'a, I>(families: I) -> Result<Vec<FilterClause>, AppError>
where
    I: IntoIterator<Item = (FilterOperator, &'a [String])>,
{
    let mut clauses = Vec::new();
    for (operator, raw_values) in families {
        for raw in raw_values {
            clauses.push(FilterClause::parse(operator, raw)?);
        }
    }
    Ok(clauses)
}
