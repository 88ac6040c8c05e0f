//! Typed request parameters for track collection listings.
//!
//! The transport layer hands this module a raw query string; parsing
//! produces one immutable parameter struct per request. Repeated filter
//! parameters accumulate per operator family, which plain
//! `serde_urlencoded`-based extractors cannot express, so the query string
//! is walked directly with `url::form_urlencoded`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api::filter::FilterOperator;
use crate::error::AppError;

/// Parsed query-string parameters for a collection request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackListParams {
    pub filter_equals: Vec<String>,
    pub filter_contains: Vec<String>,
    pub filter_starts_with: Vec<String>,
    pub filter_ends_with: Vec<String>,
    pub filter_greater_than: Vec<String>,
    pub filter_greater_or_equal: Vec<String>,
    pub filter_less_than: Vec<String>,
    pub filter_less_or_equal: Vec<String>,

    /// Raw sort expression, kept verbatim for link reconstruction.
    pub sort: Option<String>,

    /// Raw include expression, passed through to links unparsed.
    pub include: Option<String>,

    pub page_offset: Option<u64>,
    pub page_limit: Option<u64>,
}

impl TrackListParams {
    /// Parse a raw (still percent-encoded) query string.
    ///
    /// Unknown parameters are ignored. Page parameters that are not
    /// non-negative integers are a validation error.
    pub fn from_query(query: &str) -> Result<Self, AppError> {
        let mut params = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "filter[equals]" => params.filter_equals.push(value.into_owned()),
                "filter[contains]" => params.filter_contains.push(value.into_owned()),
                "filter[startsWith]" => params.filter_starts_with.push(value.into_owned()),
                "filter[endsWith]" => params.filter_ends_with.push(value.into_owned()),
                "filter[greaterThan]" => params.filter_greater_than.push(value.into_owned()),
                "filter[greaterOrEqual]" => {
                    params.filter_greater_or_equal.push(value.into_owned());
                }
                "filter[lessThan]" => params.filter_less_than.push(value.into_owned()),
                "filter[lessOrEqual]" => params.filter_less_or_equal.push(value.into_owned()),
                "sort" => params.sort = Some(value.into_owned()),
                "include" => params.include = Some(value.into_owned()),
                "page[offset]" => params.page_offset = Some(parse_page_value(&key, &value)?),
                "page[limit]" => params.page_limit = Some(parse_page_value(&key, &value)?),
                _ => {}
            }
        }

        Ok(params)
    }

    /// Raw filter lists paired with their operator family, in the canonical
    /// encounter order used for both compilation and link re-encoding.
    pub fn filter_families(&self) -> [(FilterOperator, &[String]); 8] {
        [
            (FilterOperator::Equals, self.filter_equals.as_slice()),
            (FilterOperator::Contains, self.filter_contains.as_slice()),
            (FilterOperator::StartsWith, self.filter_starts_with.as_slice()),
            (FilterOperator::EndsWith, self.filter_ends_with.as_slice()),
            (
                FilterOperator::GreaterThan,
                self.filter_greater_than.as_slice(),
            ),
            (
                FilterOperator::GreaterOrEqual,
                self.filter_greater_or_equal.as_slice(),
            ),
            (FilterOperator::LessThan, self.filter_less_than.as_slice()),
            (
                FilterOperator::LessOrEqual,
                self.filter_less_or_equal.as_slice(),
            ),
        ]
    }
}

fn parse_page_value(name: &str, value: &str) -> Result<u64, AppError> {
    value
        .parse()
        .map_err(|_| AppError::bad_request(format!("{name} must be a non-negative integer")))
}

impl<S> FromRequestParts<S> for TrackListParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_query(parts.uri.query().unwrap_or(""))
    }
}
