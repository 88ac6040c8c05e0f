//! Query descriptor assembly and SQL generation.
//!
//! Composes compiled filters, the compiled sort sequence, and the page
//! window into one descriptor, and renders it to SELECT/COUNT statements
//! with SeaQuery.

use sea_query::{
    Alias, Asterisk, Expr, ExprTrait, Order, PostgresQueryBuilder, Query, SelectStatement,
    SimpleExpr,
};

use crate::api::filter::{FilterClause, FilterOperator, compile_filters};
use crate::api::params::TrackListParams;
use crate::api::sort::{SortDirection, SortSpec, parse_sort};
use crate::error::AppError;

/// Structured query descriptor consumed by the persistence layer.
///
/// Filters are a pure conjunction; an empty filter list means no
/// restriction, and an empty sort list defers ordering to the data layer.
#[derive(Debug, Clone, Default)]
pub struct QueryDescriptor {
    pub filters: Vec<FilterClause>,
    pub sort: Vec<SortSpec>,
    pub limit: u64,
    pub offset: u64,
}

impl QueryDescriptor {
    /// Assemble a descriptor from parsed request parameters.
    ///
    /// Malformed filter tokens fail the request. A malformed sort
    /// expression degrades to unsorted: it is logged and dropped, matching
    /// the upstream behavior this API replaces. Absent page parameters
    /// default to offset 0 and `default_limit`; an explicit zero limit is
    /// rejected so pagination math never divides by zero.
    pub fn from_params(
        params: &TrackListParams,
        default_limit: u64,
    ) -> Result<Self, AppError> {
        let filters = compile_filters(params.filter_families())?;

        let sort = match params.sort.as_deref() {
            Some(raw) => match parse_sort(raw) {
                Ok(specs) => specs,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring invalid sort parameter");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let limit = params.page_limit.unwrap_or(default_limit);
        if limit == 0 {
            return Err(AppError::bad_request(
                "page[limit] must be greater than zero",
            ));
        }

        Ok(Self {
            filters,
            sort,
            limit,
            offset: params.page_offset.unwrap_or(0),
        })
    }

    /// Render the paginated SELECT statement for `table`.
    pub fn select_sql(&self, table: &str) -> String {
        let mut query = Query::select();
        query.column(Asterisk).from(Alias::new(table));

        self.apply_filters(&mut query);
        self.apply_sorts(&mut query);

        query.limit(self.limit).offset(self.offset);

        query.to_string(PostgresQueryBuilder)
    }

    /// Render the COUNT statement for `table` (no sort, no window).
    pub fn count_sql(&self, table: &str) -> String {
        let mut query = Query::select();
        query
            .expr(Expr::col(Asterisk).count())
            .from(Alias::new(table));

        self.apply_filters(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    fn apply_filters(&self, query: &mut SelectStatement) {
        for clause in &self.filters {
            query.and_where(filter_condition(clause));
        }
    }

    fn apply_sorts(&self, query: &mut SelectStatement) {
        for sort in &self.sort {
            let order = match sort.direction() {
                SortDirection::Ascending => Order::Asc,
                SortDirection::Descending => Order::Desc,
            };
            query.order_by(Alias::new(sort.field()), order);
        }
    }
}

/// Build the WHERE condition for a single filter clause.
fn filter_condition(clause: &FilterClause) -> SimpleExpr {
    let col = Expr::col(Alias::new(&clause.field));
    let value = clause.value.as_str();

    match clause.operator {
        FilterOperator::Equals => col.eq(value),
        FilterOperator::Contains => col.like(format!("%{}%", escape_like_wildcards(value))),
        FilterOperator::StartsWith => col.like(format!("{}%", escape_like_wildcards(value))),
        FilterOperator::EndsWith => col.like(format!("%{}", escape_like_wildcards(value))),
        FilterOperator::GreaterThan => col.gt(value),
        FilterOperator::GreaterOrEqual => col.gte(value),
        FilterOperator::LessThan => col.lt(value),
        FilterOperator::LessOrEqual => col.lte(value),
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
