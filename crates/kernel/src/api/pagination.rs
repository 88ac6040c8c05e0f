//! Pagination metadata and navigational link construction.
//!
//! Links reproduce every non-page parameter of the originating request —
//! each filter value as its own query entry, the sort and include strings
//! verbatim — while only the page window changes. Following `next` then
//! `prev` lands on the neighbor of the original window.

use serde::Serialize;

use crate::api::params::TrackListParams;

/// Derived page counts for a collection response. Current page is 1-based.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Compute pagination metadata.
    ///
    /// `limit` must be positive; the descriptor assembler guarantees this
    /// by defaulting an absent `page[limit]`.
    pub fn new(total_items: u64, limit: u64, offset: u64) -> Self {
        Self {
            current_page: offset / limit + 1,
            total_items,
            total_pages: total_items.div_ceil(limit),
        }
    }
}

/// Navigational links for a collection response.
///
/// `first`/`last` are absent when there are no pages at all; `next`/`prev`
/// are absent at the respective boundary.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PaginationLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Build first/last/next/prev links for a collection request.
///
/// `base_path` is the resource's collection path (threaded in explicitly by
/// the caller); `limit` is the effective page limit after defaulting.
pub fn build_links(
    params: &TrackListParams,
    meta: &PaginationMeta,
    base_path: &str,
    limit: u64,
) -> PaginationLinks {
    // `page` is the 0-based page index; its offset is page * limit.
    let link_for = |page: u64| -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("page[offset]", &(page * limit).to_string());
        query.append_pair("page[limit]", &limit.to_string());

        for (operator, values) in params.filter_families() {
            for value in values {
                query.append_pair(operator.param_name(), value);
            }
        }

        if let Some(sort) = &params.sort {
            query.append_pair("sort", sort);
        }
        if let Some(include) = &params.include {
            query.append_pair("include", include);
        }

        format!("{base_path}?{}", query.finish())
    };

    let mut links = PaginationLinks::default();

    if meta.total_pages > 0 {
        links.first = Some(link_for(0));
        links.last = Some(link_for(meta.total_pages - 1));
    }

    if meta.current_page < meta.total_pages {
        links.next = Some(link_for(meta.current_page));
    }

    if meta.current_page > 1 {
        links.prev = Some(link_for(meta.current_page - 2));
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(PaginationMeta::new(25, 10, 0).total_pages, 3);
        assert_eq!(PaginationMeta::new(30, 10, 0).total_pages, 3);
        assert_eq!(PaginationMeta::new(31, 10, 0).total_pages, 4);
        assert_eq!(PaginationMeta::new(1, 10, 0).total_pages, 1);
    }

    #[test]
    fn current_page_is_one_based_floor() {
        assert_eq!(PaginationMeta::new(100, 10, 0).current_page, 1);
        assert_eq!(PaginationMeta::new(100, 10, 20).current_page, 3);
        assert_eq!(PaginationMeta::new(100, 10, 25).current_page, 3);
    }

    #[test]
    fn empty_result_set_has_zero_pages_and_no_links() {
        let meta = PaginationMeta::new(0, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.current_page, 1);

        let links = build_links(&TrackListParams::default(), &meta, "/api/tracks", 10);
        assert_eq!(links, PaginationLinks::default());
    }

    #[test]
    fn first_and_last_offsets() {
        let meta = PaginationMeta::new(25, 10, 10);
        let links = build_links(&TrackListParams::default(), &meta, "/api/tracks", 10);

        let first = links.first.unwrap();
        assert!(first.contains("page%5Boffset%5D=0"));
        assert!(first.contains("page%5Blimit%5D=10"));

        // last page index is total_pages - 1, so offset (3 - 1) * 10.
        assert!(links.last.unwrap().contains("page%5Boffset%5D=20"));
    }

    #[test]
    fn next_absent_on_last_page() {
        let meta = PaginationMeta::new(25, 10, 20);
        assert_eq!(meta.current_page, 3);
        let links = build_links(&TrackListParams::default(), &meta, "/api/tracks", 10);
        assert!(links.next.is_none());
        assert!(links.prev.unwrap().contains("page%5Boffset%5D=10"));
    }

    #[test]
    fn prev_absent_on_first_page() {
        let meta = PaginationMeta::new(25, 10, 0);
        let links = build_links(&TrackListParams::default(), &meta, "/api/tracks", 10);
        assert!(links.prev.is_none());
        assert!(links.next.unwrap().contains("page%5Boffset%5D=10"));
    }

    #[test]
    fn links_preserve_filters_sort_and_include() {
        let params = TrackListParams {
            filter_equals: vec!["artist:Queen".to_string()],
            filter_contains: vec!["title:love".to_string()],
            sort: Some("-year,title".to_string()),
            include: Some("albums".to_string()),
            ..Default::default()
        };
        let meta = PaginationMeta::new(25, 10, 10);
        let links = build_links(&params, &meta, "/api/tracks", 10);

        for link in [
            links.first.unwrap(),
            links.last.unwrap(),
            links.next.unwrap(),
            links.prev.unwrap(),
        ] {
            assert!(link.starts_with("/api/tracks?"));
            assert!(link.contains("filter%5Bequals%5D=artist%3AQueen"));
            assert!(link.contains("filter%5Bcontains%5D=title%3Alove"));
            assert!(link.contains("sort=-year%2Ctitle"));
            assert!(link.contains("include=albums"));
        }
    }

    #[test]
    fn repeated_filter_values_each_get_an_entry() {
        let params = TrackListParams {
            filter_equals: vec!["artist:Queen".to_string(), "album:Innuendo".to_string()],
            ..Default::default()
        };
        let meta = PaginationMeta::new(5, 10, 0);
        let links = build_links(&params, &meta, "/api/tracks", 10);

        let first = links.first.unwrap();
        assert_eq!(first.matches("filter%5Bequals%5D=").count(), 2);
    }

    #[test]
    fn next_then_prev_returns_to_neighbor_of_current() {
        // On page 3 of 5, next points at page 4 (offset 30); from page 4,
        // prev points back at page 3 (offset 20).
        let meta = PaginationMeta::new(50, 10, 20);
        let links = build_links(&TrackListParams::default(), &meta, "/api/tracks", 10);
        assert!(links.next.unwrap().contains("page%5Boffset%5D=30"));

        let meta_next = PaginationMeta::new(50, 10, 30);
        let links_next = build_links(&TrackListParams::default(), &meta_next, "/api/tracks", 10);
        assert!(links_next.prev.unwrap().contains("page%5Boffset%5D=20"));
    }

    #[test]
    fn single_page_has_first_and_last_but_no_next_or_prev() {
        let meta = PaginationMeta::new(5, 10, 0);
        let links = build_links(&TrackListParams::default(), &meta, "/api/tracks", 10);
        assert!(links.first.is_some());
        assert!(links.last.is_some());
        assert!(links.next.is_none());
        assert!(links.prev.is_none());
    }
}
