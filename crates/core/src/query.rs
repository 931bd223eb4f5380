//! Query string building for list and count requests
//!
//! A list screen describes what it wants as a [`FetchRequest`]: the page
//! window, the named filters and a free-form parameter bag. The functions in
//! this module serialize that description into the URL the backend expects.
//!
//! Values are appended verbatim. Callers must pre-encode values that contain
//! reserved characters (`&`, `=`, `#`, ...).

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::types::{PageState, UserFilter};

/// Free-form query parameters appended after the named filters
pub type QueryParams = BTreeMap<String, String>;

// ============================================================================
// Request Descriptors
// ============================================================================

/// Optional named filters shared by list and count requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub campaign_id: Option<String>,
    pub cadence_id: Option<String>,
    pub from_user: UserFilter,
    pub search: Option<String>,
}

impl ListFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn campaign(mut self, id: impl Into<String>) -> Self {
        self.campaign_id = Some(id.into());
        self
    }

    pub fn cadence(mut self, id: impl Into<String>) -> Self {
        self.cadence_id = Some(id.into());
        self
    }

    pub fn from_user(mut self, users: impl Into<UserFilter>) -> Self {
        self.from_user = users.into();
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// A paged list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub offset: u64,
    /// Always at least 1
    pub limit: u32,
    pub filters: ListFilters,
    pub params: QueryParams,
}

impl FetchRequest {
    /// Create a request for a raw offset/limit window
    pub fn new(offset: u64, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.max(1),
            filters: ListFilters::default(),
            params: QueryParams::new(),
        }
    }

    /// Create a request for the page described by `page`
    pub fn for_page(page: &PageState) -> Self {
        Self::new(page.offset(), page.page_size)
    }

    pub fn with_filters(mut self, filters: ListFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// The filter half of this request, for the total-count endpoint
    pub fn count_request(&self) -> CountRequest {
        CountRequest {
            filters: self.filters.clone(),
            params: self.params.clone(),
        }
    }
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

/// A filtered but unpaged request (total-count reads)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountRequest {
    pub filters: ListFilters,
    pub params: QueryParams,
}

impl CountRequest {
    pub fn new(filters: ListFilters, params: QueryParams) -> Self {
        Self { filters, params }
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Serialize a paged list request onto `base`
pub fn build_query(base: &str, request: &FetchRequest) -> String {
    let mut query = QueryString::new(base);
    query.push_named("offset", request.offset);
    query.push_named("limit", request.limit);
    push_filters(&mut query, &request.filters, &request.params);
    query.finish()
}

/// Serialize a count request onto `base` (no paging terms, not even from the bag)
pub fn build_filter_query(base: &str, request: &CountRequest) -> String {
    let mut query = QueryString::new(base);
    query.reserve("offset");
    query.reserve("limit");
    push_filters(&mut query, &request.filters, &request.params);
    query.finish()
}

/// Named terms first, then every bag entry whose key was not already written
fn push_filters(query: &mut QueryString, filters: &ListFilters, params: &QueryParams) {
    if let Some(id) = non_empty(&filters.campaign_id) {
        query.push_named("campaignId", id);
    }
    if let Some(id) = non_empty(&filters.cadence_id) {
        query.push_named("cadenceId", id);
    }
    for user_id in filters.from_user.ids() {
        query.push_named("fromUser", user_id);
    }
    if let Some(term) = non_empty(&filters.search) {
        query.push_named("search", term);
    }
    for (key, value) in params {
        if query.has_key(key) {
            continue;
        }
        query.push(key, value);
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Appends `key=value` terms, opening the query with `?` when needed
struct QueryString {
    url: String,
    has_query: bool,
    written: Vec<&'static str>,
}

impl QueryString {
    fn new(base: &str) -> Self {
        Self {
            url: base.to_string(),
            has_query: base.contains('?'),
            written: Vec::new(),
        }
    }

    /// Whether a named term already used `key`
    fn has_key(&self, key: &str) -> bool {
        self.written.iter().any(|written| *written == key)
    }

    /// Claim `key` without writing a term
    fn reserve(&mut self, key: &'static str) {
        self.written.push(key);
    }

    /// Append a term owned by a named field
    fn push_named(&mut self, key: &'static str, value: impl Display) {
        self.written.push(key);
        self.push(key, value);
    }

    fn push(&mut self, key: &str, value: impl Display) {
        if self.has_query {
            if !self.url.ends_with('?') && !self.url.ends_with('&') {
                self.url.push('&');
            }
        } else {
            self.url.push('?');
            self.has_query = true;
        }
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(&value.to_string());
    }

    fn finish(self) -> String {
        self.url
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PageChange, UserRef};
    use pretty_assertions::assert_eq;

    fn occurrences(url: &str, key: &str) -> usize {
        let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
        query
            .split('&')
            .filter(|term| term.split('=').next() == Some(key))
            .count()
    }

    #[test]
    fn test_paging_terms_only() {
        let url = build_query("/api/mailings", &FetchRequest::new(20, 10));
        assert_eq!(url, "/api/mailings?offset=20&limit=10");
    }

    #[test]
    fn test_full_request_order() {
        let mut params = QueryParams::new();
        params.insert("status".into(), "scheduled".into());
        let request = FetchRequest::new(0, 10)
            .with_filters(
                ListFilters::new()
                    .campaign("c1")
                    .cadence("cad9")
                    .from_user(vec![UserRef::new("u1", "Al"), UserRef::new("u2", "Bea")])
                    .search("acme"),
            )
            .with_params(params);

        assert_eq!(
            build_query("/api/calls", &request),
            "/api/calls?offset=0&limit=10&campaignId=c1&cadenceId=cad9\
             &fromUser=u1&fromUser=u2&search=acme&status=scheduled"
        );
    }

    #[test]
    fn test_exactly_one_offset_and_limit() {
        let mut params = QueryParams::new();
        params.insert("offset".into(), "999".into());
        params.insert("limit".into(), "1".into());
        let request = FetchRequest::new(30, 10).with_params(params);

        let url = build_query("/api/calls", &request);
        assert_eq!(occurrences(&url, "offset"), 1);
        assert_eq!(occurrences(&url, "limit"), 1);
        assert!(url.contains("offset=30"));
    }

    #[test]
    fn test_deterministic() {
        let mut params = QueryParams::new();
        params.insert("b".into(), "2".into());
        params.insert("a".into(), "1".into());
        let request = FetchRequest::new(0, 10).with_params(params);

        let first = build_query("/api/mailings", &request);
        let second = build_query("/api/mailings", &request.clone());
        assert_eq!(first, second);
        assert!(first.ends_with("a=1&b=2"));
    }

    #[test]
    fn test_user_list_produces_one_term_per_user() {
        let users: Vec<UserRef> = ["u3", "u1", "u2"]
            .iter()
            .map(|id| UserRef::from_id(*id))
            .collect();
        let request =
            FetchRequest::new(0, 10).with_filters(ListFilters::new().from_user(users));

        let url = build_query("/api/mailings", &request);
        assert_eq!(occurrences(&url, "fromUser"), 3);
        assert!(url.contains("fromUser=u3&fromUser=u1&fromUser=u2"));
    }

    #[test]
    fn test_single_user_filter() {
        let request = FetchRequest::new(0, 10)
            .with_filters(ListFilters::new().from_user(UserRef::new("u7", "Gus")));
        assert!(build_query("/api/calls", &request).ends_with("&fromUser=u7"));
    }

    #[test]
    fn test_empty_filters_are_skipped() {
        let request = FetchRequest::new(0, 10)
            .with_filters(ListFilters::new().campaign("").search(""));
        assert_eq!(
            build_query("/api/calls", &request),
            "/api/calls?offset=0&limit=10"
        );
    }

    #[test]
    fn test_search_is_not_escaped() {
        let request =
            FetchRequest::new(0, 10).with_filters(ListFilters::new().search("a b"));
        assert!(build_query("/api/calls", &request).ends_with("search=a b"));
    }

    #[test]
    fn test_reserved_keys_lose_to_named_fields() {
        let mut params = QueryParams::new();
        params.insert("search".into(), "shadow".into());
        let request = FetchRequest::new(0, 10)
            .with_filters(ListFilters::new().search("real"))
            .with_params(params);

        let url = build_query("/api/calls", &request);
        assert_eq!(occurrences(&url, "search"), 1);
        assert!(url.contains("search=real"));
    }

    #[test]
    fn test_bag_only_keys_are_kept() {
        let mut params = QueryParams::new();
        params.insert("cadenceId".into(), "c7".into());
        params.insert("search".into(), "acme".into());
        params.insert("fromUser".into(), "u4".into());
        let request = FetchRequest::new(0, 10).with_params(params);

        assert_eq!(
            build_query("/api/mailings", &request),
            "/api/mailings?offset=0&limit=10&cadenceId=c7&fromUser=u4&search=acme"
        );
    }

    #[test]
    fn test_empty_named_field_does_not_claim_key() {
        let mut params = QueryParams::new();
        params.insert("campaignId".into(), "camp2".into());
        let request = FetchRequest::new(0, 10)
            .with_filters(ListFilters::new().campaign(""))
            .with_params(params);

        let url = build_query("/api/calls", &request);
        assert_eq!(occurrences(&url, "campaignId"), 1);
        assert!(url.ends_with("campaignId=camp2"));
    }

    #[test]
    fn test_count_query_ignores_paging_in_bag() {
        let mut params = QueryParams::new();
        params.insert("offset".into(), "50".into());
        params.insert("cadenceId".into(), "c7".into());
        let request = CountRequest::new(ListFilters::default(), params);
        assert_eq!(
            build_filter_query("/api/calls/statistics/total-count", &request),
            "/api/calls/statistics/total-count?cadenceId=c7"
        );
    }

    #[test]
    fn test_count_query_has_no_paging() {
        let request = FetchRequest::new(40, 20)
            .with_filters(ListFilters::new().cadence("cad1"));
        let url = build_filter_query(
            "/api/mailings/statistics/total-count",
            &request.count_request(),
        );
        assert_eq!(url, "/api/mailings/statistics/total-count?cadenceId=cad1");
    }

    #[test]
    fn test_count_query_without_filters() {
        let url = build_filter_query("/api/calls/statistics/total-count", &CountRequest::default());
        assert_eq!(url, "/api/calls/statistics/total-count");
    }

    #[test]
    fn test_for_page_uses_offset_invariant() {
        let mut page = PageState::new();
        page.apply(PageChange::new(10, 3));
        let request = FetchRequest::for_page(&page);
        assert_eq!(request.offset, 20);
        assert_eq!(request.limit, 10);
    }

    #[test]
    fn test_base_with_existing_query() {
        let url = build_query("/api/calls?archived=false", &FetchRequest::new(0, 5));
        assert_eq!(url, "/api/calls?archived=false&offset=0&limit=5");
    }
}
