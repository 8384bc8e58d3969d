//! # Record Query Engine
//!
//! Pure search, status filtering, and pagination over one record
//! snapshot. [`run_query`] has no state and no side effects:
//! the same snapshot, filter, keyword, and page always produce the same
//! page.
//!
//! [`QueryState`] is the stateful companion the presentation layer
//! holds: it remembers the active filter/keyword/page and resets the
//! page to 1 whenever the keyword, the status filter, or the size of
//! the underlying set changes, so a user sitting on page N never sees
//! an out-of-range slice after a filter change.

use serde::{Deserialize, Serialize};

use crate::record::{EmployeeRecord, RecordStatus};

/// Fixed page size for record listings.
pub const PAGE_SIZE: usize = 8;

// ════════════════════════════════════════════════════════════════════════════
// QUERY DESCRIPTOR
// ════════════════════════════════════════════════════════════════════════════

/// Status filter for listings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    /// No status filtering.
    All,
    /// Keep only records in the given status.
    Only(RecordStatus),
}

impl StatusFilter {
    fn keeps(&self, status: RecordStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == *wanted,
        }
    }
}

/// One query over the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    pub filter: StatusFilter,
    /// Raw keyword; trimmed and case-folded before matching. Empty
    /// means "no keyword filtering".
    pub keyword: String,
    /// Requested 1-based page; clamped into range by [`run_query`].
    pub page: usize,
}

impl Default for RecordQuery {
    fn default() -> Self {
        RecordQuery {
            filter: StatusFilter::All,
            keyword: String::new(),
            page: 1,
        }
    }
}

/// One page of query results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordPage {
    /// Records on this page, in snapshot (fetch) order.
    pub records: Vec<EmployeeRecord>,
    /// Always >= 1, even for an empty result set.
    pub total_pages: usize,
    /// The clamped page actually served.
    pub current_page: usize,
    /// Size of the filtered set before pagination.
    pub total_matches: usize,
}

// ════════════════════════════════════════════════════════════════════════════
// QUERY EXECUTION
// ════════════════════════════════════════════════════════════════════════════

fn matches_keyword(record: &EmployeeRecord, keyword: &str) -> bool {
    // Same haystack the original listing searched: name, department,
    // position, status label, submitter.
    let haystack = format!(
        "{} {} {} {} {}",
        record.full_name,
        record.department,
        record.position,
        record.status.label(),
        record.submitter,
    )
    .to_lowercase();
    haystack.contains(keyword)
}

/// Runs `query` over `records`: status filter, keyword substring match,
/// page clamp, slice. Deterministic; never indexes out of range.
#[must_use]
pub fn run_query(records: &[EmployeeRecord], query: &RecordQuery) -> RecordPage {
    let keyword = query.keyword.trim().to_lowercase();

    let filtered: Vec<&EmployeeRecord> = records
        .iter()
        .filter(|r| query.filter.keeps(r.status))
        .filter(|r| keyword.is_empty() || matches_keyword(r, &keyword))
        .collect();

    let total_matches = filtered.len();
    let total_pages = total_matches.div_ceil(PAGE_SIZE).max(1);
    let current_page = query.page.clamp(1, total_pages);

    let start = (current_page - 1) * PAGE_SIZE;
    let page_records = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    RecordPage {
        records: page_records,
        total_pages,
        current_page,
        total_matches,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// QUERY STATE
// ════════════════════════════════════════════════════════════════════════════

/// Active listing state held by the presentation layer.
///
/// Any change to the keyword, the status filter, or the observed size
/// of the record set resets the active page to 1 (the same rule the
/// original listing applied). Page clamping itself stays in
/// [`run_query`].
#[derive(Clone, Debug)]
pub struct QueryState {
    filter: StatusFilter,
    keyword: String,
    page: usize,
    last_set_size: Option<usize>,
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState {
            filter: StatusFilter::All,
            keyword: String::new(),
            page: 1,
            last_set_size: None,
        }
    }
}

impl QueryState {
    #[must_use]
    pub fn new() -> Self {
        QueryState::default()
    }

    /// Changes the status filter; resets to page 1 if it differs.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    /// Changes the keyword; resets to page 1 if it differs.
    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        if self.keyword != keyword {
            self.keyword = keyword;
            self.page = 1;
        }
    }

    /// Requests a page. Out-of-range requests are served clamped by
    /// [`run_query`]; the stored value is kept as requested.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Notes the current size of the underlying record set; a size
    /// change (new submission, first load) resets to page 1.
    pub fn observe_set_size(&mut self, size: usize) {
        if self.last_set_size != Some(size) {
            self.last_set_size = Some(size);
            self.page = 1;
        }
    }

    /// Descriptor for [`run_query`].
    #[must_use]
    pub fn query(&self) -> RecordQuery {
        RecordQuery {
            filter: self.filter,
            keyword: self.keyword.clone(),
            page: self.page,
        }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AccountId;

    fn record(id: u64, name: &str, status: RecordStatus) -> EmployeeRecord {
        EmployeeRecord {
            id,
            full_name: name.to_string(),
            age: 30,
            position: "Engineer".to_string(),
            department: "Platform".to_string(),
            document_ref: format!("QmDoc{id}"),
            status,
            submitter: AccountId::new(format!("0x{id:040x}")),
            reviewer: AccountId::unset(),
        }
    }

    fn sample_set() -> Vec<EmployeeRecord> {
        // 10 pending, 5 approved (scenario C shape)
        let mut records: Vec<EmployeeRecord> = (1..=10)
            .map(|i| record(i, &format!("Pending P{i}"), RecordStatus::Pending))
            .collect();
        records.extend(
            (11..=15).map(|i| record(i, &format!("Approved A{i}"), RecordStatus::Approved)),
        );
        records
    }

    fn query(filter: StatusFilter, keyword: &str, page: usize) -> RecordQuery {
        RecordQuery {
            filter,
            keyword: keyword.to_string(),
            page,
        }
    }

    // ──────────────────────────────────────────────────────────────────
    // PAGINATION
    // ──────────────────────────────────────────────────────────────────

    /// 15 records, page size 8: page 1 has 8, page 2 has 7, page 3
    /// clamps to page 2's content.
    #[test]
    fn test_pagination_slices_and_clamps() {
        let records = sample_set();

        let p1 = run_query(&records, &query(StatusFilter::All, "", 1));
        assert_eq!(p1.records.len(), 8);
        assert_eq!(p1.total_pages, 2);
        assert_eq!(p1.current_page, 1);
        assert_eq!(p1.records[0].id, 1);

        let p2 = run_query(&records, &query(StatusFilter::All, "", 2));
        assert_eq!(p2.records.len(), 7);
        assert_eq!(p2.current_page, 2);
        assert_eq!(p2.records[0].id, 9);

        let p3 = run_query(&records, &query(StatusFilter::All, "", 3));
        assert_eq!(p3.current_page, 2);
        assert_eq!(p3.records, p2.records);
    }

    #[test]
    fn test_page_zero_clamps_to_one() {
        let records = sample_set();
        let page = run_query(&records, &query(StatusFilter::All, "", 0));
        assert_eq!(page.current_page, 1);
        assert_eq!(page.records[0].id, 1);
    }

    #[test]
    fn test_empty_set_yields_one_empty_page() {
        let page = run_query(&[], &query(StatusFilter::All, "", 5));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.records.is_empty());
        assert_eq!(page.total_matches, 0);
    }

    /// Every valid page k returns exactly records [(k-1)*8, k*8).
    #[test]
    fn test_every_page_is_the_expected_slice() {
        let records: Vec<EmployeeRecord> = (1..=30)
            .map(|i| record(i, &format!("Person {i}"), RecordStatus::Pending))
            .collect();
        let total_pages = 30usize.div_ceil(PAGE_SIZE);
        for k in 1..=total_pages {
            let page = run_query(&records, &query(StatusFilter::All, "", k));
            let expected: Vec<u64> = ((k - 1) * PAGE_SIZE + 1..=(k * PAGE_SIZE).min(30))
                .map(|i| i as u64)
                .collect();
            let got: Vec<u64> = page.records.iter().map(|r| r.id).collect();
            assert_eq!(got, expected, "page {k}");
        }
    }

    // ──────────────────────────────────────────────────────────────────
    // STATUS FILTER
    // ──────────────────────────────────────────────────────────────────

    /// Pure status filtering with an empty keyword is independent of
    /// keyword logic.
    #[test]
    fn test_status_filter_composition() {
        let records = sample_set();
        let page = run_query(
            &records,
            &query(StatusFilter::Only(RecordStatus::Pending), "", 1),
        );
        assert_eq!(page.total_matches, 10);
        assert!(page.records.iter().all(|r| r.status == RecordStatus::Pending));

        let approved = run_query(
            &records,
            &query(StatusFilter::Only(RecordStatus::Approved), "", 1),
        );
        assert_eq!(approved.total_matches, 5);

        let rejected = run_query(
            &records,
            &query(StatusFilter::Only(RecordStatus::Rejected), "", 1),
        );
        assert_eq!(rejected.total_matches, 0);
    }

    // ──────────────────────────────────────────────────────────────────
    // KEYWORD SEARCH
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_keyword_case_folded_and_trimmed() {
        let records = sample_set();
        let a = run_query(&records, &query(StatusFilter::All, "  PENDING P3  ", 1));
        assert_eq!(a.total_matches, 1);
        assert_eq!(a.records[0].id, 3);
    }

    #[test]
    fn test_keyword_matches_status_label() {
        let records = sample_set();
        let page = run_query(&records, &query(StatusFilter::All, "approved", 1));
        // 5 approved records match on status label and name
        assert_eq!(page.total_matches, 5);
    }

    #[test]
    fn test_keyword_matches_submitter() {
        let records = sample_set();
        let needle = records[4].submitter.as_str().to_string();
        let page = run_query(&records, &query(StatusFilter::All, &needle, 1));
        assert_eq!(page.total_matches, 1);
        assert_eq!(page.records[0].id, 5);
    }

    #[test]
    fn test_keyword_and_filter_compose() {
        let records = sample_set();
        let page = run_query(
            &records,
            &query(StatusFilter::Only(RecordStatus::Pending), "p1", 1),
        );
        // "Pending P1" and "Pending P10"
        assert_eq!(page.total_matches, 2);
    }

    #[test]
    fn test_no_match_serves_single_empty_page() {
        let records = sample_set();
        let page = run_query(&records, &query(StatusFilter::All, "zzz-no-match", 7));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.records.is_empty());
    }

    // ──────────────────────────────────────────────────────────────────
    // DETERMINISM
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_same_inputs_same_page() {
        let records = sample_set();
        let q = query(StatusFilter::All, "pending", 2);
        assert_eq!(run_query(&records, &q), run_query(&records, &q));
    }

    // ──────────────────────────────────────────────────────────────────
    // QUERY STATE
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_keyword_change_resets_page() {
        let mut state = QueryState::new();
        state.set_page(3);
        state.set_keyword("mai");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = QueryState::new();
        state.set_page(2);
        state.set_filter(StatusFilter::Only(RecordStatus::Approved));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_same_filter_keeps_page() {
        let mut state = QueryState::new();
        state.set_page(2);
        state.set_filter(StatusFilter::All);
        state.set_keyword("");
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_set_size_change_resets_page() {
        let mut state = QueryState::new();
        state.observe_set_size(15);
        state.set_page(2);
        state.observe_set_size(15);
        assert_eq!(state.page(), 2);
        state.observe_set_size(16);
        assert_eq!(state.page(), 1);
    }
}
