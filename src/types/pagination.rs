use serde::Serialize;

use super::SearchParams;

/// Row slice and page-link window for one listing request.
///
/// Built from the matching record count and the request by
/// [`Pagination::compute`]. `page` is the page the other fields were computed
/// for: the requested page, pulled back to the last page when it ran past the
/// end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_record_count: i64,
    pub total_page_count: i64,
    pub page: i64,
    pub limit_start: i64,
    pub start_page: i64,
    pub end_page: i64,
    pub exist_prev_page: bool,
    pub exist_next_page: bool,
}

impl Pagination {
    pub fn compute(total_record_count: i64, params: &SearchParams) -> Self {
        if total_record_count <= 0 {
            return Self {
                page: params.page(),
                ..Self::default()
            };
        }

        let record_size = params.record_size();
        let page_size = params.page_size();

        let total_page_count = total_record_count / record_size
            + i64::from(total_record_count % record_size != 0);

        // Pages below 1 are the caller's to reject.
        let page = params.page().min(total_page_count);

        let limit_start = page.saturating_sub(1).saturating_mul(record_size);

        let start_page = (page.saturating_sub(1) / page_size)
            .saturating_mul(page_size)
            .saturating_add(1);
        let end_page = start_page
            .saturating_add(page_size - 1)
            .min(total_page_count);

        Self {
            total_record_count,
            total_page_count,
            page,
            limit_start,
            start_page,
            end_page,
            exist_prev_page: start_page > 1,
            exist_next_page: end_page.saturating_mul(record_size) < total_record_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_page_count == 0
    }
}

impl SearchParams {
    /// Runs [`Pagination::compute`] and returns the request with its page
    /// corrected, so the row query uses the same offset as the descriptor.
    pub fn paginate(self, total_record_count: i64) -> (Self, Pagination) {
        let pagination = Pagination::compute(total_record_count, &self);
        (self.with_page(pagination.page), pagination)
    }
}

/// One page of rows plus the descriptor used to fetch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagingResponse<T> {
    pub list: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PagingResponse<T> {
    pub fn new(list: Vec<T>, pagination: Pagination) -> Self {
        Self { list, pagination }
    }

    pub fn empty() -> Self {
        Self {
            list: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn params(page: i64, record_size: i64, page_size: i64) -> SearchParams {
        SearchParams::new(page, record_size, page_size).unwrap()
    }

    #[test]
    fn zero_records() {
        let pagination = Pagination::compute(0, &params(1, 10, 10));
        assert_eq!(pagination.total_record_count, 0);
        assert_eq!(pagination.total_page_count, 0);
        assert_eq!(pagination.start_page, 0);
        assert_eq!(pagination.end_page, 0);
        assert_eq!(pagination.limit_start, 0);
        assert!(!pagination.exist_prev_page);
        assert!(!pagination.exist_next_page);
        assert!(pagination.is_empty());
    }

    #[test]
    fn zero_records_keeps_requested_page() {
        let (request, pagination) = params(7, 10, 10).paginate(0);
        assert_eq!(request.page(), 7);
        assert_eq!(pagination.limit_start, 0);
        assert_eq!(pagination.start_page, 0);
    }

    #[test]
    fn single_page() {
        let pagination = Pagination::compute(5, &params(1, 10, 10));
        assert_eq!(pagination.total_record_count, 5);
        assert_eq!(pagination.total_page_count, 1);
        assert_eq!(pagination.start_page, 1);
        assert_eq!(pagination.end_page, 1);
        assert_eq!(pagination.limit_start, 0);
        assert!(!pagination.exist_prev_page);
        assert!(!pagination.exist_next_page);
    }

    #[test]
    fn first_page_of_several() {
        let pagination = Pagination::compute(25, &params(1, 10, 10));
        assert_eq!(pagination.total_page_count, 3);
        assert_eq!(pagination.start_page, 1);
        assert_eq!(pagination.end_page, 3);
        assert_eq!(pagination.limit_start, 0);
        assert!(!pagination.exist_prev_page);
        // 3 * 10 rows already cover all 25 records
        assert!(!pagination.exist_next_page);
    }

    #[test]
    fn second_page() {
        let pagination = Pagination::compute(25, &params(2, 10, 10));
        assert_eq!(pagination.total_page_count, 3);
        assert_eq!(pagination.start_page, 1);
        assert_eq!(pagination.end_page, 3);
        assert_eq!(pagination.limit_start, 10);
        assert!(!pagination.exist_prev_page);
        assert!(!pagination.exist_next_page);
    }

    #[test]
    fn last_page() {
        let pagination = Pagination::compute(25, &params(3, 10, 10));
        assert_eq!(pagination.limit_start, 20);
        assert!(!pagination.exist_prev_page);
        assert!(!pagination.exist_next_page);
    }

    #[test]
    fn page_past_the_end_is_pulled_back() {
        let (request, pagination) = params(999, 10, 10).paginate(25);
        assert_eq!(pagination.total_page_count, 3);
        assert_eq!(pagination.page, 3);
        assert_eq!(request.page(), 3);
        assert_eq!(request.offset(), 20);
        assert_eq!(pagination.limit_start, 20);
    }

    #[test]
    fn page_below_one_is_not_clamped() {
        let (request, pagination) = params(0, 10, 10).paginate(25);
        assert_eq!(request.page(), 0);
        assert_eq!(pagination.limit_start, -10);
        assert_eq!(pagination.start_page, 1);
        assert!(!pagination.exist_prev_page);
    }

    #[test]
    fn second_window() {
        let pagination = Pagination::compute(200, &params(11, 10, 10));
        assert_eq!(pagination.total_page_count, 20);
        assert_eq!(pagination.start_page, 11);
        assert_eq!(pagination.end_page, 20);
        assert!(pagination.exist_prev_page);
        assert!(!pagination.exist_next_page);
    }

    #[test]
    fn middle_window() {
        let pagination = Pagination::compute(300, &params(15, 10, 10));
        assert_eq!(pagination.total_page_count, 30);
        assert_eq!(pagination.start_page, 11);
        assert_eq!(pagination.end_page, 20);
        assert!(pagination.exist_prev_page);
        assert!(pagination.exist_next_page);
    }

    #[test]
    fn exact_multiple_of_record_size() {
        let pagination = Pagination::compute(100, &params(1, 10, 10));
        assert_eq!(pagination.total_page_count, 10);
        assert_eq!(pagination.start_page, 1);
        assert_eq!(pagination.end_page, 10);
        assert!(!pagination.exist_next_page);
    }

    #[test]
    fn one_past_multiple_of_record_size() {
        let pagination = Pagination::compute(101, &params(1, 10, 10));
        assert_eq!(pagination.total_page_count, 11);
        assert_eq!(pagination.end_page, 10);
        assert!(pagination.exist_next_page);
    }

    #[test]
    fn total_page_count_table() {
        let cases = [
            (0, 10, 0),
            (1, 10, 1),
            (9, 10, 1),
            (10, 10, 1),
            (11, 10, 2),
            (100, 10, 10),
            (101, 10, 11),
            (999, 10, 100),
            (50, 20, 3),
        ];
        for (total, record_size, expected) in cases {
            let pagination = Pagination::compute(total, &params(1, record_size, 10));
            assert_eq!(
                pagination.total_page_count, expected,
                "{total} records, recordSize {record_size}"
            );
        }
    }

    #[test]
    fn limit_start_table() {
        let cases = [
            (1, 10, 0),
            (2, 10, 10),
            (3, 10, 20),
            (10, 10, 90),
            (1, 20, 0),
            (5, 20, 80),
        ];
        for (page, record_size, expected) in cases {
            let pagination = Pagination::compute(1000, &params(page, record_size, 10));
            assert_eq!(
                pagination.limit_start, expected,
                "page {page}, recordSize {record_size}"
            );
        }
    }

    #[test]
    fn prev_page_exists_past_first_window() {
        let pagination = Pagination::compute(300, &params(11, 10, 10));
        assert_eq!(pagination.start_page, 11);
        assert!(pagination.exist_prev_page);
    }

    #[test]
    fn next_page_is_judged_on_records() {
        let pagination = Pagination::compute(150, &params(1, 10, 10));
        assert_eq!(pagination.end_page, 10);
        assert!(pagination.exist_next_page);
    }

    #[test]
    fn narrow_window() {
        let first = Pagination::compute(100, &params(1, 10, 5));
        assert_eq!(first.total_page_count, 10);
        assert_eq!(first.start_page, 1);
        assert_eq!(first.end_page, 5);
        assert!(!first.exist_prev_page);
        assert!(first.exist_next_page);

        let second = Pagination::compute(100, &params(6, 10, 5));
        assert_eq!(second.start_page, 6);
        assert_eq!(second.end_page, 10);
        assert!(second.exist_prev_page);
        assert!(!second.exist_next_page);
    }

    #[test]
    fn recomputing_a_corrected_request_is_stable() {
        let (request, first) = params(999, 10, 10).paginate(25);
        let (again, second) = request.clone().paginate(25);
        assert_eq!(first, second);
        assert_eq!(request, again);
    }

    #[test]
    fn paging_response_empty() {
        let response = PagingResponse::<String>::empty();
        assert!(response.list.is_empty());
        assert!(response.pagination.is_empty());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "list": [],
                "pagination": {
                    "totalRecordCount": 0,
                    "totalPageCount": 0,
                    "page": 0,
                    "limitStart": 0,
                    "startPage": 0,
                    "endPage": 0,
                    "existPrevPage": false,
                    "existNextPage": false,
                },
            })
        );
    }

    proptest! {
        #[test]
        fn empty_result_is_all_zero(page in -5i64..1000, record_size in 1i64..100, page_size in 1i64..50) {
            let pagination = Pagination::compute(0, &params(page, record_size, page_size));
            prop_assert_eq!(pagination.total_page_count, 0);
            prop_assert_eq!(pagination.start_page, 0);
            prop_assert_eq!(pagination.end_page, 0);
            prop_assert_eq!(pagination.limit_start, 0);
            prop_assert!(!pagination.exist_prev_page);
            prop_assert!(!pagination.exist_next_page);
        }

        #[test]
        fn window_contains_effective_page(
            total in 1i64..100_000,
            page in 1i64..20_000,
            record_size in 1i64..100,
            page_size in 1i64..50
        ) {
            let (request, pagination) = params(page, record_size, page_size).paginate(total);
            prop_assert_eq!(request.page(), pagination.page);
            prop_assert_eq!(pagination.page, page.min(pagination.total_page_count));
            prop_assert!(1 <= pagination.start_page);
            prop_assert!(pagination.start_page <= pagination.page);
            prop_assert!(pagination.page <= pagination.end_page);
            prop_assert!(pagination.end_page <= pagination.total_page_count);
            prop_assert!(pagination.end_page - pagination.start_page < page_size);
            prop_assert_eq!((pagination.start_page - 1) % page_size, 0);
            prop_assert_eq!(pagination.limit_start, request.offset());
            prop_assert!(pagination.limit_start < total);
        }

        #[test]
        fn total_page_count_is_ceiling(total in 1i64..1_000_000, record_size in 1i64..500) {
            let pagination = Pagination::compute(total, &params(1, record_size, 10));
            prop_assert!((pagination.total_page_count - 1) * record_size < total);
            prop_assert!(pagination.total_page_count * record_size >= total);
        }

        #[test]
        fn flags_match_window_bounds(
            total in 1i64..100_000,
            page in 1i64..20_000,
            record_size in 1i64..100,
            page_size in 1i64..50
        ) {
            let pagination = Pagination::compute(total, &params(page, record_size, page_size));
            prop_assert_eq!(pagination.exist_prev_page, pagination.start_page > 1);
            prop_assert_eq!(
                pagination.exist_next_page,
                pagination.end_page * record_size < total
            );
            prop_assert_eq!(
                pagination.exist_next_page,
                pagination.end_page < pagination.total_page_count
            );
        }
    }
}
