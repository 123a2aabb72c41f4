use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_RECORD_SIZE: i64 = 10;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchParamsError {
    #[error("recordSize must be greater than 0, got {0}")]
    RecordSize(i64),
    #[error("pageSize must be greater than 0, got {0}")]
    PageSize(i64),
}

/// Paging and search request of a listing call.
///
/// `record_size` and `page_size` are always positive. `page` is not range
/// checked: pages past the end are pulled back by [`SearchParams::paginate`],
/// pages below 1 are passed through and give a negative offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSearchParams")]
pub struct SearchParams {
    page: i64,
    record_size: i64,
    page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchParams {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_record_size")]
    record_size: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
    keyword: Option<String>,
    search_type: Option<String>,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_record_size() -> i64 {
    DEFAULT_RECORD_SIZE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl TryFrom<RawSearchParams> for SearchParams {
    type Error = SearchParamsError;

    fn try_from(raw: RawSearchParams) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.page, raw.record_size, raw.page_size)?
            .with_keyword(raw.keyword)
            .with_search_type(raw.search_type))
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            record_size: DEFAULT_RECORD_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            keyword: None,
            search_type: None,
        }
    }
}

impl SearchParams {
    pub fn new(page: i64, record_size: i64, page_size: i64) -> Result<Self, SearchParamsError> {
        if record_size <= 0 {
            return Err(SearchParamsError::RecordSize(record_size));
        }
        if page_size <= 0 {
            return Err(SearchParamsError::PageSize(page_size));
        }
        Ok(Self {
            page,
            record_size,
            page_size,
            keyword: None,
            search_type: None,
        })
    }

    pub fn with_page(self, page: i64) -> Self {
        Self { page, ..self }
    }

    pub fn with_keyword(self, keyword: Option<String>) -> Self {
        Self { keyword, ..self }
    }

    pub fn with_search_type(self, search_type: Option<String>) -> Self {
        Self {
            search_type,
            ..self
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn record_size(&self) -> i64 {
        self.record_size
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn search_type(&self) -> Option<&str> {
        self.search_type.as_deref()
    }

    /// Row offset of the requested page, before any clamping.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.record_size)
    }

    pub fn limit(&self) -> i64 {
        self.record_size
    }
}
