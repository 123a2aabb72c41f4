mod pagination;
mod post;
mod search;

pub use pagination::{Pagination, PagingResponse};
pub use post::{Post, PostSearch, SearchType, POST_COLUMNS};
pub use search::{
    SearchParams, SearchParamsError, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_RECORD_SIZE,
};
