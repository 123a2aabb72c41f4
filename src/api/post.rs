use anyhow::anyhow;
use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::get,
    Json, Router,
};
use log::debug;
use serde_json::{json, Value};
use tokio_postgres::types::ToSql;

use crate::{
    error::AppError,
    middleware::ShortAlwaysCacheMiddleware,
    state::{AppState, STATE},
    types::{Pagination, PagingResponse, Post, PostSearch, SearchParams, POST_COLUMNS},
};

pub fn routes() -> Router<AppState> {
    let detail = Router::new()
        .route("/:id", get(post))
        .route_layer(middleware::from_fn_with_state(
            STATE.clone(),
            ShortAlwaysCacheMiddleware::<false>::handler,
        ));

    Router::new().route("/", get(posts)).merge(detail)
}

/// What the post list does once the matching count is known.
#[derive(Debug, PartialEq)]
pub enum ListPlan {
    /// Nothing matched; the request is echoed back untouched.
    Empty(SearchParams),
    /// Fetch the rows of `search`, whose page is already corrected.
    Page {
        search: SearchParams,
        pagination: Pagination,
    },
}

pub fn plan(search: SearchParams, count: i64) -> Result<ListPlan, AppError> {
    if count < 1 {
        return Ok(ListPlan::Empty(search));
    }
    if search.page() < 1 {
        return Err(AppError::bad_request(anyhow!(
            "page must be greater than 0, got {}",
            search.page()
        )));
    }
    let (search, pagination) = search.paginate(count);
    Ok(ListPlan::Page { search, pagination })
}

pub async fn posts(
    Query(search): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let postgres = state.postgres_pool.get().await?;
    let filter = PostSearch::new(&search);

    let count = postgres
        .query_one(filter.count_query().as_str(), &filter.args())
        .await?
        .try_get::<_, i64>("count")?;

    let (search, pagination) = match plan(search, count)? {
        ListPlan::Empty(search) => {
            return Ok(Json(json!({
                "data": PagingResponse::<Post>::empty(),
                "search": search,
            })));
        }
        ListPlan::Page { search, pagination } => (search, pagination),
    };
    debug!(
        "Listing posts: {} records, page {}/{}, offset {}",
        pagination.total_record_count,
        pagination.page,
        pagination.total_page_count,
        pagination.limit_start
    );

    let offset = search.offset();
    let limit = search.limit();
    let mut args = filter.args();
    args.extend_from_slice(&[&offset as &(dyn ToSql + Sync), &limit]);

    let results = postgres.query(filter.list_query().as_str(), &args).await?;
    let list = results
        .iter()
        .map(Post::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(json!({
        "data": PagingResponse::new(list, pagination),
        "search": search,
    })))
}

pub async fn post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let id = id.parse::<i64>().map_err(AppError::bad_request)?;
    let postgres = state.postgres_pool.get().await?;

    let results = postgres
        .query(
            format!("SELECT {POST_COLUMNS} FROM tb_post WHERE id = $1 AND delete_yn = false LIMIT 1")
                .as_str(),
            &[&id],
        )
        .await?;
    let result = results.first().ok_or_else(AppError::not_found)?;

    Ok(Json(json!({
        "data": Post::try_from(result)?,
    })))
}
