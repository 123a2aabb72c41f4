use axum::Router;

use crate::state::AppState;

pub mod post;

pub fn routes() -> Router<AppState> {
    Router::new().nest("/post", post::routes())
}
