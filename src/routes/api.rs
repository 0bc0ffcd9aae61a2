//! The /api surface. Anything unmatched, including a known path with an
//! unsupported method, answers 404 `Route Not Found`.

use crate::error::AppError;
use crate::handlers::{articles, comments, endpoints, topics, users};
use crate::state::AppState;
use axum::{
    routing::{delete, get},
    Router,
};

pub async fn route_not_found() -> AppError {
    AppError::not_found("Route Not Found")
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api", get(endpoints::describe).fallback(route_not_found))
        .route("/api/topics", get(topics::list).fallback(route_not_found))
        .route("/api/articles", get(articles::list).fallback(route_not_found))
        .route(
            "/api/articles/:article_id",
            get(articles::read).patch(articles::update_votes).fallback(route_not_found),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(articles::list_comments)
                .post(articles::create_comment)
                .fallback(route_not_found),
        )
        .route("/api/comments", get(comments::list).fallback(route_not_found))
        .route(
            "/api/comments/:comment_id",
            delete(comments::delete).fallback(route_not_found),
        )
        .route("/api/users", get(users::list).fallback(route_not_found))
        .fallback(route_not_found)
        .with_state(state)
}
