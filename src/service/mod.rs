//! Validation, existence checks and mutations between the handlers and the store.

mod articles;
mod comments;
pub mod guard;
mod query;
pub use articles::{ArticleListParams, ArticleService};
pub use comments::CommentService;
pub use query::{
    validate, validate_order, validate_sort_key, ArticleQuery, Outcome, QueryKind, SortKey, SortOrder, SortTarget,
    COMMENT_COUNT, DEFAULT_SORT_COLUMN,
};
