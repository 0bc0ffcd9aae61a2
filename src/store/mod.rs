//! Persistence seam. Services talk to a `Store`; the binary decides which one.

mod postgres;
#[cfg(any(test, feature = "test-support"))]
mod memory;

pub use postgres::PgStore;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;

use crate::config::VotePolicy;
use crate::error::AppError;
use crate::models::{Article, Comment, NewComment, Topic, User};
use crate::service::ArticleQuery;
use async_trait::async_trait;
use std::collections::HashSet;

/// Every read and write the API performs. Each method is one round trip;
/// nothing here spans a transaction.
#[async_trait]
pub trait Store: Send + Sync {
    async fn topics(&self) -> Result<Vec<Topic>, AppError>;

    /// Live set of topic slugs; the allow-list for the topic filter.
    async fn topic_slugs(&self) -> Result<HashSet<String>, AppError>;

    /// Live set of article column names; the allow-list for `sort_by`.
    async fn article_columns(&self) -> Result<HashSet<String>, AppError>;

    async fn articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, AppError>;

    async fn article_by_id(&self, article_id: i32) -> Result<Option<Article>, AppError>;

    /// Adds `inc_votes` to the article's votes in one statement. `None` if no row matched.
    async fn increment_votes(
        &self,
        article_id: i32,
        inc_votes: i32,
        policy: VotePolicy,
    ) -> Result<Option<Article>, AppError>;

    /// Newest first.
    async fn comments_for_article(&self, article_id: i32) -> Result<Vec<Comment>, AppError>;

    async fn comments(&self) -> Result<Vec<Comment>, AppError>;

    /// Fails with `NotFound` when the author is not a known user.
    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, AppError>;

    /// Returns the deleted row, or `None` when nothing matched.
    async fn delete_comment(&self, comment_id: i32) -> Result<Option<Comment>, AppError>;

    async fn users(&self) -> Result<Vec<User>, AppError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
