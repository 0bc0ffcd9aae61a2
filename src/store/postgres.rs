//! PostgreSQL store: runs the queries from `crate::sql` on a shared pool.

use super::Store;
use crate::config::VotePolicy;
use crate::error::AppError;
use crate::models::{Article, Comment, NewComment, Topic, User};
use crate::service::ArticleQuery;
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::PgPool;
use std::collections::HashSet;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(PgStore { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_all<T>(&self, q: &QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_optional<T>(&self, q: &QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn fetch_strings(&self, q: &QueryBuf) -> Result<HashSet<String>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, String>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().collect())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn topics(&self) -> Result<Vec<Topic>, AppError> {
        self.fetch_all(&sql::select_topics()).await
    }

    async fn topic_slugs(&self) -> Result<HashSet<String>, AppError> {
        self.fetch_strings(&sql::select_topic_slugs()).await
    }

    async fn article_columns(&self) -> Result<HashSet<String>, AppError> {
        self.fetch_strings(&sql::select_article_columns()).await
    }

    async fn articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, AppError> {
        self.fetch_all(&sql::select_articles(query)).await
    }

    async fn article_by_id(&self, article_id: i32) -> Result<Option<Article>, AppError> {
        self.fetch_optional(&sql::select_article_by_id(article_id)).await
    }

    async fn increment_votes(
        &self,
        article_id: i32,
        inc_votes: i32,
        policy: VotePolicy,
    ) -> Result<Option<Article>, AppError> {
        self.fetch_optional(&sql::update_article_votes(article_id, inc_votes, policy))
            .await
    }

    async fn comments_for_article(&self, article_id: i32) -> Result<Vec<Comment>, AppError> {
        self.fetch_all(&sql::select_comments_by_article(article_id)).await
    }

    async fn comments(&self) -> Result<Vec<Comment>, AppError> {
        self.fetch_all(&sql::select_comments()).await
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let q = sql::insert_comment(comment);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Comment>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query.fetch_one(&self.pool).await.map_err(|e| {
            // Some(true): article reference broke (deleted after the guard ran).
            let missing_article = match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    Some(db.constraint().is_some_and(|c| c.contains("article")))
                }
                _ => None,
            };
            match missing_article {
                Some(true) => AppError::not_found("Article Not Found"),
                Some(false) => AppError::not_found("user not found"),
                None => AppError::Db(e),
            }
        })
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<Option<Comment>, AppError> {
        self.fetch_optional(&sql::delete_comment(comment_id)).await
    }

    async fn users(&self) -> Result<Vec<User>, AppError> {
        self.fetch_all(&sql::select_users()).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
